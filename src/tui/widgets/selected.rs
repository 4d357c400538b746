// Selected players panel: one card per selection, in color order, showing
// the active stat. `x` on the focused card removes it.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::charts::format_value;
use super::term_color;
use crate::chart::solid;
use crate::projection::StatKey;
use crate::record::StatRecord;
use crate::tui::{Focus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let selection = state.dashboard.selection();
    let focused = state.focus == Focus::Selected;
    let border = if focused { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" Selected ({}) ", selection.len()));

    if selection.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No players selected",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let stat = state.dashboard.stat();
    let items: Vec<ListItem> = selection
        .all()
        .iter()
        .enumerate()
        .map(|(i, record)| card(i, record, stat))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(state.selected_cursor.min(selection.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn card(index: usize, record: &StatRecord, stat: StatKey) -> ListItem<'static> {
    let color = term_color(solid(index));
    let value = if record.field(stat.field()).is_missing() {
        "--".to_string()
    } else {
        format_value(record.numeric(stat.field()))
    };
    ListItem::new(Line::from(vec![
        Span::styled("■ ", Style::default().fg(color)),
        Span::styled(
            record.name().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} {}", stat.code(), value),
            Style::default().fg(Color::Gray),
        ),
        Span::styled("  [x]", Style::default().fg(Color::Red)),
    ]))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
