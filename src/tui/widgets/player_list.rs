// Player list widget: searchable roster with selection markers.
//
// Each row reads "Name (position)"; selected players get a dot in their
// series color. The list cursor is highlighted while the list has focus.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use super::term_color;
use crate::binding::ListRow;
use crate::chart::solid;
use crate::tui::{Focus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let rows = state.dashboard.visible_rows();
    let items: Vec<ListItem> = rows.iter().map(row_item).collect();
    let title = build_title(state.dashboard.search(), rows.len(), state.dashboard.store().len());

    let focused = state.focus == Focus::Players;
    let border = if focused { Color::Cyan } else { Color::Gray };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if focused && !rows.is_empty() {
        list_state.select(Some(state.list_cursor.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn row_item(row: &ListRow<'_>) -> ListItem<'static> {
    let marker = match row.color_index {
        Some(i) => Span::styled("● ", Style::default().fg(term_color(solid(i)))),
        None => Span::raw("  "),
    };
    let style = if row.selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(vec![
        marker,
        Span::styled(row.record.list_label(), style),
    ]))
}

/// "Players (shown)" or, with a search, `Players "text" (shown/total)`.
pub fn build_title(search: &str, shown: usize, total: usize) -> String {
    if search.is_empty() {
        format!(" Players ({shown}) ")
    } else {
        format!(" Players \"{search}\" ({shown}/{total}) ")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
