// Footer bar: key hints, or the search prompt while typing a filter.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::BANNER_BG;
use crate::tui::{Focus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = if state.filter_mode {
        Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}_", state.dashboard.search()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "   Enter:keep  Esc:clear",
                Style::default().fg(Color::Gray),
            ),
        ])
    } else {
        Line::from(Span::styled(
            hints(state.focus),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        ))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(BANNER_BG));
    frame.render_widget(paragraph, area);
}

/// Key hints for the focused pane.
pub fn hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Players => {
            " j/k:Move | Enter:Toggle | /:Search | s/S:Stat | Tab:Selected | r:Refresh ERA | q:Quit"
        }
        Focus::Selected => {
            " j/k:Move | x:Remove | s/S:Stat | Tab:Players | r:Refresh ERA | q:Quit"
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
