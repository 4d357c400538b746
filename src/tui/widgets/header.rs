// Header bar: app title, active stat, selection count, pitcher data state.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::BANNER_BG;
use crate::loader::DataOrigin;
use crate::pitcher::PitcherPanel;
use crate::tui::ViewState;

const TITLE: &str = "Baseball Legends Visualizer";

/// Render the header into the given area.
///
/// Layout: [title] | Stat: HR | Selected: n[/cap] | Pitcher: <state>
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let dashboard = &state.dashboard;
    let sep = || Span::styled(" | ", Style::default().fg(Color::Gray));

    let mut spans = vec![Span::styled(
        format!(" {TITLE} "),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];

    spans.push(sep());
    spans.push(Span::styled(
        format!("Stat: {} ({})", dashboard.stat().code(), dashboard.stat().label()),
        Style::default().fg(Color::White),
    ));

    spans.push(sep());
    spans.push(Span::styled(
        selection_count(dashboard.selection().len(), dashboard.max_selected()),
        Style::default().fg(Color::White),
    ));

    spans.push(sep());
    let (text, color) = pitcher_state(&state.pitcher);
    spans.push(Span::styled(text, Style::default().fg(color)));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(BANNER_BG));
    frame.render_widget(paragraph, area);
}

pub fn selection_count(selected: usize, cap: Option<usize>) -> String {
    match cap {
        Some(cap) => format!("Selected: {selected}/{cap}"),
        None => format!("Selected: {selected}"),
    }
}

/// Short pitcher load state and its color.
pub fn pitcher_state(panel: &PitcherPanel) -> (String, Color) {
    match panel.origin() {
        None => ("Pitcher: loading...".to_string(), Color::Yellow),
        Some(DataOrigin::Fetched { .. }) => ("Pitcher: live data".to_string(), Color::Green),
        Some(DataOrigin::Fallback { .. }) => ("Pitcher: demo data".to_string(), Color::LightRed),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
