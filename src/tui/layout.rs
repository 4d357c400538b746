// Screen layout: panel arrangement and sizing.
//
// +----------------------------------------------------------+
// | Header (1 row)                                            |
// +------------------+---------------------------------------+
// | Players (fill)   | Stat comparison (50%)                 |
// |                  +-------------------+-------------------+
// +------------------+ Skill radar       | Career timeline   |
// | Selected (8)     |                   |                   |
// +------------------+-------------------+-------------------+
// | Pitcher visualizer (12 rows)                              |
// +----------------------------------------------------------+
// | Footer (1 row)                                            |
// +----------------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub header: Rect,
    /// Searchable player list.
    pub player_list: Rect,
    /// Cards for the current selection.
    pub selected: Rect,
    pub bar_chart: Rect,
    pub radar_chart: Rect,
    pub timeline_chart: Rect,
    /// Pitcher stat cards, pitch mix and ERA timeline.
    pub pitcher: Rect,
    /// Key hints or the search prompt.
    pub footer: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: header(1) | middle(fill) | pitcher(12) | footer(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(1),
        ])
        .split(area);

    let header = vertical[0];
    let middle = vertical[1];
    let pitcher = vertical[2];
    let footer = vertical[3];

    // Horizontal: sidebar (30%) | charts (70%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(middle);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(8)])
        .split(horizontal[0]);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(horizontal[1]);

    let lower_charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(charts[1]);

    AppLayout {
        header,
        player_list: sidebar[0],
        selected: sidebar[1],
        bar_chart: charts[0],
        radar_chart: lower_charts[0],
        timeline_chart: lower_charts[1],
        pitcher,
        footer,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
