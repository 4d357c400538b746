// Pitcher visualizer panel: stat cards, pitch mix and ERA timeline.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::charts::{render_doughnut, render_line};
use crate::loader::DataOrigin;
use crate::pitcher::PitcherPanel;

pub fn render(frame: &mut Frame, area: Rect, panel: &PitcherPanel) {
    if panel.is_loading() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Loading pitcher data...",
            Style::default().fg(Color::Yellow),
        )))
        .block(Block::default().borders(Borders::ALL).title(" Pitcher "));
        frame.render_widget(paragraph, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(area);

    render_cards(frame, columns[0], panel);
    render_doughnut(frame, columns[1], panel.mix());
    render_line(frame, columns[2], panel.era());
}

fn render_cards(frame: &mut Frame, area: Rect, panel: &PitcherPanel) {
    let mut lines: Vec<Line> = panel
        .cards()
        .into_iter()
        .skip(1)
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!(" {label:<11}"), Style::default().fg(Color::Gray)),
                Span::styled(
                    value,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    if let Some(origin) = panel.origin() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", origin_note(origin)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let name = panel.record().map(|r| r.name()).unwrap_or("Pitcher");
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {name} "),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// One-line description of where the shown record came from.
pub fn origin_note(origin: &DataOrigin) -> String {
    match origin {
        DataOrigin::Fetched { source } => format!("Source: {source}"),
        DataOrigin::Fallback { reason } => format!("Demo data ({reason})"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_pitchers, LoadError, TextFetcher};
    use async_trait::async_trait;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::time::Duration;

    struct Body(&'static str);

    #[async_trait]
    impl TextFetcher for Body {
        async fn fetch_text(&self, _source: &str) -> Result<String, LoadError> {
            Ok(self.0.to_string())
        }
    }

    fn rendered(panel: &PitcherPanel) -> String {
        let backend = ratatui::backend::TestBackend::new(140, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), panel))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn loading_state() {
        assert!(rendered(&PitcherPanel::new()).contains("Loading pitcher data..."));
    }

    #[tokio::test]
    async fn demo_pitcher_cards() {
        let mut panel = PitcherPanel::new();
        let outcome = load_pitchers(&Body(""), "p.csv", Duration::from_secs(1)).await;
        panel.apply_outcome(outcome, &mut SmallRng::seed_from_u64(2));

        let text = rendered(&panel);
        assert!(text.contains("Jacob deGrom"));
        assert!(text.contains("84-57"));
        assert!(text.contains("2.53"));
        assert!(text.contains("1607"));
        assert!(text.contains("Fastball 52.3%"));
        assert!(text.contains("ERA Over Time"));
        assert!(text.contains("Demo data"));
    }

    #[test]
    fn origin_notes() {
        let fetched = DataOrigin::Fetched {
            source: "data/p.csv".into(),
        };
        assert_eq!(origin_note(&fetched), "Source: data/p.csv");
        let fallback = DataOrigin::Fallback {
            reason: "p.csv returned an empty body".into(),
        };
        assert_eq!(origin_note(&fallback), "Demo data (p.csv returned an empty body)");
    }
}
