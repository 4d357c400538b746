// Pitcher visualizer state.
//
// Starts in `Loading` until the background CSV load reports back, then holds
// the shown record, where it came from, and the two chart handles (pitch mix
// doughnut and ERA timeline). The ERA timeline is randomized and rebuilt on
// every redraw of the panel rather than cached.

use rand::Rng;
use tracing::{debug, info};

use crate::chart::{ChartDescriptor, ChartKind, ChartOptions};
use crate::loader::{demo_pitcher, DataOrigin, LoadOutcome};
use crate::projection::{era_timeline, key_stats, pitch_mix};
use crate::record::StatRecord;
use crate::surface::ChartHandle;

#[derive(Debug, Clone)]
pub enum PitcherStatus {
    Loading,
    Loaded {
        record: StatRecord,
        origin: DataOrigin,
    },
}

#[derive(Debug, Clone)]
pub struct PitcherPanel {
    status: PitcherStatus,
    mix: ChartHandle,
    era: ChartHandle,
}

impl Default for PitcherPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PitcherPanel {
    pub fn new() -> Self {
        PitcherPanel {
            status: PitcherStatus::Loading,
            mix: ChartHandle::new(
                ChartKind::Doughnut,
                ChartDescriptor::empty(ChartKind::Doughnut, ChartOptions::titled("Pitch Types (%)")),
            ),
            era: ChartHandle::new(
                ChartKind::Line,
                ChartDescriptor::empty(ChartKind::Line, ChartOptions::titled("ERA Over Time")),
            ),
        }
    }

    /// Show the first record of a finished load and draw both charts.
    pub fn apply_outcome<R: Rng + ?Sized>(&mut self, outcome: LoadOutcome, rng: &mut R) {
        let (records, origin) = outcome.into_parts();
        let record = records.into_iter().next().unwrap_or_else(demo_pitcher);

        match &origin {
            DataOrigin::Fetched { source } => {
                info!("Showing pitcher {} from {}", record.name(), source)
            }
            DataOrigin::Fallback { reason } => {
                info!("Showing demo pitcher {} ({})", record.name(), reason)
            }
        }

        self.mix.replace(pitch_mix(&record));
        self.mix.update();
        self.era.replace(era_timeline(&record, rng));
        self.era.update();
        self.status = PitcherStatus::Loaded { record, origin };
    }

    /// Redraw the ERA timeline with fresh values. Returns false while loading.
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let PitcherStatus::Loaded { record, .. } = &self.status else {
            return false;
        };
        debug!(pitcher = %record.name(), "re-deriving ERA timeline");
        self.era.replace(era_timeline(record, rng));
        self.era.update();
        true
    }

    pub fn status(&self) -> &PitcherStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, PitcherStatus::Loading)
    }

    pub fn record(&self) -> Option<&StatRecord> {
        match &self.status {
            PitcherStatus::Loaded { record, .. } => Some(record),
            PitcherStatus::Loading => None,
        }
    }

    pub fn origin(&self) -> Option<&DataOrigin> {
        match &self.status {
            PitcherStatus::Loaded { origin, .. } => Some(origin),
            PitcherStatus::Loading => None,
        }
    }

    /// Stat cards for the loaded record; empty while loading.
    pub fn cards(&self) -> Vec<(&'static str, String)> {
        self.record().map(key_stats).unwrap_or_default()
    }

    pub fn mix(&self) -> &ChartHandle {
        &self.mix
    }

    pub fn era(&self) -> &ChartHandle {
        &self.era
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

    async fn outcome(body: &'static str) -> LoadOutcome {
        load_pitchers(&Body(body), "mem://pitchers.csv", Duration::from_secs(1)).await
    }

    #[test]
    fn starts_loading() {
        let panel = PitcherPanel::new();
        assert!(panel.is_loading());
        assert!(panel.record().is_none());
        assert!(panel.cards().is_empty());
        assert!(panel.era().data().is_empty());
        assert_eq!(panel.mix().kind(), ChartKind::Doughnut);
    }

    #[tokio::test]
    async fn loaded_record_draws_both_charts() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut panel = PitcherPanel::new();
        panel.apply_outcome(
            outcome("name,team,era,fastball_percent,slider_percent\nJake,ATL,2.50,60,40\n").await,
            &mut rng,
        );

        assert!(!panel.is_loading());
        assert_eq!(panel.record().unwrap().name(), "Jake");
        assert!(!panel.origin().unwrap().is_fallback());
        assert_eq!(panel.mix().data().datasets[0].values, vec![60.0, 40.0, 0.0, 0.0]);
        assert_eq!(panel.era().data().datasets[0].values.len(), 10);
        assert_eq!(panel.mix().revision(), 1);
        assert_eq!(panel.era().revision(), 1);

        let cards = panel.cards();
        assert_eq!(cards[0], ("Name", "Jake".to_string()));
        assert_eq!(cards[1], ("Team", "ATL".to_string()));
        assert_eq!(cards[2], ("W-L Record", "--".to_string()));
    }

    #[tokio::test]
    async fn empty_body_shows_demo_pitcher() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut panel = PitcherPanel::new();
        panel.apply_outcome(outcome("").await, &mut rng);
        assert_eq!(panel.record().unwrap().name(), "Jacob deGrom");
        assert!(panel.origin().unwrap().is_fallback());
        assert_eq!(
            panel.mix().data().datasets[0].values,
            vec![52.3, 32.1, 10.5, 5.1]
        );
        assert_eq!(panel.cards()[2], ("W-L Record", "84-57".to_string()));
    }

    #[tokio::test]
    async fn refresh_rederives_era_only() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut panel = PitcherPanel::new();
        panel.apply_outcome(outcome("").await, &mut rng);

        assert!(panel.refresh(&mut rng));
        assert_eq!(panel.era().revision(), 2);
        assert_eq!(panel.mix().revision(), 1);
        for v in &panel.era().data().datasets[0].values {
            assert!((2.28..=2.78).contains(v), "{v} out of range");
        }
    }

    #[test]
    fn refresh_while_loading_is_noop() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut panel = PitcherPanel::new();
        assert!(!panel.refresh(&mut rng));
        assert_eq!(panel.era().revision(), 0);
    }
}
