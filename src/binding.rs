// UI binding: routes user actions to the selection and keeps the three
// comparison charts in step with it.
//
// The host (terminal UI, tests) translates raw input into `Action`s and
// calls `Dashboard::apply`. Nothing here knows about rendering; the host
// redraws from the chart handles afterwards.

use std::sync::Arc;

use tracing::debug;

use crate::chart::{ChartDescriptor, ChartKind};
use crate::projection::{career_timeline, comparison_bar, skill_radar, StatKey};
use crate::record::StatRecord;
use crate::selection::{Selection, Toggled};
use crate::store::RecordStore;
use crate::surface::ChartHandle;

// ---------------------------------------------------------------------------
// Actions and results
// ---------------------------------------------------------------------------

/// User intents the dashboard reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A player row was clicked/activated.
    ToggleRow(String),
    /// The search box text changed.
    Search(String),
    /// The remove icon on a selected-player card was clicked. Handled on its
    /// own; it never also toggles the row.
    Remove(String),
    /// A different stat was picked for the comparison bar.
    SelectStat(StatKey),
}

/// Which charts an action redrew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    pub bar: bool,
    pub radar: bool,
    pub timeline: bool,
}

impl Redraw {
    pub const NONE: Redraw = Redraw {
        bar: false,
        radar: false,
        timeline: false,
    };

    pub const ALL: Redraw = Redraw {
        bar: true,
        radar: true,
        timeline: true,
    };

    pub const BAR: Redraw = Redraw {
        bar: true,
        radar: false,
        timeline: false,
    };

    pub fn any(&self) -> bool {
        self.bar || self.radar || self.timeline
    }
}

/// One entry of the player listing as the host should draw it.
#[derive(Debug, Clone)]
pub struct ListRow<'a> {
    pub record: &'a Arc<StatRecord>,
    pub selected: bool,
    /// Palette index when selected.
    pub color_index: Option<usize>,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub struct Dashboard {
    store: RecordStore,
    selection: Selection,
    search: String,
    stat: StatKey,
    /// Optional cap on simultaneous selections; `None` means unlimited.
    max_selected: Option<usize>,
    bar: ChartHandle,
    radar: ChartHandle,
    timeline: ChartHandle,
}

impl Dashboard {
    pub fn new(store: RecordStore, stat: StatKey, max_selected: Option<usize>) -> Self {
        let empty: &[Arc<StatRecord>] = &[];
        Dashboard {
            store,
            selection: Selection::new(),
            search: String::new(),
            stat,
            max_selected,
            bar: ChartHandle::new(ChartKind::Bar, comparison_bar(empty, stat)),
            radar: ChartHandle::new(ChartKind::Radar, skill_radar(empty)),
            timeline: ChartHandle::new(ChartKind::Line, career_timeline(empty)),
        }
    }

    /// Apply one user action and report which charts were redrawn.
    pub fn apply(&mut self, action: Action) -> Redraw {
        match action {
            Action::ToggleRow(name) => self.toggle_row(&name),
            Action::Search(text) => {
                debug!(query = %text, "search filter changed");
                self.search = text;
                Redraw::NONE
            }
            Action::Remove(name) => {
                if self.selection.remove_by_name(&name) {
                    debug!(player = %name, "removed from selection");
                    self.refresh_all();
                    Redraw::ALL
                } else {
                    Redraw::NONE
                }
            }
            Action::SelectStat(stat) => {
                self.stat = stat;
                self.refresh_bar();
                Redraw::BAR
            }
        }
    }

    fn toggle_row(&mut self, name: &str) -> Redraw {
        let Some(record) = self.store.get(name).cloned() else {
            debug!(player = %name, "toggle for unknown player ignored");
            return Redraw::NONE;
        };

        if !self.selection.contains(name) {
            if let Some(cap) = self.max_selected {
                if self.selection.len() >= cap {
                    debug!(player = %name, cap, "selection cap reached");
                    return Redraw::NONE;
                }
            }
        }

        match self.selection.toggle(record) {
            Toggled::Selected => debug!(player = %name, "selected"),
            Toggled::Deselected => debug!(player = %name, "deselected"),
        }
        self.refresh_all();
        Redraw::ALL
    }

    fn refresh_all(&mut self) {
        self.refresh_bar();
        self.radar.replace(skill_radar(self.selection.all()));
        self.radar.update();
        self.timeline.replace(career_timeline(self.selection.all()));
        self.timeline.update();
    }

    fn refresh_bar(&mut self) {
        self.bar.replace(comparison_bar(self.selection.all(), self.stat));
        self.bar.update();
    }

    // -- read access for hosts --

    /// Rows matching the current search, in store order.
    pub fn visible_rows(&self) -> Vec<ListRow<'_>> {
        self.store
            .filter(&self.search)
            .into_iter()
            .map(|record| {
                let color_index = self.selection.color_index(record.name());
                ListRow {
                    record,
                    selected: color_index.is_some(),
                    color_index,
                }
            })
            .collect()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn stat(&self) -> StatKey {
        self.stat
    }

    pub fn max_selected(&self) -> Option<usize> {
        self.max_selected
    }

    pub fn bar(&self) -> &ChartHandle {
        &self.bar
    }

    pub fn radar(&self) -> &ChartHandle {
        &self.radar
    }

    pub fn timeline(&self) -> &ChartHandle {
        &self.timeline
    }

    /// Current descriptors, bar/radar/timeline.
    pub fn charts(&self) -> [&ChartDescriptor; 3] {
        [self.bar.data(), self.radar.data(), self.timeline.data()]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::new(RecordStore::builtin(), StatKey::HomeRuns, None)
    }

    fn toggle(d: &mut Dashboard, name: &str) -> Redraw {
        d.apply(Action::ToggleRow(name.to_string()))
    }

    #[test]
    fn starts_with_empty_charts() {
        let d = dashboard();
        assert!(d.selection().is_empty());
        assert!(d.bar().data().is_empty());
        assert_eq!(d.radar().data().labels.len(), 6);
        assert_eq!(d.bar().revision(), 0);
    }

    #[test]
    fn row_toggle_redraws_all_charts() {
        let mut d = dashboard();
        assert_eq!(toggle(&mut d, "B Bonds"), Redraw::ALL);
        assert!(d.selection().contains("B Bonds"));
        assert_eq!(d.bar().data().labels, vec!["B Bonds"]);
        assert_eq!(d.bar().data().datasets[0].values, vec![762.0]);
        assert_eq!(d.radar().data().datasets.len(), 1);
        assert_eq!(d.timeline().data().datasets.len(), 1);
        assert_eq!(d.bar().revision(), 1);
        assert_eq!(d.radar().revision(), 1);
        assert_eq!(d.timeline().revision(), 1);

        toggle(&mut d, "B Bonds");
        assert!(d.selection().is_empty());
        assert!(d.bar().data().labels.is_empty());
        assert_eq!(d.bar().revision(), 2);
    }

    #[test]
    fn unknown_row_is_ignored() {
        let mut d = dashboard();
        assert_eq!(toggle(&mut d, "Nobody"), Redraw::NONE);
        assert!(d.selection().is_empty());
    }

    #[test]
    fn remove_does_not_double_toggle() {
        let mut d = dashboard();
        toggle(&mut d, "B Bonds");
        toggle(&mut d, "H Aaron");
        assert_eq!(d.apply(Action::Remove("B Bonds".into())), Redraw::ALL);
        assert_eq!(d.selection().names(), vec!["H Aaron"]);
        // The row for the removed player is no longer marked selected.
        let rows = d.visible_rows();
        let bonds = rows.iter().find(|r| r.record.name() == "B Bonds").unwrap();
        assert!(!bonds.selected);
        // Removing again is a quiet no-op.
        assert_eq!(d.apply(Action::Remove("B Bonds".into())), Redraw::NONE);
        assert_eq!(d.selection().names(), vec!["H Aaron"]);
    }

    #[test]
    fn stat_change_only_redraws_bar() {
        let mut d = dashboard();
        toggle(&mut d, "B Bonds");
        let radar_rev = d.radar().revision();
        let timeline_rev = d.timeline().revision();

        assert_eq!(d.apply(Action::SelectStat(StatKey::Avg)), Redraw::BAR);
        assert_eq!(d.stat(), StatKey::Avg);
        assert_eq!(d.bar().data().datasets[0].label, "Batting Average");
        assert!((d.bar().data().datasets[0].values[0] - 0.298).abs() < 1e-9);
        assert_eq!(d.radar().revision(), radar_rev);
        assert_eq!(d.timeline().revision(), timeline_rev);
    }

    #[test]
    fn search_filters_rows_without_touching_selection() {
        let mut d = dashboard();
        toggle(&mut d, "B Bonds");
        assert_eq!(d.apply(Action::Search("AAR".into())), Redraw::NONE);
        let names: Vec<&str> = d.visible_rows().iter().map(|r| r.record.name()).collect();
        assert_eq!(names, vec!["H Aaron"]);
        assert!(d.selection().contains("B Bonds"));

        d.apply(Action::Search(String::new()));
        assert_eq!(d.visible_rows().len(), d.store().len());
    }

    #[test]
    fn rows_carry_selection_colors() {
        let mut d = dashboard();
        toggle(&mut d, "H Aaron");
        toggle(&mut d, "B Bonds");
        let rows = d.visible_rows();
        assert_eq!(rows[0].record.name(), "B Bonds");
        assert_eq!(rows[0].color_index, Some(1));
        assert_eq!(rows[1].color_index, Some(0));
        assert!(rows[2].color_index.is_none());
    }

    #[test]
    fn cap_blocks_inserts_but_not_removals() {
        let mut d = Dashboard::new(RecordStore::builtin(), StatKey::HomeRuns, Some(2));
        toggle(&mut d, "B Bonds");
        toggle(&mut d, "H Aaron");
        assert_eq!(toggle(&mut d, "B Ruth"), Redraw::NONE);
        assert_eq!(d.selection().len(), 2);
        assert_eq!(toggle(&mut d, "B Bonds"), Redraw::ALL);
        assert_eq!(toggle(&mut d, "B Ruth"), Redraw::ALL);
        assert_eq!(d.selection().names(), vec!["H Aaron", "B Ruth"]);
    }

    #[test]
    fn chart_order_follows_selection_order() {
        let mut d = dashboard();
        toggle(&mut d, "B Bonds");
        toggle(&mut d, "H Aaron");
        d.apply(Action::Remove("B Bonds".into()));
        toggle(&mut d, "B Bonds");
        assert_eq!(d.bar().data().labels, vec!["H Aaron", "B Bonds"]);
        let radar = d.radar().data();
        assert_eq!(radar.datasets[0].label, "H Aaron");
        assert_eq!(radar.datasets[1].label, "B Bonds");
    }
}
