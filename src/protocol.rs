// Messages exchanged between background tasks, the input handler and the TUI.

use crate::binding::Action;
use crate::loader::LoadOutcome;

/// Updates pushed to the TUI from background tasks.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// The pitcher CSV load finished (fetched or fallback).
    PitcherLoaded(Box<LoadOutcome>),
}

/// Commands produced by the input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Forward to the dashboard binding.
    Dashboard(Action),
    /// Re-derive the pitcher ERA timeline.
    RefreshPitcher,
    Quit,
}
