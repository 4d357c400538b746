// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` wrapping the `Dashboard` (selection + charts) and
// the pitcher panel, plus purely visual state such as cursors and focus.
// Background tasks push `UiUpdate` messages over an mpsc channel; key presses
// become `UserCommand`s that are applied in place. The frame is redrawn at
// ~30 fps from whatever the chart handles currently hold.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::{Stream, StreamExt};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::binding::Dashboard;
use crate::pitcher::PitcherPanel;
use crate::projection::StatKey;
use crate::protocol::{UiUpdate, UserCommand};
use crate::store::RecordStore;

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which pane receives cursor keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Players,
    Selected,
}

pub struct ViewState {
    pub dashboard: Dashboard,
    pub pitcher: PitcherPanel,
    pub focus: Focus,
    /// Index into `dashboard.visible_rows()`.
    pub list_cursor: usize,
    /// Index into the current selection.
    pub selected_cursor: usize,
    /// Whether keystrokes are being typed into the search box.
    pub filter_mode: bool,
    pub confirm_quit: bool,
}

impl Default for ViewState {
    /// Built-in roster, default stat, no cap.
    fn default() -> Self {
        ViewState::new(Dashboard::new(
            RecordStore::builtin(),
            StatKey::default(),
            None,
        ))
    }
}

impl ViewState {
    pub fn new(dashboard: Dashboard) -> Self {
        ViewState {
            dashboard,
            pitcher: PitcherPanel::new(),
            focus: Focus::Players,
            list_cursor: 0,
            selected_cursor: 0,
            filter_mode: false,
            confirm_quit: false,
        }
    }

    /// Name of the player row under the list cursor.
    pub fn cursor_row_name(&self) -> Option<String> {
        self.dashboard
            .visible_rows()
            .get(self.list_cursor)
            .map(|row| row.record.name().to_string())
    }

    /// Name of the selected-player card under the cursor.
    pub fn cursor_selected_name(&self) -> Option<String> {
        self.dashboard
            .selection()
            .all()
            .get(self.selected_cursor)
            .map(|r| r.name().to_string())
    }

    /// Keep both cursors inside their lists after the lists change.
    pub fn clamp_cursors(&mut self) {
        let rows = self.dashboard.visible_rows().len();
        self.list_cursor = self.list_cursor.min(rows.saturating_sub(1));
        let selected = self.dashboard.selection().len();
        self.selected_cursor = self.selected_cursor.min(selected.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// UiUpdate / UserCommand processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update<R: Rng + ?Sized>(state: &mut ViewState, update: UiUpdate, rng: &mut R) {
    match update {
        UiUpdate::PitcherLoaded(outcome) => {
            state.pitcher.apply_outcome(*outcome, rng);
        }
    }
}

/// Apply a command from the input handler. Returns true when the TUI should
/// exit.
pub fn dispatch<R: Rng + ?Sized>(state: &mut ViewState, command: UserCommand, rng: &mut R) -> bool {
    match command {
        UserCommand::Dashboard(action) => {
            let redraw = state.dashboard.apply(action);
            if redraw.any() {
                debug!(?redraw, "charts redrawn");
            }
            state.clamp_cursors();
            false
        }
        UserCommand::RefreshPitcher => {
            state.pitcher.refresh(rng);
            false
        }
        UserCommand::Quit => true,
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::header::render(frame, layout.header, state);
    widgets::player_list::render(frame, layout.player_list, state);
    widgets::selected::render(frame, layout.selected, state);
    widgets::charts::render_bar(frame, layout.bar_chart, state.dashboard.bar());
    widgets::charts::render_radar(frame, layout.radar_chart, state.dashboard.radar());
    widgets::charts::render_timeline(frame, layout.timeline_chart, state.dashboard.timeline());
    widgets::pitcher::render(frame, layout.pitcher, &state.pitcher);
    widgets::footer::render(frame, layout.footer, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// Initializes the terminal with a panic hook that restores it, then selects
/// over background updates, keyboard input and the render tick. The terminal
/// is restored on every exit path, including a failed draw.
pub async fn run(ui_rx: mpsc::Receiver<UiUpdate>, view_state: ViewState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let result = event_loop(ui_rx, EventStream::new(), view_state, |state| {
        terminal.draw(|frame| render_frame(frame, state))?;
        Ok(())
    })
    .await;

    ratatui::restore();
    info!("TUI closed");

    result
}

/// The select loop behind `run`. Returns when the user quits, input ends,
/// or `draw` fails.
async fn event_loop<S, D>(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    mut events: S,
    mut view_state: ViewState,
    mut draw: D,
) -> anyhow::Result<()>
where
    S: Stream<Item = std::io::Result<Event>> + Unpin,
    D: FnMut(&ViewState) -> anyhow::Result<()>,
{
    let mut rng = SmallRng::from_os_rng();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // The loader sends once and hangs up; a closed channel is not a reason
    // to exit.
    let mut ui_open = true;

    loop {
        tokio::select! {
            update = ui_rx.recv(), if ui_open => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update, &mut rng),
                    None => ui_open = false,
                }
            }

            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(command) = input::handle_key(key_event, &mut view_state) {
                            if dispatch(&mut view_state, command, &mut rng) {
                                return Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => return Ok(()),
                }
            }

            _ = render_tick.tick() => {
                draw(&view_state)?;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
