// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into `UserCommand`s (dashboard actions,
// pitcher refresh, quit) or into local ViewState mutations (cursor movement,
// focus, filter and quit-confirm modes).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Focus, ViewState};
use crate::binding::Action;
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press must be applied to the
/// dashboard or the app (toggle, remove, search, stat change, refresh,
/// quit). Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.filter_mode {
        return handle_filter_mode(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            move_cursor_up(view_state);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_cursor_down(view_state);
            None
        }

        KeyCode::Tab | KeyCode::BackTab => {
            view_state.focus = match view_state.focus {
                Focus::Players => Focus::Selected,
                Focus::Selected => Focus::Players,
            };
            None
        }

        KeyCode::Enter | KeyCode::Char(' ') => match view_state.focus {
            Focus::Players => view_state
                .cursor_row_name()
                .map(|name| UserCommand::Dashboard(Action::ToggleRow(name))),
            Focus::Selected => remove_under_cursor(view_state),
        },

        KeyCode::Char('x') | KeyCode::Delete if view_state.focus == Focus::Selected => {
            remove_under_cursor(view_state)
        }

        KeyCode::Char('/') => {
            view_state.focus = Focus::Players;
            view_state.filter_mode = true;
            None
        }

        // Esc outside filter mode drops an applied search.
        KeyCode::Esc => {
            if view_state.dashboard.search().is_empty() {
                None
            } else {
                Some(UserCommand::Dashboard(Action::Search(String::new())))
            }
        }

        KeyCode::Right | KeyCode::Char('s') => {
            let next = view_state.dashboard.stat().next();
            Some(UserCommand::Dashboard(Action::SelectStat(next)))
        }
        KeyCode::Left | KeyCode::Char('S') => {
            let prev = view_state.dashboard.stat().prev();
            Some(UserCommand::Dashboard(Action::SelectStat(prev)))
        }

        KeyCode::Char('r') => Some(UserCommand::RefreshPitcher),

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// Quit confirmation: y/q confirm, n/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Search box editing. Every edit is sent as a new search; Enter keeps the
/// text, Esc clears it. The list cursor returns to the top on each edit.
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let mut text = view_state.dashboard.search().to_string();
    match key_event.code {
        KeyCode::Esc => {
            view_state.filter_mode = false;
            view_state.list_cursor = 0;
            if text.is_empty() {
                return None;
            }
            text.clear();
        }
        KeyCode::Enter => {
            view_state.filter_mode = false;
            return None;
        }
        KeyCode::Backspace => {
            if text.pop().is_none() {
                return None;
            }
        }
        KeyCode::Char(c) => text.push(c),
        _ => return None,
    }
    view_state.list_cursor = 0;
    Some(UserCommand::Dashboard(Action::Search(text)))
}

fn remove_under_cursor(view_state: &ViewState) -> Option<UserCommand> {
    view_state
        .cursor_selected_name()
        .map(|name| UserCommand::Dashboard(Action::Remove(name)))
}

fn move_cursor_up(view_state: &mut ViewState) {
    match view_state.focus {
        Focus::Players => view_state.list_cursor = view_state.list_cursor.saturating_sub(1),
        Focus::Selected => {
            view_state.selected_cursor = view_state.selected_cursor.saturating_sub(1)
        }
    }
}

fn move_cursor_down(view_state: &mut ViewState) {
    match view_state.focus {
        Focus::Players => {
            let rows = view_state.dashboard.visible_rows().len();
            if view_state.list_cursor + 1 < rows {
                view_state.list_cursor += 1;
            }
        }
        Focus::Selected => {
            let selected = view_state.dashboard.selection().len();
            if view_state.selected_cursor + 1 < selected {
                view_state.selected_cursor += 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
