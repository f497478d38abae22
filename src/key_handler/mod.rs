mod action;
mod router;

pub use action::{handle_key_event, next_event};
pub use router::{ActionRouter, ClickOutcome, RouteOutcome};

use ratatui::crossterm::event::KeyModifiers;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Player Controls
    TogglePlayback,
    SeekForward,
    SeekBackward,
    SpeedUp,
    SpeedDown,

    // Note Editing
    InsertTimestamp,
    ActivateLine,
    Cursor(MoveDirection),

    // Layout
    NextNote,
    ToggleSplit,

    QUIT,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}
