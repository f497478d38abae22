use crate::{
    REFRESH_RATE,
    key_handler::{C, Command, MoveDirection, S, X},
};
use anyhow::Result;
use ratatui::crossterm::event::{
    self, Event, KeyCode::*, KeyEvent, KeyEventKind,
};
use std::time::Duration;

#[rustfmt::skip]
pub fn handle_key_event(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match (key.modifiers, key.code) {
        (C, Char('c'))  => Some(Command::QUIT),
        (X, Char('q'))  => Some(Command::QUIT),

        (X, Char(' '))  => Some(Command::TogglePlayback),
        (X, Right)      => Some(Command::SeekForward),
        (X, Left)       => Some(Command::SeekBackward),
        (X, Char('+'))
        | (S, Char('+'))
        | (X, Char('=')) => Some(Command::SpeedUp),
        (X, Char('-'))  => Some(Command::SpeedDown),

        (X, Char('t'))  => Some(Command::InsertTimestamp),
        (X, Enter)      => Some(Command::ActivateLine),
        (X, Up)         => Some(Command::Cursor(MoveDirection::Up)),
        (X, Down)       => Some(Command::Cursor(MoveDirection::Down)),

        (X, Tab)        => Some(Command::NextNote),
        (X, Char('s'))  => Some(Command::ToggleSplit),

        _ => None,
    }
}

pub fn next_event() -> Result<Option<Event>> {
    match event::poll(Duration::from_millis(REFRESH_RATE))? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}
