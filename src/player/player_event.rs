use crate::player::PlaybackState;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Ready { duration: f64 },
    StateChanged(PlaybackState),
    Error(String),
}
