#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PlaybackState {
    Unstarted = 0,
    Playing = 1,
    Paused = 2,
    Ended = 3,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

impl From<PlaybackState> for u8 {
    fn from(state: PlaybackState) -> u8 {
        state as u8
    }
}

impl TryFrom<u8> for PlaybackState {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PlaybackState::Unstarted),
            1 => Ok(PlaybackState::Playing),
            2 => Ok(PlaybackState::Paused),
            3 => Ok(PlaybackState::Ended),
            _ => Err(()),
        }
    }
}
