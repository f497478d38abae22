use crate::player::{PlaybackState, PlayerEvent, VideoPlayer};
use anyhow::Result;
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Play,
    Pause,
    Seek(f64),
    Rate(f64),
}

pub struct FakePlayer {
    time: Cell<Option<f64>>,
    duration: f64,
    state: Cell<PlaybackState>,
    calls: RefCell<Vec<Call>>,
    events: RefCell<Vec<PlayerEvent>>,
}

impl FakePlayer {
    pub fn new(duration: f64) -> Self {
        FakePlayer {
            time: Cell::new(Some(0.0)),
            duration,
            state: Cell::new(PlaybackState::Unstarted),
            calls: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn unloaded() -> Self {
        let player = Self::new(0.0);
        player.time.set(None);
        player
    }

    pub fn set_time(&self, seconds: f64) {
        self.time.set(Some(seconds));
    }

    pub fn set_state(&self, state: PlaybackState) {
        self.state.set(state);
        self.events.borrow_mut().push(PlayerEvent::StateChanged(state));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl VideoPlayer for FakePlayer {
    fn play(&self) -> Result<()> {
        self.calls.borrow_mut().push(Call::Play);
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.calls.borrow_mut().push(Call::Pause);
        self.set_state(PlaybackState::Paused);
        Ok(())
    }

    fn seek_to(&self, seconds: f64) -> Result<()> {
        self.calls.borrow_mut().push(Call::Seek(seconds));
        if self.time.get().is_some() {
            self.time.set(Some(seconds));
        }
        Ok(())
    }

    fn set_rate(&self, rate: f64) -> Result<()> {
        self.calls.borrow_mut().push(Call::Rate(rate));
        Ok(())
    }

    fn current_time(&self) -> Option<f64> {
        self.time.get()
    }

    fn duration(&self) -> Option<f64> {
        self.time.get().map(|_| self.duration)
    }

    fn state(&self) -> PlaybackState {
        self.state.get()
    }

    fn poll_events(&self) -> Vec<PlayerEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}
