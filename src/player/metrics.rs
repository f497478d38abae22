use crate::player::PlaybackState;

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering},
};

/// Lock-free view of the player thread's state, read from the UI thread.
pub struct PlaybackMetrics {
    state: AtomicU8,
    ready: AtomicBool,
    position_ms: AtomicU64,
    duration_ms: AtomicU64,
}

impl PlaybackMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(PlaybackMetrics {
            state: AtomicU8::new(PlaybackState::Unstarted.into()),
            ready: AtomicBool::new(false),
            position_ms: AtomicU64::new(0),
            duration_ms: AtomicU64::new(0),
        })
    }

    pub fn get_state(&self) -> PlaybackState {
        self.state
            .load(Ordering::Relaxed)
            .try_into()
            .unwrap_or(PlaybackState::Unstarted)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn get_position(&self) -> f64 {
        self.position_ms.load(Ordering::Relaxed) as f64 / 1000.0
    }

    pub fn get_duration(&self) -> f64 {
        self.duration_ms.load(Ordering::Relaxed) as f64 / 1000.0
    }

    pub fn set_playback_state(&self, state: PlaybackState) {
        self.state.store(state.into(), Ordering::Relaxed);
    }

    pub fn set_position(&self, secs: f64) -> u64 {
        let ms = to_ms(secs);
        self.position_ms.store(ms, Ordering::Relaxed);
        ms
    }

    /// Store `secs` only if the position still holds `seen`, i.e. nobody
    /// else has written it since. Returns the stored value on success.
    pub fn advance_position(&self, seen: u64, secs: f64) -> Option<u64> {
        let ms = to_ms(secs);
        self.position_ms
            .compare_exchange(seen, ms, Ordering::Relaxed, Ordering::Relaxed)
            .ok()
            .map(|_| ms)
    }

    pub fn set_ready(&self, duration: f64) {
        self.duration_ms.store(to_ms(duration), Ordering::Relaxed);
        self.ready.store(true, Ordering::Release);
    }
}

fn to_ms(secs: f64) -> u64 {
    (secs.max(0.0) * 1000.0) as u64
}
