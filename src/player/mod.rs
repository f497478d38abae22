mod backend;
mod command;
mod core;
mod handle;
mod metrics;
mod player_event;
mod poller;
mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{ClockBackend, VideoBackend};
pub use command::PlayerCommand;
pub use handle::PlayerHandle;
pub use metrics::PlaybackMetrics;
pub use player_event::PlayerEvent;
pub use poller::{POLL_INTERVAL, PositionPoller};
pub use state::PlaybackState;

use anyhow::Result;

/// The embedded video as seen by a note. Commands are fire-and-forget; state
/// changes come back through [`VideoPlayer::poll_events`].
pub trait VideoPlayer {
    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn seek_to(&self, seconds: f64) -> Result<()>;
    fn set_rate(&self, rate: f64) -> Result<()>;

    /// `None` until the video has loaded.
    fn current_time(&self) -> Option<f64>;
    fn duration(&self) -> Option<f64>;
    fn state(&self) -> PlaybackState;
    fn poll_events(&self) -> Vec<PlayerEvent>;
}
