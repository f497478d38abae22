use anyhow::{Result, bail};
use std::time::Instant;

/// What the player thread drives. A real implementation talks to the video
/// service; [`ClockBackend`] stands in for one by following the wall clock.
pub trait VideoBackend: Send {
    fn load(&mut self, media_id: &str, start: f64) -> Result<f64>;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);
    fn set_rate(&mut self, rate: f64);
    fn position(&self) -> f64;
    fn is_paused(&self) -> bool;
    fn track_ended(&self) -> bool;
}

pub struct ClockBackend {
    duration: f64,
    base: f64,
    rate: f64,
    playing_since: Option<Instant>,
}

impl ClockBackend {
    pub fn new(duration: f64) -> Self {
        ClockBackend {
            duration,
            base: 0.0,
            rate: 1.0,
            playing_since: None,
        }
    }

    fn settle(&mut self) {
        self.base = self.position();
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
    }
}

impl VideoBackend for ClockBackend {
    fn load(&mut self, media_id: &str, start: f64) -> Result<f64> {
        if media_id.is_empty() {
            bail!("No media id to load");
        }
        self.base = start.clamp(0.0, self.duration);
        self.playing_since = None;
        Ok(self.duration)
    }

    fn play(&mut self) {
        if self.playing_since.is_none() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.settle();
        self.playing_since = None;
    }

    fn seek(&mut self, seconds: f64) {
        self.settle();
        self.base = seconds.clamp(0.0, self.duration);
    }

    fn set_rate(&mut self, rate: f64) {
        self.settle();
        self.rate = rate;
    }

    fn position(&self) -> f64 {
        let running = self
            .playing_since
            .map(|since| since.elapsed().as_secs_f64() * self.rate)
            .unwrap_or(0.0);
        (self.base + running).min(self.duration)
    }

    fn is_paused(&self) -> bool {
        self.playing_since.is_none()
    }

    fn track_ended(&self) -> bool {
        self.position() >= self.duration
    }
}
