use crate::player::{
    PlaybackMetrics, PlaybackState, PlayerCommand, PlayerEvent, VideoBackend, VideoPlayer,
    core::{LoadRequest, PlayerCore},
};
use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::{sync::Arc, thread::JoinHandle};

pub struct PlayerHandle {
    commands: Sender<PlayerCommand>,
    events: Receiver<PlayerEvent>,
    metrics: Arc<PlaybackMetrics>,
    thread: Option<JoinHandle<()>>,
}

impl PlayerHandle {
    pub fn spawn(
        backend: Box<dyn VideoBackend>,
        media_id: &str,
        start: u64,
        autoplay: bool,
    ) -> Self {
        let (cmd_tx, cmd_rx) = unbounded();
        let (evt_tx, evt_rx) = unbounded();
        let metrics = PlaybackMetrics::new();

        let request = LoadRequest {
            media_id: media_id.to_string(),
            start: start as f64,
            autoplay,
        };
        let thread = PlayerCore::spawn(backend, request, cmd_rx, evt_tx, Arc::clone(&metrics));

        Self {
            commands: cmd_tx,
            events: evt_rx,
            metrics,
            thread: Some(thread),
        }
    }

    pub fn metrics(&self) -> Arc<PlaybackMetrics> {
        Arc::clone(&self.metrics)
    }

    fn send(&self, cmd: PlayerCommand) -> Result<()> {
        self.commands.send(cmd)?;
        Ok(())
    }
}

impl VideoPlayer for PlayerHandle {
    fn play(&self) -> Result<()> {
        self.send(PlayerCommand::Play)
    }

    fn pause(&self) -> Result<()> {
        self.send(PlayerCommand::Pause)
    }

    fn seek_to(&self, seconds: f64) -> Result<()> {
        // Readers see the requested position before the player thread gets to it
        self.metrics.set_position(seconds);
        self.send(PlayerCommand::SeekTo(seconds))
    }

    fn set_rate(&self, rate: f64) -> Result<()> {
        self.send(PlayerCommand::SetRate(rate))
    }

    fn current_time(&self) -> Option<f64> {
        self.metrics
            .is_ready()
            .then(|| self.metrics.get_position())
    }

    fn duration(&self) -> Option<f64> {
        self.metrics
            .is_ready()
            .then(|| self.metrics.get_duration())
    }

    fn state(&self) -> PlaybackState {
        self.metrics.get_state()
    }

    fn poll_events(&self) -> Vec<PlayerEvent> {
        std::iter::from_fn(|| self.events.try_recv().ok()).collect()
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        let _ = self.commands.send(PlayerCommand::Stop);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ClockBackend;
    use std::time::{Duration, Instant};

    fn wait_for(handle: &PlayerHandle, wanted: &PlayerEvent) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if handle.poll_events().iter().any(|e| e == wanted) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn reports_ready_then_plays_and_pauses() {
        let handle = PlayerHandle::spawn(Box::new(ClockBackend::new(300.0)), "abc", 12, false);

        assert!(wait_for(&handle, &PlayerEvent::Ready { duration: 300.0 }));
        assert_eq!(handle.duration(), Some(300.0));
        assert_eq!(handle.current_time(), Some(12.0));
        assert_eq!(handle.state(), PlaybackState::Unstarted);

        handle.play().unwrap();
        assert!(wait_for(&handle, &PlayerEvent::StateChanged(PlaybackState::Playing)));
        handle.pause().unwrap();
        assert!(wait_for(&handle, &PlayerEvent::StateChanged(PlaybackState::Paused)));
    }

    #[test]
    fn autoplay_starts_without_a_command() {
        let handle = PlayerHandle::spawn(Box::new(ClockBackend::new(300.0)), "abc", 30, true);
        assert!(wait_for(&handle, &PlayerEvent::StateChanged(PlaybackState::Playing)));
    }

    #[test]
    fn paused_seek_lands_on_requested_position() {
        let handle = PlayerHandle::spawn(Box::new(ClockBackend::new(300.0)), "abc", 0, false);
        assert!(wait_for(&handle, &PlayerEvent::Ready { duration: 300.0 }));
        handle.seek_to(120.0).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while handle.current_time() != Some(120.0) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(handle.current_time(), Some(120.0));
    }

    #[test]
    fn load_failure_is_reported() {
        let handle = PlayerHandle::spawn(Box::new(ClockBackend::new(300.0)), "", 0, false);
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut saw_error = false;
        while Instant::now() < deadline && !saw_error {
            saw_error = handle
                .poll_events()
                .iter()
                .any(|e| matches!(e, PlayerEvent::Error(_)));
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(saw_error);
        assert_eq!(handle.current_time(), None);
    }
}
