use crate::{
    REFRESH_RATE,
    player::{PlaybackMetrics, PlaybackState, PlayerCommand, PlayerEvent, VideoBackend},
};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, warn};
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

pub(super) struct LoadRequest {
    pub media_id: String,
    pub start: f64,
    pub autoplay: bool,
}

pub struct PlayerCore {
    backend: Box<dyn VideoBackend>,
    commands: Receiver<PlayerCommand>,
    events: Sender<PlayerEvent>,
    metrics: Arc<PlaybackMetrics>,
    state: PlaybackState,
    // Last position this thread published; `None` forces the next write
    published_ms: Option<u64>,
}

impl PlayerCore {
    pub(super) fn spawn(
        backend: Box<dyn VideoBackend>,
        request: LoadRequest,
        commands: Receiver<PlayerCommand>,
        events: Sender<PlayerEvent>,
        metrics: Arc<PlaybackMetrics>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            let mut core = PlayerCore {
                backend,
                commands,
                events,
                metrics,
                state: PlaybackState::Unstarted,
                published_ms: None,
            };

            if core.load(request) {
                core.run();
            }
            debug!("player thread finished");
        })
    }

    fn load(&mut self, request: LoadRequest) -> bool {
        match self.backend.load(&request.media_id, request.start) {
            Ok(duration) => {
                self.published_ms = Some(self.metrics.set_position(self.backend.position()));
                self.metrics.set_ready(duration);
                self.emit(PlayerEvent::Ready { duration });
                if request.autoplay {
                    self.play();
                }
                true
            }
            Err(e) => {
                warn!("failed to load {}: {e}", request.media_id);
                self.emit(PlayerEvent::Error(e.to_string()));
                false
            }
        }
    }

    fn run(&mut self) {
        while self.process_commands() {
            self.check_end();
            self.update_metrics();
            thread::sleep(Duration::from_millis(REFRESH_RATE));
        }
    }

    /// Returns `false` once the owning handle is gone or asked to stop.
    fn process_commands(&mut self) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(PlayerCommand::Play) => self.play(),
                Ok(PlayerCommand::Pause) => self.pause(),
                Ok(PlayerCommand::SeekTo(secs)) => {
                    self.backend.seek(secs);
                    self.published_ms = None;
                }
                Ok(PlayerCommand::SetRate(rate)) => self.backend.set_rate(rate),
                Ok(PlayerCommand::Stop) | Err(TryRecvError::Disconnected) => return false,
                Err(TryRecvError::Empty) => return true,
            }
        }
    }

    fn play(&mut self) {
        if self.backend.track_ended() {
            self.backend.seek(0.0);
        }
        self.backend.play();
        self.transition(PlaybackState::Playing);
    }

    fn pause(&mut self) {
        if !self.backend.is_paused() {
            self.backend.pause();
            self.transition(PlaybackState::Paused);
        }
    }

    fn check_end(&mut self) {
        // Checking the state ensures the end event is sent once
        if self.state == PlaybackState::Playing && self.backend.track_ended() {
            self.backend.pause();
            self.transition(PlaybackState::Ended);
        }
    }

    fn update_metrics(&mut self) {
        let position = self.backend.position();
        self.published_ms = match self.published_ms {
            // A failed swap means a seek was written ahead of its command
            Some(seen) => self.metrics.advance_position(seen, position).or(Some(seen)),
            None => Some(self.metrics.set_position(position)),
        };
    }

    fn transition(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.metrics.set_playback_state(state);
            self.emit(PlayerEvent::StateChanged(state));
        }
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ClockBackend;
    use crossbeam_channel::unbounded;

    fn loaded_core() -> (PlayerCore, Sender<PlayerCommand>) {
        let (cmd_tx, cmd_rx) = unbounded();
        let (evt_tx, _evt_rx) = unbounded();
        let mut core = PlayerCore {
            backend: Box::new(ClockBackend::new(300.0)),
            commands: cmd_rx,
            events: evt_tx,
            metrics: PlaybackMetrics::new(),
            state: PlaybackState::Unstarted,
            published_ms: None,
        };
        let request = LoadRequest {
            media_id: "abc".into(),
            start: 10.0,
            autoplay: false,
        };
        assert!(core.load(request));
        (core, cmd_tx)
    }

    #[test]
    fn pending_seek_is_not_overwritten_by_old_position() {
        let (mut core, commands) = loaded_core();
        core.update_metrics();
        assert_eq!(core.metrics.get_position(), 10.0);

        // The UI publishes the target before the command is drained
        core.metrics.set_position(120.0);
        core.update_metrics();
        assert_eq!(core.metrics.get_position(), 120.0);

        commands.send(PlayerCommand::SeekTo(120.0)).unwrap();
        assert!(core.process_commands());
        core.update_metrics();
        assert_eq!(core.metrics.get_position(), 120.0);
    }

    #[test]
    fn position_follows_backend_after_seek() {
        let (mut core, commands) = loaded_core();
        core.metrics.set_position(50.0);
        commands.send(PlayerCommand::SeekTo(200.0)).unwrap();
        assert!(core.process_commands());

        core.update_metrics();
        assert_eq!(core.metrics.get_position(), 200.0);

        core.update_metrics();
        assert_eq!(core.metrics.get_position(), 200.0);
    }
}
