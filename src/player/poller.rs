use crate::{
    player::{PlaybackState, VideoPlayer},
    ui_state::{Scheduler, TimerId},
};
use log::debug;
use std::{
    cell::Cell,
    rc::{Rc, Weak},
    time::Duration,
};

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Keeps a cached playback position fresh, only while the video plays.
#[derive(Clone)]
pub struct PositionPoller {
    shared: Rc<PollerShared>,
}

struct PollerShared {
    scheduler: Rc<dyn Scheduler>,
    player: Rc<dyn VideoPlayer>,
    position: Cell<f64>,
    timer: Cell<Option<TimerId>>,
}

impl PositionPoller {
    pub fn new(scheduler: Rc<dyn Scheduler>, player: Rc<dyn VideoPlayer>) -> Self {
        PositionPoller {
            shared: Rc::new(PollerShared {
                scheduler,
                player,
                position: Cell::new(0.0),
                timer: Cell::new(None),
            }),
        }
    }

    pub fn position(&self) -> f64 {
        self.shared.position.get()
    }

    pub fn is_running(&self) -> bool {
        self.shared.timer.get().is_some()
    }

    pub fn refresh(&self) -> f64 {
        self.shared.refresh()
    }

    pub fn start(&self) {
        if self.is_running() {
            return;
        }
        debug!("position poller started");
        self.shared.refresh();
        PollerShared::arm(&self.shared);
    }

    pub fn stop(&self) {
        if let Some(id) = self.shared.timer.take() {
            self.shared.scheduler.cancel(id);
            self.shared.refresh();
            debug!("position poller stopped");
        }
    }

    pub fn on_state_change(&self, state: PlaybackState) {
        match state {
            PlaybackState::Playing => self.start(),
            PlaybackState::Paused | PlaybackState::Ended | PlaybackState::Unstarted => self.stop(),
        }
    }
}

impl PollerShared {
    fn refresh(&self) -> f64 {
        if let Some(t) = self.player.current_time() {
            self.position.set(t);
        }
        self.position.get()
    }

    fn arm(this: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(this);
        let id = this.scheduler.schedule(
            POLL_INTERVAL,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.timer.set(None);
                    shared.refresh();
                    PollerShared::arm(&shared);
                }
            }),
        );
        this.timer.set(Some(id));
    }
}
