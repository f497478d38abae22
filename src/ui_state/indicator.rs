//! Transient playback indicators.
//!
//! Every action hides everything first, then after [`SHOW_DELAY`] shows the
//! timestamp readout plus the glyph for that action. Three independent
//! groups hide themselves again after their hold time. A new action cancels
//! whatever is still pending from the previous one, so stale timers never
//! touch fresh state.

use crate::{
    domain::{Action, ActionKind},
    ui_state::scheduler::{Scheduler, TimerId},
};
use log::debug;
use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
    time::Duration,
};

pub const SHOW_DELAY: Duration = Duration::from_millis(20);
pub const TIMESTAMP_HOLD: Duration = Duration::from_millis(1500);
pub const PLAY_PAUSE_HOLD: Duration = Duration::from_millis(500);
pub const SPEED_HOLD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorState {
    pub timestamp_visible: bool,
    pub seek_forward_visible: bool,
    pub seek_backward_visible: bool,
    pub play_visible: bool,
    pub pause_visible: bool,
    pub speed_visible: bool,
    /// Last speed shown. Survives hides.
    pub current_speed: f64,
}

impl Default for IndicatorState {
    fn default() -> Self {
        IndicatorState {
            timestamp_visible: false,
            seek_forward_visible: false,
            seek_backward_visible: false,
            play_visible: false,
            pause_visible: false,
            speed_visible: false,
            current_speed: 1.0,
        }
    }
}

impl IndicatorState {
    /// Whether the readout is on screen once the "always show" setting is
    /// taken into account.
    pub fn timestamp_shown(&self, always: bool) -> bool {
        always || self.timestamp_visible
    }

    pub fn any_visible(&self) -> bool {
        self.timestamp_visible
            || self.seek_forward_visible
            || self.seek_backward_visible
            || self.play_visible
            || self.pause_visible
            || self.speed_visible
    }

    fn hide_all(&mut self) {
        self.timestamp_visible = false;
        self.seek_forward_visible = false;
        self.seek_backward_visible = false;
        self.play_visible = false;
        self.pause_visible = false;
        self.speed_visible = false;
    }

    fn show(&mut self, action: Action) {
        self.timestamp_visible = true;
        match action.kind {
            ActionKind::SeekForward => self.seek_forward_visible = true,
            ActionKind::SeekBackward => self.seek_backward_visible = true,
            ActionKind::Play => self.play_visible = true,
            ActionKind::Pause => self.pause_visible = true,
            ActionKind::SetSpeed => {
                if let Some(speed) = action.speed {
                    self.current_speed = speed;
                }
                self.speed_visible = true;
            }
            ActionKind::TimestampActivated => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndicatorError {
    #[error("Indicator overlay has been disposed")]
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TimerSlot {
    Show,
    TimestampGroup,
    PlayPauseGroup,
    SpeedGroup,
}

impl TimerSlot {
    fn clear(self, state: &mut IndicatorState) {
        match self {
            TimerSlot::Show => {}
            TimerSlot::TimestampGroup => {
                state.timestamp_visible = false;
                state.seek_forward_visible = false;
                state.seek_backward_visible = false;
            }
            TimerSlot::PlayPauseGroup => {
                state.play_visible = false;
                state.pause_visible = false;
            }
            TimerSlot::SpeedGroup => state.speed_visible = false,
        }
    }
}

const HIDE_GROUPS: [(TimerSlot, Duration); 3] = [
    (TimerSlot::TimestampGroup, TIMESTAMP_HOLD),
    (TimerSlot::PlayPauseGroup, PLAY_PAUSE_HOLD),
    (TimerSlot::SpeedGroup, SPEED_HOLD),
];

type Listener = Rc<dyn Fn(&IndicatorState)>;

struct Shared {
    state: RefCell<Core>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    scheduler: Rc<dyn Scheduler>,
}

#[derive(Default)]
struct Core {
    snapshot: IndicatorState,
    timers: HashMap<TimerSlot, TimerId>,
    next_listener: u64,
    disposed: bool,
}

/// Owns one player's indicator state. Cloning yields another handle onto the
/// same machine.
#[derive(Clone)]
pub struct IndicatorMachine {
    shared: Rc<Shared>,
}

impl IndicatorMachine {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        IndicatorMachine {
            shared: Rc::new(Shared {
                state: RefCell::new(Core::default()),
                listeners: RefCell::new(Vec::new()),
                scheduler,
            }),
        }
    }

    pub fn snapshot(&self) -> IndicatorState {
        self.shared.state.borrow().snapshot
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.state.borrow().disposed
    }

    pub fn downgrade(&self) -> WeakIndicator {
        WeakIndicator(Rc::downgrade(&self.shared))
    }

    pub fn dispatch(&self, action: Action) -> Result<(), IndicatorError> {
        if self.is_disposed() {
            return Err(IndicatorError::Disposed);
        }
        debug!("indicator dispatch: {}", action.kind);

        self.shared.cancel_timers();
        self.shared.update(IndicatorState::hide_all);

        let weak = Rc::downgrade(&self.shared);
        let id = self.shared.scheduler.schedule(
            SHOW_DELAY,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.show(action);
                }
            }),
        );
        self.shared.arm(TimerSlot::Show, id);

        Ok(())
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&IndicatorState) + 'static,
    {
        let mut core = self.shared.state.borrow_mut();
        let id = core.next_listener;
        core.next_listener += 1;

        if !core.disposed {
            self.shared
                .listeners
                .borrow_mut()
                .push((id, Rc::new(listener)));
        }

        Subscription {
            id,
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Cancel every pending timer and drop all observers. Safe to call any
    /// number of times.
    pub fn dispose(&self) {
        {
            let mut core = self.shared.state.borrow_mut();
            if core.disposed {
                return;
            }
            core.disposed = true;
        }
        self.shared.cancel_timers();
        self.shared.listeners.borrow_mut().clear();
        debug!("indicator disposed");
    }
}

impl Shared {
    fn show(self: Rc<Self>, action: Action) {
        {
            let mut core = self.state.borrow_mut();
            core.timers.remove(&TimerSlot::Show);
            if core.disposed {
                return;
            }
        }

        self.update(|s| s.show(action));

        for (slot, hold) in HIDE_GROUPS {
            let weak = Rc::downgrade(&self);
            let id = self.scheduler.schedule(
                hold,
                Box::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.hide(slot);
                    }
                }),
            );
            self.arm(slot, id);
        }
    }

    fn hide(&self, slot: TimerSlot) {
        {
            let mut core = self.state.borrow_mut();
            core.timers.remove(&slot);
            if core.disposed {
                return;
            }
        }
        self.update(|s| slot.clear(s));
    }

    fn arm(&self, slot: TimerSlot, id: TimerId) {
        if let Some(stale) = self.state.borrow_mut().timers.insert(slot, id) {
            self.scheduler.cancel(stale);
        }
    }

    fn cancel_timers(&self) {
        let ids = self
            .state
            .borrow_mut()
            .timers
            .drain()
            .map(|(_, id)| id)
            .collect::<Vec<_>>();

        for id in ids {
            self.scheduler.cancel(id);
        }
    }

    fn update<F: FnOnce(&mut IndicatorState)>(&self, f: F) {
        let changed = {
            let mut core = self.state.borrow_mut();
            let before = core.snapshot;
            f(&mut core.snapshot);
            (core.snapshot != before && !core.disposed).then_some(core.snapshot)
        };

        if let Some(snapshot) = changed {
            let listeners = self
                .listeners
                .borrow()
                .iter()
                .map(|(_, l)| Rc::clone(l))
                .collect::<Vec<_>>();

            for listener in listeners {
                listener(&snapshot);
            }
        }
    }
}

/// Non-owning handle, used by routers that must not keep a torn-down player
/// alive.
#[derive(Clone)]
pub struct WeakIndicator(Weak<Shared>);

impl WeakIndicator {
    pub fn upgrade(&self) -> Option<IndicatorMachine> {
        self.0.upgrade().map(|shared| IndicatorMachine { shared })
    }
}

/// Returned by [`IndicatorMachine::subscribe`]. Dropping it keeps the
/// listener registered; call [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
