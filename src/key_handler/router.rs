use crate::{
    domain::{Action, ActionKind, parse_checked},
    player::VideoPlayer,
    ui_state::{IndicatorError, IndicatorMachine, WeakIndicator},
};
use log::{debug, warn};
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Dispatched(Action),
    NoActivePlayer,
    UnknownKind(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    Handled(f64),
    Unhandled,
    NoActivePlayer,
}

/// Turns named commands into indicator dispatches for one player. Holds only
/// weak references.
#[derive(Clone)]
pub struct ActionRouter {
    indicator: WeakIndicator,
    player: Weak<dyn VideoPlayer>,
}

impl ActionRouter {
    pub fn new(indicator: &IndicatorMachine, player: &Rc<dyn VideoPlayer>) -> Self {
        ActionRouter {
            indicator: indicator.downgrade(),
            player: Rc::downgrade(player),
        }
    }

    /// Route by wire name, e.g. `"seekForward"` or `"setSpeed"`.
    pub fn route(&self, kind: &str, speed: Option<f64>) -> RouteOutcome {
        match kind.parse::<ActionKind>() {
            Ok(kind) => self.route_kind(kind, speed),
            Err(e) => {
                debug!("{e}");
                RouteOutcome::UnknownKind(kind.to_string())
            }
        }
    }

    pub fn route_kind(&self, kind: ActionKind, speed: Option<f64>) -> RouteOutcome {
        let Some((indicator, _)) = self.active() else {
            return RouteOutcome::NoActivePlayer;
        };
        Self::dispatch(&indicator, Action::new(kind, speed))
    }

    pub fn intercept_click(&self, text: &str) -> ClickOutcome {
        let Some(seconds) = parse_checked(text.trim()) else {
            return ClickOutcome::Unhandled;
        };
        let Some((indicator, player)) = self.active() else {
            return ClickOutcome::NoActivePlayer;
        };

        if let Err(e) = player.seek_to(seconds) {
            warn!("seek to {seconds}s failed: {e}");
        }
        match Self::dispatch(&indicator, ActionKind::TimestampActivated.into()) {
            RouteOutcome::Dispatched(_) => ClickOutcome::Handled(seconds),
            _ => ClickOutcome::NoActivePlayer,
        }
    }

    fn active(&self) -> Option<(IndicatorMachine, Rc<dyn VideoPlayer>)> {
        let indicator = self.indicator.upgrade().filter(|i| !i.is_disposed())?;
        let player = self.player.upgrade()?;
        Some((indicator, player))
    }

    fn dispatch(indicator: &IndicatorMachine, action: Action) -> RouteOutcome {
        match indicator.dispatch(action) {
            Ok(()) => RouteOutcome::Dispatched(action),
            Err(IndicatorError::Disposed) => RouteOutcome::NoActivePlayer,
        }
    }
}
