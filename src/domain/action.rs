use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The closed set of events the indicator overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "seekForward")]
    SeekForward,
    #[serde(rename = "seekBackwards")]
    SeekBackward,
    #[serde(rename = "play")]
    Play,
    #[serde(rename = "pause")]
    Pause,
    #[serde(rename = "setSpeed")]
    SetSpeed,
    #[serde(rename = "timestampClick")]
    TimestampActivated,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::SeekForward,
        ActionKind::SeekBackward,
        ActionKind::Play,
        ActionKind::Pause,
        ActionKind::SetSpeed,
        ActionKind::TimestampActivated,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            ActionKind::SeekForward => "seekForward",
            ActionKind::SeekBackward => "seekBackwards",
            ActionKind::Play => "play",
            ActionKind::Pause => "pause",
            ActionKind::SetSpeed => "setSpeed",
            ActionKind::TimestampActivated => "timestampClick",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action kind: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// A single playback event. `speed` is only ever present on `SetSpeed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl Action {
    /// Payloads on anything but `SetSpeed` are dropped.
    pub fn new(kind: ActionKind, speed: Option<f64>) -> Self {
        let speed = match kind {
            ActionKind::SetSpeed => speed,
            _ => None,
        };
        Action { kind, speed }
    }

    pub fn set_speed(speed: f64) -> Self {
        Action {
            kind: ActionKind::SetSpeed,
            speed: Some(speed),
        }
    }
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Action::new(kind, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip_through_from_str() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.wire_name().parse::<ActionKind>(), Ok(kind));
        }
        assert_eq!(
            "seekBackward".parse::<ActionKind>(),
            Err(UnknownAction("seekBackward".into()))
        );
    }

    #[test]
    fn payload_only_survives_on_set_speed() {
        assert_eq!(Action::new(ActionKind::Play, Some(2.0)).speed, None);
        assert_eq!(Action::new(ActionKind::SetSpeed, Some(2.0)).speed, Some(2.0));
    }
}
