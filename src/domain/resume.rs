use crate::domain::MediaLink;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ResumePosition {
    pub media_link: String,
    pub last_updated: DateTime<Utc>,
    pub last_timestamp_seconds: f64,
}

impl ResumePosition {
    pub fn now(media_link: &str, seconds: f64) -> Self {
        ResumePosition {
            media_link: media_link.to_string(),
            last_updated: Utc::now(),
            last_timestamp_seconds: seconds,
        }
    }
}

/// Where a freshly mounted player starts, and whether it starts by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartPosition {
    pub seconds: u64,
    pub autoplay: bool,
}

impl StartPosition {
    /// A stored position wins over the link's own `t=`; the player only
    /// autoplays when it is starting exactly where the link asked.
    pub fn resolve(stored: Option<&ResumePosition>, link: &MediaLink) -> Self {
        let link_start = link.start_seconds();

        let (raw, seconds) = match (stored, link_start) {
            (Some(pos), _) => {
                let raw = pos.last_timestamp_seconds;
                (Some(raw), raw.max(0.0).round() as u64)
            }
            (None, Some(t)) => (Some(t as f64), t),
            (None, None) => (None, 0),
        };

        // Compared before rounding: 91.6 stored against `t=92` is not a match
        StartPosition {
            seconds,
            autoplay: raw.is_some() && raw == link_start.map(|t| t as f64),
        }
    }
}
