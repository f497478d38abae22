use crate::ui_state::PlaybackSettings;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;
use std::sync::Arc;

/// Fans a new settings snapshot out to every mounted player.
pub struct SettingsBroadcast {
    current: Arc<PlaybackSettings>,
    subscribers: Vec<Sender<Arc<PlaybackSettings>>>,
}

impl SettingsBroadcast {
    pub fn new(settings: PlaybackSettings) -> Self {
        SettingsBroadcast {
            current: Arc::new(settings),
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> Arc<PlaybackSettings> {
        Arc::clone(&self.current)
    }

    pub fn subscribe(&mut self) -> (Arc<PlaybackSettings>, Receiver<Arc<PlaybackSettings>>) {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        (self.current(), rx)
    }

    pub fn publish(&mut self, settings: PlaybackSettings) {
        let current = Arc::new(settings);
        let before = self.subscribers.len();
        self.subscribers
            .retain(|tx| tx.send(Arc::clone(&current)).is_ok());
        self.current = current;

        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            debug!("dropped {dropped} closed settings subscribers");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_subscribers_start_from_current() {
        let mut bc = SettingsBroadcast::new(PlaybackSettings::default());
        bc.publish(PlaybackSettings {
            seek_seconds: 15,
            ..Default::default()
        });

        let (now, rx) = bc.subscribe();
        assert_eq!(now.seek_seconds, 15);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_receivers_are_forgotten() {
        let mut bc = SettingsBroadcast::new(PlaybackSettings::default());
        let (_, keep) = bc.subscribe();
        let (_, gone) = bc.subscribe();
        drop(gone);

        bc.publish(PlaybackSettings::default());
        assert_eq!(bc.subscriber_count(), 1);
        assert_eq!(*keep.try_recv().unwrap(), PlaybackSettings::default());
    }
}
