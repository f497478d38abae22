use crate::{
    domain::{ActionKind, MediaLink, format_timestamp},
    key_handler::{ActionRouter, ClickOutcome, RouteOutcome},
    player::{PlaybackState, PlayerEvent, PositionPoller, VideoPlayer},
    ui_state::{IndicatorMachine, PlaybackSettings, Scheduler, Subscription},
};
use anyhow::Result;
use crossbeam_channel::Receiver;
use log::{debug, info, warn};
use rand::Rng;
use std::{cell::Cell, rc::Rc, sync::Arc};

pub const SPEED_STEPS: [f64; 8] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

const ID_LENGTH: usize = 26;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub(crate) fn generate_player_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// One mounted video with its overlay, bound to a single note.
pub struct PlayerInstance {
    id: String,
    link: MediaLink,
    indicator: IndicatorMachine,
    router: ActionRouter,
    player: Rc<dyn VideoPlayer>,
    poller: PositionPoller,
    settings: Arc<PlaybackSettings>,
    settings_rx: Receiver<Arc<PlaybackSettings>>,
    speed: f64,
    readout_refresh: Subscription,
    disposed: bool,
}

impl PlayerInstance {
    pub fn new(
        link: MediaLink,
        player: Rc<dyn VideoPlayer>,
        scheduler: Rc<dyn Scheduler>,
        settings: Arc<PlaybackSettings>,
        settings_rx: Receiver<Arc<PlaybackSettings>>,
    ) -> Self {
        let indicator = IndicatorMachine::new(Rc::clone(&scheduler));
        let router = ActionRouter::new(&indicator, &player);
        let poller = PositionPoller::new(scheduler, Rc::clone(&player));

        // The readout should never flash a stale position
        let readout_refresh = {
            let poller = poller.clone();
            let was_visible = Cell::new(false);
            indicator.subscribe(move |state| {
                if state.timestamp_visible && !was_visible.get() {
                    poller.refresh();
                }
                was_visible.set(state.timestamp_visible);
            })
        };

        let id = generate_player_id();
        info!("Mounted player {id} for {}", link.as_str());

        PlayerInstance {
            id,
            link,
            indicator,
            router,
            player,
            poller,
            settings,
            settings_rx,
            speed: 1.0,
            readout_refresh,
            disposed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn link(&self) -> &MediaLink {
        &self.link
    }

    pub fn indicator(&self) -> &IndicatorMachine {
        &self.indicator
    }

    pub fn router(&self) -> &ActionRouter {
        &self.router
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn state(&self) -> PlaybackState {
        self.player.state()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn position(&self) -> f64 {
        self.poller.position()
    }

    pub fn duration(&self) -> Option<f64> {
        self.player.duration()
    }

    /// Position worth remembering, or `None` before the video has loaded.
    pub fn resume_seconds(&self) -> Option<f64> {
        self.player.current_time()
    }

    // ===================
    //      COMMANDS
    // ===================

    pub fn toggle_play_pause(&self) -> Result<()> {
        match self.player.state().is_playing() {
            true => {
                self.player.pause()?;
                self.route(ActionKind::Pause, None);
            }
            false => {
                self.player.play()?;
                self.route(ActionKind::Play, None);
            }
        }
        Ok(())
    }

    pub fn seek_forward(&self) -> Result<()> {
        self.seek_by(self.settings.seek_seconds as f64, ActionKind::SeekForward)
    }

    pub fn seek_backward(&self) -> Result<()> {
        self.seek_by(-(self.settings.seek_seconds as f64), ActionKind::SeekBackward)
    }

    fn seek_by(&self, delta: f64, kind: ActionKind) -> Result<()> {
        let Some(current) = self.player.current_time() else {
            debug!("seek ignored, player {} not ready", self.id);
            return Ok(());
        };
        let end = self.player.duration().unwrap_or(f64::MAX);

        self.player.seek_to((current + delta).clamp(0.0, end))?;
        self.route(kind, None);
        Ok(())
    }

    pub fn set_speed(&mut self, rate: f64) -> Result<()> {
        self.player.set_rate(rate)?;
        self.speed = rate;
        self.route(ActionKind::SetSpeed, Some(rate));
        Ok(())
    }

    /// Move one notch along [`SPEED_STEPS`]. Stays put at either end.
    pub fn step_speed(&mut self, faster: bool) -> Result<()> {
        let next = match faster {
            true => SPEED_STEPS.iter().find(|&&s| s > self.speed),
            false => SPEED_STEPS.iter().rev().find(|&&s| s < self.speed),
        };

        match next {
            Some(&rate) => self.set_speed(rate),
            None => Ok(()),
        }
    }

    pub fn insert_timestamp(&self) -> Result<Option<String>> {
        let Some(current) = self.player.current_time() else {
            return Ok(None);
        };

        let seconds = (current - self.settings.timestamp_offset_seconds as f64).max(0.0);
        let ts = format_timestamp(Some(seconds));
        let url = self
            .link
            .media_id()
            .map(|_| self.link.timestamped_url(seconds));
        let snippet = self.settings.render_template(&ts, url.as_deref());

        if self.settings.pause_on_timestamp_insert && self.player.state().is_playing() {
            self.player.pause()?;
            self.route(ActionKind::Pause, None);
        }

        Ok(Some(snippet))
    }

    pub fn handle_timestamp_click(&self, text: &str) -> ClickOutcome {
        self.router.intercept_click(text)
    }

    fn route(&self, kind: ActionKind, speed: Option<f64>) {
        if let RouteOutcome::NoActivePlayer = self.router.route_kind(kind, speed) {
            debug!("{kind} not shown, player {} is gone", self.id);
        }
    }

    // ===================
    //    EVENT PLUMBING
    // ===================

    pub fn process_events(&self) -> Vec<PlayerEvent> {
        let events = self.player.poll_events();
        for event in &events {
            match event {
                PlayerEvent::StateChanged(state) => self.poller.on_state_change(*state),
                PlayerEvent::Ready { .. } => {
                    self.poller.refresh();
                }
                PlayerEvent::Error(e) => warn!("player {} failed: {e}", self.id),
            }
        }
        events
    }

    pub fn sync_settings(&mut self) -> bool {
        match self.settings_rx.try_iter().last() {
            Some(settings) => {
                self.settings = settings;
                true
            }
            None => false,
        }
    }

    pub fn progress_ratio(&self) -> Option<f64> {
        if !self.settings.display_progress_bar || !self.player.state().is_playing() {
            return None;
        }
        let duration = self.player.duration().filter(|d| *d > 0.0)?;
        Some((self.poller.position() / duration).clamp(0.0, 1.0))
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.poller.stop();
        self.readout_refresh.unsubscribe();
        self.indicator.dispose();
        info!("Unmounted player {}", self.id);
    }
}

impl Drop for PlayerInstance {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        player::testing::{Call, FakePlayer},
        ui_state::{SHOW_DELAY, TIMESTAMP_HOLD, TimerQueue},
    };
    use crossbeam_channel::unbounded;
    use std::time::Duration;

    const LINK: &str = "https://www.youtube.com/watch?v=abc123&t=10";

    struct Fixture {
        queue: Rc<TimerQueue>,
        fake: Rc<FakePlayer>,
        instance: PlayerInstance,
        settings_tx: crossbeam_channel::Sender<Arc<PlaybackSettings>>,
    }

    fn setup(settings: PlaybackSettings) -> Fixture {
        let queue = TimerQueue::new();
        let fake = Rc::new(FakePlayer::new(300.0));
        let (settings_tx, settings_rx) = unbounded();
        let instance = PlayerInstance::new(
            MediaLink::parse(LINK).unwrap(),
            fake.clone(),
            queue.clone(),
            Arc::new(settings),
            settings_rx,
        );
        Fixture {
            queue,
            fake,
            instance,
            settings_tx,
        }
    }

    #[test]
    fn ids_are_26_base36_chars() {
        let id = generate_player_id();
        assert_eq!(id.len(), 26);
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        assert_ne!(id, generate_player_id());
    }

    #[test]
    fn toggle_alternates_and_flashes_glyphs() {
        let f = setup(PlaybackSettings::default());

        f.instance.toggle_play_pause().unwrap();
        f.queue.advance(SHOW_DELAY);
        assert!(f.instance.indicator().snapshot().play_visible);

        f.instance.toggle_play_pause().unwrap();
        f.queue.advance(SHOW_DELAY);
        let snap = f.instance.indicator().snapshot();
        assert!(snap.pause_visible && !snap.play_visible);
        assert_eq!(f.fake.calls(), vec![Call::Play, Call::Pause]);
    }

    #[test]
    fn seeks_are_clamped_to_the_video() {
        let f = setup(PlaybackSettings::default());

        f.fake.set_time(4.0);
        f.instance.seek_backward().unwrap();
        f.fake.set_time(295.0);
        f.instance.seek_forward().unwrap();
        assert_eq!(f.fake.calls(), vec![Call::Seek(0.0), Call::Seek(300.0)]);
    }

    #[test]
    fn seek_from_zero_is_allowed() {
        let f = setup(PlaybackSettings::default());
        f.fake.set_time(0.0);
        f.instance.seek_forward().unwrap();
        assert_eq!(f.fake.calls(), vec![Call::Seek(10.0)]);
    }

    #[test]
    fn seek_before_load_is_a_no_op() {
        let queue = TimerQueue::new();
        let (_tx, rx) = unbounded();
        let fake = Rc::new(FakePlayer::unloaded());
        let instance = PlayerInstance::new(
            MediaLink::parse(LINK).unwrap(),
            fake.clone(),
            queue.clone(),
            Arc::new(PlaybackSettings::default()),
            rx,
        );

        instance.seek_forward().unwrap();
        assert_eq!(instance.insert_timestamp().unwrap(), None);
        assert!(fake.calls().is_empty());
        queue.advance(SHOW_DELAY);
        assert!(!instance.indicator().snapshot().any_visible());
    }

    #[test]
    fn speed_steps_stop_at_the_ends() {
        let mut f = setup(PlaybackSettings::default());

        for _ in 0..10 {
            f.instance.step_speed(true).unwrap();
        }
        assert_eq!(f.instance.speed(), 2.0);

        f.instance.set_speed(0.5).unwrap();
        f.instance.step_speed(false).unwrap();
        f.instance.step_speed(false).unwrap();
        assert_eq!(f.instance.speed(), 0.25);

        f.queue.advance(SHOW_DELAY);
        assert_eq!(f.instance.indicator().snapshot().current_speed, 0.25);
    }

    #[test]
    fn timestamp_snippet_uses_offset_and_link() {
        let f = setup(PlaybackSettings::default());
        f.fake.set_time(75.4);

        let snippet = f.instance.insert_timestamp().unwrap().unwrap();
        assert_eq!(
            snippet,
            "[01:09](https://www.youtube.com/watch?v=abc123&t=69)\n"
        );
    }

    #[test]
    fn timestamp_offset_floors_at_zero() {
        let f = setup(PlaybackSettings::default());
        f.fake.set_time(2.0);

        let snippet = f.instance.insert_timestamp().unwrap().unwrap();
        assert!(snippet.starts_with("[00:00]("));
    }

    #[test]
    fn insert_pauses_when_asked() {
        let settings = PlaybackSettings {
            pause_on_timestamp_insert: true,
            ..Default::default()
        };
        let f = setup(settings);
        f.instance.toggle_play_pause().unwrap();
        f.fake.set_time(30.0);

        f.instance.insert_timestamp().unwrap();
        assert_eq!(f.instance.state(), PlaybackState::Paused);
        assert_eq!(f.fake.calls(), vec![Call::Play, Call::Pause]);
    }

    #[test]
    fn readout_refreshes_when_it_appears() {
        let f = setup(PlaybackSettings::default());
        f.fake.set_time(42.0);
        assert_eq!(f.instance.position(), 0.0);

        f.instance.router().route("seekForward", None);
        f.queue.advance(SHOW_DELAY);
        assert_eq!(f.instance.position(), 42.0);
    }

    #[test]
    fn poller_follows_player_events() {
        let f = setup(PlaybackSettings::default());

        f.instance.toggle_play_pause().unwrap();
        f.instance.process_events();
        f.fake.set_time(12.0);
        f.queue.advance(Duration::from_secs(1));
        assert_eq!(f.instance.position(), 12.0);
        assert_eq!(f.instance.progress_ratio(), Some(12.0 / 300.0));

        f.instance.toggle_play_pause().unwrap();
        f.instance.process_events();
        assert_eq!(f.instance.progress_ratio(), None);
        // Only the hide timers of the pause flash remain
        f.queue.advance(SHOW_DELAY + TIMESTAMP_HOLD);
        assert_eq!(f.queue.pending(), 0);
    }

    #[test]
    fn progress_bar_respects_setting() {
        let settings = PlaybackSettings {
            display_progress_bar: false,
            ..Default::default()
        };
        let f = setup(settings);
        f.instance.toggle_play_pause().unwrap();
        assert_eq!(f.instance.progress_ratio(), None);
    }

    #[test]
    fn settings_snapshot_is_replaced_wholesale() {
        let mut f = setup(PlaybackSettings::default());
        assert!(!f.instance.sync_settings());

        for seek in [20, 30] {
            let next = PlaybackSettings {
                seek_seconds: seek,
                ..Default::default()
            };
            f.settings_tx.send(Arc::new(next)).unwrap();
        }
        assert!(f.instance.sync_settings());
        assert_eq!(f.instance.settings().seek_seconds, 30);
    }

    #[test]
    fn dispose_is_idempotent_and_silences_overlay() {
        let mut f = setup(PlaybackSettings::default());
        f.instance.toggle_play_pause().unwrap();
        f.instance.process_events();

        f.instance.dispose();
        f.instance.dispose();
        assert!(f.instance.is_disposed());
        assert_eq!(f.queue.pending(), 0);
        assert_eq!(
            f.instance.router().route("play", None),
            RouteOutcome::NoActivePlayer
        );
    }
}
