use crate::{
    Database,
    app_core::{PlayerFactory, PlayerInstance, SettingsBroadcast},
    domain::{MediaLink, Note, ResumePosition, StartPosition, is_timestamp},
    key_handler::ClickOutcome,
    ui_state::{PlaybackSettings, SplitMode, TimerQueue},
};
use anyhow::Result;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountChange {
    Kept(String),
    Mounted(String),
    Replaced { old: String, new: String },
    Removed(String),
    Unmounted,
}

pub struct Workspace {
    scheduler: Rc<TimerQueue>,
    factory: Box<dyn PlayerFactory>,
    db: Database,
    broadcast: SettingsBroadcast,
    settings_path: Option<PathBuf>,
    instances: IndexMap<String, PlayerInstance>,
    mounted: HashMap<PathBuf, String>,
    active_note: Option<PathBuf>,
    split: SplitMode,
}

impl Workspace {
    pub fn new(
        db: Database,
        factory: Box<dyn PlayerFactory>,
        settings: PlaybackSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let split = settings.default_split_mode;
        Workspace {
            scheduler: TimerQueue::new(),
            factory,
            db,
            broadcast: SettingsBroadcast::new(settings),
            settings_path,
            instances: IndexMap::new(),
            mounted: HashMap::new(),
            active_note: None,
            split,
        }
    }

    pub fn scheduler(&self) -> Rc<TimerQueue> {
        Rc::clone(&self.scheduler)
    }

    pub fn settings(&self) -> Arc<PlaybackSettings> {
        self.broadcast.current()
    }

    pub fn split_mode(&self) -> SplitMode {
        self.split
    }

    pub fn toggle_split(&mut self) -> SplitMode {
        self.split = self.split.toggled();
        self.split
    }

    pub fn instances(&self) -> impl Iterator<Item = &PlayerInstance> {
        self.instances.values()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instance(&self, id: &str) -> Option<&PlayerInstance> {
        self.instances.get(id)
    }

    pub fn instance_for(&self, note: &Path) -> Option<&PlayerInstance> {
        self.mounted.get(note).and_then(|id| self.instances.get(id))
    }

    pub fn instance_for_mut(&mut self, note: &Path) -> Option<&mut PlayerInstance> {
        let id = self.mounted.get(note)?;
        self.instances.get_mut(id)
    }

    pub fn set_active_note(&mut self, note: Option<&Path>) {
        self.active_note = note.map(Path::to_path_buf);
    }

    pub fn active_instance(&self) -> Option<&PlayerInstance> {
        self.instance_for(self.active_note.as_deref()?)
    }

    pub fn active_instance_mut(&mut self) -> Option<&mut PlayerInstance> {
        let note = self.active_note.clone()?;
        self.instance_for_mut(&note)
    }

    // ===================
    //      MOUNTING
    // ===================

    /// Bring the note's player in line with its current media link.
    pub fn render_player(&mut self, note: &Note) -> Result<MountChange> {
        let link = note
            .media_link()
            .and_then(|raw| match MediaLink::parse(raw) {
                Ok(link) => Some(link),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            })
            .filter(|link| link.media_id().is_some());

        let existing = self.mounted.get(&note.path).cloned();

        match (existing, link) {
            (Some(id), Some(link)) => {
                let unchanged = self
                    .instances
                    .get(&id)
                    .is_some_and(|inst| inst.link().as_str() == link.as_str());
                if unchanged {
                    return Ok(MountChange::Kept(id));
                }
                self.unmount(&note.path);
                let new = self.mount(&note.path, link)?;
                Ok(MountChange::Replaced { old: id, new })
            }
            (Some(id), None) => {
                self.unmount(&note.path);
                Ok(MountChange::Removed(id))
            }
            (None, Some(link)) => Ok(MountChange::Mounted(self.mount(&note.path, link)?)),
            (None, None) => Ok(MountChange::Unmounted),
        }
    }

    pub fn close_note(&mut self, note: &Path) {
        self.unmount(note);
        if self.active_note.as_deref() == Some(note) {
            self.active_note = None;
        }
    }

    fn mount(&mut self, note: &Path, link: MediaLink) -> Result<String> {
        let media_id = link.media_id().unwrap_or_default();

        let stored = self
            .db
            .find_resume_position(Some(&media_id), link.as_str())
            .unwrap_or_else(|e| {
                warn!("Could not read resume position for {media_id}: {e}");
                None
            });
        let start = StartPosition::resolve(stored.as_ref(), &link);
        debug!("starting {media_id} at {}s (autoplay: {})", start.seconds, start.autoplay);

        let player = self.factory.spawn(&media_id, start)?;
        let (settings, settings_rx) = self.broadcast.subscribe();
        let instance = PlayerInstance::new(link, player, self.scheduler(), settings, settings_rx);

        let id = instance.id().to_string();
        self.mounted.insert(note.to_path_buf(), id.clone());
        self.instances.insert(id.clone(), instance);
        Ok(id)
    }

    fn unmount(&mut self, note: &Path) {
        let Some(id) = self.mounted.remove(note) else {
            return;
        };
        self.save_resume_position(&id);
        if let Some(mut instance) = self.instances.shift_remove(&id) {
            instance.dispose();
        }
    }

    // ===================
    //   ROUTING & STATE
    // ===================

    pub fn intercept_click(&self, text: &str) -> ClickOutcome {
        if !is_timestamp(text.trim()) {
            return ClickOutcome::Unhandled;
        }
        match self.active_instance() {
            Some(instance) => instance.handle_timestamp_click(text),
            None => ClickOutcome::NoActivePlayer,
        }
    }

    /// With no note focused there is nothing to compare against, so
    /// everything gets saved.
    pub fn on_layout_change(&mut self) {
        if self.active_note.is_none() {
            self.save_all_positions();
        }
    }

    pub fn update_settings(&mut self, settings: PlaybackSettings) -> Result<()> {
        let settings = settings.clamped();
        if let Some(path) = &self.settings_path {
            settings.save_to_file(path)?;
        }
        self.broadcast.publish(settings);
        for instance in self.instances.values_mut() {
            instance.sync_settings();
        }
        Ok(())
    }

    pub fn save_resume_position(&mut self, id: &str) {
        let Some(instance) = self.instances.get(id) else {
            return;
        };
        let Some(seconds) = instance.resume_seconds() else {
            return;
        };

        let link = instance.link();
        let key = link.media_id().unwrap_or_else(|| link.as_str().to_string());
        let position = ResumePosition::now(link.as_str(), seconds);

        if let Err(e) = self.db.save_resume_position(&key, &position) {
            warn!("Could not save position for {key}: {e}");
        }
    }

    pub fn save_all_positions(&mut self) {
        let ids = self.instances.keys().cloned().collect::<Vec<_>>();
        for id in ids {
            self.save_resume_position(&id);
        }
    }

    pub fn tick(&mut self, since_start: Duration) {
        self.scheduler.advance_to(since_start);
        for instance in self.instances.values_mut() {
            instance.process_events();
            instance.sync_settings();
        }
    }

    pub fn shutdown(&mut self) {
        self.save_all_positions();
        for (_, mut instance) in self.instances.drain(..) {
            instance.dispose();
        }
        self.mounted.clear();
        self.active_note = None;
        info!("Workspace shut down");
    }

    pub fn db(&mut self) -> &mut Database {
        &mut self.db
    }
}
