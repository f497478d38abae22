use crate::{
    Database, overwrite_line,
    app_core::{ClockPlayerFactory, PlayerInstance, Workspace},
    domain::Note,
    key_handler::{self, ClickOutcome, Command},
    tui,
    ui_state::{PlaybackSettings, UiState},
};
use anyhow::{Result, bail};
use log::{debug, info, warn};
use ratatui::crossterm::event::Event;
use std::{path::PathBuf, time::Instant};

const CLOCK_DURATION: f64 = 60.0 * 60.0;

pub struct MediaNotes {
    started: Instant,
    ui: UiState,
    quit: bool,
}

impl MediaNotes {
    pub fn new(paths: &[PathBuf]) -> Result<Self> {
        let notes = paths
            .iter()
            .filter_map(|p| match Note::load(p) {
                Ok(note) => Some(note),
                Err(e) => {
                    warn!("Skipping {}: {e}", p.display());
                    None
                }
            })
            .collect::<Vec<_>>();

        if notes.is_empty() {
            bail!("No readable notes given");
        }

        let settings_path = PlaybackSettings::default_path()?;
        let settings = PlaybackSettings::load_or_default(&settings_path);
        let db = Database::open()?;

        let workspace = Workspace::new(
            db,
            Box::new(ClockPlayerFactory {
                duration: CLOCK_DURATION,
            }),
            settings,
            Some(settings_path),
        );

        info!("Opened {} notes", notes.len());

        Ok(MediaNotes {
            started: Instant::now(),
            ui: UiState::new(workspace, notes),
            quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        // MAIN ROUTINE
        while !self.quit {
            self.ui.workspace.tick(self.started.elapsed());

            match key_handler::next_event()? {
                Some(Event::Key(key)) => {
                    if let Some(command) = key_handler::handle_key_event(&key) {
                        self.ui.clear_error();
                        if let Err(e) = self.handle_command(command) {
                            self.ui.set_error(e);
                        }
                    }
                }
                Some(Event::Resize(..)) => self.ui.workspace.on_layout_change(),
                _ => (),
            }

            terminal.draw(|f| tui::render(f, &mut self.ui))?;
        }

        ratatui::restore();
        overwrite_line("Saving notes...");

        self.ui.workspace.shutdown();
        let saved = self.ui.save_notes();

        overwrite_line("Goodbye!\n");
        saved
    }

    #[rustfmt::skip]
    fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::TogglePlayback  => self.with_player(|p| p.toggle_play_pause())?,
            Command::SeekForward     => self.with_player(|p| p.seek_forward())?,
            Command::SeekBackward    => self.with_player(|p| p.seek_backward())?,
            Command::SpeedUp         => self.with_player(|p| p.step_speed(true))?,
            Command::SpeedDown       => self.with_player(|p| p.step_speed(false))?,

            Command::InsertTimestamp => self.ui.insert_timestamp()?,
            Command::Cursor(dir)     => self.ui.move_cursor(dir),
            Command::ActivateLine    => self.activate_line(),

            Command::NextNote        => self.ui.next_note(),
            Command::ToggleSplit     => {
                self.ui.workspace.toggle_split();
                self.ui.workspace.on_layout_change();
            }

            Command::QUIT            => self.quit = true,
        }
        Ok(())
    }

    fn with_player<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut PlayerInstance) -> Result<()>,
    {
        match self.ui.workspace.active_instance_mut() {
            Some(instance) => f(instance),
            None => bail!("This note has no video"),
        }
    }

    fn activate_line(&mut self) {
        match self.ui.activate_line() {
            ClickOutcome::Handled(secs) => debug!("jumped to {secs}s"),
            ClickOutcome::NoActivePlayer => warn!("timestamp ignored, no player mounted"),
            ClickOutcome::Unhandled => (),
        }
    }
}
