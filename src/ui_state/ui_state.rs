use crate::{
    app_core::Workspace,
    domain::{Note, is_timestamp, link_labels},
    key_handler::{ClickOutcome, MoveDirection},
};
use anyhow::{Error, Result, anyhow};
use log::{error, warn};

pub struct UiState {
    pub(crate) workspace: Workspace,
    notes: Vec<Note>,
    cursors: Vec<usize>,
    current: usize,
    error: Option<String>,
}

impl UiState {
    pub fn new(workspace: Workspace, notes: Vec<Note>) -> Self {
        let cursors = notes.iter().map(Note::body_start).collect();
        let mut ui = UiState {
            workspace,
            notes,
            cursors,
            current: 0,
            error: None,
        };
        ui.mount_players();
        ui.focus_current();
        ui
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.notes.get(self.current)
    }

    pub fn cursor(&self) -> usize {
        self.cursors.get(self.current).copied().unwrap_or(0)
    }

    pub fn get_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, e: Error) {
        error!("{e}");
        self.error = Some(e.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn mount_players(&mut self) {
        for note in &self.notes {
            if let Err(e) = self.workspace.render_player(note) {
                warn!("No player for {}: {e}", note.path.display());
            }
        }
    }

    fn focus_current(&mut self) {
        let path = self.current_note().map(|n| n.path.clone());
        self.workspace.set_active_note(path.as_deref());
    }

    pub fn next_note(&mut self) {
        if self.notes.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.notes.len();
        self.focus_current();
        self.workspace.on_layout_change();
    }

    pub fn move_cursor(&mut self, direction: MoveDirection) {
        let Some(len) = self.current_note().map(|n| n.lines.len()) else {
            return;
        };
        let Some(cursor) = self.cursors.get_mut(self.current) else {
            return;
        };

        *cursor = match direction {
            MoveDirection::Up => cursor.saturating_sub(1),
            MoveDirection::Down => (*cursor + 1).min(len.saturating_sub(1)),
        };
    }

    pub fn insert_timestamp(&mut self) -> Result<()> {
        let snippet = match self.workspace.active_instance() {
            Some(instance) => instance.insert_timestamp()?,
            None => return Err(anyhow!("This note has no video")),
        };
        let Some(snippet) = snippet else {
            return Ok(());
        };

        let line = self.cursor();
        if let Some(note) = self.notes.get_mut(self.current) {
            let cursor = note.insert_at(line, &snippet);
            self.cursors[self.current] = cursor;
        }
        Ok(())
    }

    /// Follow the first timestamp link on the cursor line, or the line
    /// itself if it is a bare timestamp.
    pub fn activate_line(&mut self) -> ClickOutcome {
        let Some(line) = self
            .current_note()
            .and_then(|n| n.lines.get(self.cursor()))
        else {
            return ClickOutcome::Unhandled;
        };

        let target = link_labels(line)
            .into_iter()
            .find(|label| is_timestamp(label))
            .unwrap_or(line.trim())
            .to_string();

        self.workspace.intercept_click(&target)
    }

    pub fn save_notes(&mut self) -> Result<()> {
        for note in self.notes.iter_mut() {
            note.save()?;
        }
        Ok(())
    }
}
