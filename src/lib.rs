use anyhow::{Result, anyhow};
use ratatui::crossterm::{
    ExecutableCommand,
    cursor::MoveToColumn,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

pub mod app_core;
pub mod database;
pub mod domain;
pub mod key_handler;
pub mod player;
pub mod tui;
pub mod ui_state;

pub use database::Database;

// ~30fps
pub const REFRESH_RATE: u64 = 33;

pub const CONFIG_DIRECTORY: &str = "MediaNotes";
pub const SETTINGS_FILENAME: &str = "settings.toml";
pub const DATABASE_FILENAME: &str = "medianotes.db";
pub const LOG_FILENAME: &str = "medianotes.log";

const NOTE_EXTENSION: &str = "md";

/// Expand the command line into note files. Folders contribute every
/// markdown file below them, in path order.
pub fn collect_notes<P: AsRef<Path>>(args: &[P]) -> Result<Vec<PathBuf>> {
    let mut notes = Vec::new();

    for arg in args {
        let path = expand_tilde(arg)?;
        if path.is_dir() {
            let mut found = WalkDir::new(&path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().is_some_and(|ext| ext == NOTE_EXTENSION))
                .collect::<Vec<_>>();
            found.sort();
            notes.extend(found);
        } else {
            notes.push(path);
        }
    }

    Ok(notes)
}

pub fn overwrite_line(message: &str) {
    let mut stdout = std::io::stdout();
    let _ = stdout
        .execute(MoveToColumn(0))
        .and_then(|out| out.execute(Clear(ClearType::CurrentLine)))
        .and_then(|out| out.execute(Print(message)));
    let _ = stdout.flush();
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    match path_str.strip_prefix("~/") {
        Some(rest) => {
            let home =
                dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
            Ok(home.join(rest))
        }
        None if path_str == "~" => {
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))
        }
        None => Ok(path.to_path_buf()),
    }
}
