use crate::{CONFIG_DIRECTORY, SETTINGS_FILENAME, ui_state::color::parse_color};
use anyhow::{Result, anyhow};
use log::{info, warn};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitMode {
    Horizontal,
    #[default]
    Vertical,
}

impl SplitMode {
    pub fn toggled(self) -> Self {
        match self {
            SplitMode::Horizontal => SplitMode::Vertical,
            SplitMode::Vertical => SplitMode::Horizontal,
        }
    }
}

/// User configuration shared by every player. Never mutated in place by the
/// players themselves: a change produces a whole new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackSettings {
    pub seek_seconds: u32,
    pub vertical_player_height: u16,
    pub horizontal_player_width: u16,
    pub default_split_mode: SplitMode,
    pub pause_on_timestamp_insert: bool,
    pub display_progress_bar: bool,
    pub display_timestamp: bool,
    pub timestamp_offset_seconds: u32,
    pub background_color: String,
    pub progress_bar_color: String,
    pub timestamp_template: String,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        PlaybackSettings {
            seek_seconds: 10,
            vertical_player_height: 40,
            horizontal_player_width: 40,
            default_split_mode: SplitMode::Vertical,
            pause_on_timestamp_insert: false,
            display_progress_bar: true,
            display_timestamp: true,
            timestamp_offset_seconds: 6,
            background_color: String::from("#000000"),
            progress_bar_color: String::from("#FF0000"),
            timestamp_template: String::from("[{ts}]({link})\\n"),
        }
    }
}

impl PlaybackSettings {
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| anyhow!("Config folder not present on system!"))?;
        Ok(dir.join(CONFIG_DIRECTORY).join(SETTINGS_FILENAME))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_str = fs::read_to_string(path.as_ref())?;
        let settings = toml::from_str::<PlaybackSettings>(&file_str)?;
        Ok(settings.clamped())
    }

    /// A broken file is logged and replaced by defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        Self::load_from_file(path).unwrap_or_else(|e| {
            warn!("Could not read settings at {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn clamped(mut self) -> Self {
        self.seek_seconds = self.seek_seconds.clamp(1, 60);
        self.vertical_player_height = self.vertical_player_height.clamp(5, 95);
        self.horizontal_player_width = self.horizontal_player_width.clamp(5, 95);
        self.timestamp_offset_seconds = self.timestamp_offset_seconds.min(60);
        self
    }

    pub fn progress_color(&self) -> Color {
        parse_color(&self.progress_bar_color).unwrap_or(Color::Red)
    }

    pub fn background(&self) -> Color {
        parse_color(&self.background_color).unwrap_or(Color::Black)
    }

    /// Fill the insertion template. `{ts}` and `{link}` are replaced once
    /// each, `{link}` only when a link is known; the two-character escape
    /// `\n` becomes a real line break afterwards.
    pub fn render_template(&self, ts: &str, link: Option<&str>) -> String {
        let mut snippet = self.timestamp_template.replacen("{ts}", ts, 1);
        if let Some(link) = link {
            snippet = snippet.replacen("{link}", link, 1);
        }
        snippet.replace("\\n", "\n")
    }
}
