//! Game settings and preferences
//!
//! Stored as JSON next to the other save data. A missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_FOUR_CHANCE;
use crate::persistence::{self, PersistError};

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("four_chance must be within 0.0..=1.0, got {0}")]
    FourChance(f64),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Probability that a spawned tile is a 4 instead of a 2
    pub four_chance: f64,
    /// Keep playing past the win tile without stopping to ask
    pub keep_playing_after_win: bool,
    /// Leaderboard file
    pub highscores_path: PathBuf,
    /// Save file used by `save` and `--resume`
    pub save_path: PathBuf,
    /// Print the key help under the board
    pub show_hints: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            four_chance: DEFAULT_FOUR_CHANCE,
            keep_playing_after_win: false,
            highscores_path: PathBuf::from("slide-2048-highscores.json"),
            save_path: PathBuf::from("slide-2048-save.json"),
            show_hints: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it doesn't exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(PersistError::Io {
                    path: path.to_path_buf(),
                    source,
                }
                .into());
            }
        };

        let settings: Settings = serde_json::from_str(&text).map_err(PersistError::from)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;
        persistence::write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.four_chance) {
            return Err(SettingsError::FourChance(self.four_chance));
        }
        Ok(())
    }
}
