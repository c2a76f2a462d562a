//! Save/load persistence
//!
//! - `ScoreStore`: injected storage for the leaderboard (and so the best score)
//! - JSON save files for resuming a run
//! - Writes go to a temp file first, then replace the target

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::highscores::{HighScoreEntry, HighScores};
use crate::sim::GameState;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage for the leaderboard
pub trait ScoreStore {
    fn load(&self) -> Result<HighScores, PersistError>;
    fn save(&mut self, scores: &HighScores) -> Result<(), PersistError>;

    /// Best recorded score (0 when nothing is stored)
    fn best_score(&self) -> Result<u64, PersistError> {
        Ok(self.load()?.best_score())
    }

    /// Record a finished run; returns its rank if it made the board
    fn record_best(&mut self, entry: HighScoreEntry) -> Result<Option<usize>, PersistError> {
        let mut scores = self.load()?;
        let rank = scores.add_score(entry);
        if rank.is_some() {
            self.save(&scores)?;
        }
        Ok(rank)
    }
}

/// In-memory store (tests, throwaway sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HighScores,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<HighScores, PersistError> {
        Ok(self.scores.clone())
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), PersistError> {
        self.scores = scores.clone();
        Ok(())
    }
}

/// Leaderboard kept in a JSON file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<HighScores, PersistError> {
        match read_json(&self.path)? {
            Some(scores) => {
                log::debug!("Loaded high scores from {}", self.path.display());
                Ok(scores)
            }
            None => {
                log::info!("No high scores at {}, starting fresh", self.path.display());
                Ok(HighScores::new())
            }
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), PersistError> {
        write_json(&self.path, scores)?;
        log::info!("High scores saved ({} entries)", scores.entries.len());
        Ok(())
    }
}

/// Write a run to `path` so it can be resumed later
pub fn save_game(path: &Path, state: &GameState) -> Result<(), PersistError> {
    write_json(path, state)?;
    log::info!("Game saved to {} (score {})", path.display(), state.score);
    Ok(())
}

/// Load a saved run; `Ok(None)` if there is none
pub fn load_game(path: &Path) -> Result<Option<GameState>, PersistError> {
    read_json(path)
}

/// Remove a save file; missing files are fine
pub fn clear_game(path: &Path) -> Result<(), PersistError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PersistError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    Ok(Some(serde_json::from_str(&text)?))
}

pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let io_err = |source: io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_FOUR_CHANCE;
    use crate::sim::Direction;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            highest_tile: 256,
            moves: 42,
            timestamp_ms: 1,
        }
    }

    #[test]
    fn test_memory_store_tracks_best() {
        let mut store = MemoryStore::new();
        assert_eq!(store.best_score().unwrap(), 0);
        assert_eq!(store.record_best(entry(300)).unwrap(), Some(1));
        assert_eq!(store.record_best(entry(100)).unwrap(), Some(2));
        assert_eq!(store.best_score().unwrap(), 300);
        assert_eq!(store.record_best(entry(0)).unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("scores.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = JsonFileStore::new(&path);
        store.record_best(entry(1200)).unwrap();
        store.record_best(entry(800)).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.best_score().unwrap(), 1200);
        assert_eq!(reopened.load().unwrap().entries.len(), 2);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Json(_))));
    }

    #[test]
    fn test_save_and_resume_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        assert!(load_game(&path).unwrap().is_none());

        let mut state = GameState::new(77, DEFAULT_FOUR_CHANCE);
        state.step(Direction::Left);
        save_game(&path, &state).unwrap();

        let mut resumed = load_game(&path).unwrap().unwrap();
        assert_eq!(resumed.grid, state.grid);
        assert_eq!(resumed.score, state.score);
        assert_eq!(resumed.step(Direction::Up), state.step(Direction::Up));

        clear_game(&path).unwrap();
        assert!(load_game(&path).unwrap().is_none());
        clear_game(&path).unwrap();
    }
}
