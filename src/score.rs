use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "ascii-snake";
const SCORE_FILE_NAME: &str = "highscore.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Failure while reading or writing the high-score record.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Durable home of the single high-score value.
pub trait HighScoreStore {
    /// Returns the stored value, or 0 when nothing usable is stored.
    fn load(&mut self) -> u32;

    fn save(&mut self, high_score: u32) -> Result<(), ScoreError>;
}

/// Stores the high score as JSON under the user's config directory.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform config location.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(scores_path())
    }
}

impl HighScoreStore for FileScoreStore {
    fn load(&mut self) -> u32 {
        match load_high_score_from_path(&self.path) {
            Ok(score) => score,
            Err(ScoreError::Io(error)) if error.kind() == io::ErrorKind::NotFound => 0,
            Err(error) => {
                warn!("ignoring unreadable high score at {}: {error}", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, high_score: u32) -> Result<(), ScoreError> {
        save_high_score_to_path(&self.path, high_score)?;
        debug!("saved high score {high_score} to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the high score in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub high_score: u32,
    pub saves: u32,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryScoreStore {
    fn load(&mut self) -> u32 {
        self.high_score
    }

    fn save(&mut self, high_score: u32) -> Result<(), ScoreError> {
        self.high_score = high_score;
        self.saves += 1;
        Ok(())
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = fs::read_to_string(path)?;
    let file = serde_json::from_str::<ScoreFile>(&raw)?;
    Ok(file.high_score)
}

/// Writes to a sibling temp file, then renames over the target.
fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(&ScoreFile { high_score: score })?;
    let temp = path.with_extension("json.tmp");
    fs::write(&temp, json)?;
    if let Err(error) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(error.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{FileScoreStore, HighScoreStore, MemoryScoreStore};

    #[test]
    fn score_serialization_round_trip() {
        let path = unique_test_path("round_trip");
        let mut store = FileScoreStore::new(path.clone());

        store.save(42).expect("score save should succeed");
        assert_eq!(store.load(), 42);
        assert!(!path.with_extension("json.tmp").exists());

        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_loads_as_zero() {
        let mut store = FileScoreStore::new(unique_test_path("missing"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn malformed_score_file_loads_as_zero() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        let mut store = FileScoreStore::new(path.clone());
        assert_eq!(store.load(), 0);

        cleanup_test_path(&path);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let path = unique_test_path("overwrite");
        let mut store = FileScoreStore::new(path.clone());

        store.save(3).expect("first save should succeed");
        store.save(17).expect("second save should succeed");
        assert_eq!(store.load(), 17);

        cleanup_test_path(&path);
    }

    #[test]
    fn memory_store_counts_saves() {
        let mut store = MemoryScoreStore::with_high_score(9);
        assert_eq!(store.load(), 9);

        store.save(12).expect("memory save cannot fail");
        assert_eq!(store.high_score, 12);
        assert_eq!(store.saves, 1);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join(format!("ascii-snake-score-tests-{label}-{nanos}"))
            .join("highscore.json")
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
