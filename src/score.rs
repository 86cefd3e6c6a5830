use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "themed-snake";
const SCORE_FILE_NAME: &str = "scores.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Durable best score, read once at startup and written on improvement.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    high_score: u32,
}

impl HighScoreStore {
    /// Opens the store at `path`.
    ///
    /// A missing file counts as a high score of zero. An unreadable or
    /// malformed file is an error so the caller can decide to warn and
    /// continue with [`HighScoreStore::empty`].
    pub fn open(path: PathBuf) -> io::Result<Self> {
        let high_score = load_high_score_from_path(&path)?;
        Ok(Self { path, high_score })
    }

    /// Creates a store at `path` that ignores any existing file contents.
    #[must_use]
    pub fn empty(path: PathBuf) -> Self {
        Self {
            path,
            high_score: 0,
        }
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a finished game's score.
    ///
    /// Returns `Ok(true)` when the score beat the stored one. The in-memory
    /// value is raised even if the write fails, so the running session keeps
    /// showing the new best.
    pub fn submit(&mut self, final_score: u32) -> io::Result<bool> {
        if final_score <= self.high_score {
            return Ok(false);
        }

        self.high_score = final_score;
        save_high_score_to_path(&self.path, final_score)?;
        info!("new high score {final_score} saved to {}", self.path.display());
        Ok(true)
    }
}

fn load_high_score_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_high_score_to_path(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{HighScoreStore, load_high_score_from_path, save_high_score_to_path};

    #[test]
    fn saved_score_is_loaded_back() {
        let path = unique_test_path("round_trip");

        save_high_score_to_path(&path, 42).expect("score save should succeed");
        let loaded = load_high_score_from_path(&path).expect("load should succeed");

        assert_eq!(loaded, 42);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let path = unique_test_path("missing");
        let store = HighScoreStore::open(path).expect("missing file should open");
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn malformed_score_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(
            HighScoreStore::open(path.clone()).is_err(),
            "malformed file should return Err"
        );

        cleanup_test_path(&path);
    }

    #[test]
    fn submit_only_persists_improvements() {
        let path = unique_test_path("submit");
        let mut store = HighScoreStore::open(path.clone()).expect("store should open");

        assert!(store.submit(30).expect("first submit should write"));
        assert!(!store.submit(20).expect("lower score should be ignored"));
        assert!(!store.submit(30).expect("equal score should be ignored"));
        assert_eq!(store.high_score(), 30);

        let reopened = HighScoreStore::open(path.clone()).expect("store should reopen");
        assert_eq!(reopened.high_score(), 30);

        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("themed-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
