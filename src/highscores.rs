//! Best score persistence
//!
//! A single named value, stored as a small JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;

/// The best score ever reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key for the persisted value
    pub const STORAGE_KEY: &'static str = "tempo-strike-highscore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Whether a score would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Keep the maximum; returns true on a new best
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New high score: {} (was {})", score, self.best);
        self.best = score;
        true
    }

    /// File name used inside a storage directory
    pub fn file_name() -> String {
        format!("{}.json", Self::STORAGE_KEY)
    }

    /// Load from a storage directory, starting fresh on any failure
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(Self::file_name());
        match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<HighScore>(&json) {
                Ok(score) => {
                    log::info!("Loaded high score {}", score.best);
                    return score;
                }
                Err(e) => log::warn!("Ignoring corrupt high score file: {}", e),
            },
            Err(_) => log::info!("No high score found, starting fresh"),
        }
        Self::new()
    }

    /// Save into a storage directory
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = dir.as_ref().join(Self::file_name());
        fs::write(path, serde_json::to_string(self)?)?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_max() {
        let mut hs = HighScore::new();
        assert!(!hs.record(0));
        assert!(hs.record(500));
        assert!(!hs.record(400));
        assert!(!hs.record(500));
        assert!(hs.record(501));
        assert_eq!(hs.best, 501);
    }

    #[test]
    fn test_persist_roundtrip() {
        let dir = std::env::temp_dir().join(format!("tempo-strike-hs-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        assert_eq!(HighScore::load(&dir), HighScore::new());

        let mut hs = HighScore::new();
        hs.record(1234);
        hs.save(&dir).unwrap();
        assert_eq!(HighScore::load(&dir).best, 1234);

        let _ = fs::remove_dir_all(&dir);
    }
}
