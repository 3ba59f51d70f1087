//! Best-score persistence
//!
//! The simulation only needs a single number back from the host (the best
//! score so far, for the new-high flag), so the store is a tiny trait with
//! an in-memory implementation and a JSON file implementation for native
//! builds.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Host-side store for the best score across runs
pub trait HighScoreStore {
    /// Best score recorded so far
    fn get(&self) -> u64;
    /// Record a new best score
    fn set(&mut self, score: u64);
}

/// Volatile store; scores last as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    best: u64,
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> u64 {
        self.best
    }

    fn set(&mut self, score: u64) {
        self.best = score;
    }
}

/// On-disk layout of the score file
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    best_score: u64,
}

/// JSON file store; a missing or corrupt file falls back to zero
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    best: u64,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<ScoreFile>(&json) {
                Ok(file) => {
                    log::info!("loaded best score {} from {}", file.best_score, path.display());
                    file.best_score
                }
                Err(err) => {
                    log::warn!("score file {} is corrupt ({err}), starting fresh", path.display());
                    0
                }
            },
            Err(_) => {
                log::info!("no score file at {}, starting fresh", path.display());
                0
            }
        };
        Self { path, best }
    }

    fn save(&self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&ScoreFile {
            best_score: self.best,
        })?;
        fs::write(&self.path, json)
    }
}

impl HighScoreStore for JsonFileStore {
    fn get(&self) -> u64 {
        self.best
    }

    fn set(&mut self, score: u64) {
        self.best = score;
        if let Err(err) = self.save() {
            log::warn!("failed to save score file {}: {err}", self.path.display());
        }
    }
}
