//! High score persistence
//!
//! A single integer best score. Stored as a small JSON document on disk;
//! tests and embedders can swap in [`MemoryStore`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reading or writing the high score
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable storage for the best score
pub trait HighScoreStore {
    fn load(&mut self) -> Result<u64, StoreError>;
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// On-disk layout
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

/// JSON file next to the executable (or wherever settings point)
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> Result<u64, StoreError> {
        let json = fs::read_to_string(&self.path)?;
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        log::info!("Loaded high score {} from {}", record.high_score, self.path.display());
        Ok(record.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, json)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store that counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_score: u64,
    pub saves: u32,
}

impl MemoryStore {
    pub fn new(high_score: u64) -> Self {
        Self {
            high_score,
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u64, StoreError> {
        Ok(self.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.high_score = score;
        self.saves += 1;
        Ok(())
    }
}
