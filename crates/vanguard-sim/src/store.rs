//! High-score persistence behind the `StateStore` trait.
//!
//! The engine only writes when a run ends. Failures are reported back as
//! `StoreError`; the engine logs them and keeps running.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Where the persisted high score lives.
pub trait StateStore: Send {
    fn load_high_score(&self) -> Result<u32, StoreError>;
    fn save_high_score(&mut self, high_score: u32) -> Result<(), StoreError>;
}

/// In-process store, used by tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    high_score: u32,
    writes: usize,
}

impl MemoryStateStore {
    pub fn new(high_score: u32) -> Self {
        Self {
            high_score,
            writes: 0,
        }
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StateStore for MemoryStateStore {
    fn load_high_score(&self) -> Result<u32, StoreError> {
        Ok(self.high_score)
    }

    fn save_high_score(&mut self, high_score: u32) -> Result<(), StoreError> {
        self.high_score = high_score;
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(rename = "neon_vanguard_highscore")]
    high_score: u32,
}

/// Single JSON file holding the high score.
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStateStore {
    /// A missing file means no high score yet.
    fn load_high_score(&self) -> Result<u32, StoreError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let json = fs::read_to_string(&self.path)?;
        let data: HighScoreFile = serde_json::from_str(&json)?;
        Ok(data.high_score)
    }

    fn save_high_score(&mut self, high_score: u32) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&HighScoreFile { high_score })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
