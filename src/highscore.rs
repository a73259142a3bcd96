//! High score persistence
//!
//! A single integer, stored as one flat text record. Loaded once at startup;
//! written only when a finished run beats it. A missing or unreadable record
//! means "no prior high score".

use std::path::{Path, PathBuf};

use crate::error::PersistError;

/// Where the high score record lives
pub trait ScoreStorage {
    /// Read the stored value (`Ok(None)` when nothing has been stored yet)
    fn read(&self) -> Result<Option<u64>, PersistError>;
    /// Replace the stored value
    fn write(&mut self, score: u64) -> Result<(), PersistError>;
}

/// Text file holding the score as a JSON number
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStorage for FileStorage {
    fn read(&self) -> Result<Option<u64>, PersistError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistError::io(&self.path, e)),
        };
        let score = serde_json::from_str(text.trim())
            .map_err(|e| PersistError::parse(&self.path, e))?;
        Ok(Some(score))
    }

    fn write(&mut self, score: u64) -> Result<(), PersistError> {
        let record = serde_json::to_string(&score)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;
            }
        }
        std::fs::write(&self.path, record).map_err(|e| PersistError::io(&self.path, e))
    }
}

/// In-memory storage (tests, headless runs without a save file)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    pub value: Option<u64>,
    /// Number of writes performed
    pub writes: usize,
}

impl ScoreStorage for MemoryStorage {
    fn read(&self) -> Result<Option<u64>, PersistError> {
        Ok(self.value)
    }

    fn write(&mut self, score: u64) -> Result<(), PersistError> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// The process-wide high score and its backing storage
#[derive(Debug, Clone)]
pub struct HighScore<S: ScoreStorage> {
    storage: S,
    best: u64,
}

impl<S: ScoreStorage> HighScore<S> {
    /// Load the stored high score, treating any failure as 0
    pub fn load(storage: S) -> Self {
        let best = match storage.read() {
            Ok(Some(score)) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {}", e);
                0
            }
        };
        Self { storage, best }
    }

    /// Current high score
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record `score` if it beats the current high score
    ///
    /// Returns true when the score became the new high score. The in-memory
    /// value is updated even if writing the record fails.
    pub fn save(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match self.storage.write(score) {
            Ok(()) => log::info!("New high score saved: {}", score),
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
        true
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
