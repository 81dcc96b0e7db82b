//! Saving and loading player progress.

use std::fs;
use std::path::{Path, PathBuf};

use evowar_core::error::PersistenceError;

use crate::upgrades::PlayerProgress;

/// Somewhere player progress can be kept between sessions.
pub trait ProgressStore {
    /// Load progress, falling back to defaults when nothing was saved yet.
    fn load(&self) -> Result<PlayerProgress, PersistenceError>;
    fn save(&mut self, progress: &PlayerProgress) -> Result<(), PersistenceError>;
}

/// Pretty-printed JSON file on disk.
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

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<PlayerProgress, PersistenceError> {
        if !self.path.exists() {
            log::info!(
                "no progress file at {}, starting fresh",
                self.path.display()
            );
            return Ok(PlayerProgress::default());
        }
        let json = fs::read_to_string(&self.path)?;
        parse(&json)
    }

    fn save(&mut self, progress: &PlayerProgress) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store holding the serialized record.
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON last written, if any.
    pub fn contents(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<PlayerProgress, PersistenceError> {
        match &self.json {
            Some(json) => parse(json),
            None => Ok(PlayerProgress::default()),
        }
    }

    fn save(&mut self, progress: &PlayerProgress) -> Result<(), PersistenceError> {
        self.json = Some(serde_json::to_string(progress)?);
        Ok(())
    }
}

fn parse(json: &str) -> Result<PlayerProgress, PersistenceError> {
    let mut progress: PlayerProgress = serde_json::from_str(json)?;
    progress.merge_defaults();
    Ok(progress)
}

/// Load progress, logging and falling back to defaults on any failure.
pub fn load_or_default(store: &dyn ProgressStore) -> PlayerProgress {
    store.load().unwrap_or_else(|err| {
        log::warn!("failed to load player progress: {err}; using defaults");
        PlayerProgress::default()
    })
}
