//! Error types surfaced by the simulation and its collaborators.

use thiserror::Error;

use crate::enums::{Archetype, StatKind};

/// Fatal construction errors. Not recoverable.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid level number: {0}")]
    InvalidLevel(u32),
    #[error("frame duration must be positive, got {0} ms")]
    InvalidFrameDuration(f64),
}

/// A spawn request that was turned down. No state was changed.
#[derive(Debug, Error, PartialEq)]
pub enum SpawnRefused {
    #[error("not enough seeds: need {cost}, have {available:.1}")]
    InsufficientSeeds { cost: u32, available: f64 },
    #[error("{0:?} cannot be spawned by the player")]
    NotPlayerArchetype(Archetype),
    #[error("{0:?} is not unlocked yet")]
    Locked(Archetype),
    #[error("the battle is over")]
    BattleOver,
}

/// An in-battle upgrade request that was turned down. No state was changed.
#[derive(Debug, Error, PartialEq)]
pub enum UpgradeRefused {
    #[error("not enough secured seeds: need {cost}, have {available}")]
    InsufficientSeeds { cost: u32, available: u32 },
    #[error("no such unit")]
    UnknownUnit,
    #[error("unit is dying")]
    UnitDying,
    #[error("upgrade track is at its maximum level")]
    AtMaxLevel,
    #[error("{archetype:?} has no {stat:?} upgrade track")]
    NotUpgradable { archetype: Archetype, stat: StatKind },
}

/// Asset load failure. Never escapes the asset cache, which falls back to a
/// placeholder instead.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    Missing(String),
    #[error("asset malformed: {0}")]
    Malformed(String),
}

/// Failure while loading or saving player progression.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("progress file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("progress file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
