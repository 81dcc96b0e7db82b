//! Player progression for EVOWAR.
//!
//! Upgrade tiers owned by the player between battles, the pure formulas that
//! turn them into per-unit stats, and JSON persistence.

pub mod persistence;
pub mod stats;
pub mod upgrades;

pub use stats::{BattleConfig, EffectiveStats};
pub use upgrades::PlayerProgress;

#[cfg(test)]
mod tests;
