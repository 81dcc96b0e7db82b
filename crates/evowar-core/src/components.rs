//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. Components that refer to
//! other entities live in the simulation crate, next to the ECS.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Identity of a combat unit. Fixed at spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    pub archetype: Archetype,
    pub faction: Faction,
    /// Fighting side; the lane direction is derived from it and never changes.
    pub side: Side,
    /// Direct damage or a projectile on the trigger frame.
    pub delivery: AttackDelivery,
}

/// Hit points. Invariant: `0 <= current <= max`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Per-instance combat stats, computed once at spawn from the archetype,
/// the faction modifiers and the upgrade tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitStats {
    pub attack_power: f64,
    /// Pixels per tick. May be lowered to match a slower ally ahead.
    pub speed: f64,
    pub attack_range: f64,
    /// Archetype cooldown before attack-speed upgrades.
    pub base_attack_cooldown_ms: f64,
    pub attack_cooldown_ms: f64,
}

/// Displayed animation state plus the simulation lifecycle tag.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Animation {
    pub state: CombatState,
    pub frame: u32,
    /// Time of the last frame advance.
    pub last_update_ms: f64,
    /// Start of the current "hurt" pose, if any.
    pub hurt_start_ms: Option<f64>,
    pub lifecycle: Lifecycle,
}

/// Set while a unit walks back to its formation slot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Retreat {
    pub active: bool,
    pub slot_x: f64,
}

/// Base or tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub side: Side,
    pub destroyed: bool,
}

/// Seed pickup dropped by a fallen enemy. Fades out before expiring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedDrop {
    pub value: u32,
    pub created_ms: f64,
    pub alpha: u8,
}
