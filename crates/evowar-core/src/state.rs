//! Battle state snapshot: the complete visible state after a tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete battle state handed to the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: BattlePhase,
    pub level: u32,
    pub enemy_faction: Faction,
    pub seeds: f64,
    pub xp: u32,
    pub max_xp: u32,
    pub level_up_available: bool,
    pub enemy_spawns_stopped: bool,
    pub units: Vec<UnitView>,
    pub buildings: Vec<BuildingView>,
    pub projectiles: Vec<ProjectileView>,
    pub seed_drops: Vec<SeedDropView>,
    pub events: Vec<GameEvent>,
}

/// A unit as shown on the battlefield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    /// Entity id; use it to address `ApplyUpgrade`.
    pub id: u64,
    pub archetype: Archetype,
    pub side: Side,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub attack_power: f64,
    pub speed: f64,
    pub attack_cooldown_ms: f64,
    pub state: CombatState,
    pub frame: u32,
    pub retreating: bool,
    /// Entity id of the current attack target, if any.
    pub target: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingView {
    pub side: Side,
    pub kind: BuildingKind,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub position: Position,
    /// Sprite orientation in degrees, counter-clockwise from east.
    pub angle_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDropView {
    pub position: Position,
    pub value: u32,
    pub alpha: u8,
}
