//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Army ---
    /// Buy a unit of the given archetype at the player spawn point.
    SpawnUnit { archetype: Archetype },
    /// Spend secured seeds on an upgrade for a live unit.
    /// `unit_id` is the unit's entity id as reported in snapshots.
    ApplyUpgrade { unit_id: u64, stat: StatKind },
    /// Pull every live player unit back into formation.
    Regroup,

    // --- Simulation control ---
    Pause,
    Resume,
}
