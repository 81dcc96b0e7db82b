//! Simulation-side components that hold entity handles.
//!
//! Handles are weak: the referenced entity may be reaped at any time, so
//! every use goes through a liveness check against the world.

use glam::DVec2;
use hecs::Entity;

use evowar_core::enums::{ProjectileKind, Side};
use evowar_core::types::Position;

/// Attack bookkeeping for a unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Combat {
    /// Current attack target. Never owned.
    pub target: Option<Entity>,
    pub is_attacking: bool,
    /// Start of the last attack; `None` until the first one.
    pub last_attack_ms: Option<f64>,
    /// Last positive-path attack-range check; `None` until the first one.
    pub last_range_check_ms: Option<f64>,
}

/// A projectile in flight.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Side of the shooter.
    pub side: Side,
    /// Intended victim. Never owned.
    pub target: Entity,
    pub damage: f64,
    pub origin: Position,
    /// Pixels per tick. Arrows gain `gravity` on y each tick.
    pub velocity: DVec2,
    pub gravity: f64,
    /// Sprite orientation, counter-clockwise from east.
    pub angle_deg: f64,
    pub active: bool,
}
