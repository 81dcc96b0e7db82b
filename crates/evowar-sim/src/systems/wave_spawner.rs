//! Enemy spawn timer.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use evowar_core::constants::ENEMY_SPAWN_INTERVAL_MS;

use crate::level::Level;
use crate::world_setup;

/// Periodic enemy spawning, counted from the start of the battle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTimer {
    pub last_spawn_ms: f64,
    /// Set once the enemy base falls; never cleared.
    pub stopped: bool,
}

impl SpawnTimer {
    pub fn is_due(&self, now_ms: f64) -> bool {
        !self.stopped && now_ms - self.last_spawn_ms >= ENEMY_SPAWN_INTERVAL_MS
    }
}

/// Spawn the next enemy if the timer has run out.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    timer: &mut SpawnTimer,
    level: &Level,
    enemy_units: &mut Vec<Entity>,
    now_ms: f64,
) -> Option<Entity> {
    if !timer.is_due(now_ms) {
        return None;
    }
    timer.last_spawn_ms = now_ms;
    world_setup::spawn_enemy_unit(world, rng, level, enemy_units, now_ms)
}
