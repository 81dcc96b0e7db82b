//! Economy: seeds, XP, kill rewards and seed drops.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use evowar_core::components::SeedDrop;
use evowar_core::constants::*;
use evowar_core::enums::Archetype;
use evowar_core::types::Position;
use evowar_unit_ai::profiles::get_profile;

use crate::world_setup;

/// In-battle currency and experience.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Economy {
    pub seeds: f64,
    pub xp: u32,
    pub level_up_available: bool,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            seeds: STARTING_SEEDS,
            xp: 0,
            level_up_available: false,
        }
    }
}

impl Economy {
    pub fn can_afford(&self, cost: u32) -> bool {
        self.seeds >= cost as f64
    }

    pub fn spend(&mut self, cost: u32) {
        self.seeds -= cost as f64;
    }
}

pub fn passive_income(economy: &mut Economy, per_tick: f64) {
    economy.seeds += per_tick;
}

/// Grant the seed and XP reward for a killed enemy and scatter one seed
/// drop per seed rewarded around where it fell.
pub fn grant_kill_rewards(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    economy: &mut Economy,
    seed_drops: &mut Vec<Entity>,
    archetype: Archetype,
    position: Position,
    now_ms: f64,
) {
    let profile = get_profile(archetype);
    economy.seeds += profile.seed_reward as f64;
    economy.xp += profile.xp_reward;
    for _ in 0..profile.seed_reward {
        seed_drops.push(world_setup::spawn_seed_drop(world, rng, position.x, now_ms));
    }
}

/// Remove expired seed drops, then fade the rest over their last second.
pub fn update_seed_drops(
    world: &mut World,
    seed_drops: &mut Vec<Entity>,
    now_ms: f64,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    seed_drops.retain(|&entity| match world.get::<&SeedDrop>(entity) {
        Ok(drop) if now_ms - drop.created_ms >= SEED_DROP_LIFETIME_MS => {
            despawn_buffer.push(entity);
            false
        }
        Ok(_) => true,
        Err(_) => false,
    });
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for &entity in seed_drops.iter() {
        if let Ok(mut drop) = world.get::<&mut SeedDrop>(entity) {
            drop.alpha = fade_alpha(now_ms - drop.created_ms);
        }
    }
}

/// Opacity of a seed drop `elapsed_ms` after it appeared.
pub fn fade_alpha(elapsed_ms: f64) -> u8 {
    let fade_start = SEED_DROP_LIFETIME_MS - SEED_DROP_FADE_MS;
    if elapsed_ms <= fade_start {
        return 255;
    }
    let remaining = (SEED_DROP_LIFETIME_MS - elapsed_ms).max(0.0);
    (255.0 * remaining / SEED_DROP_FADE_MS) as u8
}

pub fn update_level_up(economy: &mut Economy) {
    economy.level_up_available = economy.xp >= MAX_XP;
}
