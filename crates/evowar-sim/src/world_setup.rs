//! Entity spawn factories for setting up the battle world.
//!
//! Creates the two bases, unit entities with their full component bundles,
//! and seed drops.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use evowar_core::components::*;
use evowar_core::constants::*;
use evowar_core::enums::*;
use evowar_core::types::Position;
use evowar_progression::stats::{effective_stats, EffectiveStats};
use evowar_progression::upgrades::UnitUpgrades;
use evowar_progression::BattleConfig;
use evowar_unit_ai::profiles::get_profile;

use crate::components::Combat;
use crate::lane;
use crate::level::Level;

/// Set up the battle world: one base per side. Returns `(player, enemy)`.
pub fn setup_battle(world: &mut World, battle: &BattleConfig) -> (Entity, Entity) {
    let player = spawn_building(
        world,
        BuildingKind::Base,
        Side::Player,
        PLAYER_BASE_X,
        battle.player_base_max_health,
    );
    let enemy = spawn_building(
        world,
        BuildingKind::Base,
        Side::Enemy,
        ENEMY_BASE_X,
        battle.enemy_base_max_health,
    );
    (player, enemy)
}

pub fn spawn_building(
    world: &mut World,
    kind: BuildingKind,
    side: Side,
    x: f64,
    max_health: f64,
) -> Entity {
    world.spawn((
        Building {
            kind,
            side,
            destroyed: false,
        },
        Position::new(x, BUILDING_Y),
        Health {
            current: max_health,
            max: max_health,
        },
    ))
}

/// Spawn a unit of `archetype` with precomputed stats at lane position `x`.
/// Its side follows from the archetype's faction.
pub fn spawn_unit_entity(
    world: &mut World,
    archetype: Archetype,
    stats: &EffectiveStats,
    x: f64,
    now_ms: f64,
) -> Entity {
    let faction = archetype.faction();
    let profile = get_profile(archetype);
    let unit = Unit {
        archetype,
        faction,
        side: faction.side(),
        delivery: profile.delivery,
    };
    let animation = Animation {
        last_update_ms: now_ms,
        ..Animation::default()
    };
    world.spawn((
        unit,
        Position::new(x, profile.body.lane_y()),
        stats.health(),
        stats.unit_stats(),
        animation,
        Combat::default(),
        Retreat::default(),
    ))
}

/// Spawn point for a new unit of `side`: pushed back one body width for each
/// live unit of `units` crowding it, checked once in list order.
pub fn spawn_x(world: &World, units: &[Entity], side: Side) -> f64 {
    let mut x = match side {
        Side::Player => PLAYER_SPAWN_X,
        Side::Enemy => ENEMY_SPAWN_X,
    };
    for &other in units {
        if !lane::is_live_unit(world, other) {
            continue;
        }
        if let Some(other_x) = lane::x_of(world, other) {
            if (x - other_x).abs() < UNIT_WIDTH {
                x -= UNIT_WIDTH * side.direction();
            }
        }
    }
    x
}

/// Spawn a player unit with its purchased upgrades applied.
pub fn spawn_player_unit(
    world: &mut World,
    archetype: Archetype,
    upgrades: Option<&UnitUpgrades>,
    player_units: &mut Vec<Entity>,
    now_ms: f64,
) -> Entity {
    let x = spawn_x(world, player_units, Side::Player);
    let stats = effective_stats(archetype, upgrades);
    let entity = spawn_unit_entity(world, archetype, &stats, x, now_ms);
    player_units.push(entity);
    log::info!(
        "spawned {}: health={:.1} damage={:.1} speed={:.1} cooldown={:.0}ms at x={x}",
        archetype.name(),
        stats.max_health,
        stats.attack_power,
        stats.speed,
        stats.attack_cooldown_ms,
    );
    entity
}

/// Spawn the level's next enemy. `None` if the pool is empty.
pub fn spawn_enemy_unit(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    level: &Level,
    enemy_units: &mut Vec<Entity>,
    now_ms: f64,
) -> Option<Entity> {
    let archetype = level.next_enemy(rng)?;
    let x = spawn_x(world, enemy_units, Side::Enemy);
    let stats = effective_stats(archetype, None);
    let entity = spawn_unit_entity(world, archetype, &stats, x, now_ms);
    enemy_units.push(entity);
    log::debug!(
        "spawned enemy {}: health={:.1} damage={:.1} speed={:.1} at x={x}",
        archetype.name(),
        stats.max_health,
        stats.attack_power,
        stats.speed,
    );
    Some(entity)
}

/// Spawn a seed drop of value 1 scattered around `x` on the ground line.
pub fn spawn_seed_drop(world: &mut World, rng: &mut ChaCha8Rng, x: f64, now_ms: f64) -> Entity {
    let scatter = rng.gen_range(-SEED_DROP_SCATTER..=SEED_DROP_SCATTER);
    world.spawn((
        Position::new(x + scatter, SEED_DROP_Y),
        SeedDrop {
            value: 1,
            created_ms: now_ms,
            alpha: 255,
        },
    ))
}
