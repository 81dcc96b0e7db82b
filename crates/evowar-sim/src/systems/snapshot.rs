//! Snapshot system: queries the ECS world and builds a complete
//! `GameStateSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use evowar_core::components::*;
use evowar_core::constants::MAX_XP;
use evowar_core::enums::BattlePhase;
use evowar_core::events::GameEvent;
use evowar_core::state::*;
use evowar_core::types::{Position, SimTime};

use crate::components::{Combat, Projectile};
use crate::level::Level;
use crate::systems::economy::Economy;

/// Build a complete snapshot. Units appear in `units` order.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: BattlePhase,
    level: &Level,
    economy: &Economy,
    enemy_spawns_stopped: bool,
    units: impl IntoIterator<Item = Entity>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        level: level.number,
        enemy_faction: level.faction,
        seeds: economy.seeds,
        xp: economy.xp,
        max_xp: MAX_XP,
        level_up_available: economy.level_up_available,
        enemy_spawns_stopped,
        units: units
            .into_iter()
            .filter_map(|e| build_unit(world, e))
            .collect(),
        buildings: build_buildings(world),
        projectiles: build_projectiles(world),
        seed_drops: build_seed_drops(world),
        events,
    }
}

fn build_unit(world: &World, entity: Entity) -> Option<UnitView> {
    let mut query = world
        .query_one::<(
            &Unit,
            &Position,
            &Health,
            &UnitStats,
            &Animation,
            &Combat,
            &Retreat,
        )>(entity)
        .ok()?;
    let (unit, pos, health, stats, anim, combat, retreat) = query.get()?;
    Some(UnitView {
        id: entity.to_bits().get(),
        archetype: unit.archetype,
        side: unit.side,
        position: *pos,
        health: health.current,
        max_health: health.max,
        attack_power: stats.attack_power,
        speed: stats.speed,
        attack_cooldown_ms: stats.attack_cooldown_ms,
        state: anim.state,
        frame: anim.frame,
        retreating: retreat.active,
        target: combat.target.map(|t| t.to_bits().get()),
    })
}

fn build_buildings(world: &World) -> Vec<BuildingView> {
    world
        .query::<(&Building, &Position, &Health)>()
        .iter()
        .map(|(_, (building, pos, health))| BuildingView {
            side: building.side,
            kind: building.kind,
            position: *pos,
            health: health.current,
            max_health: health.max,
            destroyed: building.destroyed,
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (p, _))| p.active)
        .map(|(_, (p, pos))| ProjectileView {
            kind: p.kind,
            position: *pos,
            angle_deg: p.angle_deg,
        })
        .collect()
}

fn build_seed_drops(world: &World) -> Vec<SeedDropView> {
    world
        .query::<(&SeedDrop, &Position)>()
        .iter()
        .map(|(_, (drop, pos))| SeedDropView {
            position: *pos,
            value: drop.value,
            alpha: drop.alpha,
        })
        .collect()
}
