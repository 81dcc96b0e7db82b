//! Cleanup system: reaps dead units and spent projectiles.

use hecs::{Entity, World};

use evowar_core::components::{Animation, Unit};
use evowar_core::enums::{Archetype, Lifecycle, Side};
use evowar_core::types::Position;

use crate::components::Projectile;

/// A unit removed from the battle by `reap_units`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reaped {
    pub entity: Entity,
    pub archetype: Archetype,
    pub side: Side,
    pub position: Position,
}

/// Remove units whose death animation has finished, plus handles to
/// entities that no longer exist. Uses a pre-allocated buffer to avoid
/// per-tick allocation.
///
/// Idempotent: a second call with no new deaths changes nothing.
pub fn reap_units(
    world: &mut World,
    units: &mut Vec<Entity>,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<Reaped> {
    despawn_buffer.clear();
    let mut reaped = Vec::new();

    units.retain(|&entity| {
        let Ok(anim) = world.get::<&Animation>(entity) else {
            return false;
        };
        if anim.lifecycle != Lifecycle::Dead {
            return true;
        }
        if let (Ok(unit), Ok(pos)) = (world.get::<&Unit>(entity), world.get::<&Position>(entity)) {
            reaped.push(Reaped {
                entity,
                archetype: unit.archetype,
                side: unit.side,
                position: *pos,
            });
        }
        despawn_buffer.push(entity);
        false
    });

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    reaped
}

/// Remove inactive projectiles.
pub fn reap_projectiles(
    world: &mut World,
    projectiles: &mut Vec<Entity>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    projectiles.retain(|&entity| match world.get::<&Projectile>(entity) {
        Ok(p) if p.active => true,
        Ok(_) => {
            despawn_buffer.push(entity);
            false
        }
        Err(_) => false,
    });
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Remove every entity in `entities` at once and clear the list.
pub fn despawn_all(world: &mut World, entities: &mut Vec<Entity>) {
    for entity in entities.drain(..) {
        let _ = world.despawn(entity);
    }
}
