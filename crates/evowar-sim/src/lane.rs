//! Lane geometry and liveness queries shared by the systems.

use glam::DVec2;
use hecs::{Entity, World};

use evowar_core::components::{Animation, Building, Health, Unit};
use evowar_core::constants::*;
use evowar_core::enums::{CombatState, Lifecycle, Side};
use evowar_core::types::{Position, Rect};
use evowar_unit_ai::profiles::{get_profile, Body};

/// Spatial bucket of a lane x, unclamped.
pub fn bucket_of(x: f64) -> i64 {
    (x / BUCKET_WIDTH).floor() as i64
}

/// Whether x lies inside the playable part of the lane.
pub fn in_lane(x: f64) -> bool {
    (LANE_MIN_X..=LANE_MAX_X).contains(&x)
}

pub fn unit_rect(pos: &Position, body: &Body) -> Rect {
    Rect::new(pos.x, pos.y, body.width, body.height)
}

/// Movement probe for a unit about to step to `new_x`.
pub fn probe_rect(new_x: f64, y: f64) -> Rect {
    Rect::new(new_x + PROBE_OFFSET_X, y, UNIT_WIDTH, UNIT_HEIGHT)
}

/// Collision footprint of a base or tower, narrower than its sprite.
pub fn building_rect(pos: &Position) -> Rect {
    Rect::new(
        pos.x + BUILDING_FOOTPRINT_INSET,
        pos.y,
        BUILDING_FOOTPRINT_WIDTH,
        BUILDING_HEIGHT,
    )
}

/// Current collision rectangle of a unit or building.
pub fn entity_rect(world: &World, entity: Entity) -> Option<Rect> {
    let pos = *world.get::<&Position>(entity).ok()?;
    if let Ok(unit) = world.get::<&Unit>(entity) {
        return Some(unit_rect(&pos, &get_profile(unit.archetype).body));
    }
    world
        .get::<&Building>(entity)
        .ok()
        .map(|_| building_rect(&pos))
}

pub fn x_of(world: &World, entity: Entity) -> Option<f64> {
    world.get::<&Position>(entity).ok().map(|p| p.x)
}

/// A unit that is neither dying nor reaped.
pub fn is_live_unit(world: &World, entity: Entity) -> bool {
    world
        .get::<&Animation>(entity)
        .map(|a| a.lifecycle == Lifecycle::Alive && a.state != CombatState::Die)
        .unwrap_or(false)
}

/// Whether an entity can still be hit: a live unit or a standing building.
pub fn is_live_target(world: &World, entity: Entity) -> bool {
    if world.get::<&Unit>(entity).is_ok() {
        return is_live_unit(world, entity);
    }
    if world.get::<&Building>(entity).is_ok() {
        return world
            .get::<&Health>(entity)
            .map(|h| h.current > 0.0)
            .unwrap_or(false);
    }
    false
}

pub fn side_of(world: &World, entity: Entity) -> Option<Side> {
    if let Ok(unit) = world.get::<&Unit>(entity) {
        return Some(unit.side);
    }
    world.get::<&Building>(entity).ok().map(|b| b.side)
}

/// Point a projectile aims for, a fixed offset from the target's top-left
/// corner whether it is a unit or a building.
pub fn aim_point(world: &World, target: Entity) -> Option<DVec2> {
    let pos = *world.get::<&Position>(target).ok()?;
    Some(DVec2::new(
        pos.x + UNIT_AIM_OFFSET_X,
        pos.y + UNIT_AIM_OFFSET_Y,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_of_floors_negative() {
        assert_eq!(bucket_of(-1.0), -1);
        assert_eq!(bucket_of(0.0), 0);
        assert_eq!(bucket_of(399.9), 0);
        assert_eq!(bucket_of(400.0), 1);
    }

    #[test]
    fn test_lane_bounds_inclusive() {
        assert!(in_lane(-192.0));
        assert!(in_lane(1920.0));
        assert!(!in_lane(-192.5));
        assert!(!in_lane(1920.5));
    }

    #[test]
    fn test_building_footprint() {
        let rect = building_rect(&Position::new(1670.0, 580.0));
        assert_eq!(rect.left(), 1695.0);
        assert_eq!(rect.right(), 1795.0);
        assert_eq!(rect.bottom(), 880.0);
    }
}
