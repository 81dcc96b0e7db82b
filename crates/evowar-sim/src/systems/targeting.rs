//! Target resolution over the bucket index.
//!
//! Distances are measured along the lane only. Candidates are re-checked
//! for liveness at query time since the index may hold units that died
//! earlier in the tick.

use hecs::{Entity, World};

use evowar_core::components::{Building, Unit, UnitStats};
use evowar_core::constants::{BODY_CENTER_OFFSET, MAX_BUCKET, RANGE_CHECK_INTERVAL_MS};
use evowar_core::enums::{BuildingKind, Side};
use evowar_core::types::Position;

use crate::components::Combat;
use crate::lane;
use crate::systems::spatial::BucketIndex;

/// Lane x, side and attack range of a unit.
fn reach(world: &World, unit: Entity) -> Option<(f64, Side, f64)> {
    let x = world.get::<&Position>(unit).ok()?.x;
    let side = world.get::<&Unit>(unit).ok()?.side;
    let range = world.get::<&UnitStats>(unit).ok()?.attack_range;
    Some((x, side, range))
}

fn is_opponent(world: &World, side: Side, other: Entity) -> bool {
    lane::side_of(world, other) == Some(side.opposing()) && lane::is_live_unit(world, other)
}

/// Closest opposing unit, or the opposing base, within attack range of the
/// unit's current position.
///
/// Scans the buckets covering `[x - range, x + range]`. Equal distances keep
/// enumeration order: units in bucket order, then the base.
pub fn find_closest_target(
    world: &World,
    index: &BucketIndex,
    unit: Entity,
    opposing_base: Entity,
) -> Option<Entity> {
    let (x, side, range) = reach(world, unit)?;
    let first = lane::bucket_of(x - range);
    let last = lane::bucket_of(x + range);

    let mut candidates: Vec<(f64, Entity)> = index
        .range(first, last)
        .filter(|&other| other != unit && is_opponent(world, side, other))
        .filter_map(|other| {
            let distance = (x - lane::x_of(world, other)?).abs();
            (distance <= range).then_some((distance, other))
        })
        .collect();

    if lane::is_live_target(world, opposing_base) {
        if let Some(base_x) = lane::x_of(world, opposing_base) {
            let distance = (x - base_x).abs();
            if distance <= range {
                candidates.push((distance, opposing_base));
            }
        }
    }

    // Stable sort keeps the first enumerated on ties.
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
    candidates.first().map(|&(_, target)| target)
}

/// Nearest opposing unit strictly closer than the attack range, searched in
/// the unit's bucket and its two neighbours. The opposing base wins if its
/// near footprint edge is closer still, unless it is a tower.
pub fn find_nearest_target(
    world: &World,
    index: &BucketIndex,
    unit: Entity,
    opposing_base: Entity,
) -> Option<Entity> {
    let (x, side, range) = reach(world, unit)?;
    let b = lane::bucket_of(x);
    let buckets = [(b - 1).max(0), b, (b + 1).min(MAX_BUCKET)];

    let mut nearest = None;
    let mut min_distance = range;
    for bucket in buckets {
        for &other in index.bucket(bucket) {
            if other == unit || !is_opponent(world, side, other) {
                continue;
            }
            let Some(other_x) = lane::x_of(world, other) else {
                continue;
            };
            let distance = (x - other_x).abs();
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(other);
            }
        }
    }

    let is_tower = world
        .get::<&Building>(opposing_base)
        .map(|b| b.kind == BuildingKind::Tower)
        .unwrap_or(true);
    if !is_tower && lane::is_live_target(world, opposing_base) {
        if let Some(rect) = lane::entity_rect(world, opposing_base) {
            let edge = match side {
                Side::Player => rect.left(),
                Side::Enemy => rect.right(),
            };
            if (x - edge).abs() < min_distance {
                nearest = Some(opposing_base);
            }
        }
    }
    nearest
}

/// Whether `target` is within attack range, measured between body centres.
///
/// Rate-limited: within 200 ms of the previous check this answers `false`
/// without measuring.
pub fn in_attack_range(world: &mut World, unit: Entity, target: Entity, now_ms: f64) -> bool {
    let Some(target_x) = lane::x_of(world, target) else {
        return false;
    };
    let Ok((pos, stats, combat)) =
        world.query_one_mut::<(&Position, &UnitStats, &mut Combat)>(unit)
    else {
        return false;
    };
    if let Some(last) = combat.last_range_check_ms {
        if now_ms - last < RANGE_CHECK_INTERVAL_MS {
            return false;
        }
    }
    combat.last_range_check_ms = Some(now_ms);
    let distance = ((pos.x + BODY_CENTER_OFFSET) - (target_x + BODY_CENTER_OFFSET)).abs();
    distance <= stats.attack_range
}
