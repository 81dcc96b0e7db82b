//! Projectile engine: arrows and magic balls.
//!
//! Arrows fly a ballistic arc solved at release and confirm hits on units
//! with a pixel-mask test. Magic balls fly straight along the direction
//! fixed at release and hit on rectangle overlap alone.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use evowar_core::components::{Animation, Unit};
use evowar_core::constants::*;
use evowar_core::enums::{ProjectileKind, Side};
use evowar_core::types::{Position, Rect};

use crate::assets::AssetCache;
use crate::components::Projectile;
use crate::lane;
use crate::systems::combat;

/// Release a projectile from `origin` at `target`.
///
/// Returns `None` when the target has no position to aim at.
pub fn spawn(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: ProjectileKind,
    origin: Position,
    side: Side,
    target: Entity,
    damage: f64,
) -> Option<Entity> {
    let aim = lane::aim_point(world, target)?;
    let projectile = match kind {
        ProjectileKind::Arrow => launch_arrow(rng, origin, side, target, damage, aim),
        ProjectileKind::MagicBall => launch_magic_ball(origin, side, target, damage, aim),
    };
    Some(world.spawn((origin, projectile)))
}

/// Solve an arc that lands on `aim` after a distance-based flight time,
/// jittered by a few ticks.
fn launch_arrow(
    rng: &mut ChaCha8Rng,
    origin: Position,
    side: Side,
    target: Entity,
    damage: f64,
    aim: DVec2,
) -> Projectile {
    let dx = aim.x - origin.x;
    let dy = aim.y - origin.y;
    let flight = ((dx.abs() / 10.0) as i64).clamp(ARROW_MIN_FLIGHT_TICKS, ARROW_MAX_FLIGHT_TICKS)
        + rng.gen_range(-ARROW_FLIGHT_JITTER..=ARROW_FLIGHT_JITTER);
    let t = flight as f64;

    let vx = if dx != 0.0 { dx / t } else { 3.0 * side.direction() };
    let vy = (dy - 0.5 * ARROW_GRAVITY * t * (t - 1.0)) / t;

    Projectile {
        kind: ProjectileKind::Arrow,
        side,
        target,
        damage,
        origin,
        velocity: DVec2::new(vx, vy),
        gravity: ARROW_GRAVITY,
        angle_deg: 0.0,
        active: true,
    }
}

fn launch_magic_ball(
    origin: Position,
    side: Side,
    target: Entity,
    damage: f64,
    aim: DVec2,
) -> Projectile {
    let delta = aim - DVec2::new(origin.x, origin.y);
    let distance = delta.length();
    let velocity = if distance > 0.0 {
        delta / distance * MAGIC_BALL_SPEED
    } else {
        DVec2::ZERO
    };
    Projectile {
        kind: ProjectileKind::MagicBall,
        side,
        target,
        damage,
        origin,
        velocity,
        gravity: 0.0,
        angle_deg: heading_deg(velocity),
        active: distance > 0.0,
    }
}

/// Sprite angle for a velocity in screen space (y down).
fn heading_deg(velocity: DVec2) -> f64 {
    (-velocity.y).atan2(velocity.x).to_degrees()
}

/// Advance every projectile in `projectiles` by one tick.
pub fn run(world: &mut World, assets: &mut AssetCache, projectiles: &[Entity], now_ms: f64) {
    for &entity in projectiles {
        let (mut projectile, mut pos) = match world.query_one_mut::<(&Projectile, &Position)>(entity)
        {
            Ok((p, pos)) => (*p, *pos),
            Err(_) => continue,
        };
        if !projectile.active {
            continue;
        }
        match projectile.kind {
            ProjectileKind::Arrow => {
                update_arrow(world, assets, &mut projectile, &mut pos, now_ms)
            }
            ProjectileKind::MagicBall => {
                update_magic_ball(world, &mut projectile, &mut pos, now_ms)
            }
        }
        if let Ok((p, stored)) = world.query_one_mut::<(&mut Projectile, &mut Position)>(entity) {
            *p = projectile;
            *stored = pos;
        }
    }
}

fn update_arrow(
    world: &mut World,
    assets: &mut AssetCache,
    arrow: &mut Projectile,
    pos: &mut Position,
    now_ms: f64,
) {
    if !lane::is_live_target(world, arrow.target) {
        arrow.active = false;
        return;
    }

    pos.x += arrow.velocity.x;
    pos.y += arrow.velocity.y;
    arrow.velocity.y += arrow.gravity;

    if (pos.x - arrow.origin.x).abs() > PROJECTILE_MAX_DISTANCE {
        arrow.active = false;
        return;
    }
    arrow.angle_deg = heading_deg(arrow.velocity);

    let w = ARROW_WIDTH as f64;
    let h = ARROW_HEIGHT as f64;
    let bounds = Rect::new(pos.x - w / 2.0, pos.y - h / 2.0, w, h);
    let Some(target_rect) = lane::entity_rect(world, arrow.target) else {
        arrow.active = false;
        return;
    };
    if !bounds.intersects(&target_rect) || !pixels_overlap(world, assets, arrow, pos) {
        return;
    }
    if lane::is_live_target(world, arrow.target) {
        combat::deal_damage(world, arrow.target, arrow.damage, now_ms);
    }
    arrow.active = false;
}

/// Fine hit test between the rotated arrow and the target's current frame.
/// Buildings have no silhouette and always pass.
fn pixels_overlap(
    world: &World,
    assets: &mut AssetCache,
    arrow: &Projectile,
    pos: &Position,
) -> bool {
    let target = arrow.target;
    let (Ok(unit), Ok(anim), Ok(target_pos)) = (
        world.get::<&Unit>(target),
        world.get::<&Animation>(target),
        world.get::<&Position>(target),
    ) else {
        return true;
    };
    let flipped = unit.side == Side::Enemy;
    let (target_mask, arrow_mask) =
        assets.arrow_hit_masks(unit.archetype, anim.state, anim.frame, flipped);
    let rotated = arrow_mask.rotated(arrow.angle_deg);
    // The arrow silhouette is anchored at its position, not centred on it.
    let offset = ((pos.x - target_pos.x) as i64, (pos.y - target_pos.y) as i64);
    target_mask.overlap(&rotated, offset).is_some()
}

fn update_magic_ball(world: &mut World, ball: &mut Projectile, pos: &mut Position, now_ms: f64) {
    pos.x += ball.velocity.x;
    pos.y += ball.velocity.y;

    if pos.distance_to(&ball.origin) > PROJECTILE_MAX_DISTANCE {
        ball.active = false;
        return;
    }
    if !lane::is_live_target(world, ball.target) {
        ball.active = false;
        return;
    }

    let size = MAGIC_BALL_SIZE as f64;
    let bounds = Rect::new(pos.x - size / 2.0, pos.y - size / 2.0, size, size);
    let hit = lane::entity_rect(world, ball.target).is_some_and(|rect| bounds.intersects(&rect));
    if hit {
        combat::deal_damage(world, ball.target, ball.damage, now_ms);
        ball.active = false;
    }
}
