//! Movement and collision resolution along the lane.

use hecs::{Entity, World};

use evowar_core::components::{Animation, Retreat, Unit, UnitStats};
use evowar_core::constants::*;
use evowar_core::enums::{CombatState, Side};
use evowar_core::types::Position;
use evowar_unit_ai::fsm::{self, display_state, AnimationContext};

use crate::lane;
use crate::systems::combat;
use crate::systems::spatial::BucketIndex;
use crate::systems::targeting;

/// Result of resolving one movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub x: f64,
    pub state: CombatState,
    /// Set only together with `CombatState::Attack`.
    pub target: Option<Entity>,
}

/// Resolve where a unit moves this tick and what it does there.
///
/// A unit with something in range at its current position stays put and
/// attacks. Otherwise it probes one step ahead. An opposing unit in the way
/// takes priority over an ally ahead, which takes priority over the opposing
/// base footprint.
///
/// May clamp the unit's speed permanently to that of an ally it is following.
pub fn resolve_step(
    world: &mut World,
    index: &BucketIndex,
    unit: Entity,
    opposing_base: Entity,
    now_ms: f64,
) -> Option<Step> {
    let pos = *world.get::<&Position>(unit).ok()?;
    let side = world.get::<&Unit>(unit).ok()?.side;
    let speed = world.get::<&UnitStats>(unit).ok()?.speed;
    let current = world.get::<&Animation>(unit).ok()?.state;
    let dir = side.direction();

    if let Some(target) = targeting::find_closest_target(world, index, unit, opposing_base) {
        return Some(Step {
            x: pos.x,
            state: CombatState::Attack,
            target: Some(target),
        });
    }

    let new_x = pos.x + speed * dir;
    let probe = lane::probe_rect(new_x, pos.y);
    let b = lane::bucket_of(new_x);

    let mut blocker = None;
    let mut opponent = None;
    for other in index.range(b - 1, b + 1) {
        if other == unit || !lane::is_live_unit(world, other) {
            continue;
        }
        let (Some(rect), Some(other_side), Some(other_x)) = (
            lane::entity_rect(world, other),
            lane::side_of(world, other),
            lane::x_of(world, other),
        ) else {
            continue;
        };
        if !probe.intersects(&rect) {
            continue;
        }
        if other_side != side {
            opponent = Some((other, other_x));
            break;
        }
        if dir * (other_x - pos.x) > 0.0 {
            blocker = Some((other, other_x));
        }
    }

    if let Some((enemy, enemy_x)) = opponent {
        let mut step = Step {
            x: enemy_x - UNIT_WIDTH * dir,
            state: display_state(CombatState::Idle, current),
            target: None,
        };
        if targeting::in_attack_range(world, unit, enemy, now_ms) {
            step.state = CombatState::Attack;
            step.target = Some(enemy);
        }
        return Some(step);
    }

    if let Some((ally, ally_x)) = blocker {
        let ally_state = world.get::<&Animation>(ally).ok()?.state;
        let ally_speed = world.get::<&UnitStats>(ally).ok()?.speed;
        let behind = ally_x - UNIT_WIDTH * dir;
        if matches!(ally_state, CombatState::Idle | CombatState::Attack) {
            return Some(Step {
                x: behind,
                state: display_state(CombatState::Idle, current),
                target: None,
            });
        }
        let x = match side {
            Side::Player => new_x.min(behind),
            Side::Enemy => new_x.max(behind),
        };
        if speed > ally_speed {
            if let Ok(mut stats) = world.get::<&mut UnitStats>(unit) {
                stats.speed = ally_speed;
            }
        }
        return Some(Step {
            x,
            state: display_state(CombatState::Run, current),
            target: None,
        });
    }

    let base_rect = lane::entity_rect(world, opposing_base);
    if base_rect.is_some_and(|rect| probe.intersects(&rect)) {
        let mut step = Step {
            x: pos.x,
            state: display_state(CombatState::Idle, current),
            target: None,
        };
        if targeting::in_attack_range(world, unit, opposing_base, now_ms) {
            step.state = CombatState::Attack;
            step.target = Some(opposing_base);
        }
        return Some(step);
    }

    Some(Step {
        x: new_x,
        state: display_state(CombatState::Run, current),
        target: None,
    })
}

/// Move a unit one step. Attacking and dying units stay where they are.
pub fn move_unit(
    world: &mut World,
    index: &BucketIndex,
    unit: Entity,
    opposing_base: Entity,
    now_ms: f64,
) {
    let state = match world.get::<&Animation>(unit) {
        Ok(anim) => anim.state,
        Err(_) => return,
    };
    if matches!(state, CombatState::Attack | CombatState::Die) {
        return;
    }
    let Some(step) = resolve_step(world, index, unit, opposing_base, now_ms) else {
        return;
    };

    if let Ok(mut pos) = world.get::<&mut Position>(unit) {
        pos.x = step.x;
    }
    match (step.state, step.target) {
        (CombatState::Attack, Some(target)) => {
            combat::attack(world, unit, target, now_ms);
        }
        (state, _) => {
            if let Ok(mut anim) = world.get::<&mut Animation>(unit) {
                anim.state = state;
            }
        }
    }
}

/// Keep units short of the far end of the lane. A unit stopped by the
/// clamp while running goes idle.
pub fn clamp_to_lane(world: &mut World, unit: Entity) {
    let Ok((pos, anim, info)) = world.query_one_mut::<(&mut Position, &mut Animation, &Unit)>(unit)
    else {
        return;
    };
    let clamped = match info.side {
        Side::Player if pos.x >= PLAYER_MAX_X => Some(PLAYER_MAX_X),
        Side::Enemy if pos.x <= ENEMY_MIN_X => Some(ENEMY_MIN_X),
        _ => None,
    };
    if let Some(x) = clamped {
        pos.x = x;
        if anim.state == CombatState::Run {
            anim.state = CombatState::Idle;
        }
    }
}

/// Walk a retreating unit back toward its formation slot.
///
/// Returns `true` if the unit was retreating this tick, in which case it
/// takes no other action. Dying units never retreat.
pub fn regroup_step(world: &mut World, unit: Entity, now_ms: f64) -> bool {
    let Ok((pos, anim, retreat, stats)) =
        world.query_one_mut::<(&mut Position, &mut Animation, &mut Retreat, &UnitStats)>(unit)
    else {
        return false;
    };
    if !retreat.active || anim.state == CombatState::Die {
        return false;
    }

    if pos.x > retreat.slot_x {
        anim.state = CombatState::Run;
        pos.x -= REGROUP_SPEED * 2.0;
        let update = fsm::advance(&AnimationContext {
            state: anim.state,
            frame: anim.frame,
            last_update_ms: anim.last_update_ms,
            hurt_start_ms: anim.hurt_start_ms,
            is_attacking: false,
            attack_cooldown_ms: stats.attack_cooldown_ms,
            now_ms,
        });
        anim.frame = update.frame;
        anim.last_update_ms = update.last_update_ms;
    } else {
        pos.x = retreat.slot_x;
        anim.state = CombatState::Idle;
        retreat.active = false;
    }
    true
}
