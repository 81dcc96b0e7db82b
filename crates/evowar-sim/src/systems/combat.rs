//! Combat system: animation stepping, attack starts and damage delivery.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use evowar_core::components::{Animation, Building, Health, Unit, UnitStats};
use evowar_core::constants::{UNIT_AIM_OFFSET_X, UNIT_AIM_OFFSET_Y};
use evowar_core::enums::{AttackDelivery, CombatState};
use evowar_core::types::Position;
use evowar_unit_ai::fsm::{self, AnimationContext, DamageEffect};
use evowar_unit_ai::profiles::get_profile;

use crate::components::Combat;
use crate::lane;
use crate::systems::projectiles;

/// Advance a unit's animation by at most one frame.
///
/// Returns the target to strike when the attack trigger frame was reached
/// and that target is still alive. A target lost before the trigger yields
/// nothing, but the attack animation still runs to its end.
pub fn animate(world: &mut World, unit: Entity, now_ms: f64) -> Option<Entity> {
    let (anim, stats, combat) = world
        .query_one_mut::<(&mut Animation, &UnitStats, &mut Combat)>(unit)
        .ok()?;

    let update = fsm::advance(&AnimationContext {
        state: anim.state,
        frame: anim.frame,
        last_update_ms: anim.last_update_ms,
        hurt_start_ms: anim.hurt_start_ms,
        is_attacking: combat.is_attacking,
        attack_cooldown_ms: stats.attack_cooldown_ms,
        now_ms,
    });
    anim.state = update.state;
    anim.frame = update.frame;
    anim.last_update_ms = update.last_update_ms;
    anim.hurt_start_ms = update.hurt_start_ms;
    anim.lifecycle = fsm::lifecycle(anim.state, anim.frame);

    let struck = if update.trigger { combat.target } else { None };
    if update.attack_finished {
        combat.is_attacking = false;
        combat.target = None;
    }

    let target = struck?;
    lane::is_live_target(world, target).then_some(target)
}

/// Start an attack on `target` if the unit is off cooldown.
///
/// The first attack of a unit is never on cooldown. Returns whether the
/// attack started.
pub fn attack(world: &mut World, unit: Entity, target: Entity, now_ms: f64) -> bool {
    let Ok((anim, stats, combat)) =
        world.query_one_mut::<(&mut Animation, &UnitStats, &mut Combat)>(unit)
    else {
        return false;
    };
    if anim.state == CombatState::Die {
        return false;
    }
    let ready = combat
        .last_attack_ms
        .map_or(true, |last| now_ms - last >= stats.attack_cooldown_ms);
    if !ready {
        return false;
    }
    anim.state = CombatState::Attack;
    anim.frame = 0;
    combat.is_attacking = true;
    combat.target = Some(target);
    combat.last_attack_ms = Some(now_ms);
    true
}

/// Apply `damage` to a unit or building.
///
/// Units go through the animation state machine; a killed unit drops its
/// own target. Buildings lose health down to zero and are flagged destroyed.
pub fn deal_damage(world: &mut World, target: Entity, damage: f64, now_ms: f64) -> DamageEffect {
    if let Ok((health, anim, combat)) =
        world.query_one_mut::<(&mut Health, &mut Animation, &mut Combat)>(target)
    {
        let effect = fsm::apply_damage(health, anim, damage, now_ms);
        if effect == DamageEffect::Killed {
            combat.is_attacking = false;
            combat.target = None;
        }
        return effect;
    }

    if let Ok((health, building)) = world.query_one_mut::<(&mut Health, &mut Building)>(target) {
        if health.current <= 0.0 {
            return DamageEffect::Ignored;
        }
        health.current = (health.current - damage).max(0.0);
        if health.current <= 0.0 {
            building.destroyed = true;
            return DamageEffect::Killed;
        }
        return DamageEffect::Wounded;
    }

    DamageEffect::Ignored
}

/// Deliver a triggered attack: strike directly, or release a projectile from
/// the archetype's muzzle point. Returns the projectile, if one was spawned.
pub fn deliver(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    shooter: Entity,
    target: Entity,
    now_ms: f64,
) -> Option<Entity> {
    let unit = *world.get::<&Unit>(shooter).ok()?;
    let damage = world.get::<&UnitStats>(shooter).ok()?.attack_power;

    match unit.delivery {
        AttackDelivery::Direct => {
            deal_damage(world, target, damage, now_ms);
            None
        }
        AttackDelivery::Projectile(kind) => {
            let pos = *world.get::<&Position>(shooter).ok()?;
            let (dx, dy) = get_profile(unit.archetype)
                .muzzle_offset
                .unwrap_or((UNIT_AIM_OFFSET_X, UNIT_AIM_OFFSET_Y));
            let origin = Position::new(pos.x + dx, pos.y + dy);
            projectiles::spawn(world, rng, kind, origin, unit.side, target, damage)
        }
    }
}
