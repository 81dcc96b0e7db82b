//! Unit combat/animation finite state machine.
//!
//! Pure functions that advance a unit's animation frame, decide when the
//! attack trigger frame is reached, and apply incoming damage.
//! No ECS dependency; operates on plain data.

use evowar_core::components::{Animation, Health};
use evowar_core::constants::*;
use evowar_core::enums::{CombatState, Lifecycle};

/// Input to the animation FSM for a single unit.
pub struct AnimationContext {
    pub state: CombatState,
    pub frame: u32,
    pub last_update_ms: f64,
    pub hurt_start_ms: Option<f64>,
    /// An attack has been started and its target is still assigned.
    pub is_attacking: bool,
    pub attack_cooldown_ms: f64,
    pub now_ms: f64,
}

/// Output from the animation FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationUpdate {
    pub state: CombatState,
    pub frame: u32,
    pub last_update_ms: f64,
    pub hurt_start_ms: Option<f64>,
    /// Attack trigger frame reached: deliver damage or release a projectile
    /// if the target is still alive.
    pub trigger: bool,
    /// Attack animation completed: clear the target and the attacking flag.
    pub attack_finished: bool,
}

/// Outcome of `apply_damage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageEffect {
    /// Target already dying; nothing changed.
    Ignored,
    /// Damage taken, still alive.
    Wounded,
    /// Health reached zero; the unit is now dying.
    Killed,
}

/// Delay between frames for the given state.
pub fn frame_delay_ms(state: CombatState, attack_cooldown_ms: f64) -> f64 {
    match state {
        CombatState::Attack => attack_cooldown_ms / FRAMES_PER_STATE as f64,
        _ => BASE_FRAME_DELAY_MS,
    }
}

/// Advance the animation by at most one frame.
pub fn advance(ctx: &AnimationContext) -> AnimationUpdate {
    let mut update = AnimationUpdate {
        state: ctx.state,
        frame: ctx.frame,
        last_update_ms: ctx.last_update_ms,
        hurt_start_ms: ctx.hurt_start_ms,
        trigger: false,
        attack_finished: false,
    };

    if ctx.now_ms - ctx.last_update_ms < frame_delay_ms(ctx.state, ctx.attack_cooldown_ms) {
        return update;
    }
    update.last_update_ms = ctx.now_ms;

    let last_frame = FRAMES_PER_STATE - 1;
    match ctx.state {
        CombatState::Attack => {
            update.frame = ctx.frame + 1;
            update.trigger = update.frame == ATTACK_TRIGGER_FRAME && ctx.is_attacking;
            if update.frame > last_frame {
                update.state = CombatState::Idle;
                update.frame = 0;
                update.attack_finished = true;
            }
        }
        CombatState::Hurt if !ctx.is_attacking => {
            update.frame = 0;
            let expired = ctx
                .hurt_start_ms
                .map_or(true, |start| ctx.now_ms - start >= HURT_DURATION_MS);
            if expired {
                update.state = CombatState::Idle;
                update.hurt_start_ms = None;
            }
        }
        CombatState::Die => {
            update.frame = (ctx.frame + 1).min(last_frame);
        }
        _ => {
            update.frame = (ctx.frame + 1) % FRAMES_PER_STATE;
        }
    }
    update
}

/// Lifecycle implied by the displayed state and frame.
pub fn lifecycle(state: CombatState, frame: u32) -> Lifecycle {
    match state {
        CombatState::Die if frame >= FRAMES_PER_STATE - 1 => Lifecycle::Dead,
        CombatState::Die => Lifecycle::Dying,
        _ => Lifecycle::Alive,
    }
}

/// Apply `damage` to a unit.
///
/// Lethal damage clamps health to zero and starts the death animation.
/// Non-lethal damage shows the hurt pose unless the unit is mid-attack.
pub fn apply_damage(
    health: &mut Health,
    anim: &mut Animation,
    damage: f64,
    now_ms: f64,
) -> DamageEffect {
    if anim.state == CombatState::Die {
        return DamageEffect::Ignored;
    }
    health.current -= damage;
    if health.current <= 0.0 {
        health.current = 0.0;
        anim.state = CombatState::Die;
        anim.frame = 0;
        anim.hurt_start_ms = None;
        anim.lifecycle = Lifecycle::Dying;
        DamageEffect::Killed
    } else {
        if anim.state != CombatState::Attack {
            anim.state = CombatState::Hurt;
            anim.frame = 0;
            anim.hurt_start_ms = Some(now_ms);
        }
        DamageEffect::Wounded
    }
}

/// Display state after movement: "hurt" wins over "run" and "idle".
pub fn display_state(resolved: CombatState, current: CombatState) -> CombatState {
    match (current, resolved) {
        (CombatState::Hurt, CombatState::Run | CombatState::Idle) => CombatState::Hurt,
        _ => resolved,
    }
}
