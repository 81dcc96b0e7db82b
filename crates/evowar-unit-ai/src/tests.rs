//! Tests for archetype profiles and the unit animation FSM.

use evowar_core::components::{Animation, Health};
use evowar_core::enums::*;

use crate::fsm::*;
use crate::profiles::*;

fn ctx(state: CombatState, frame: u32, last: f64, now: f64) -> AnimationContext {
    AnimationContext {
        state,
        frame,
        last_update_ms: last,
        hurt_start_ms: None,
        is_attacking: state == CombatState::Attack,
        attack_cooldown_ms: 1400.0,
        now_ms: now,
    }
}

#[test]
fn test_player_roster_stats() {
    let peasant = get_profile(Archetype::Peasant);
    assert_eq!(peasant.base_health, 50.0);
    assert_eq!(peasant.cost, 20);
    assert_eq!(peasant.attack_range, 125.0);
    assert_eq!(peasant.delivery, AttackDelivery::Direct);

    let archer = get_profile(Archetype::Archer);
    assert_eq!(archer.attack_range, 250.0);
    assert_eq!(
        archer.delivery,
        AttackDelivery::Projectile(ProjectileKind::Arrow)
    );
    assert_eq!(archer.muzzle_offset, Some((115.0, 105.0)));

    let tank = get_profile(Archetype::Tank);
    assert_eq!(tank.base_attack_cooldown_ms, 1500.0);
    assert_eq!(tank.cost, 60);
}

#[test]
fn test_ranged_enemies() {
    for archetype in [Archetype::BanditArcher, Archetype::ZombieArcher] {
        let p = get_profile(archetype);
        assert_eq!(p.delivery, AttackDelivery::Projectile(ProjectileKind::Arrow));
        assert_eq!(p.muzzle_offset, Some((77.0, 105.0)));
    }
    let mage = get_profile(Archetype::UndeadMage);
    assert_eq!(
        mage.delivery,
        AttackDelivery::Projectile(ProjectileKind::MagicBall)
    );
    assert_eq!(mage.attack_range, 200.0);
    assert_eq!(get_profile(Archetype::UndeadKing).attack_range, 150.0);
}

#[test]
fn test_only_ranged_profiles_have_muzzles() {
    for archetype in Archetype::ALL {
        let p = get_profile(archetype);
        let ranged = matches!(p.delivery, AttackDelivery::Projectile(_));
        assert_eq!(ranged, p.muzzle_offset.is_some(), "{archetype:?}");
    }
}

#[test]
fn test_kill_rewards() {
    let zt = get_profile(Archetype::ZombieTank);
    assert_eq!((zt.seed_reward, zt.xp_reward), (20, 25));
    let za = get_profile(Archetype::ZombieAssassin);
    assert_eq!((za.seed_reward, za.xp_reward), (15, 20));
    let razor = get_profile(Archetype::BanditRazor);
    assert_eq!((razor.seed_reward, razor.xp_reward), (5, 10));
}

#[test]
fn test_faction_modifiers() {
    let z = faction_modifiers(Faction::Zombies);
    assert_eq!((z.health, z.attack, z.speed), (0.8, 0.9, 0.7));
    let b = faction_modifiers(Faction::Bandits);
    assert_eq!(b.speed, 0.5);
    assert_eq!(faction_modifiers(Faction::Undead), faction_modifiers(Faction::Player));
}

#[test]
fn test_bandit_king_profile() {
    let king = get_profile(Archetype::BanditKing);
    assert!(!king.faction_scaled);
    assert_eq!(king.body, BOSS_BODY);
    assert_eq!(king.body.lane_y(), 592.0);
    assert_eq!((king.seed_reward, king.xp_reward), (50, 100));
    assert_eq!(king.delivery, AttackDelivery::Direct);

    let razor = get_profile(Archetype::BanditRazor);
    assert!(razor.faction_scaled);
    assert_eq!(razor.body.lane_y(), 688.0);
}

#[test]
fn test_frame_delay_is_rate_limited() {
    let update = advance(&ctx(CombatState::Run, 3, 1000.0, 1050.0));
    assert_eq!(update.frame, 3);
    assert_eq!(update.last_update_ms, 1000.0);

    let update = advance(&ctx(CombatState::Run, 3, 1000.0, 1100.0));
    assert_eq!(update.frame, 4);
    assert_eq!(update.last_update_ms, 1100.0);
}

#[test]
fn test_idle_frames_cycle() {
    let update = advance(&ctx(CombatState::Idle, 13, 0.0, 100.0));
    assert_eq!(update.frame, 0);
    assert_eq!(update.state, CombatState::Idle);
}

#[test]
fn test_attack_frame_delay_from_cooldown() {
    assert_eq!(frame_delay_ms(CombatState::Attack, 1400.0), 100.0);
    assert_eq!(frame_delay_ms(CombatState::Attack, 700.0), 50.0);
    assert_eq!(frame_delay_ms(CombatState::Hurt, 700.0), 100.0);
    // Half the cooldown has not elapsed a full frame delay yet.
    let update = advance(&ctx(CombatState::Attack, 2, 0.0, 99.0));
    assert_eq!(update.frame, 2);
}

#[test]
fn test_attack_triggers_on_frame_seven_only() {
    let mut triggers = 0;
    let mut c = ctx(CombatState::Attack, 0, 0.0, 0.0);
    for step in 1..=14 {
        c.now_ms = step as f64 * 100.0;
        let u = advance(&c);
        if u.trigger {
            triggers += 1;
            assert_eq!(u.frame, 7);
        }
        c.state = u.state;
        c.frame = u.frame;
        c.last_update_ms = u.last_update_ms;
        if u.attack_finished {
            assert_eq!(step, 14);
            assert_eq!(u.state, CombatState::Idle);
            assert_eq!(u.frame, 0);
        }
    }
    assert_eq!(triggers, 1);
    assert_eq!(c.state, CombatState::Idle);
}

#[test]
fn test_no_trigger_without_attack_flag() {
    let mut c = ctx(CombatState::Attack, 6, 0.0, 100.0);
    c.is_attacking = false;
    let update = advance(&c);
    assert_eq!(update.frame, 7);
    assert!(!update.trigger);
}

#[test]
fn test_hurt_recovers_after_duration() {
    let mut c = ctx(CombatState::Hurt, 0, 0.0, 150.0);
    c.hurt_start_ms = Some(0.0);
    let update = advance(&c);
    assert_eq!(update.state, CombatState::Hurt);
    assert_eq!(update.frame, 0);

    c.last_update_ms = 150.0;
    c.now_ms = 250.0;
    let update = advance(&c);
    assert_eq!(update.state, CombatState::Idle);
    assert_eq!(update.hurt_start_ms, None);
}

#[test]
fn test_die_holds_last_frame() {
    let update = advance(&ctx(CombatState::Die, 13, 0.0, 500.0));
    assert_eq!(update.frame, 13);
    assert_eq!(update.state, CombatState::Die);
    assert_eq!(lifecycle(CombatState::Die, 13), Lifecycle::Dead);
    assert_eq!(lifecycle(CombatState::Die, 12), Lifecycle::Dying);
    assert_eq!(lifecycle(CombatState::Run, 13), Lifecycle::Alive);
}

#[test]
fn test_lethal_damage_clamps_to_zero() {
    let mut health = Health {
        current: 10.0,
        max: 50.0,
    };
    let mut anim = Animation {
        state: CombatState::Attack,
        frame: 5,
        ..Default::default()
    };
    let effect = apply_damage(&mut health, &mut anim, 25.0, 1000.0);
    assert_eq!(effect, DamageEffect::Killed);
    assert_eq!(health.current, 0.0);
    assert_eq!(anim.state, CombatState::Die);
    assert_eq!(anim.frame, 0);
    assert_eq!(anim.lifecycle, Lifecycle::Dying);

    // Dying units take no further damage.
    let effect = apply_damage(&mut health, &mut anim, 25.0, 1100.0);
    assert_eq!(effect, DamageEffect::Ignored);
    assert_eq!(health.current, 0.0);
}

#[test]
fn test_non_lethal_damage_hurts_unless_attacking() {
    let mut health = Health {
        current: 50.0,
        max: 50.0,
    };
    let mut anim = Animation {
        state: CombatState::Run,
        frame: 4,
        ..Default::default()
    };
    assert_eq!(
        apply_damage(&mut health, &mut anim, 20.0, 300.0),
        DamageEffect::Wounded
    );
    assert_eq!(health.current, 30.0);
    assert_eq!(anim.state, CombatState::Hurt);
    assert_eq!(anim.hurt_start_ms, Some(300.0));

    let mut attacking = Animation {
        state: CombatState::Attack,
        frame: 4,
        ..Default::default()
    };
    apply_damage(&mut health, &mut attacking, 5.0, 300.0);
    assert_eq!(attacking.state, CombatState::Attack);
    assert_eq!(attacking.frame, 4);
}

#[test]
fn test_hurt_overrides_run_and_idle_only() {
    assert_eq!(
        display_state(CombatState::Run, CombatState::Hurt),
        CombatState::Hurt
    );
    assert_eq!(
        display_state(CombatState::Idle, CombatState::Hurt),
        CombatState::Hurt
    );
    assert_eq!(
        display_state(CombatState::Attack, CombatState::Hurt),
        CombatState::Attack
    );
    assert_eq!(
        display_state(CombatState::Run, CombatState::Idle),
        CombatState::Run
    );
}
