//! Tests for upgrade tables, stat formulas and persistence.

use std::fs;

use evowar_core::components::{Health, UnitStats};
use evowar_core::enums::*;
use evowar_core::error::UpgradeRefused;

use crate::persistence::*;
use crate::stats::*;
use crate::upgrades::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_default_progress() {
    let p = PlayerProgress::default();
    assert_eq!(p.secured_seeds, 100);
    assert_eq!(p.max_level, 1);
    assert_eq!(p.unit_upgrades.len(), 4);
    let archer = p.upgrades_for(Archetype::Archer).unwrap();
    assert_eq!(archer.entry(StatKind::MovementSpeed).unwrap().increase, 0.105);
    assert_eq!(archer.entry(StatKind::Health).unwrap().cost, 10);
    let hp = p.base_upgrades.entry(BaseUpgradeKind::Hp).unwrap();
    assert_eq!((hp.cost, hp.increase, hp.level), (50, 75.0, 0));
}

#[test]
fn test_archer_locked_until_level_five() {
    let mut p = PlayerProgress::default();
    assert!(!p.available_roster().contains(&Archetype::Archer));
    p.max_level = 5;
    assert_eq!(p.available_roster().len(), 4);
}

#[test]
fn test_victory_unlocks_next_level() {
    let mut p = PlayerProgress::default();
    p.record_victory(4);
    assert_eq!(p.max_level, 5);
    assert!(p.available_roster().contains(&Archetype::Archer));
    // Replaying an old level never lowers the unlock.
    p.record_victory(2);
    assert_eq!(p.max_level, 5);
}

#[test]
fn test_purchase_deducts_and_levels() {
    let mut p = PlayerProgress::default();
    let entry = p
        .purchase_unit_upgrade(Archetype::Warrior, StatKind::Damage)
        .unwrap();
    assert_eq!(entry.level, 1);
    assert_eq!(p.secured_seeds, 90);
    assert_eq!(
        p.upgrades_for(Archetype::Warrior)
            .unwrap()
            .level(StatKind::Damage),
        1
    );
}

#[test]
fn test_purchase_refused_without_seeds() {
    let mut p = PlayerProgress {
        secured_seeds: 9,
        ..Default::default()
    };
    let before = p.clone();
    let err = p
        .purchase_unit_upgrade(Archetype::Peasant, StatKind::Health)
        .unwrap_err();
    assert_eq!(
        err,
        UpgradeRefused::InsufficientSeeds {
            cost: 10,
            available: 9
        }
    );
    assert_eq!(p, before);
}

#[test]
fn test_enemy_archetypes_not_upgradable() {
    let mut p = PlayerProgress::default();
    let err = p
        .purchase_unit_upgrade(Archetype::ZombieTank, StatKind::Health)
        .unwrap_err();
    assert!(matches!(err, UpgradeRefused::NotUpgradable { .. }));
    assert_eq!(p.secured_seeds, 100);
}

#[test]
fn test_upgrade_level_cap() {
    let mut p = PlayerProgress {
        secured_seeds: 10_000,
        ..Default::default()
    };
    for _ in 0..MAX_UPGRADE_LEVEL {
        p.purchase_base_upgrade(BaseUpgradeKind::PassiveIncome)
            .unwrap();
    }
    assert_eq!(
        p.purchase_base_upgrade(BaseUpgradeKind::PassiveIncome),
        Err(UpgradeRefused::AtMaxLevel)
    );
}

#[test]
fn test_merge_defaults_fills_missing_entries() {
    let json = r#"{
        "secured_seeds": 42,
        "unit_upgrades": {
            "Peasant": { "Health": { "cost": 10, "increase": 3.75, "level": 4 } }
        }
    }"#;
    let mut p: PlayerProgress = serde_json::from_str(json).unwrap();
    p.merge_defaults();
    assert_eq!(p.secured_seeds, 42);
    assert_eq!(p.max_level, 1);
    let peasant = p.upgrades_for(Archetype::Peasant).unwrap();
    assert_eq!(peasant.level(StatKind::Health), 4);
    assert_eq!(peasant.0.len(), 4);
    assert_eq!(p.unit_upgrades.len(), 4);
}

#[test]
fn test_effective_stats_without_upgrades() {
    let stats = effective_stats(Archetype::ZombieMelee, None);
    assert!(approx(stats.max_health, 40.0));
    assert!(approx(stats.attack_power, 18.0));
    assert!(approx(stats.speed, 0.7));
    assert_eq!(stats.attack_cooldown_ms, 1000.0);

    let razor = effective_stats(Archetype::BanditRazor, None);
    assert!(approx(razor.max_health, 20.0));
    assert!(approx(razor.speed, 0.75));
}

#[test]
fn test_bandit_king_skips_faction_modifiers() {
    let king = effective_stats(Archetype::BanditKing, None);
    assert_eq!(king.max_health, 1000.0);
    assert_eq!(king.attack_power, 20.0);
    assert_eq!(king.speed, 2.0);
    assert_eq!(king.attack_range, 125.0);
}

#[test]
fn test_effective_stats_with_upgrades() {
    let mut p = PlayerProgress {
        secured_seeds: 1000,
        ..Default::default()
    };
    for _ in 0..2 {
        p.purchase_unit_upgrade(Archetype::Peasant, StatKind::Health)
            .unwrap();
        p.purchase_unit_upgrade(Archetype::Peasant, StatKind::AttackSpeed)
            .unwrap();
    }
    let stats = effective_stats(Archetype::Peasant, p.upgrades_for(Archetype::Peasant));
    assert!(approx(stats.max_health, 57.5));
    assert!(approx(stats.attack_cooldown_ms, 1000.0 / 1.15));
    assert!(approx(stats.attack_frame_delay_ms(), 1000.0 / 1.15 / 14.0));
}

#[test]
fn test_cooldown_floor() {
    assert_eq!(attack_cooldown_ms(500.0, 20, 0.5), 200.0);
    assert_eq!(attack_cooldown_ms(1000.0, 0, 0.075), 1000.0);
}

#[test]
fn test_apply_stat_upgrade_to_live_unit() {
    let base = effective_stats(Archetype::Tank, None);
    let mut stats: UnitStats = base.unit_stats();
    let mut health: Health = base.health();
    health.current = 100.0;

    let hp = UpgradeEntry {
        cost: 10,
        increase: 11.25,
        level: 1,
    };
    apply_stat_upgrade(&mut stats, &mut health, StatKind::Health, &hp);
    assert!(approx(health.max, 161.25));
    assert!(approx(health.current, 111.25));

    let speed = UpgradeEntry {
        cost: 10,
        increase: 0.075,
        level: 3,
    };
    apply_stat_upgrade(&mut stats, &mut health, StatKind::AttackSpeed, &speed);
    assert!(approx(stats.attack_cooldown_ms, 1500.0 / 1.225));
}

#[test]
fn test_battle_config_from_base_upgrades() {
    let mut p = PlayerProgress::default();
    assert_eq!(BattleConfig::from_progress(&p), BattleConfig::default());
    p.purchase_base_upgrade(BaseUpgradeKind::Hp).unwrap();
    p.purchase_base_upgrade(BaseUpgradeKind::PassiveIncome).unwrap();
    let config = BattleConfig::from_progress(&p);
    assert_eq!(config.player_base_max_health, 1075.0);
    assert_eq!(config.enemy_base_max_health, 1000.0);
    assert!(approx(config.passive_income_per_tick, 0.15));
}

#[test]
fn test_reload_reproduces_stats() {
    let mut p = PlayerProgress {
        secured_seeds: 500,
        ..Default::default()
    };
    for stat in StatKind::ALL {
        p.purchase_unit_upgrade(Archetype::Archer, stat).unwrap();
    }
    let before = effective_stats(Archetype::Archer, p.upgrades_for(Archetype::Archer));

    let mut store = MemoryStore::new();
    store.save(&p).unwrap();
    let loaded = store.load().unwrap();
    let after = effective_stats(Archetype::Archer, loaded.upgrades_for(Archetype::Archer));

    assert_eq!(loaded, p);
    assert_eq!(before, after);
}

#[test]
fn test_json_file_store_roundtrip() {
    let dir = std::env::temp_dir().join("evowar_test_progress_store");
    let _ = fs::remove_dir_all(&dir);
    let mut store = JsonFileStore::new(dir.join("player.json"));

    // Missing file loads defaults.
    assert_eq!(store.load().unwrap(), PlayerProgress::default());

    let mut p = PlayerProgress::default();
    p.max_level = 7;
    p.purchase_base_upgrade(BaseUpgradeKind::Hp).unwrap();
    store.save(&p).unwrap();
    assert_eq!(store.load().unwrap(), p);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_malformed_file_reports_json_error() {
    let dir = std::env::temp_dir().join("evowar_test_progress_malformed");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("player.json");
    fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(
        store.load(),
        Err(evowar_core::error::PersistenceError::Json(_))
    ));
    assert_eq!(load_or_default(&store), PlayerProgress::default());

    let _ = fs::remove_dir_all(&dir);
}
