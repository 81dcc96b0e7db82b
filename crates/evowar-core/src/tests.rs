use crate::commands::PlayerCommand;
use crate::constants::*;
use crate::enums::*;
use crate::error::{ConfigError, SpawnRefused};
use crate::events::{EventSink, GameEvent};
use crate::state::GameStateSnapshot;
use crate::types::{Position, Rect, SimTime};

#[test]
fn test_side_direction_and_opposition() {
    assert_eq!(Side::Player.direction(), 1.0);
    assert_eq!(Side::Enemy.direction(), -1.0);
    assert_eq!(Side::Player.opposing(), Side::Enemy);
    assert_eq!(Faction::Zombies.side(), Side::Enemy);
    assert_eq!(Faction::Player.side(), Side::Player);
}

#[test]
fn test_archetype_factions() {
    for archetype in Archetype::PLAYER_ROSTER {
        assert!(archetype.is_player());
    }
    let enemies = Archetype::ALL.iter().filter(|a| !a.is_player()).count();
    assert_eq!(enemies, 15);
    assert_eq!(Archetype::UndeadMage.faction(), Faction::Undead);
    assert_eq!(Archetype::BanditTank.faction(), Faction::Bandits);
    assert_eq!(Archetype::ZombieFarmer.faction(), Faction::Zombies);
}

#[test]
fn test_archetype_names_unique() {
    let mut names: Vec<_> = Archetype::ALL.iter().map(|a| a.name()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), Archetype::ALL.len());
}

#[test]
fn test_combat_state_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&CombatState::Die).unwrap(), "\"die\"");
    let back: CombatState = serde_json::from_str("\"attack\"").unwrap();
    assert_eq!(back, CombatState::Attack);
}

#[test]
fn test_command_is_tagged() {
    let cmd = PlayerCommand::SpawnUnit {
        archetype: Archetype::Archer,
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains("\"type\":\"SpawnUnit\""));
    let back: PlayerCommand = serde_json::from_str(&json).unwrap();
    assert!(matches!(
        back,
        PlayerCommand::SpawnUnit {
            archetype: Archetype::Archer
        }
    ));
}

#[test]
fn test_event_name_matches_tag() {
    let events = vec![
        GameEvent::GameStarted { level: 3 },
        GameEvent::UnitSpawned {
            archetype: Archetype::Tank,
            side: Side::Player,
        },
        GameEvent::UnitKilled {
            archetype: Archetype::ZombieMelee,
            killer: Side::Player,
        },
        GameEvent::UpgradeApplied {
            archetype: Archetype::Warrior,
            upgrade: StatKind::Damage,
        },
        GameEvent::BattleEnded {
            outcome: Outcome::Victory,
        },
    ];
    for event in events {
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], event.name());
    }
}

#[test]
fn test_event_payload_excludes_tag() {
    let event = GameEvent::UnitKilled {
        archetype: Archetype::ZombieTank,
        killer: Side::Player,
    };
    let payload = event.payload();
    assert!(!payload.contains_key("type"));
    assert_eq!(payload["archetype"], "ZombieTank");
    assert_eq!(payload["killer"], "Player");
}

#[test]
fn test_vec_sink_rebuilds_events() {
    let event = GameEvent::UpgradeApplied {
        archetype: Archetype::Peasant,
        upgrade: StatKind::AttackSpeed,
    };
    let mut sink: Vec<GameEvent> = Vec::new();
    sink.on_event(event.name(), &event.payload());
    assert_eq!(sink, vec![event]);
}

#[test]
fn test_rect_touching_edges_do_not_intersect() {
    let a = Rect::new(0.0, 0.0, 120.0, 192.0);
    let b = Rect::new(120.0, 0.0, 120.0, 192.0);
    let c = Rect::new(119.0, 0.0, 120.0, 192.0);
    assert!(!a.intersects(&b));
    assert!(a.intersects(&c));
    assert!(c.intersects(&a));
}

#[test]
fn test_position_distances() {
    let a = Position::new(100.0, 688.0);
    let b = Position::new(-50.0, 0.0);
    assert_eq!(a.lane_distance_to(&b), 150.0);
    let c = Position::new(103.0, 692.0);
    assert!((a.distance_to(&c) - 5.0).abs() < 1e-9);
}

#[test]
fn test_sim_time_advance() {
    let mut t = SimTime::default();
    t.advance(FRAME_MS);
    t.advance(FRAME_MS);
    assert_eq!(t.tick, 2);
    assert!((t.elapsed_ms - 2.0 * 1000.0 / 60.0).abs() < 1e-9);
}

#[test]
fn test_lane_geometry_constants() {
    assert_eq!(MAX_BUCKET, 4);
    assert_eq!(UNIT_Y, 688.0);
    assert_eq!(BUILDING_Y, 580.0);
    assert_eq!(ENEMY_BASE_X, 1670.0);
    assert_eq!(PLAYER_MAX_X, 1800.0);
    assert_eq!(ENEMY_SPAWN_X, 1820.0);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ConfigError::InvalidLevel(21).to_string(),
        "invalid level number: 21"
    );
    let refused = SpawnRefused::InsufficientSeeds {
        cost: 30,
        available: 12.5,
    };
    assert_eq!(refused.to_string(), "not enough seeds: need 30, have 12.5");
}

#[test]
fn test_snapshot_default_serde() {
    let snap = GameStateSnapshot::default();
    let json = serde_json::to_string(&snap).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.phase, BattlePhase::Active);
    assert!(back.units.is_empty());
}
