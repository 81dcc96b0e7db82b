//! Archetype-specific unit profiles.
//!
//! Consolidates per-archetype parameters: base stats, purchase cost,
//! attack delivery, kill rewards, body size and the placeholder colour used
//! when the sprite sheet is missing.

use evowar_core::constants::{
    GROUND_Y, SPRITE_FRAME_SIZE, UNIT_HEALTH_BAR_HEIGHT, UNIT_HEALTH_BAR_WIDTH, UNIT_HEIGHT,
    UNIT_WIDTH,
};
use evowar_core::enums::{Archetype, AttackDelivery, Faction, ProjectileKind};
use evowar_core::types::Color;

/// How big a unit is on the lane and on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Collision box size.
    pub width: f64,
    pub height: f64,
    /// Side of the square frame as drawn; sheet frames are scaled to it.
    pub frame_size: u32,
    pub bar_width: f64,
    pub bar_height: f64,
    /// Gap between the health bar and the top of the frame.
    pub bar_lift: f64,
}

impl Body {
    /// Lane y of the top edge, standing on the ground line.
    pub fn lane_y(&self) -> f64 {
        GROUND_Y - self.height
    }
}

pub const STANDARD_BODY: Body = Body {
    width: UNIT_WIDTH,
    height: UNIT_HEIGHT,
    frame_size: SPRITE_FRAME_SIZE,
    bar_width: UNIT_HEALTH_BAR_WIDTH,
    bar_height: UNIT_HEALTH_BAR_HEIGHT,
    bar_lift: 20.0,
};

pub const BOSS_BODY: Body = Body {
    width: 180.0,
    height: 288.0,
    frame_size: 288,
    bar_width: 171.0,
    bar_height: 15.0,
    bar_lift: 30.0,
};

/// Static profile for a unit archetype.
#[derive(Debug, Clone, Copy)]
pub struct UnitProfile {
    pub base_health: f64,
    pub base_attack: f64,
    /// Pixels per tick before faction modifiers.
    pub base_speed: f64,
    pub base_attack_cooldown_ms: f64,
    /// Seeds needed to spawn (player archetypes).
    pub cost: u32,
    pub attack_range: f64,
    pub delivery: AttackDelivery,
    /// Projectile release point relative to the unit's top-left corner.
    pub muzzle_offset: Option<(f64, f64)>,
    pub placeholder_color: Color,
    /// Seeds granted when this unit is killed by the player.
    pub seed_reward: u32,
    /// XP granted when this unit is killed by the player.
    pub xp_reward: u32,
    pub body: Body,
    /// Whether faction modifiers apply when the unit is created.
    pub faction_scaled: bool,
}

/// Multipliers applied once when a unit of the faction is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactionModifiers {
    pub health: f64,
    pub attack: f64,
    pub speed: f64,
}

const MELEE_RANGE: f64 = 125.0;
const BOW_RANGE: f64 = 250.0;
const PLAYER_MUZZLE: (f64, f64) = (115.0, 105.0);
const ENEMY_MUZZLE: (f64, f64) = (77.0, 105.0);
const DEFAULT_SEED_REWARD: u32 = 5;
const DEFAULT_XP_REWARD: u32 = 10;

fn melee(health: f64, attack: f64, speed: f64, cooldown: f64, cost: u32) -> UnitProfile {
    UnitProfile {
        base_health: health,
        base_attack: attack,
        base_speed: speed,
        base_attack_cooldown_ms: cooldown,
        cost,
        attack_range: MELEE_RANGE,
        delivery: AttackDelivery::Direct,
        muzzle_offset: None,
        placeholder_color: Color::rgb(255, 255, 255),
        seed_reward: DEFAULT_SEED_REWARD,
        xp_reward: DEFAULT_XP_REWARD,
        body: STANDARD_BODY,
        faction_scaled: true,
    }
}

fn archer(cost: u32, muzzle: (f64, f64)) -> UnitProfile {
    UnitProfile {
        attack_range: BOW_RANGE,
        delivery: AttackDelivery::Projectile(ProjectileKind::Arrow),
        muzzle_offset: Some(muzzle),
        ..melee(30.0, 15.0, 1.4, 1000.0, cost)
    }
}

/// Get the profile for a given archetype.
pub fn get_profile(archetype: Archetype) -> UnitProfile {
    let (profile, color, rewards) = match archetype {
        Archetype::Peasant => (melee(50.0, 20.0, 1.0, 1000.0, 20), (255, 0, 0), Some((5, 10))),
        Archetype::Archer => (archer(30, PLAYER_MUZZLE), (0, 255, 0), Some((10, 15))),
        Archetype::Warrior => (melee(80.0, 25.0, 1.15, 1000.0, 50), (0, 0, 255), Some((15, 20))),
        Archetype::Tank => (melee(150.0, 10.0, 0.5, 1500.0, 60), (0, 100, 100), Some((20, 25))),

        Archetype::BanditRazor => (melee(40.0, 25.0, 1.5, 800.0, 30), (255, 100, 0), None),
        Archetype::BanditMadman => (melee(60.0, 20.0, 1.2, 1000.0, 25), (255, 0, 100), None),
        Archetype::BanditArcher => (archer(30, ENEMY_MUZZLE), (100, 255, 0), None),
        Archetype::BanditTank => (melee(150.0, 10.0, 0.5, 1500.0, 60), (100, 0, 100), None),
        Archetype::BanditKing => (
            UnitProfile {
                body: BOSS_BODY,
                faction_scaled: false,
                ..melee(1000.0, 20.0, 2.0, 1000.0, 0)
            },
            (255, 165, 0),
            Some((50, 100)),
        ),

        Archetype::ZombieMelee => (melee(50.0, 20.0, 1.0, 1000.0, 20), (255, 0, 0), Some((5, 10))),
        Archetype::ZombieArcher => (archer(30, ENEMY_MUZZLE), (0, 255, 0), Some((10, 15))),
        Archetype::ZombieAssassin => {
            (melee(20.0, 30.0, 2.0, 500.0, 40), (255, 255, 0), Some((15, 20)))
        }
        Archetype::ZombieFarmer => (melee(60.0, 15.0, 0.9, 1200.0, 25), (0, 255, 255), None),
        Archetype::ZombieTank => (melee(150.0, 10.0, 0.5, 1500.0, 60), (100, 0, 100), Some((20, 25))),

        Archetype::UndeadAxeman => (melee(70.0, 25.0, 1.0, 1000.0, 35), (128, 0, 0), None),
        Archetype::UndeadKing => (
            UnitProfile {
                attack_range: 150.0,
                ..melee(100.0, 30.0, 0.8, 1200.0, 50)
            },
            (128, 128, 0),
            None,
        ),
        Archetype::UndeadMage => (
            UnitProfile {
                attack_range: 200.0,
                delivery: AttackDelivery::Projectile(ProjectileKind::MagicBall),
                muzzle_offset: Some(ENEMY_MUZZLE),
                ..melee(50.0, 25.0, 1.0, 1500.0, 50)
            },
            (128, 0, 128),
            None,
        ),
        Archetype::UndeadSamurai => (melee(60.0, 35.0, 1.3, 900.0, 40), (0, 128, 128), None),
        Archetype::UndeadWarrior => (melee(80.0, 20.0, 1.1, 1000.0, 30), (128, 128, 128), None),
    };

    let (seed_reward, xp_reward) = rewards.unwrap_or((DEFAULT_SEED_REWARD, DEFAULT_XP_REWARD));
    UnitProfile {
        placeholder_color: Color::rgb(color.0, color.1, color.2),
        seed_reward,
        xp_reward,
        ..profile
    }
}

impl FactionModifiers {
    pub const NONE: FactionModifiers = FactionModifiers {
        health: 1.0,
        attack: 1.0,
        speed: 1.0,
    };
}

/// Get the stat multipliers for a faction.
pub fn faction_modifiers(faction: Faction) -> FactionModifiers {
    match faction {
        Faction::Player | Faction::Undead => FactionModifiers::NONE,
        Faction::Bandits => FactionModifiers {
            health: 0.5,
            attack: 0.5,
            speed: 0.5,
        },
        Faction::Zombies => FactionModifiers {
            health: 0.8,
            attack: 0.9,
            speed: 0.7,
        },
    }
}
