//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which end of the lane an entity fights for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left end of the lane, advancing right.
    #[default]
    Player,
    /// Right end of the lane, advancing left.
    Enemy,
}

/// Army a unit belongs to. Each faction carries stat multipliers
/// applied once when the unit is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    Player,
    Bandits,
    Undead,
    Zombies,
}

/// Unit class. Defines base stats and how the unit delivers damage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Archetype {
    // --- Player ---
    #[default]
    Peasant,
    Archer,
    Warrior,
    Tank,

    // --- Bandits ---
    BanditRazor,
    BanditMadman,
    BanditArcher,
    BanditTank,
    /// Level 5 boss. Never drawn from the spawn pool.
    BanditKing,

    // --- Zombies ---
    ZombieMelee,
    ZombieArcher,
    ZombieAssassin,
    ZombieFarmer,
    ZombieTank,

    // --- Undead ---
    UndeadAxeman,
    UndeadKing,
    UndeadMage,
    UndeadSamurai,
    UndeadWarrior,
}

/// Animation / combat state shown for a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatState {
    #[default]
    Idle,
    Run,
    Attack,
    Hurt,
    /// Terminal. The unit is playing its death animation.
    Die,
}

/// Simulation lifecycle, kept separate from the displayed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Alive,
    /// Lethal damage taken; death animation still playing.
    Dying,
    /// Death animation finished; eligible for reap.
    Dead,
}

/// Structure kind. Towers are never picked as a default target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    #[default]
    Base,
    Tower,
}

/// Projectile motion model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Ballistic arc under gravity, pixel-mask collision.
    #[default]
    Arrow,
    /// Straight line fixed at spawn, rectangle collision.
    MagicBall,
}

/// How an archetype delivers damage on its trigger frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackDelivery {
    /// Damage is applied to the target immediately.
    #[default]
    Direct,
    /// A projectile of the given kind is released toward the target.
    Projectile(ProjectileKind),
}

/// Per-unit upgrade track.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StatKind {
    #[default]
    Health,
    Damage,
    AttackSpeed,
    MovementSpeed,
}

/// Base upgrade track.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BaseUpgradeKind {
    #[default]
    Hp,
    PassiveIncome,
}

/// Final result of a battle, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Battle phase reported in snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    Active,
    Paused,
    Over(Outcome),
}

/// Result of a single `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Continues,
    GameOver(Outcome),
}

impl Side {
    /// Movement direction along the lane: +1 for the player, -1 for the enemy.
    pub fn direction(self) -> f64 {
        match self {
            Side::Player => 1.0,
            Side::Enemy => -1.0,
        }
    }

    pub fn opposing(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl Faction {
    pub fn side(self) -> Side {
        match self {
            Faction::Player => Side::Player,
            _ => Side::Enemy,
        }
    }
}

impl Archetype {
    pub const PLAYER_ROSTER: [Archetype; 4] = [
        Archetype::Peasant,
        Archetype::Archer,
        Archetype::Warrior,
        Archetype::Tank,
    ];

    pub const ALL: [Archetype; 19] = [
        Archetype::Peasant,
        Archetype::Archer,
        Archetype::Warrior,
        Archetype::Tank,
        Archetype::BanditRazor,
        Archetype::BanditMadman,
        Archetype::BanditArcher,
        Archetype::BanditTank,
        Archetype::BanditKing,
        Archetype::ZombieMelee,
        Archetype::ZombieArcher,
        Archetype::ZombieAssassin,
        Archetype::ZombieFarmer,
        Archetype::ZombieTank,
        Archetype::UndeadAxeman,
        Archetype::UndeadKing,
        Archetype::UndeadMage,
        Archetype::UndeadSamurai,
        Archetype::UndeadWarrior,
    ];

    pub fn faction(self) -> Faction {
        use Archetype::*;
        match self {
            Peasant | Archer | Warrior | Tank => Faction::Player,
            BanditRazor | BanditMadman | BanditArcher | BanditTank | BanditKing => {
                Faction::Bandits
            }
            ZombieMelee | ZombieArcher | ZombieAssassin | ZombieFarmer | ZombieTank => {
                Faction::Zombies
            }
            UndeadAxeman | UndeadKing | UndeadMage | UndeadSamurai | UndeadWarrior => {
                Faction::Undead
            }
        }
    }

    pub fn is_player(self) -> bool {
        self.faction() == Faction::Player
    }

    /// Stable display / asset name.
    pub fn name(self) -> &'static str {
        use Archetype::*;
        match self {
            Peasant => "Peasant",
            Archer => "Archer",
            Warrior => "Warrior",
            Tank => "Tank",
            BanditRazor => "BanditRazor",
            BanditMadman => "BanditMadman",
            BanditArcher => "BanditArcher",
            BanditTank => "BanditTank",
            BanditKing => "BanditKing",
            ZombieMelee => "ZombieMelee",
            ZombieArcher => "ZombieArcher",
            ZombieAssassin => "ZombieAssassin",
            ZombieFarmer => "ZombieFarmer",
            ZombieTank => "ZombieTank",
            UndeadAxeman => "UndeadAxeman",
            UndeadKing => "UndeadKing",
            UndeadMage => "UndeadMage",
            UndeadSamurai => "UndeadSamurai",
            UndeadWarrior => "UndeadWarrior",
        }
    }
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Health,
        StatKind::Damage,
        StatKind::AttackSpeed,
        StatKind::MovementSpeed,
    ];
}
