//! Level definitions: which faction the player faces and its unit pool.

use rand::seq::SliceRandom;
use rand::Rng;

use evowar_core::enums::{Archetype, Faction};
use evowar_core::error::ConfigError;

const BANDIT_POOL: &[Archetype] = &[
    Archetype::BanditRazor,
    Archetype::BanditMadman,
    Archetype::BanditArcher,
    Archetype::BanditTank,
];

const ZOMBIE_POOL: &[Archetype] = &[
    Archetype::ZombieArcher,
    Archetype::ZombieAssassin,
    Archetype::ZombieFarmer,
    Archetype::ZombieMelee,
    Archetype::ZombieTank,
];

const UNDEAD_POOL: &[Archetype] = &[
    Archetype::UndeadAxeman,
    Archetype::UndeadKing,
    Archetype::UndeadMage,
    Archetype::UndeadSamurai,
    Archetype::UndeadWarrior,
];

/// Highest playable level.
pub const MAX_LEVEL: u32 = 20;

/// Level whose enemy base is followed by the Bandit King.
pub const BOSS_LEVEL: u32 = 5;

/// A playable level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub number: u32,
    pub faction: Faction,
    pub pool: &'static [Archetype],
}

impl Level {
    /// Look up a level. Numbers outside 1..=20 are a configuration error.
    pub fn new(number: u32) -> Result<Self, ConfigError> {
        let (faction, pool) = match number {
            1..=5 => (Faction::Bandits, BANDIT_POOL),
            6..=10 => (Faction::Zombies, ZOMBIE_POOL),
            11..=MAX_LEVEL => (Faction::Undead, UNDEAD_POOL),
            _ => return Err(ConfigError::InvalidLevel(number)),
        };
        Ok(Self {
            number,
            faction,
            pool,
        })
    }

    /// Uniform random pick from the pool.
    pub fn next_enemy<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Archetype> {
        self.pool.choose(rng).copied()
    }

    /// Boss that takes the field once the enemy base falls, if any.
    pub fn boss(&self) -> Option<Archetype> {
        (self.number == BOSS_LEVEL).then_some(Archetype::BanditKing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_level_factions() {
        assert_eq!(Level::new(1).unwrap().faction, Faction::Bandits);
        assert_eq!(Level::new(5).unwrap().faction, Faction::Bandits);
        assert_eq!(Level::new(6).unwrap().faction, Faction::Zombies);
        assert_eq!(Level::new(10).unwrap().faction, Faction::Zombies);
        assert_eq!(Level::new(11).unwrap().faction, Faction::Undead);
        assert_eq!(Level::new(20).unwrap().faction, Faction::Undead);
    }

    #[test]
    fn test_invalid_levels() {
        assert_eq!(Level::new(0), Err(ConfigError::InvalidLevel(0)));
        assert_eq!(Level::new(21), Err(ConfigError::InvalidLevel(21)));
    }

    #[test]
    fn test_only_level_five_has_a_boss() {
        assert_eq!(Level::new(5).unwrap().boss(), Some(Archetype::BanditKing));
        for number in [1, 4, 6, 10, 20] {
            assert_eq!(Level::new(number).unwrap().boss(), None);
        }
        assert!(!BANDIT_POOL.contains(&Archetype::BanditKing));
    }

    #[test]
    fn test_next_enemy_from_pool() {
        let level = Level::new(7).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let archetype = level.next_enemy(&mut rng).unwrap();
            assert_eq!(archetype.faction(), Faction::Zombies);
        }
    }
}
