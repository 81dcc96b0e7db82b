//! Upgrade tables and the player progress record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use evowar_core::enums::{Archetype, BaseUpgradeKind, StatKind};
use evowar_core::error::UpgradeRefused;

/// Upgrade tiers stop at this level.
pub const MAX_UPGRADE_LEVEL: u32 = 20;

/// Secured seeds a fresh profile starts with.
pub const STARTING_SECURED_SEEDS: u32 = 100;

/// Price of every per-unit upgrade step.
pub const UNIT_UPGRADE_COST: u32 = 10;

/// Price of every base upgrade step.
pub const BASE_UPGRADE_COST: u32 = 50;

/// Highest level at which the archer is still locked.
pub const ARCHER_UNLOCK_LEVEL: u32 = 5;

/// One upgrade track: price per step, stat gain per level, levels bought.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpgradeEntry {
    pub cost: u32,
    pub increase: f64,
    pub level: u32,
}

impl UpgradeEntry {
    pub fn new(cost: u32, increase: f64) -> Self {
        Self {
            cost,
            increase,
            level: 0,
        }
    }

    /// Total flat gain at the current level.
    pub fn bonus(&self) -> f64 {
        self.level as f64 * self.increase
    }
}

/// Upgrade tracks for one player archetype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitUpgrades(pub BTreeMap<StatKind, UpgradeEntry>);

/// Base upgrade tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseUpgrades(pub BTreeMap<BaseUpgradeKind, UpgradeEntry>);

impl UnitUpgrades {
    /// Default tracks for a player archetype; empty for enemy archetypes.
    pub fn defaults_for(archetype: Archetype) -> Self {
        let (health, damage, attack_speed, movement_speed) = match archetype {
            Archetype::Peasant => (3.75, 1.5, 0.075, 0.075),
            Archetype::Archer => (2.25, 1.125, 0.075, 0.105),
            Archetype::Warrior => (6.0, 1.875, 0.075, 0.08625),
            Archetype::Tank => (11.25, 0.75, 0.075, 0.0375),
            _ => return Self::default(),
        };
        let mut tracks = BTreeMap::new();
        tracks.insert(StatKind::Health, UpgradeEntry::new(UNIT_UPGRADE_COST, health));
        tracks.insert(StatKind::Damage, UpgradeEntry::new(UNIT_UPGRADE_COST, damage));
        tracks.insert(
            StatKind::AttackSpeed,
            UpgradeEntry::new(UNIT_UPGRADE_COST, attack_speed),
        );
        tracks.insert(
            StatKind::MovementSpeed,
            UpgradeEntry::new(UNIT_UPGRADE_COST, movement_speed),
        );
        Self(tracks)
    }

    pub fn entry(&self, stat: StatKind) -> Option<&UpgradeEntry> {
        self.0.get(&stat)
    }

    /// Level bought on a track, zero when the track is absent.
    pub fn level(&self, stat: StatKind) -> u32 {
        self.entry(stat).map_or(0, |e| e.level)
    }

    /// Flat bonus on a track, zero when the track is absent.
    pub fn bonus(&self, stat: StatKind) -> f64 {
        self.entry(stat).map_or(0.0, UpgradeEntry::bonus)
    }
}

impl Default for BaseUpgrades {
    fn default() -> Self {
        let mut tracks = BTreeMap::new();
        tracks.insert(BaseUpgradeKind::Hp, UpgradeEntry::new(BASE_UPGRADE_COST, 75.0));
        tracks.insert(
            BaseUpgradeKind::PassiveIncome,
            UpgradeEntry::new(BASE_UPGRADE_COST, 0.05),
        );
        Self(tracks)
    }
}

impl BaseUpgrades {
    pub fn entry(&self, kind: BaseUpgradeKind) -> Option<&UpgradeEntry> {
        self.0.get(&kind)
    }

    pub fn bonus(&self, kind: BaseUpgradeKind) -> f64 {
        self.entry(kind).map_or(0.0, UpgradeEntry::bonus)
    }
}

/// Everything the player keeps between battles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProgress {
    pub secured_seeds: u32,
    /// Highest level unlocked.
    pub max_level: u32,
    pub unit_upgrades: BTreeMap<Archetype, UnitUpgrades>,
    pub base_upgrades: BaseUpgrades,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        let unit_upgrades = Archetype::PLAYER_ROSTER
            .iter()
            .map(|&a| (a, UnitUpgrades::defaults_for(a)))
            .collect();
        Self {
            secured_seeds: STARTING_SECURED_SEEDS,
            max_level: 1,
            unit_upgrades,
            base_upgrades: BaseUpgrades::default(),
        }
    }
}

impl PlayerProgress {
    /// Fill in any archetype or track missing from a loaded record with its
    /// default. Existing entries are left untouched.
    pub fn merge_defaults(&mut self) {
        for archetype in Archetype::PLAYER_ROSTER {
            let defaults = UnitUpgrades::defaults_for(archetype);
            let tracks = self.unit_upgrades.entry(archetype).or_default();
            for (stat, entry) in defaults.0 {
                tracks.0.entry(stat).or_insert(entry);
            }
        }
        for (kind, entry) in BaseUpgrades::default().0 {
            self.base_upgrades.0.entry(kind).or_insert(entry);
        }
    }

    pub fn upgrades_for(&self, archetype: Archetype) -> Option<&UnitUpgrades> {
        self.unit_upgrades.get(&archetype)
    }

    /// Archetypes the player may field at the current progress.
    pub fn available_roster(&self) -> Vec<Archetype> {
        Archetype::PLAYER_ROSTER
            .into_iter()
            .filter(|&a| a != Archetype::Archer || self.max_level >= ARCHER_UNLOCK_LEVEL)
            .collect()
    }

    /// Unlock the level after a won one.
    pub fn record_victory(&mut self, level: u32) {
        self.max_level = self.max_level.max(level + 1);
    }

    /// Buy one level on a unit track. Returns the updated entry.
    pub fn purchase_unit_upgrade(
        &mut self,
        archetype: Archetype,
        stat: StatKind,
    ) -> Result<UpgradeEntry, UpgradeRefused> {
        let available = self.secured_seeds;
        let entry = self
            .unit_upgrades
            .get_mut(&archetype)
            .and_then(|u| u.0.get_mut(&stat))
            .ok_or(UpgradeRefused::NotUpgradable { archetype, stat })?;
        let cost = buy(entry, available)?;
        let bought = *entry;
        self.secured_seeds -= cost;
        Ok(bought)
    }

    /// Buy one level on a base track. Returns the updated entry.
    pub fn purchase_base_upgrade(
        &mut self,
        kind: BaseUpgradeKind,
    ) -> Result<UpgradeEntry, UpgradeRefused> {
        let available = self.secured_seeds;
        let fallback = BaseUpgrades::default().0[&kind];
        let entry = self.base_upgrades.0.entry(kind).or_insert(fallback);
        let cost = buy(entry, available)?;
        let bought = *entry;
        self.secured_seeds -= cost;
        Ok(bought)
    }
}

fn buy(entry: &mut UpgradeEntry, available: u32) -> Result<u32, UpgradeRefused> {
    if entry.level >= MAX_UPGRADE_LEVEL {
        return Err(UpgradeRefused::AtMaxLevel);
    }
    if available < entry.cost {
        return Err(UpgradeRefused::InsufficientSeeds {
            cost: entry.cost,
            available,
        });
    }
    entry.level += 1;
    Ok(entry.cost)
}
