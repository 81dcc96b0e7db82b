//! Effective-stat formulas.
//!
//! Stats are pure functions of the archetype, the faction modifiers and the
//! upgrade levels, so a reloaded progress record reproduces them exactly.

use evowar_core::components::{Health, UnitStats};
use evowar_core::constants::{
    BASE_HEALTH, BASE_PASSIVE_INCOME, FRAMES_PER_STATE, MIN_ATTACK_COOLDOWN_MS,
};
use evowar_core::enums::{Archetype, BaseUpgradeKind, StatKind};
use evowar_unit_ai::profiles::{faction_modifiers, get_profile, FactionModifiers};

use crate::upgrades::{PlayerProgress, UnitUpgrades, UpgradeEntry};

/// Per-instance stats computed at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveStats {
    pub max_health: f64,
    pub attack_power: f64,
    pub speed: f64,
    pub attack_range: f64,
    pub base_attack_cooldown_ms: f64,
    pub attack_cooldown_ms: f64,
}

impl EffectiveStats {
    pub fn attack_frame_delay_ms(&self) -> f64 {
        self.attack_cooldown_ms / FRAMES_PER_STATE as f64
    }

    pub fn health(&self) -> Health {
        Health {
            current: self.max_health,
            max: self.max_health,
        }
    }

    pub fn unit_stats(&self) -> UnitStats {
        UnitStats {
            attack_power: self.attack_power,
            speed: self.speed,
            attack_range: self.attack_range,
            base_attack_cooldown_ms: self.base_attack_cooldown_ms,
            attack_cooldown_ms: self.attack_cooldown_ms,
        }
    }
}

/// Attack cooldown after `level` attack-speed upgrades, floored at 200 ms.
pub fn attack_cooldown_ms(base_cooldown_ms: f64, level: u32, increase: f64) -> f64 {
    (base_cooldown_ms / (1.0 + level as f64 * increase)).max(MIN_ATTACK_COOLDOWN_MS)
}

/// Stats for a fresh unit. Faction modifiers are applied first (unless the
/// profile opts out), then the flat upgrade bonuses. Enemy units pass `None`
/// for `upgrades`.
pub fn effective_stats(archetype: Archetype, upgrades: Option<&UnitUpgrades>) -> EffectiveStats {
    let profile = get_profile(archetype);
    let mods = if profile.faction_scaled {
        faction_modifiers(archetype.faction())
    } else {
        FactionModifiers::NONE
    };

    let bonus = |stat: StatKind| upgrades.map_or(0.0, |u| u.bonus(stat));
    let cooldown = match upgrades.and_then(|u| u.entry(StatKind::AttackSpeed)) {
        Some(entry) => attack_cooldown_ms(profile.base_attack_cooldown_ms, entry.level, entry.increase),
        None => profile.base_attack_cooldown_ms,
    };

    EffectiveStats {
        max_health: profile.base_health * mods.health + bonus(StatKind::Health),
        attack_power: profile.base_attack * mods.attack + bonus(StatKind::Damage),
        speed: profile.base_speed * mods.speed + bonus(StatKind::MovementSpeed),
        attack_range: profile.attack_range,
        base_attack_cooldown_ms: profile.base_attack_cooldown_ms,
        attack_cooldown_ms: cooldown,
    }
}

/// Apply one freshly bought upgrade level to a live unit.
/// `entry` is the track after the purchase.
pub fn apply_stat_upgrade(
    stats: &mut UnitStats,
    health: &mut Health,
    stat: StatKind,
    entry: &UpgradeEntry,
) {
    match stat {
        StatKind::Health => {
            health.max += entry.increase;
            health.current = (health.current + entry.increase).min(health.max);
        }
        StatKind::Damage => stats.attack_power += entry.increase,
        StatKind::AttackSpeed => {
            stats.attack_cooldown_ms =
                attack_cooldown_ms(stats.base_attack_cooldown_ms, entry.level, entry.increase);
        }
        StatKind::MovementSpeed => stats.speed += entry.increase,
    }
}

/// Battle-wide values derived once from the base upgrades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleConfig {
    pub player_base_max_health: f64,
    pub enemy_base_max_health: f64,
    /// Seeds added every tick while the battle runs.
    pub passive_income_per_tick: f64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            player_base_max_health: BASE_HEALTH,
            enemy_base_max_health: BASE_HEALTH,
            passive_income_per_tick: BASE_PASSIVE_INCOME,
        }
    }
}

impl BattleConfig {
    pub fn from_progress(progress: &PlayerProgress) -> Self {
        let upgrades = &progress.base_upgrades;
        Self {
            player_base_max_health: BASE_HEALTH + upgrades.bonus(BaseUpgradeKind::Hp),
            enemy_base_max_health: BASE_HEALTH,
            passive_income_per_tick: BASE_PASSIVE_INCOME
                + upgrades.bonus(BaseUpgradeKind::PassiveIncome),
        }
    }
}
