//! Simulation engine: the core of the battle.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed order, draws through a `Surface` and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use evowar_core::commands::PlayerCommand;
use evowar_core::components::{Animation, Health, Retreat, Unit, UnitStats};
use evowar_core::constants::*;
use evowar_core::enums::*;
use evowar_core::error::{ConfigError, SpawnRefused, UpgradeRefused};
use evowar_core::events::{EventSink, GameEvent};
use evowar_core::state::GameStateSnapshot;
use evowar_core::types::SimTime;
use evowar_progression::stats::{apply_stat_upgrade, effective_stats};
use evowar_progression::{BattleConfig, PlayerProgress};
use evowar_unit_ai::profiles::get_profile;

use crate::assets::{AssetCache, AssetSource, NullAssetSource};
use crate::clock::{Clock, FixedStepClock};
use crate::components::Combat;
use crate::lane;
use crate::level::Level;
use crate::render::{self, Surface};
use crate::systems;
use crate::systems::economy::Economy;
use crate::systems::spatial::BucketIndex;
use crate::systems::wave_spawner::SpawnTimer;
use crate::world_setup;

/// Configuration for starting a new battle.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u64,
    /// Level number, 1 to 20.
    pub level: u32,
    /// Duration of one tick in milliseconds.
    pub frame_ms: f64,
    /// Upgrade tiers the player brings into the battle.
    pub progress: PlayerProgress,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            level: 1,
            frame_ms: FRAME_MS,
            progress: PlayerProgress::default(),
        }
    }
}

/// Progress of a level's boss fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BossFight {
    /// The enemy base still stands, or the level has no boss.
    Pending,
    Active(Entity),
    Defeated,
}

/// The simulation engine. Owns the ECS world and all battle state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    frame_ms: f64,
    clock: Box<dyn Clock>,
    rng: ChaCha8Rng,
    level: Level,
    progress: PlayerProgress,
    battle: BattleConfig,
    assets: AssetCache,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,

    player_units: Vec<Entity>,
    enemy_units: Vec<Entity>,
    projectiles: Vec<Entity>,
    seed_drops: Vec<Entity>,
    player_base: Entity,
    enemy_base: Entity,
    index: BucketIndex,

    economy: Economy,
    spawner: SpawnTimer,
    boss: BossFight,
    paused: bool,
    outcome: Option<Outcome>,

    /// Events not yet drained by `snapshot` or `drain_events`.
    events: Vec<GameEvent>,
    /// Events not yet handed to the sinks.
    outbox: Vec<GameEvent>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl SimulationEngine {
    /// Create a battle with placeholder assets and a fixed-step clock.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_assets(config, Box::new(NullAssetSource))
    }

    /// Create a battle loading sprites from `assets`.
    pub fn with_assets(
        config: SimConfig,
        assets: Box<dyn AssetSource>,
    ) -> Result<Self, ConfigError> {
        let clock = Box::new(FixedStepClock::new(config.frame_ms));
        Self::with_collaborators(config, clock, assets)
    }

    /// Create a battle with an explicit clock and asset source.
    ///
    /// Fails on a level outside 1 to 20 or a non-positive frame duration.
    pub fn with_collaborators(
        config: SimConfig,
        clock: Box<dyn Clock>,
        assets: Box<dyn AssetSource>,
    ) -> Result<Self, ConfigError> {
        if !(config.frame_ms > 0.0) {
            return Err(ConfigError::InvalidFrameDuration(config.frame_ms));
        }
        let level = Level::new(config.level)?;
        let mut progress = config.progress;
        progress.merge_defaults();
        let battle = BattleConfig::from_progress(&progress);

        let mut world = World::new();
        let (player_base, enemy_base) = world_setup::setup_battle(&mut world, &battle);
        let start_ms = clock.now_ms();

        let mut engine = Self {
            world,
            time: SimTime::default(),
            frame_ms: config.frame_ms,
            clock,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            level,
            progress,
            battle,
            assets: AssetCache::new(assets),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            player_units: Vec::new(),
            enemy_units: Vec::new(),
            projectiles: Vec::new(),
            seed_drops: Vec::new(),
            player_base,
            enemy_base,
            index: BucketIndex::default(),
            economy: Economy::default(),
            spawner: SpawnTimer {
                last_spawn_ms: start_ms,
                stopped: false,
            },
            boss: BossFight::Pending,
            paused: false,
            outcome: None,
            events: Vec::new(),
            outbox: Vec::new(),
            sinks: Vec::new(),
        };
        log::info!(
            "battle started: level {} against {:?}",
            engine.level.number,
            engine.level.faction
        );
        engine.emit(GameEvent::GameStarted {
            level: engine.level.number,
        });
        Ok(engine)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Register a sink that receives every event at the end of each tick.
    pub fn add_event_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Advance the battle by one tick.
    ///
    /// Once the battle is over every call returns the same outcome without
    /// simulating. A paused tick simulates nothing and returns `Continues`.
    pub fn tick(&mut self) -> TickOutcome {
        self.process_commands();

        if self.outcome.is_none() && !self.paused {
            let now = self.clock.now_ms();
            self.run_systems(now);
            self.clock.advance();
            self.time.advance(self.frame_ms);
        }
        self.flush_events();

        match self.outcome {
            Some(outcome) => TickOutcome::GameOver(outcome),
            None => TickOutcome::Continues,
        }
    }

    /// Spawn a player unit at the back of the formation, paying its cost.
    pub fn spawn_unit(&mut self, archetype: Archetype) -> Result<Entity, SpawnRefused> {
        if self.outcome.is_some() {
            return Err(SpawnRefused::BattleOver);
        }
        if !archetype.is_player() {
            return Err(SpawnRefused::NotPlayerArchetype(archetype));
        }
        if !self.progress.available_roster().contains(&archetype) {
            return Err(SpawnRefused::Locked(archetype));
        }
        let cost = get_profile(archetype).cost;
        if !self.economy.can_afford(cost) {
            return Err(SpawnRefused::InsufficientSeeds {
                cost,
                available: self.economy.seeds,
            });
        }
        self.economy.spend(cost);
        let entity = world_setup::spawn_player_unit(
            &mut self.world,
            archetype,
            self.progress.upgrades_for(archetype),
            &mut self.player_units,
            self.clock.now_ms(),
        );
        self.emit(GameEvent::UnitSpawned {
            archetype,
            side: Side::Player,
        });
        Ok(entity)
    }

    /// Spawn the level's next enemy. `None` once enemy spawning has stopped.
    pub fn spawn_enemy_unit(&mut self) -> Option<Entity> {
        if self.spawner.stopped {
            log::debug!("enemy spawn blocked: spawning has stopped");
            return None;
        }
        world_setup::spawn_enemy_unit(
            &mut self.world,
            &mut self.rng,
            &self.level,
            &mut self.enemy_units,
            self.clock.now_ms(),
        )
    }

    /// Buy one level of `stat` for the unit's archetype with secured seeds
    /// and apply it to the unit immediately. Future spawns inherit it.
    pub fn apply_upgrade(&mut self, unit: Entity, stat: StatKind) -> Result<(), UpgradeRefused> {
        let archetype = self
            .world
            .get::<&Unit>(unit)
            .map(|u| u.archetype)
            .map_err(|_| UpgradeRefused::UnknownUnit)?;
        if !lane::is_live_unit(&self.world, unit) {
            return Err(UpgradeRefused::UnitDying);
        }
        let entry = self.progress.purchase_unit_upgrade(archetype, stat)?;

        let Ok((stats, health)) = self
            .world
            .query_one_mut::<(&mut UnitStats, &mut Health)>(unit)
        else {
            return Err(UpgradeRefused::UnknownUnit);
        };
        apply_stat_upgrade(stats, health, stat, &entry);
        log::info!(
            "upgraded {} {stat:?} to level {}",
            archetype.name(),
            entry.level
        );
        self.emit(GameEvent::UpgradeApplied {
            archetype,
            upgrade: stat,
        });
        Ok(())
    }

    /// Build a snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase(),
            &self.level,
            &self.economy,
            self.spawner.stopped,
            self.player_units.iter().chain(&self.enemy_units).copied(),
            events,
        )
    }

    /// Draw every entity onto `surface`.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        let units = self.player_units.iter().chain(&self.enemy_units).copied();
        render::draw_world(&self.world, units, &mut self.assets, surface);
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> BattlePhase {
        match self.outcome {
            Some(outcome) => BattlePhase::Over(outcome),
            None if self.paused => BattlePhase::Paused,
            None => BattlePhase::Active,
        }
    }

    /// Progress record, including upgrades bought during the battle and any
    /// level unlocked by winning it.
    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn seeds(&self) -> f64 {
        self.economy.seeds
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player_units(&self) -> &[Entity] {
        &self.player_units
    }

    pub fn enemy_units(&self) -> &[Entity] {
        &self.enemy_units
    }

    pub fn projectiles(&self) -> &[Entity] {
        &self.projectiles
    }

    pub fn player_base(&self) -> Entity {
        self.player_base
    }

    pub fn enemy_base(&self) -> Entity {
        self.enemy_base
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tests that stage exact positions.
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Set the seed balance (for tests).
    #[cfg(test)]
    pub(crate) fn set_seeds(&mut self, seeds: f64) {
        self.economy.seeds = seeds;
    }

    /// Stop the enemy spawn timer (for tests that stage enemies by hand).
    #[cfg(test)]
    pub(crate) fn stop_enemy_spawns(&mut self) {
        self.spawner.stopped = true;
    }

    /// Place a unit at an exact x without paying for it (for tests).
    #[cfg(test)]
    pub(crate) fn place_unit(&mut self, archetype: Archetype, x: f64) -> Entity {
        let stats = effective_stats(archetype, None);
        let now = self.clock.now_ms();
        let unit = world_setup::spawn_unit_entity(&mut self.world, archetype, &stats, x, now);
        match archetype.faction().side() {
            Side::Player => self.player_units.push(unit),
            Side::Enemy => self.enemy_units.push(unit),
        }
        unit
    }

    /// Run the player-unit reap step on its own (for tests).
    #[cfg(test)]
    pub(crate) fn reap_player_units(&mut self) -> usize {
        systems::cleanup::reap_units(
            &mut self.world,
            &mut self.player_units,
            &mut self.despawn_buffer,
        )
        .len()
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event.clone());
        self.outbox.push(event);
    }

    fn flush_events(&mut self) {
        for event in self.outbox.drain(..) {
            let payload = event.payload();
            for sink in &mut self.sinks {
                sink.on_event(event.name(), &payload);
            }
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Refusals are logged and dropped.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SpawnUnit { archetype } => {
                if let Err(refused) = self.spawn_unit(archetype) {
                    log::debug!("spawn of {} refused: {refused}", archetype.name());
                }
            }
            PlayerCommand::ApplyUpgrade { unit_id, stat } => {
                let result = match Entity::from_bits(unit_id) {
                    Some(unit) => self.apply_upgrade(unit, stat),
                    None => Err(UpgradeRefused::UnknownUnit),
                };
                if let Err(refused) = result {
                    log::debug!("upgrade of unit {unit_id} refused: {refused}");
                }
            }
            PlayerCommand::Regroup => self.regroup(),
            PlayerCommand::Pause => {
                if self.outcome.is_none() {
                    self.paused = true;
                }
            }
            PlayerCommand::Resume => {
                self.paused = false;
            }
        }
    }

    /// Send every live player unit back to a formation slot, front unit
    /// first, one body width apart.
    fn regroup(&mut self) {
        let mut live: Vec<(Entity, f64)> = self
            .player_units
            .iter()
            .filter(|&&e| lane::is_live_unit(&self.world, e))
            .filter_map(|&e| Some((e, lane::x_of(&self.world, e)?)))
            .collect();
        live.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (i, (entity, _)) in live.into_iter().enumerate() {
            let slot_x = (REGROUP_FRONT_X - i as f64 * UNIT_WIDTH).max(REGROUP_MIN_X);
            if let Ok((retreat, anim, combat)) = self
                .world
                .query_one_mut::<(&mut Retreat, &mut Animation, &mut Combat)>(entity)
            {
                retreat.active = true;
                retreat.slot_x = slot_x;
                anim.state = CombatState::Run;
                combat.target = None;
                combat.is_attacking = false;
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, now: f64) {
        // 1. Passive income
        systems::economy::passive_income(&mut self.economy, self.battle.passive_income_per_tick);

        // 2. Spatial index
        let all_units = self.player_units.iter().chain(&self.enemy_units).copied();
        self.index.rebuild(&self.world, all_units);

        // 3. Player units, in list order
        for i in 0..self.player_units.len() {
            let unit = self.player_units[i];
            self.process_unit(unit, self.enemy_base, now);
        }

        // 4. Reap fallen player units
        let fallen = systems::cleanup::reap_units(
            &mut self.world,
            &mut self.player_units,
            &mut self.despawn_buffer,
        );
        for reaped in fallen {
            self.emit(GameEvent::UnitKilled {
                archetype: reaped.archetype,
                killer: Side::Enemy,
            });
        }

        // 5. Enemy units, in list order
        for i in 0..self.enemy_units.len() {
            let unit = self.enemy_units[i];
            self.process_unit(unit, self.player_base, now);
        }

        // 6. Reap fallen enemies and pay out rewards
        let fallen = systems::cleanup::reap_units(
            &mut self.world,
            &mut self.enemy_units,
            &mut self.despawn_buffer,
        );
        for reaped in fallen {
            if self.boss == BossFight::Active(reaped.entity) {
                log::info!("{} defeated", reaped.archetype.name());
                self.boss = BossFight::Defeated;
            }
            systems::economy::grant_kill_rewards(
                &mut self.world,
                &mut self.rng,
                &mut self.economy,
                &mut self.seed_drops,
                reaped.archetype,
                reaped.position,
                now,
            );
            self.emit(GameEvent::UnitKilled {
                archetype: reaped.archetype,
                killer: Side::Player,
            });
        }

        // 7. Seed drops and projectiles
        systems::economy::update_seed_drops(
            &mut self.world,
            &mut self.seed_drops,
            now,
            &mut self.despawn_buffer,
        );
        systems::projectiles::run(&mut self.world, &mut self.assets, &self.projectiles, now);
        systems::cleanup::reap_projectiles(
            &mut self.world,
            &mut self.projectiles,
            &mut self.despawn_buffer,
        );

        // 8. Enemy spawn timer
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawner,
            &self.level,
            &mut self.enemy_units,
            now,
        );

        // 9. Level-up flag and battle outcome
        systems::economy::update_level_up(&mut self.economy);
        self.check_outcome();
    }

    /// One unit's turn: regroup walk, or animation and attack delivery,
    /// then movement, the lane clamp and opportunistic targeting.
    fn process_unit(&mut self, unit: Entity, opposing_base: Entity, now: f64) {
        if systems::movement::regroup_step(&mut self.world, unit, now) {
            return;
        }

        if let Some(target) = systems::combat::animate(&mut self.world, unit, now) {
            let released =
                systems::combat::deliver(&mut self.world, &mut self.rng, unit, target, now);
            self.projectiles.extend(released);
        }

        if !lane::is_live_unit(&self.world, unit) {
            return;
        }

        systems::movement::move_unit(&mut self.world, &self.index, unit, opposing_base, now);
        systems::movement::clamp_to_lane(&mut self.world, unit);

        // Player units go for the boss once it has replaced the enemy base.
        let range_target = match self.boss {
            BossFight::Active(boss) if opposing_base == self.enemy_base => boss,
            _ => opposing_base,
        };
        if systems::targeting::in_attack_range(&mut self.world, unit, range_target, now) {
            systems::combat::attack(&mut self.world, unit, range_target, now);
        } else if let Some(target) =
            systems::targeting::find_nearest_target(&self.world, &self.index, unit, opposing_base)
        {
            systems::combat::attack(&mut self.world, unit, target, now);
        }
    }

    fn base_health(&self, base: Entity) -> f64 {
        self.world
            .get::<&Health>(base)
            .map(|h| h.current)
            .unwrap_or(0.0)
    }

    fn check_outcome(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        if self.base_health(self.player_base) <= 0.0 {
            self.finish(Outcome::Defeat);
        } else if self.base_health(self.enemy_base) <= 0.0 {
            match (self.boss, self.level.boss()) {
                (BossFight::Pending, Some(boss)) => self.start_boss_fight(boss),
                (BossFight::Active(_), _) => {}
                _ => {
                    systems::cleanup::despawn_all(&mut self.world, &mut self.enemy_units);
                    self.spawner.stopped = true;
                    self.progress.record_victory(self.level.number);
                    self.finish(Outcome::Victory);
                }
            }
        }
    }

    /// Clear the field of enemies, stop the spawn timer and put the boss
    /// where the enemy base stood. Victory waits for the boss to be reaped.
    fn start_boss_fight(&mut self, archetype: Archetype) {
        systems::cleanup::despawn_all(&mut self.world, &mut self.enemy_units);
        self.spawner.stopped = true;
        let stats = effective_stats(archetype, None);
        let boss = world_setup::spawn_unit_entity(
            &mut self.world,
            archetype,
            &stats,
            ENEMY_BASE_X,
            self.clock.now_ms(),
        );
        self.enemy_units.push(boss);
        self.boss = BossFight::Active(boss);
        log::info!(
            "enemy base destroyed; {} takes the field at x={ENEMY_BASE_X}",
            archetype.name()
        );
    }

    fn finish(&mut self, outcome: Outcome) {
        log::info!(
            "battle over at tick {}: {outcome:?} (seeds {:.1}, xp {})",
            self.time.tick,
            self.economy.seeds,
            self.economy.xp
        );
        self.outcome = Some(outcome);
        self.emit(GameEvent::BattleEnded { outcome });
    }
}
