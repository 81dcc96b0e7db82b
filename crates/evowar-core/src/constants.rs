//! Simulation constants and tuning parameters.
//!
//! Distances are in screen pixels on a 1920-wide lane, times in milliseconds.

/// Nominal presentation rate (Hz). One simulation tick runs per frame.
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick at the nominal rate.
pub const FRAME_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- Lane ---

/// Width of the visible battlefield.
pub const LANE_WIDTH: f64 = 1920.0;

/// Leftmost x at which a unit still takes part in the battle.
pub const LANE_MIN_X: f64 = -192.0;

/// Rightmost x at which a unit still takes part in the battle.
pub const LANE_MAX_X: f64 = LANE_WIDTH;

/// Ground line; the bottom edge of units and buildings.
pub const GROUND_Y: f64 = 880.0;

// --- Spatial buckets ---

/// Width of one spatial bucket.
pub const BUCKET_WIDTH: f64 = 400.0;

/// Highest bucket id a unit can be filed under (`LANE_WIDTH / BUCKET_WIDTH`, floored).
pub const MAX_BUCKET: i64 = (LANE_WIDTH / BUCKET_WIDTH) as i64;

// --- Unit body ---

/// Collision width of a unit body.
pub const UNIT_WIDTH: f64 = 120.0;

/// Collision height of a unit body.
pub const UNIT_HEIGHT: f64 = 192.0;

/// Lane y of every regular unit (top edge of its body).
pub const UNIT_Y: f64 = GROUND_Y - UNIT_HEIGHT;

/// Horizontal offset of the probe rectangle used for movement collision.
pub const PROBE_OFFSET_X: f64 = 3.0;

/// Offset from a body's x to the point attack range is measured from.
pub const BODY_CENTER_OFFSET: f64 = 60.0;

/// Side length of one animation frame in a sprite sheet.
pub const SPRITE_FRAME_SIZE: u32 = 192;

// --- Animation / combat timing ---

/// Frames in every animation row.
pub const FRAMES_PER_STATE: u32 = 14;

/// Attack frame on which damage lands or a projectile is released.
pub const ATTACK_TRIGGER_FRAME: u32 = 7;

/// Frame delay for every state except "attack".
pub const BASE_FRAME_DELAY_MS: f64 = 100.0;

/// How long the "hurt" pose is held.
pub const HURT_DURATION_MS: f64 = 200.0;

/// Minimum interval between two positive attack-range checks.
pub const RANGE_CHECK_INTERVAL_MS: f64 = 200.0;

/// Floor for upgraded attack cooldowns.
pub const MIN_ATTACK_COOLDOWN_MS: f64 = 200.0;

// --- Buildings ---

/// Sprite width of a base or tower.
pub const BUILDING_WIDTH: f64 = 150.0;

/// Sprite height of a base or tower.
pub const BUILDING_HEIGHT: f64 = 300.0;

/// Inset of the building collision footprint from its sprite x.
pub const BUILDING_FOOTPRINT_INSET: f64 = 25.0;

/// Width of the building collision footprint.
pub const BUILDING_FOOTPRINT_WIDTH: f64 = 100.0;

/// Top edge of every building.
pub const BUILDING_Y: f64 = GROUND_Y - BUILDING_HEIGHT;

/// Sprite x of the player base.
pub const PLAYER_BASE_X: f64 = 125.0;

/// Sprite x of the enemy base.
pub const ENEMY_BASE_X: f64 = LANE_WIDTH - 250.0;

/// Base health before any HP upgrades.
pub const BASE_HEALTH: f64 = 1000.0;

// --- Spawning ---

/// Preferred spawn x for player units.
pub const PLAYER_SPAWN_X: f64 = 100.0;

/// Preferred spawn x for enemy units.
pub const ENEMY_SPAWN_X: f64 = LANE_WIDTH - 100.0;

/// Interval between automatic enemy spawns.
pub const ENEMY_SPAWN_INTERVAL_MS: f64 = 3000.0;

/// Player units never advance past this x.
pub const PLAYER_MAX_X: f64 = LANE_WIDTH - UNIT_WIDTH;

/// Enemy units never advance past this x.
pub const ENEMY_MIN_X: f64 = 120.0;

// --- Economy ---

/// Seeds available at the start of a battle.
pub const STARTING_SEEDS: f64 = 50.0;

/// Seeds granted per tick before passive-income upgrades.
pub const BASE_PASSIVE_INCOME: f64 = 0.1;

/// XP needed before a level-up becomes available.
pub const MAX_XP: u32 = 100;

/// Lifetime of a dropped seed.
pub const SEED_DROP_LIFETIME_MS: f64 = 5000.0;

/// Final stretch of a seed drop's lifetime during which it fades out.
pub const SEED_DROP_FADE_MS: f64 = 1000.0;

/// Resting y of dropped seeds.
pub const SEED_DROP_Y: f64 = 920.0 - 40.0;

/// Maximum horizontal scatter of a seed drop around the fallen unit.
pub const SEED_DROP_SCATTER: f64 = 20.0;

// --- Projectiles ---

/// Distance after which a projectile expires.
pub const PROJECTILE_MAX_DISTANCE: f64 = 1000.0;

/// Downward acceleration applied to arrows every tick.
pub const ARROW_GRAVITY: f64 = 0.2;

/// Arrow sprite size.
pub const ARROW_WIDTH: u32 = 32;
pub const ARROW_HEIGHT: u32 = 16;

/// Flight time bounds (ticks) for the arrow arc solver.
pub const ARROW_MIN_FLIGHT_TICKS: i64 = 20;
pub const ARROW_MAX_FLIGHT_TICKS: i64 = 60;

/// Random jitter (ticks) applied to the arrow flight time.
pub const ARROW_FLIGHT_JITTER: i64 = 5;

/// Straight-line speed of a magic ball (pixels per tick).
pub const MAGIC_BALL_SPEED: f64 = 5.0;

/// Magic ball sprite and collision size.
pub const MAGIC_BALL_SIZE: u32 = 32;

/// Projectile aim point relative to the target's top-left corner. Buildings
/// are aimed at the same way as units.
pub const UNIT_AIM_OFFSET_X: f64 = 60.0;
pub const UNIT_AIM_OFFSET_Y: f64 = 102.0;

// --- Regroup ---

/// Formation slot of the front-most player unit when regrouping.
pub const REGROUP_FRONT_X: f64 = 768.0;

/// No formation slot lies behind this x.
pub const REGROUP_MIN_X: f64 = 100.0;

/// Walking speed while regrouping; applied twice per tick.
pub const REGROUP_SPEED: f64 = 1.5;

// --- Display ---

/// Unit health bar size.
pub const UNIT_HEALTH_BAR_WIDTH: f64 = 114.0;
pub const UNIT_HEALTH_BAR_HEIGHT: f64 = 10.0;

/// Building health bar size.
pub const BUILDING_HEALTH_BAR_WIDTH: f64 = 144.0;
pub const BUILDING_HEALTH_BAR_HEIGHT: f64 = 12.0;

/// Seed drop sprite size.
pub const SEED_DROP_SIZE: u32 = 51;
