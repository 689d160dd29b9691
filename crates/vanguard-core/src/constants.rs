//! Simulation constants and default tuning values.
//!
//! Gameplay numbers were authored against a 60 fps frame. Rates below are
//! expressed per second; `FRAME_RATE` converts per-frame values.

/// Host tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Reference frame rate the per-frame gameplay values were tuned for.
pub const FRAME_RATE: f32 = 60.0;

// --- Play field ---

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 900.0;

/// Distance from the bottom edge where the player spawns.
pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;

// --- Pools ---

pub const PROJECTILE_CAPACITY: usize = 300;
pub const PARTICLE_CAPACITY: usize = 250;
pub const HOSTILE_CAPACITY: usize = 64;
pub const PICKUP_CAPACITY: usize = 16;

// --- Player ---

pub const PLAYER_SIZE: f32 = 40.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_START_LIVES: u32 = 3;
pub const PLAYER_MAX_LIVES: u32 = 3;

/// Per-frame fraction of the remaining distance to the pointer covered by the ship.
pub const PLAYER_FOLLOW: f32 = 0.15;

/// Bank angle in radians per pixel the ship trails its target.
pub const PLAYER_BANK: f32 = 0.05;

/// Radius within which a hostile projectile hits the player.
pub const PLAYER_HIT_RADIUS: f32 = 20.0;

/// Invulnerability window after taking damage (seconds).
pub const IFRAME_SECS: f64 = 1.0;

// --- Weapons ---

pub const FIRE_INTERVAL_SECS: f64 = 0.16;
pub const RAPID_FIRE_DIVISOR: f64 = 2.5;
pub const RAPID_FIRE_SECS: f64 = 10.0;
pub const MAX_WEAPON_LEVEL: u8 = 3;

pub const FRIENDLY_PROJECTILE_WIDTH: f32 = 5.0;
pub const FRIENDLY_PROJECTILE_HEIGHT: f32 = 25.0;
pub const FRIENDLY_PROJECTILE_DAMAGE: i32 = 1;

pub const HOSTILE_PROJECTILE_WIDTH: f32 = 4.0;
pub const HOSTILE_PROJECTILE_HEIGHT: f32 = 20.0;

/// Damage dealt by a hostile projectile.
pub const PROJECTILE_DAMAGE: i32 = 10;

/// Damage dealt by ramming a hostile.
pub const CONTACT_DAMAGE: i32 = 20;

/// Projectiles beyond the field by this margin are culled.
pub const PROJECTILE_MARGIN: f32 = 50.0;

/// Hostiles beyond the field by this margin are culled.
pub const HOSTILE_MARGIN: f32 = 100.0;

// --- Waves ---

/// Score needed per wave; a boss kill awards exactly this much.
pub const WAVE_SCORE_STEP: u32 = 2000;

/// Every Nth wave is a boss wave.
pub const BOSS_PERIOD: u32 = 5;

pub const BASE_SPAWN_INTERVAL_SECS: f64 = 2.0;
pub const MIN_SPAWN_INTERVAL_SECS: f64 = 0.25;

/// Difficulty increase per wave (20%).
pub const DIFFICULTY_STEP: f32 = 0.2;

pub const BASE_HOSTILE_CAP: u32 = 2;
pub const HOSTILE_CAP_PER_WAVE: f32 = 1.5;

/// Base hostile speed (px/frame) and its per-wave growth and ceiling.
pub const HOSTILE_BASE_SPEED: f32 = 3.0;
pub const HOSTILE_SPEED_PER_WAVE: f32 = 0.3;
pub const HOSTILE_SPEED_BONUS_CAP: f32 = 5.0;

/// Hostiles spawn this far from the side edges.
pub const SPAWN_EDGE_INSET: f32 = 30.0;
pub const SPAWN_Y: f32 = -50.0;

/// Hostile fire chance per frame: base + per-wave.
pub const HOSTILE_FIRE_CHANCE: f32 = 0.002;
pub const HOSTILE_FIRE_CHANCE_PER_WAVE: f32 = 0.001;

/// Hostile bullet speed (px/frame): base + per-wave.
pub const HOSTILE_BULLET_SPEED: f32 = 8.0;
pub const HOSTILE_BULLET_SPEED_PER_WAVE: f32 = 0.8;

/// Interceptor lateral homing per frame.
pub const INTERCEPTOR_HOMING: f32 = 0.02;

pub const ASTEROID_WAVE_PERIOD: u32 = 3;
pub const ASTEROID_CHANCE: f64 = 0.25;
pub const ASTEROID_SPIN: f32 = 0.05;

// --- Capital ship ---

pub const CAPITAL_ANCHOR_Y: f32 = 150.0;
pub const CAPITAL_DESCENT_SPEED: f32 = 0.5;
pub const CAPITAL_SWAY: f32 = 50.0;
pub const CAPITAL_SWAY_RATE: f64 = 0.5;
pub const CAPITAL_FIRE_CHANCE: f32 = 0.08;
pub const CAPITAL_CANNON_OFFSET_X: f32 = 75.0;
pub const CAPITAL_CANNON_OFFSET_Y: f32 = 100.0;
pub const TORPEDO_CAPITAL_DAMAGE: i32 = 200;

// --- Pickups ---

pub const DROP_CHANCE: f64 = 0.25;
pub const PICKUP_SIZE: f32 = 30.0;
pub const PICKUP_DRIFT: f32 = 1.2;

// --- Effects ---

pub const STAR_COUNT: usize = 150;
pub const RAPID_FIRE_STAR_BOOST: f32 = 5.0;
pub const PARTICLE_FADE: f32 = 0.02;
pub const PARTICLE_MAX_SPEED: f32 = 4.0;
pub const SHAKE_DECAY: f32 = 0.9;
pub const SHAKE_FLOOR: f32 = 0.5;
pub const SHAKE_PROJECTILE_HIT: f32 = 10.0;
pub const SHAKE_CONTACT: f32 = 20.0;
pub const SHAKE_TORPEDO: f32 = 40.0;
