//! Gameplay tuning, loadable from JSON.
//!
//! Every field has a default from `constants`, so a tuning file only needs
//! the values it overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub projectile_capacity: usize,
    pub particle_capacity: usize,
    pub hostile_capacity: usize,
    pub pickup_capacity: usize,

    pub max_health: i32,
    pub start_lives: u32,
    pub max_lives: u32,
    pub iframe_secs: f64,
    pub projectile_damage: i32,
    pub contact_damage: i32,

    pub fire_interval_secs: f64,
    pub rapid_fire_divisor: f64,
    pub rapid_fire_secs: f64,

    pub wave_score_step: u32,
    pub boss_period: u32,
    pub base_spawn_interval_secs: f64,
    pub min_spawn_interval_secs: f64,
    pub difficulty_step: f32,
    pub base_hostile_cap: u32,
    pub hostile_cap_per_wave: f32,

    pub drop_chance: f64,
    pub torpedo_capital_damage: i32,
    pub star_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            projectile_capacity: PROJECTILE_CAPACITY,
            particle_capacity: PARTICLE_CAPACITY,
            hostile_capacity: HOSTILE_CAPACITY,
            pickup_capacity: PICKUP_CAPACITY,
            max_health: PLAYER_MAX_HEALTH,
            start_lives: PLAYER_START_LIVES,
            max_lives: PLAYER_MAX_LIVES,
            iframe_secs: IFRAME_SECS,
            projectile_damage: PROJECTILE_DAMAGE,
            contact_damage: CONTACT_DAMAGE,
            fire_interval_secs: FIRE_INTERVAL_SECS,
            rapid_fire_divisor: RAPID_FIRE_DIVISOR,
            rapid_fire_secs: RAPID_FIRE_SECS,
            wave_score_step: WAVE_SCORE_STEP,
            boss_period: BOSS_PERIOD,
            base_spawn_interval_secs: BASE_SPAWN_INTERVAL_SECS,
            min_spawn_interval_secs: MIN_SPAWN_INTERVAL_SECS,
            difficulty_step: DIFFICULTY_STEP,
            base_hostile_cap: BASE_HOSTILE_CAP,
            hostile_cap_per_wave: HOSTILE_CAP_PER_WAVE,
            drop_chance: DROP_CHANCE,
            torpedo_capital_damage: TORPEDO_CAPITAL_DAMAGE,
            star_count: STAR_COUNT,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl Tuning {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(invalid("field_width", "play field must have positive size"));
        }
        for (field, capacity) in [
            ("projectile_capacity", self.projectile_capacity),
            ("particle_capacity", self.particle_capacity),
            ("hostile_capacity", self.hostile_capacity),
            ("pickup_capacity", self.pickup_capacity),
        ] {
            if capacity == 0 {
                return Err(invalid(field, "pool capacity must be at least 1"));
            }
        }
        if self.max_health <= 0 {
            return Err(invalid("max_health", "must be positive"));
        }
        if self.start_lives == 0 {
            return Err(invalid("start_lives", "must be at least 1"));
        }
        if self.max_lives < self.start_lives {
            return Err(invalid("max_lives", "must not be below start_lives"));
        }
        if self.fire_interval_secs <= 0.0 {
            return Err(invalid("fire_interval_secs", "must be positive"));
        }
        if self.rapid_fire_divisor <= 1.0 {
            return Err(invalid("rapid_fire_divisor", "must be greater than 1"));
        }
        if self.wave_score_step == 0 {
            return Err(invalid("wave_score_step", "must be positive"));
        }
        if self.boss_period == 0 {
            return Err(invalid("boss_period", "must be at least 1"));
        }
        if self.min_spawn_interval_secs <= 0.0
            || self.min_spawn_interval_secs > self.base_spawn_interval_secs
        {
            return Err(invalid(
                "min_spawn_interval_secs",
                format!(
                    "must be in (0, {}], got {}",
                    self.base_spawn_interval_secs, self.min_spawn_interval_secs
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.drop_chance) {
            return Err(invalid("drop_chance", "must be a probability in [0, 1]"));
        }
        Ok(())
    }
}
