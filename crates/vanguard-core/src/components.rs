//! Entity data and the per-kind stats table.
//!
//! Every simulated object (player, hostiles, projectiles, particles,
//! pickups) shares the `Entity` shape; behavior is selected by matching on
//! the closed `EntityKind` enum.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{FirePattern, Owner, ParticleTint, PickupEffect};

/// What an entity is. Variants carry only the data unique to that family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EntityKind {
    Player,
    HostileFighter,
    HostileInterceptor,
    HostileBomber,
    HostileElite,
    HostileCapital,
    Asteroid,
    Projectile { owner: Owner },
    Particle { life: f32, max_life: f32, tint: ParticleTint },
    Pickup { effect: PickupEffect },
}

/// Static stats for a hostile kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindStats {
    pub hp: i32,
    /// Extra hp per wave number (capital ship only).
    pub hp_per_wave: i32,
    /// Multiplier on the wave's base hostile speed.
    pub speed_multiplier: f32,
    /// Flat px/frame added after the multiplier.
    pub speed_bonus: f32,
    pub score_value: Option<u32>,
    pub fire: FirePattern,
    pub width: f32,
    pub height: f32,
}

const FIGHTER: KindStats = KindStats {
    hp: 2,
    hp_per_wave: 0,
    speed_multiplier: 1.0,
    speed_bonus: 0.0,
    score_value: Some(100),
    fire: FirePattern::Single,
    width: 35.0,
    height: 35.0,
};

const INTERCEPTOR: KindStats = KindStats {
    hp: 2,
    hp_per_wave: 0,
    speed_multiplier: 1.4,
    speed_bonus: 0.0,
    score_value: Some(200),
    fire: FirePattern::Holds,
    width: 35.0,
    height: 35.0,
};

const BOMBER: KindStats = KindStats {
    hp: 3,
    hp_per_wave: 0,
    speed_multiplier: 0.6,
    speed_bonus: 0.0,
    score_value: Some(300),
    fire: FirePattern::Single,
    width: 45.0,
    height: 45.0,
};

const ELITE: KindStats = KindStats {
    hp: 3,
    hp_per_wave: 0,
    speed_multiplier: 1.2,
    speed_bonus: 0.0,
    score_value: Some(500),
    fire: FirePattern::Spread,
    width: 40.0,
    height: 40.0,
};

const CAPITAL: KindStats = KindStats {
    hp: 1000,
    hp_per_wave: 200,
    speed_multiplier: 0.0,
    speed_bonus: CAPITAL_DESCENT_SPEED,
    score_value: Some(WAVE_SCORE_STEP),
    fire: FirePattern::TwinCannon,
    width: 250.0,
    height: 400.0,
};

const ASTEROID: KindStats = KindStats {
    hp: 999,
    hp_per_wave: 0,
    speed_multiplier: 1.0,
    speed_bonus: 2.0,
    score_value: None,
    fire: FirePattern::Holds,
    width: 50.0,
    height: 50.0,
};

impl EntityKind {
    /// Stats for hostile kinds; `None` for everything else.
    pub fn stats(&self) -> Option<&'static KindStats> {
        match self {
            EntityKind::HostileFighter => Some(&FIGHTER),
            EntityKind::HostileInterceptor => Some(&INTERCEPTOR),
            EntityKind::HostileBomber => Some(&BOMBER),
            EntityKind::HostileElite => Some(&ELITE),
            EntityKind::HostileCapital => Some(&CAPITAL),
            EntityKind::Asteroid => Some(&ASTEROID),
            _ => None,
        }
    }

    pub fn is_hostile(&self) -> bool {
        self.stats().is_some()
    }

    pub fn is_capital(&self) -> bool {
        matches!(self, EntityKind::HostileCapital)
    }
}

/// One simulated object. Pool slots hold inactive `Entity` values between uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub active: bool,
    pub kind: EntityKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    /// Angular velocity (rad/s).
    pub spin: f32,
    pub hp: i32,
    pub max_hp: i32,
    /// Sim time (seconds) until which damage is suppressed.
    pub invulnerable_until: f64,
    pub score_value: Option<u32>,
    /// Damage dealt on hit (projectiles).
    pub damage: i32,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            active: false,
            kind: EntityKind::Particle {
                life: 0.0,
                max_life: 0.0,
                tint: ParticleTint::default(),
            },
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: Vec2::ZERO,
            rotation: 0.0,
            spin: 0.0,
            hp: 0,
            max_hp: 0,
            invulnerable_until: 0.0,
            score_value: None,
            damage: 0,
        }
    }
}

impl Entity {
    /// Build a hostile of `kind` for wave `wave`, positioned at `position`.
    /// Returns `None` for non-hostile kinds.
    pub fn hostile(kind: EntityKind, wave: u32, position: Vec2) -> Option<Self> {
        let stats = kind.stats()?;
        let hp = stats.hp + stats.hp_per_wave * wave as i32;
        Some(Self {
            active: true,
            kind,
            position,
            size: Vec2::new(stats.width, stats.height),
            hp,
            max_hp: hp,
            score_value: stats.score_value,
            ..Self::default()
        })
    }

    /// Extend the invulnerability window. Never moves it backward.
    pub fn extend_invulnerability(&mut self, until: f64) {
        self.invulnerable_until = self.invulnerable_until.max(until);
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        now < self.invulnerable_until
    }

    /// Apply `amount` hp damage, clamping at zero.
    pub fn take_hit(&mut self, amount: i32) {
        self.hp = self.hp.saturating_sub(amount).max(0);
    }

    pub fn distance_to(&self, other: &Entity) -> f32 {
        self.position.distance(other.position)
    }

    /// Axis-aligned overlap of `point` against this entity's box.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let d = (point - self.position).abs();
        d.x < self.size.x / 2.0 && d.y < self.size.y / 2.0
    }
}
