//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen; nothing simulates.
    #[default]
    Menu,
    /// Mission text for the upcoming wave is displayed.
    Briefing,
    /// Combat running.
    Playing,
    /// Combat frozen; cosmetics only.
    Paused,
    /// All lives lost.
    GameOver,
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    Friendly,
    Hostile,
}

/// Effect granted by collecting a pickup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupEffect {
    /// Extra life (capped) and full health.
    ShieldLife,
    /// Weapon level +1, capped at 3.
    #[default]
    WeaponUp,
    /// Area clear: destroys every non-capital hostile.
    Torpedo,
    /// Temporary fire-rate buff.
    RapidFire,
}

/// How a hostile kind fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirePattern {
    /// Never fires.
    #[default]
    Holds,
    /// One aimed-down shot.
    Single,
    /// Three-shot fan.
    Spread,
    /// Two broadside cannons (capital ship).
    TwinCannon,
}

/// Cosmetic particle palette, chosen by what produced the burst.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleTint {
    #[default]
    Spark,
    Explosion,
    PlayerHit,
    Collect,
    Torpedo,
}
