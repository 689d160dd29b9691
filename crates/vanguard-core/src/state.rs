//! Frame snapshot: the complete view the renderer receives each tick.
//!
//! Built fresh every tick from the engine's pools and run state. Immutable
//! once produced; the renderer never reaches back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::{Entity, EntityKind};
use crate::enums::GamePhase;
use crate::events::AudioCue;
use crate::missions::Mission;
use crate::types::{SimTime, Star};

/// Complete frame snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub hostiles: Vec<EntityView>,
    pub projectiles: Vec<EntityView>,
    pub particles: Vec<EntityView>,
    pub pickups: Vec<EntityView>,
    pub stars: Vec<Star>,
    pub screen_shake: f32,
    pub hud: HudView,
    /// Present while the phase is `Briefing`.
    pub briefing: Option<Mission>,
    pub audio_events: Vec<AudioCue>,
}

/// Player ship as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub size: Vec2,
    /// Bank angle in radians; negative while sliding right.
    pub rotation: f32,
    /// Blink while the invulnerability window is open.
    pub invulnerable: bool,
}

/// A pooled entity as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub slot: usize,
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub hp: i32,
    pub max_hp: i32,
}

impl EntityView {
    pub fn from_entity(slot: usize, entity: &Entity) -> Self {
        Self {
            slot,
            kind: entity.kind,
            position: entity.position,
            size: entity.size,
            rotation: entity.rotation,
            hp: entity.hp,
            max_hp: entity.max_hp,
        }
    }
}

/// Heads-up display values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    pub high_score: u32,
    pub wave: u32,
    pub lives: u32,
    pub health: i32,
    pub max_health: i32,
    pub weapon_level: u8,
    /// Seconds left on the rapid-fire buff (0 when inactive).
    pub rapid_fire_remaining: f64,
    pub boss_active: bool,
    /// Capital ship hp as a fraction of max, when one is alive.
    pub boss_health: Option<f32>,
}
