//! Events emitted by the simulation for audio feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::PickupEffect;

/// Fire-and-forget audio cues, drained into each snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AudioCue {
    /// Player volley left the guns.
    PlayerFired { weapon_level: u8 },
    /// A hostile opened fire.
    HostileFired,
    /// Something blew up.
    Explosion { position: Vec2 },
    /// A pickup was collected.
    PickupCollected { effect: PickupEffect },
}

impl AudioCue {
    /// Stable key an audio backend can map to a sample.
    pub fn key(&self) -> &'static str {
        match self {
            AudioCue::PlayerFired { .. } => "player_fired",
            AudioCue::HostileFired => "hostile_fired",
            AudioCue::Explosion { .. } => "explosion",
            AudioCue::PickupCollected { .. } => "pickup_collected",
        }
    }
}
