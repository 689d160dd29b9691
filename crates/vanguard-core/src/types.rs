//! Fundamental simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation time tracking. Only advances while combat is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each simulated tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

/// What the host hands the engine every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Frame delta in seconds.
    pub dt: f32,
    /// Pointer / touch position in field coordinates, if any.
    pub pointer: Option<Vec2>,
}

impl TickInput {
    pub fn new(dt: f32, pointer: Option<Vec2>) -> Self {
        Self { dt, pointer }
    }
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            dt: crate::constants::DT,
            pointer: None,
        }
    }
}

/// Star in the scrolling background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub position: Vec2,
    /// Radius in px.
    pub size: f32,
    /// Scroll speed in px/s.
    pub speed: f32,
    pub opacity: f32,
}
