//! Everything a tick reads or writes outside the engine's own pools.
//!
//! The host owns a `GameContext` and passes it into every `tick`. Run state,
//! tuning, the mission table and the high-score store are reachable only
//! through this parameter.

use glam::Vec2;
use log::warn;

use vanguard_core::missions::{default_missions, Mission};
use vanguard_core::run_state::RunState;
use vanguard_core::tuning::Tuning;

use crate::store::{MemoryStateStore, StateStore};

pub struct GameContext {
    pub run: RunState,
    pub tuning: Tuning,
    pub missions: Vec<Mission>,
    pub store: Box<dyn StateStore>,
}

impl GameContext {
    /// Context with the built-in mission table, seeded from `store`'s high score.
    pub fn new(tuning: Tuning, store: Box<dyn StateStore>) -> Self {
        let mut run = RunState::new(&tuning);
        match store.load_high_score() {
            Ok(high_score) => run.restore_high_score(high_score),
            Err(e) => warn!("Could not load high score, starting from 0: {e}"),
        }
        Self {
            run,
            tuning,
            missions: default_missions(),
            store,
        }
    }

    /// In-memory store, default missions.
    pub fn in_memory(tuning: Tuning) -> Self {
        Self::new(tuning, Box::new(MemoryStateStore::default()))
    }

    pub fn with_missions(mut self, missions: Vec<Mission>) -> Self {
        self.missions = missions;
        self
    }

    /// Close the run and persist a new high score if one was set.
    pub(crate) fn finish_run(&mut self) {
        if let Some(high_score) = self.run.record_run_end() {
            if let Err(e) = self.store.save_high_score(high_score) {
                warn!("Failed to persist high score {high_score}: {e}");
            }
        }
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::in_memory(Tuning::default())
    }
}

/// Immutable per-tick inputs, captured once at the start of the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub wave: u32,
    pub score: u32,
    /// Frame delta in seconds.
    pub dt: f32,
    /// Pointer target, already clamped into the play field.
    pub pointer: Option<Vec2>,
    /// Sim time at the start of this tick.
    pub now: f64,
}

impl FrameInputs {
    /// Convert a per-frame blend factor into one for this tick's `dt`.
    pub fn blend(&self, per_frame: f32) -> f32 {
        1.0 - (1.0 - per_frame).powf(self.dt * vanguard_core::constants::FRAME_RATE)
    }

    /// Convert a per-frame probability into one for this tick's `dt`.
    pub fn chance(&self, per_frame: f32) -> f64 {
        f64::from(self.blend(per_frame.clamp(0.0, 1.0)))
    }
}
