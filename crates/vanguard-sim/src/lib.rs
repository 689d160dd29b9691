//! Simulation engine for Neon Vanguard.
//!
//! Owns the entity pools, runs systems once per frame in a fixed order,
//! and produces FrameSnapshots for the renderer.

pub mod context;
pub mod engine;
pub mod pool;
pub mod store;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use context::{FrameInputs, GameContext};
pub use engine::{SimConfig, SimulationEngine};
pub use pool::EntityPool;
pub use store::{JsonFileStateStore, MemoryStateStore, StateStore, StoreError};
pub use vanguard_core as core;
