//! Neon Vanguard host shell.
//!
//! This crate wires the simulation to its collaborators: input, rendering
//! and audio adapters, a fixed-rate game loop thread, and the headless
//! driver used by the binary and tests.

pub mod adapters;
pub mod game_loop;
pub mod state;

pub use vanguard_core as core;
