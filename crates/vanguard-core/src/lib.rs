//! Core types and definitions for the Neon Vanguard combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity kinds, commands, run state, snapshots, events, tuning and constants.
//! It has no dependency on any host, renderer or audio backend.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod missions;
pub mod run_state;
pub mod state;
pub mod tuning;
pub mod types;
