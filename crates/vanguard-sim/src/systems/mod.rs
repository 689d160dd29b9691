//! Systems that operate on the simulated world each tick.
//!
//! Systems are plain functions over the world and whatever state they need
//! passed in explicitly. The engine calls them in a fixed order.

pub mod cleanup;
pub mod collision;
pub mod effects;
pub mod input;
pub mod kinematics;
pub mod progression;
pub mod snapshot;
pub mod spawn_director;
pub mod weapon;
