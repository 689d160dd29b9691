//! Input system: steer the player toward the pointer.

use glam::Vec2;

use vanguard_core::components::Entity;
use vanguard_core::constants::{PLAYER_BANK, PLAYER_FOLLOW};
use vanguard_core::tuning::Tuning;

use crate::context::FrameInputs;

/// Clamp a raw pointer so the whole ship stays on the field.
pub fn clamp_pointer(pointer: Vec2, ship_size: Vec2, tuning: &Tuning) -> Vec2 {
    let half = ship_size / 2.0;
    let max = Vec2::new(tuning.field_width, tuning.field_height) - half;
    pointer.clamp(half, max.max(half))
}

/// Ease the player toward the pointer target, banking into the slide.
/// No pointer means hold position, level.
pub fn run(player: &mut Entity, inputs: &FrameInputs) {
    let Some(target) = inputs.pointer else {
        player.velocity = Vec2::ZERO;
        player.rotation = 0.0;
        return;
    };
    let before = player.position;
    player.position = before.lerp(target, inputs.blend(PLAYER_FOLLOW));
    player.rotation = (player.position.x - target.x) * PLAYER_BANK;
    if inputs.dt > 0.0 {
        player.velocity = (player.position - before) / inputs.dt;
    }
}
