//! Kinematics system: integrates hostiles, projectiles and pickups, runs
//! hostile fire, and culls anything that left the field.

use glam::Vec2;
use log::trace;
use rand::Rng;

use vanguard_core::components::{Entity, EntityKind};
use vanguard_core::constants::*;
use vanguard_core::enums::{FirePattern, Owner};
use vanguard_core::events::AudioCue;
use vanguard_core::tuning::Tuning;

use crate::context::FrameInputs;
use crate::pool::EntityPool;
use crate::world::World;

/// Hostile fire chance per frame at `wave`.
pub fn hostile_fire_chance(kind: EntityKind, wave: u32) -> f32 {
    if kind.is_capital() {
        CAPITAL_FIRE_CHANCE
    } else {
        HOSTILE_FIRE_CHANCE + HOSTILE_FIRE_CHANCE_PER_WAVE * wave as f32
    }
}

/// Hostile bullet speed in px/frame at `wave`.
pub fn hostile_bullet_speed(wave: u32) -> f32 {
    HOSTILE_BULLET_SPEED + HOSTILE_BULLET_SPEED_PER_WAVE * wave as f32
}

/// True while a projectile is inside the field plus margin.
pub fn projectile_in_bounds(position: Vec2, tuning: &Tuning) -> bool {
    position.y >= -PROJECTILE_MARGIN
        && position.y <= tuning.field_height + PROJECTILE_MARGIN
        && position.x >= -PROJECTILE_MARGIN
        && position.x <= tuning.field_width + PROJECTILE_MARGIN
}

fn hostile_in_bounds(hostile: &Entity, tuning: &Tuning) -> bool {
    hostile.position.y <= tuning.field_height + HOSTILE_MARGIN
        && hostile.position.x >= -HOSTILE_MARGIN
        && hostile.position.x <= tuning.field_width + HOSTILE_MARGIN
}

pub fn run(
    world: &mut World,
    inputs: &FrameInputs,
    tuning: &Tuning,
    rng: &mut impl Rng,
    audio_events: &mut Vec<AudioCue>,
) {
    let World {
        player,
        hostiles,
        projectiles,
        pickups,
        ..
    } = world;
    let dt = inputs.dt;

    // Hostiles move, then may fire from their new position.
    hostiles.for_each_active_mut(|_, hostile| {
        move_hostile(hostile, player.position, inputs, tuning);
        let on_screen = hostile.position.y > 0.0 && hostile.position.y < tuning.field_height;
        if on_screen {
            try_fire(hostile, projectiles, inputs, rng, audio_events);
        }
    });
    hostiles.retain(|h| hostile_in_bounds(h, tuning));

    projectiles.for_each_active_mut(|_, p| {
        p.position += p.velocity * dt;
    });
    projectiles.retain(|p| projectile_in_bounds(p.position, tuning));

    pickups.for_each_active_mut(|_, p| {
        p.position += p.velocity * dt;
    });
    pickups.retain(|p| p.position.y <= tuning.field_height + p.size.y);
}

fn move_hostile(hostile: &mut Entity, player_position: Vec2, inputs: &FrameInputs, tuning: &Tuning) {
    let dt = inputs.dt;
    match hostile.kind {
        EntityKind::HostileCapital => {
            if hostile.position.y < CAPITAL_ANCHOR_Y {
                hostile.position.y = (hostile.position.y + hostile.velocity.y * dt).min(CAPITAL_ANCHOR_Y);
            }
            let sway = (inputs.now * CAPITAL_SWAY_RATE).sin() as f32 * CAPITAL_SWAY;
            hostile.position.x = tuning.field_width / 2.0 + sway;
        }
        EntityKind::HostileInterceptor => {
            hostile.position.y += hostile.velocity.y * dt;
            hostile.position.x += (player_position.x - hostile.position.x) * inputs.blend(INTERCEPTOR_HOMING);
        }
        _ => {
            hostile.position += hostile.velocity * dt;
        }
    }
    hostile.rotation += hostile.spin * dt;
}

fn try_fire(
    hostile: &Entity,
    projectiles: &mut EntityPool<Entity>,
    inputs: &FrameInputs,
    rng: &mut impl Rng,
    audio_events: &mut Vec<AudioCue>,
) {
    let Some(stats) = hostile.kind.stats() else {
        return;
    };
    if stats.fire == FirePattern::Holds {
        return;
    }
    if rng.gen::<f64>() >= inputs.chance(hostile_fire_chance(hostile.kind, inputs.wave)) {
        return;
    }

    let s = hostile_bullet_speed(inputs.wave);
    let muzzle = hostile.position + Vec2::new(0.0, hostile.size.y / 2.0);
    let mut fired = false;
    match stats.fire {
        FirePattern::Holds => {}
        FirePattern::Single => {
            fired |= fire_shot(projectiles, muzzle, Vec2::new(0.0, s));
        }
        FirePattern::Spread => {
            fired |= fire_shot(projectiles, muzzle, Vec2::new(0.0, s + 2.0));
            fired |= fire_shot(projectiles, muzzle, Vec2::new(-3.0, s));
            fired |= fire_shot(projectiles, muzzle, Vec2::new(3.0, s));
        }
        FirePattern::TwinCannon => {
            for side in [-1.0, 1.0] {
                let origin = hostile.position
                    + Vec2::new(side * CAPITAL_CANNON_OFFSET_X, CAPITAL_CANNON_OFFSET_Y);
                fired |= fire_shot(projectiles, origin, Vec2::new(side * 2.5, 9.0));
            }
        }
    }
    if fired {
        audio_events.push(AudioCue::HostileFired);
    }
}

/// Spawn one hostile projectile; `velocity` in px/frame.
fn fire_shot(projectiles: &mut EntityPool<Entity>, origin: Vec2, velocity: Vec2) -> bool {
    let Some(shot) = projectiles.acquire() else {
        trace!("Projectile pool saturated, dropping hostile shot");
        return false;
    };
    shot.kind = EntityKind::Projectile {
        owner: Owner::Hostile,
    };
    shot.position = origin;
    shot.velocity = velocity * FRAME_RATE;
    shot.size = Vec2::new(HOSTILE_PROJECTILE_WIDTH, HOSTILE_PROJECTILE_HEIGHT);
    shot.hp = 1;
    shot.max_hp = 1;
    true
}
