//! Cosmetic effects: starfield scroll, particle fade and screen shake.
//!
//! Runs in every phase so the background stays alive on menus and pauses.

use std::f32::consts::TAU;

use glam::Vec2;
use log::trace;
use rand::Rng;

use vanguard_core::components::{Entity, EntityKind};
use vanguard_core::constants::*;
use vanguard_core::enums::ParticleTint;
use vanguard_core::tuning::Tuning;

use crate::pool::EntityPool;
use crate::world::World;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Effects {
    screen_shake: f32,
}

impl Effects {
    pub fn screen_shake(&self) -> f32 {
        self.screen_shake
    }

    /// Raise shake to at least `intensity`.
    pub fn add_shake(&mut self, intensity: f32) {
        self.screen_shake = self.screen_shake.max(intensity);
    }

    pub fn reset(&mut self) {
        self.screen_shake = 0.0;
    }
}

/// Spawn up to `count` particles radiating from `position`.
pub fn burst(
    particles: &mut EntityPool<Entity>,
    position: Vec2,
    tint: ParticleTint,
    count: usize,
    max_size: f32,
    rng: &mut impl Rng,
) {
    for _ in 0..count {
        let Some(p) = particles.acquire() else {
            trace!("Particle pool saturated, burst truncated");
            return;
        };
        let angle = rng.gen::<f32>() * TAU;
        let speed = rng.gen::<f32>() * PARTICLE_MAX_SPEED * FRAME_RATE;
        p.kind = EntityKind::Particle {
            life: 1.0,
            max_life: 1.0,
            tint,
        };
        p.position = position;
        p.velocity = Vec2::from_angle(angle) * speed;
        p.size = Vec2::splat(rng.gen::<f32>() * max_size + 1.0);
    }
}

pub fn run(
    world: &mut World,
    effects: &mut Effects,
    dt: f32,
    rapid_fire: bool,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    let boost = if rapid_fire { RAPID_FIRE_STAR_BOOST } else { 1.0 };
    for star in &mut world.stars {
        star.position.y += star.speed * boost * dt;
        if star.position.y > tuning.field_height {
            star.position.y = 0.0;
            star.position.x = rng.gen::<f32>() * tuning.field_width;
        }
    }

    let fade = PARTICLE_FADE * FRAME_RATE * dt;
    world.particles.for_each_active_mut(|_, p| {
        p.position += p.velocity * dt;
        if let EntityKind::Particle { life, .. } = &mut p.kind {
            *life -= fade;
        }
    });
    world
        .particles
        .retain(|p| matches!(p.kind, EntityKind::Particle { life, .. } if life > 0.0));

    effects.screen_shake *= SHAKE_DECAY.powf(dt * FRAME_RATE);
    if effects.screen_shake < SHAKE_FLOOR {
        effects.screen_shake = 0.0;
    }
}
