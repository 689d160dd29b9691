//! World construction and reset helpers.

use glam::Vec2;
use rand::Rng;

use vanguard_core::components::{Entity, EntityKind};
use vanguard_core::constants::{FRAME_RATE, PLAYER_SIZE, PLAYER_SPAWN_OFFSET};
use vanguard_core::enums::Owner;
use vanguard_core::tuning::Tuning;
use vanguard_core::types::Star;

use crate::pool::EntityPool;
use crate::world::World;

/// Allocate every pool at its configured capacity and scatter the starfield.
pub fn build_world(tuning: &Tuning, rng: &mut impl Rng) -> World {
    World {
        player: spawn_player(tuning),
        hostiles: EntityPool::with_capacity(tuning.hostile_capacity),
        projectiles: EntityPool::with_capacity(tuning.projectile_capacity),
        particles: EntityPool::with_capacity(tuning.particle_capacity),
        pickups: EntityPool::with_capacity(tuning.pickup_capacity),
        stars: seed_starfield(tuning, rng),
    }
}

pub fn player_spawn_point(tuning: &Tuning) -> Vec2 {
    Vec2::new(
        tuning.field_width / 2.0,
        tuning.field_height - PLAYER_SPAWN_OFFSET,
    )
}

fn spawn_player(tuning: &Tuning) -> Entity {
    Entity {
        active: true,
        kind: EntityKind::Player,
        position: player_spawn_point(tuning),
        size: Vec2::splat(PLAYER_SIZE),
        hp: tuning.max_health,
        max_hp: tuning.max_health,
        ..Entity::default()
    }
}

/// Put the player back at the spawn point, keeping the invulnerability window.
pub fn respawn_player(player: &mut Entity, tuning: &Tuning) {
    player.position = player_spawn_point(tuning);
    player.velocity = Vec2::ZERO;
    player.rotation = 0.0;
}

/// Full reset for a new run.
pub fn reset_player(player: &mut Entity, tuning: &Tuning) {
    *player = spawn_player(tuning);
}

/// Remove everything combat-related, leaving stars and particles.
pub fn clear_combat(world: &mut World) {
    world.hostiles.clear();
    world.projectiles.clear();
    world.pickups.clear();
}

/// Clear the field for a briefing. The player's own shots stay in flight.
pub fn clear_for_briefing(world: &mut World) {
    world.hostiles.clear();
    world.pickups.clear();
    world.projectiles.retain(|p| {
        !matches!(
            p.kind,
            EntityKind::Projectile {
                owner: Owner::Hostile
            }
        )
    });
}

/// Larger stars scroll faster.
pub fn seed_starfield(tuning: &Tuning, rng: &mut impl Rng) -> Vec<Star> {
    (0..tuning.star_count)
        .map(|_| {
            let size = rng.gen::<f32>() * 2.0 + 0.5;
            Star {
                position: Vec2::new(
                    rng.gen::<f32>() * tuning.field_width,
                    rng.gen::<f32>() * tuning.field_height,
                ),
                size,
                speed: size * FRAME_RATE,
                opacity: rng.gen::<f32>() * 0.8 + 0.2,
            }
        })
        .collect()
}
