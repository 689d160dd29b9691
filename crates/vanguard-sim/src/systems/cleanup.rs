//! Cleanup system: settles destroyed hostiles.
//!
//! Every hostile at zero hp is scored, may drop a pickup, and is released in
//! the same tick. Each destroyed slot is visited exactly once, so score and
//! drops are applied exactly once.

use log::info;
use rand::Rng;

use vanguard_core::enums::ParticleTint;
use vanguard_core::events::AudioCue;
use vanguard_core::run_state::RunState;
use vanguard_core::tuning::Tuning;

use crate::systems::effects::burst;
use crate::systems::spawn_director::{roll_drop, spawn_pickup, SpawnDirector};
use crate::world::World;

/// Returns the number of hostiles destroyed this tick.
pub fn run(
    world: &mut World,
    director: &mut SpawnDirector,
    run_state: &mut RunState,
    tuning: &Tuning,
    rng: &mut impl Rng,
    audio_events: &mut Vec<AudioCue>,
) -> u32 {
    let mut destroyed = 0;

    for slot in 0..world.hostiles.capacity() {
        let Some(hostile) = world.hostiles.get_mut(slot) else {
            continue;
        };
        if hostile.hp > 0 {
            continue;
        }
        hostile.hp = 0;
        let wreck = *hostile;
        world.hostiles.release(slot);
        destroyed += 1;

        if let Some(points) = wreck.score_value {
            run_state.increment_score(points);
        }
        audio_events.push(AudioCue::Explosion {
            position: wreck.position,
        });

        if wreck.kind.is_capital() {
            director.mark_boss_destroyed();
            info!("Capital ship destroyed on wave {}", run_state.wave());
            burst(
                &mut world.particles,
                wreck.position,
                ParticleTint::Explosion,
                60,
                6.0,
                rng,
            );
            continue;
        }

        burst(
            &mut world.particles,
            wreck.position,
            ParticleTint::Explosion,
            15,
            2.0,
            rng,
        );
        if let Some(effect) = roll_drop(rng, tuning) {
            spawn_pickup(&mut world.pickups, wreck.position, effect);
        }
    }

    destroyed
}
