//! Collision system: broad-phase overlap tests and the damage they cause.
//!
//! Four passes, always in this order:
//! 1. friendly projectiles vs hostiles (one hit per hostile per tick),
//! 2. hostile projectiles vs the player,
//! 3. hostiles ramming the player,
//! 4. pickups touching the player.
//!
//! Hostiles are visited in slot order and, within a hostile, projectiles in
//! slot order. The first overlapping projectile is the one that hits.

use glam::Vec2;
use log::debug;
use rand::Rng;

use vanguard_core::components::{Entity, EntityKind};
use vanguard_core::constants::*;
use vanguard_core::enums::{Owner, ParticleTint, PickupEffect};
use vanguard_core::events::AudioCue;
use vanguard_core::run_state::{DamageOutcome, RunState};
use vanguard_core::tuning::Tuning;

use crate::context::FrameInputs;
use crate::systems::effects::{burst, Effects};
use crate::systems::weapon::WeaponState;
use crate::world::World;
use crate::world_setup::respawn_player;

/// What happened during one collision pass. The engine keeps the latest one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Friendly projectiles that struck a hostile.
    pub hostile_hits: u32,
    /// Damage events that reached the player.
    pub player_hits: u32,
    /// Damage events swallowed by the invulnerability window.
    pub absorbed_hits: u32,
    pub pickups_collected: u32,
}

/// Mutable state the collision passes may touch besides the world.
pub struct CollisionState<'a> {
    pub run: &'a mut RunState,
    pub weapon: &'a mut WeaponState,
    pub effects: &'a mut Effects,
    pub audio_events: &'a mut Vec<AudioCue>,
}

pub fn run(
    world: &mut World,
    state: &mut CollisionState<'_>,
    inputs: &FrameInputs,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    friendly_fire(world, &mut report, rng);
    hostile_fire(world, state, &mut report, inputs, tuning, rng);
    ramming(world, state, &mut report, inputs, tuning, rng);
    collect_pickups(world, state, &mut report, inputs, tuning, rng);

    report
}

fn is_owned_by(projectile: &Entity, owner: Owner) -> bool {
    matches!(projectile.kind, EntityKind::Projectile { owner: o } if o == owner)
}

/// Pass 1. Each hostile consumes at most one projectile per tick.
fn friendly_fire(world: &mut World, report: &mut CollisionReport, rng: &mut impl Rng) {
    let World {
        hostiles,
        projectiles,
        particles,
        ..
    } = world;

    for slot in 0..hostiles.capacity() {
        let Some(hostile) = hostiles.get_mut(slot) else {
            continue;
        };
        if hostile.hp <= 0 {
            continue;
        }
        let hit = projectiles
            .iter_active()
            .find(|(_, p)| is_owned_by(p, Owner::Friendly) && hostile.contains_point(p.position))
            .map(|(p_slot, p)| (p_slot, p.damage.max(1), p.position));

        if let Some((p_slot, damage, at)) = hit {
            hostile.take_hit(damage);
            projectiles.release(p_slot);
            burst(particles, at, ParticleTint::Spark, 3, 2.0, rng);
            report.hostile_hits += 1;
        }
    }
}

/// Pass 2. Projectiles are always consumed, damage only outside the iframe.
fn hostile_fire(
    world: &mut World,
    state: &mut CollisionState<'_>,
    report: &mut CollisionReport,
    inputs: &FrameInputs,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    for slot in 0..world.projectiles.capacity() {
        let Some(p) = world.projectiles.get(slot) else {
            continue;
        };
        if !is_owned_by(p, Owner::Hostile) || p.distance_to(&world.player) >= PLAYER_HIT_RADIUS {
            continue;
        }
        world.projectiles.release(slot);
        let outcome = damage_player(
            world,
            state,
            tuning.projectile_damage,
            SHAKE_PROJECTILE_HIT,
            inputs,
            tuning,
            rng,
        );
        tally(report, outcome);
    }
}

/// Pass 3. Ramming destroys the hostile unless it is a capital ship.
fn ramming(
    world: &mut World,
    state: &mut CollisionState<'_>,
    report: &mut CollisionReport,
    inputs: &FrameInputs,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    for slot in 0..world.hostiles.capacity() {
        let Some(hostile) = world.hostiles.get(slot) else {
            continue;
        };
        if hostile.hp <= 0 {
            continue;
        }
        let reach = if hostile.kind == EntityKind::Asteroid {
            hostile.size.x / 2.0
        } else {
            (hostile.size.x + world.player.size.x) / 2.0
        };
        if hostile.distance_to(&world.player) >= reach {
            continue;
        }

        let outcome = damage_player(
            world,
            state,
            tuning.contact_damage,
            SHAKE_CONTACT,
            inputs,
            tuning,
            rng,
        );
        tally(report, outcome);

        if let Some(hostile) = world.hostiles.get_mut(slot) {
            if !hostile.kind.is_capital() {
                hostile.hp = 0;
            }
        }
    }
}

/// Pass 4.
fn collect_pickups(
    world: &mut World,
    state: &mut CollisionState<'_>,
    report: &mut CollisionReport,
    inputs: &FrameInputs,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    for slot in 0..world.pickups.capacity() {
        let Some(pickup) = world.pickups.get(slot) else {
            continue;
        };
        let EntityKind::Pickup { effect } = pickup.kind else {
            continue;
        };
        let reach = (pickup.size.x + world.player.size.x) / 2.0;
        if pickup.distance_to(&world.player) >= reach {
            continue;
        }

        world.pickups.release(slot);
        apply_pickup(world, state, effect, inputs, tuning, rng);
        state
            .audio_events
            .push(AudioCue::PickupCollected { effect });
        report.pickups_collected += 1;
    }
}

fn tally(report: &mut CollisionReport, outcome: Option<DamageOutcome>) {
    match outcome {
        Some(_) => report.player_hits += 1,
        None => report.absorbed_hits += 1,
    }
}

/// Route damage into the run, honoring the player's invulnerability window.
/// Returns `None` when the hit was suppressed.
pub fn damage_player(
    world: &mut World,
    state: &mut CollisionState<'_>,
    amount: i32,
    shake: f32,
    inputs: &FrameInputs,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Option<DamageOutcome> {
    if world.player.is_invulnerable(inputs.now) || state.run.is_depleted() {
        return None;
    }

    let outcome = state.run.apply_damage(amount);
    world
        .player
        .extend_invulnerability(inputs.now + tuning.iframe_secs);
    state.effects.add_shake(shake);
    burst(
        &mut world.particles,
        world.player.position,
        ParticleTint::PlayerHit,
        10,
        2.0,
        rng,
    );

    match outcome {
        DamageOutcome::LifeLost => {
            debug!("Life lost, {} remaining", state.run.lives());
            burst(
                &mut world.particles,
                world.player.position,
                ParticleTint::Explosion,
                30,
                3.0,
                rng,
            );
            state.audio_events.push(AudioCue::Explosion {
                position: world.player.position,
            });
            respawn_player(&mut world.player, tuning);
        }
        DamageOutcome::Depleted => {
            state.audio_events.push(AudioCue::Explosion {
                position: world.player.position,
            });
        }
        DamageOutcome::Damaged | DamageOutcome::Absorbed => {}
    }
    Some(outcome)
}

/// Apply a collected pickup's effect.
pub fn apply_pickup(
    world: &mut World,
    state: &mut CollisionState<'_>,
    effect: PickupEffect,
    inputs: &FrameInputs,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    match effect {
        PickupEffect::ShieldLife => state.run.grant_life(),
        PickupEffect::WeaponUp => {
            if !state.weapon.upgrade() {
                debug!("Weapon already at max level");
            }
        }
        PickupEffect::RapidFire => state.weapon.grant_rapid_fire(inputs.now, tuning),
        PickupEffect::Torpedo => {
            detonate_torpedo(world, state, tuning, rng);
            return;
        }
    }
    burst(
        &mut world.particles,
        world.player.position,
        ParticleTint::Collect,
        10,
        2.0,
        rng,
    );
}

/// Area clear: every non-capital hostile destroyed, capital ship damaged.
fn detonate_torpedo(
    world: &mut World,
    state: &mut CollisionState<'_>,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    world.hostiles.for_each_active_mut(|_, hostile| {
        if hostile.kind.is_capital() {
            hostile.take_hit(tuning.torpedo_capital_damage);
        } else {
            hostile.hp = 0;
        }
    });
    state.effects.add_shake(SHAKE_TORPEDO);
    let center = Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0);
    burst(&mut world.particles, center, ParticleTint::Torpedo, 100, 15.0, rng);
    state.audio_events.push(AudioCue::Explosion { position: center });
}
