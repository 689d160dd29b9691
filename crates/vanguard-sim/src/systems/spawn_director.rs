//! Spawn director: decides what hostiles and pickups appear, and when.
//!
//! Cadence and mix are pure functions of the wave number; the director itself
//! only tracks the per-wave timer and the boss flags.

use glam::Vec2;
use log::{debug, info, trace};
use rand::Rng;

use vanguard_core::components::{Entity, EntityKind};
use vanguard_core::constants::*;
use vanguard_core::enums::PickupEffect;
use vanguard_core::tuning::Tuning;

use crate::context::FrameInputs;
use crate::pool::EntityPool;
use crate::world::World;

/// Outcome of asking for a capital ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossRequest {
    Spawned { slot: usize },
    /// One is already alive; requests never stack.
    AlreadyActive,
    PoolSaturated,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnDirector {
    /// Seconds since the last spawn this wave.
    wave_timer: f64,
    boss_active: bool,
    /// The current wave's boss has been destroyed.
    boss_defeated: bool,
}

/// `1 + step * (w - 1)`: 20% harder per wave by default.
pub fn difficulty(wave: u32, tuning: &Tuning) -> f32 {
    1.0 + tuning.difficulty_step * wave.saturating_sub(1) as f32
}

pub fn spawn_interval(wave: u32, tuning: &Tuning) -> f64 {
    let interval = tuning.base_spawn_interval_secs / f64::from(difficulty(wave, tuning));
    interval.max(tuning.min_spawn_interval_secs)
}

/// Concurrent hostile cap for `wave`.
pub fn max_live(wave: u32, tuning: &Tuning) -> u32 {
    tuning.base_hostile_cap + (wave as f32 * tuning.hostile_cap_per_wave).floor() as u32
}

pub fn is_boss_wave(wave: u32, tuning: &Tuning) -> bool {
    wave > 0 && wave % tuning.boss_period == 0
}

fn is_asteroid_wave(wave: u32) -> bool {
    wave >= ASTEROID_WAVE_PERIOD && wave % ASTEROID_WAVE_PERIOD == 0
}

/// Base hostile speed in px/frame.
pub fn base_speed(wave: u32) -> f32 {
    let bonus = HOSTILE_SPEED_PER_WAVE * wave.saturating_sub(1) as f32;
    HOSTILE_BASE_SPEED + bonus.min(HOSTILE_SPEED_BONUS_CAP)
}

/// Eligible kinds and their roll weights for `wave`.
///
/// Each tier unlocks at a wave and gains weight every wave after; fighters
/// lose weight down to a floor.
pub fn kind_weights(wave: u32) -> Vec<(EntityKind, u32)> {
    // (kind, unlock wave, base weight, weight gained per wave past unlock)
    const TIERS: [(EntityKind, u32, u32, u32); 3] = [
        (EntityKind::HostileInterceptor, 2, 20, 2),
        (EntityKind::HostileBomber, 4, 12, 2),
        (EntityKind::HostileElite, 5, 10, 3),
    ];

    let fighter = 65u32.saturating_sub(wave.saturating_sub(1).saturating_mul(2)).max(20);
    let mut weights = vec![(EntityKind::HostileFighter, fighter)];
    for (kind, unlock, base, per_wave) in TIERS {
        if wave >= unlock {
            weights.push((kind, base + per_wave * (wave - unlock)));
        }
    }
    weights
}

/// Pick the next hostile kind for `wave`.
pub fn choose_kind(wave: u32, rng: &mut impl Rng) -> EntityKind {
    if is_asteroid_wave(wave) && rng.gen::<f64>() < ASTEROID_CHANCE {
        return EntityKind::Asteroid;
    }
    let weights = kind_weights(wave);
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (kind, weight) in &weights {
        if roll < *weight {
            return *kind;
        }
        roll -= weight;
    }
    EntityKind::HostileFighter
}

/// Roll the drop chance, then the effect. `None` means no drop.
pub fn roll_drop(rng: &mut impl Rng, tuning: &Tuning) -> Option<PickupEffect> {
    if rng.gen::<f64>() >= tuning.drop_chance {
        return None;
    }
    let r = rng.gen::<f64>();
    Some(if r > 0.88 {
        PickupEffect::Torpedo
    } else if r > 0.70 {
        PickupEffect::RapidFire
    } else if r > 0.45 {
        PickupEffect::ShieldLife
    } else {
        PickupEffect::WeaponUp
    })
}

/// Drop a pickup at `position`. Returns false if the pool is full.
pub fn spawn_pickup(pickups: &mut EntityPool<Entity>, position: Vec2, effect: PickupEffect) -> bool {
    let Some(pickup) = pickups.acquire() else {
        trace!("Pickup pool saturated, dropping {effect:?}");
        return false;
    };
    pickup.kind = EntityKind::Pickup { effect };
    pickup.position = position;
    pickup.velocity = Vec2::new(0.0, PICKUP_DRIFT * FRAME_RATE);
    pickup.size = Vec2::splat(PICKUP_SIZE);
    pickup.hp = 1;
    pickup.max_hp = 1;
    true
}

/// Place a regular hostile of `kind` at the top edge. Returns its slot.
pub fn spawn_hostile(
    hostiles: &mut EntityPool<Entity>,
    kind: EntityKind,
    wave: u32,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Option<usize> {
    let stats = kind.stats()?;
    let max_x = (tuning.field_width - SPAWN_EDGE_INSET).max(SPAWN_EDGE_INSET);
    let x = rng.gen_range(SPAWN_EDGE_INSET..=max_x);
    let mut hostile = Entity::hostile(kind, wave, Vec2::new(x, SPAWN_Y))?;

    let speed = base_speed(wave) * stats.speed_multiplier + stats.speed_bonus;
    let drift = if kind == EntityKind::Asteroid {
        hostile.spin = ASTEROID_SPIN * FRAME_RATE;
        rng.gen_range(-2.0..2.0)
    } else {
        (rng.gen::<f32>() - 0.5) * 1.5
    };
    hostile.velocity = Vec2::new(drift, speed) * FRAME_RATE;

    let Some((slot, entry)) = hostiles.acquire_slot() else {
        trace!("Hostile pool saturated, dropping {kind:?}");
        return None;
    };
    *entry = hostile;
    Some(slot)
}

impl SpawnDirector {
    pub fn boss_active(&self) -> bool {
        self.boss_active
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    pub fn wave_timer(&self) -> f64 {
        self.wave_timer
    }

    /// Start a fresh wave: timer and boss flags cleared.
    pub fn begin_wave(&mut self) {
        *self = Self::default();
    }

    pub fn mark_boss_destroyed(&mut self) {
        self.boss_active = false;
        self.boss_defeated = true;
    }

    /// The only path that creates a capital ship.
    pub fn request_boss(
        &mut self,
        hostiles: &mut EntityPool<Entity>,
        wave: u32,
        tuning: &Tuning,
    ) -> BossRequest {
        if self.boss_active {
            debug!("Boss request rejected: capital ship already active");
            return BossRequest::AlreadyActive;
        }
        let Some(mut boss) = Entity::hostile(
            EntityKind::HostileCapital,
            wave,
            Vec2::new(tuning.field_width / 2.0, 0.0),
        ) else {
            return BossRequest::PoolSaturated;
        };
        boss.position.y = -boss.size.y / 2.0;
        boss.velocity = Vec2::new(0.0, CAPITAL_DESCENT_SPEED * FRAME_RATE);
        boss.score_value = Some(tuning.wave_score_step);

        let Some((slot, entry)) = hostiles.acquire_slot() else {
            trace!("Hostile pool saturated, boss spawn deferred");
            return BossRequest::PoolSaturated;
        };
        *entry = boss;
        self.boss_active = true;
        info!("Capital ship inbound on wave {wave} ({} hp)", boss.hp);
        BossRequest::Spawned { slot }
    }

    /// Advance the wave timer and spawn at most one hostile.
    pub fn run(
        &mut self,
        world: &mut World,
        inputs: &FrameInputs,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) {
        let wave = inputs.wave;

        // Boss waves: no regular spawns, boss once the field is clear.
        if is_boss_wave(wave, tuning) {
            if !self.boss_active && !self.boss_defeated && world.live_hostiles() == 0 {
                self.request_boss(&mut world.hostiles, wave, tuning);
            }
            return;
        }

        self.wave_timer += f64::from(inputs.dt);
        if self.wave_timer < spawn_interval(wave, tuning) {
            return;
        }
        if world.live_hostiles() as u32 >= max_live(wave, tuning) {
            return;
        }

        let kind = choose_kind(wave, rng);
        if spawn_hostile(&mut world.hostiles, kind, wave, tuning, rng).is_some() {
            self.wave_timer = 0.0;
        }
    }
}
