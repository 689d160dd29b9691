//! Weapon controller: player auto-fire cadence, volley patterns and buffs.

use glam::Vec2;
use log::trace;

use vanguard_core::components::{Entity, EntityKind};
use vanguard_core::constants::*;
use vanguard_core::enums::Owner;
use vanguard_core::events::AudioCue;
use vanguard_core::tuning::Tuning;

use crate::context::FrameInputs;
use crate::pool::EntityPool;

/// Player weapon state. Survives wave changes, reset on restart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponState {
    pub level: u8,
    /// Sim time of the last volley, `None` before the first.
    pub last_shot: Option<f64>,
    /// Rapid fire is active while sim time is below this.
    pub rapid_fire_until: f64,
}

impl Default for WeaponState {
    fn default() -> Self {
        Self {
            level: 1,
            last_shot: None,
            rapid_fire_until: 0.0,
        }
    }
}

impl WeaponState {
    pub fn rapid_fire_active(&self, now: f64) -> bool {
        now < self.rapid_fire_until
    }

    pub fn rapid_fire_remaining(&self, now: f64) -> f64 {
        (self.rapid_fire_until - now).max(0.0)
    }

    /// Seconds between volleys at `now`.
    pub fn effective_interval(&self, now: f64, tuning: &Tuning) -> f64 {
        if self.rapid_fire_active(now) {
            tuning.fire_interval_secs / tuning.rapid_fire_divisor
        } else {
            tuning.fire_interval_secs
        }
    }

    pub fn ready(&self, now: f64, tuning: &Tuning) -> bool {
        match self.last_shot {
            None => true,
            Some(last) => now - last >= self.effective_interval(now, tuning),
        }
    }

    /// Raise the weapon level. Returns false if already at max.
    pub fn upgrade(&mut self) -> bool {
        if self.level >= MAX_WEAPON_LEVEL {
            return false;
        }
        self.level += 1;
        true
    }

    pub fn grant_rapid_fire(&mut self, now: f64, tuning: &Tuning) {
        self.rapid_fire_until = self.rapid_fire_until.max(now + tuning.rapid_fire_secs);
    }
}

/// One barrel: offset from the ship center and muzzle velocity (px/frame).
#[derive(Debug, Clone, Copy)]
struct Barrel {
    offset: Vec2,
    velocity: Vec2,
}

const fn barrel(ox: f32, oy: f32, vx: f32, vy: f32) -> Barrel {
    Barrel {
        offset: Vec2::new(ox, oy),
        velocity: Vec2::new(vx, vy),
    }
}

/// Barrels unlocked at each level; a level fires its own pair plus all lower ones.
const BARRELS: [[Barrel; 2]; 3] = [
    [barrel(-20.0, -10.0, 0.0, -20.0), barrel(20.0, -10.0, 0.0, -20.0)],
    [barrel(-35.0, 5.0, 0.0, -20.0), barrel(35.0, 5.0, 0.0, -20.0)],
    [barrel(-25.0, 0.0, -3.0, -18.0), barrel(25.0, 0.0, 3.0, -18.0)],
];

/// Number of projectiles a volley at `level` fires.
pub fn volley_size(level: u8) -> usize {
    usize::from(level.clamp(1, MAX_WEAPON_LEVEL)) * 2
}

/// Fire a volley if the cadence allows.
pub fn run(
    weapon: &mut WeaponState,
    player: &Entity,
    projectiles: &mut EntityPool<Entity>,
    inputs: &FrameInputs,
    tuning: &Tuning,
    audio_events: &mut Vec<AudioCue>,
) {
    if !weapon.ready(inputs.now, tuning) {
        return;
    }
    weapon.last_shot = Some(inputs.now);

    let tiers = usize::from(weapon.level.clamp(1, MAX_WEAPON_LEVEL));
    let mut fired = 0;
    for b in BARRELS.iter().take(tiers).flatten() {
        let Some(shot) = projectiles.acquire() else {
            trace!("Projectile pool saturated, dropping player shot");
            continue;
        };
        shot.kind = EntityKind::Projectile {
            owner: Owner::Friendly,
        };
        shot.position = player.position + b.offset;
        shot.velocity = b.velocity * FRAME_RATE;
        shot.size = Vec2::new(FRIENDLY_PROJECTILE_WIDTH, FRIENDLY_PROJECTILE_HEIGHT);
        shot.hp = 1;
        shot.max_hp = 1;
        shot.damage = FRIENDLY_PROJECTILE_DAMAGE;
        fired += 1;
    }

    if fired > 0 {
        audio_events.push(AudioCue::PlayerFired {
            weapon_level: weapon.level,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs_at(now: f64) -> FrameInputs {
        FrameInputs {
            wave: 1,
            score: 0,
            dt: 1.0 / 60.0,
            pointer: None,
            now,
        }
    }

    fn player() -> Entity {
        Entity {
            active: true,
            kind: EntityKind::Player,
            position: Vec2::new(400.0, 800.0),
            ..Entity::default()
        }
    }

    #[test]
    fn test_volley_size_per_level() {
        assert_eq!(volley_size(1), 2);
        assert_eq!(volley_size(2), 4);
        assert_eq!(volley_size(3), 6);
    }

    #[test]
    fn test_level_one_pattern_symmetric() {
        let tuning = Tuning::default();
        let mut weapon = WeaponState::default();
        let mut pool = EntityPool::with_capacity(10);
        let mut audio = Vec::new();

        run(&mut weapon, &player(), &mut pool, &inputs_at(0.0), &tuning, &mut audio);

        let shots: Vec<Entity> = pool.iter_active().map(|(_, e)| *e).collect();
        assert_eq!(shots.len(), 2);
        assert_eq!(shots[0].position, Vec2::new(380.0, 790.0));
        assert_eq!(shots[1].position, Vec2::new(420.0, 790.0));
        assert!(shots.iter().all(|s| s.velocity.y < 0.0));
        assert_eq!(audio.len(), 1);
    }

    #[test]
    fn test_level_three_adds_angled_shots() {
        let tuning = Tuning::default();
        let mut weapon = WeaponState {
            level: 3,
            ..Default::default()
        };
        let mut pool = EntityPool::with_capacity(10);
        let mut audio = Vec::new();

        run(&mut weapon, &player(), &mut pool, &inputs_at(0.0), &tuning, &mut audio);

        assert_eq!(pool.active_count(), 6);
        let angled = pool
            .iter_active()
            .filter(|(_, e)| e.velocity.x != 0.0)
            .count();
        assert_eq!(angled, 2);
    }

    #[test]
    fn test_cadence_respects_interval() {
        let tuning = Tuning::default();
        let mut weapon = WeaponState::default();
        let mut pool = EntityPool::with_capacity(50);
        let mut audio = Vec::new();

        run(&mut weapon, &player(), &mut pool, &inputs_at(0.0), &tuning, &mut audio);
        run(&mut weapon, &player(), &mut pool, &inputs_at(0.1), &tuning, &mut audio);
        assert_eq!(pool.active_count(), 2, "too early for a second volley");

        run(&mut weapon, &player(), &mut pool, &inputs_at(0.16), &tuning, &mut audio);
        assert_eq!(pool.active_count(), 4);
    }

    #[test]
    fn test_rapid_fire_interval_and_expiry() {
        let tuning = Tuning::default();
        let mut weapon = WeaponState::default();
        weapon.grant_rapid_fire(2.0, &tuning);

        let base = tuning.fire_interval_secs;
        assert!(weapon.effective_interval(2.0, &tuning) < base);
        assert!(weapon.effective_interval(11.999, &tuning) < base);
        assert_eq!(weapon.effective_interval(12.0, &tuning), base);
        assert_eq!(weapon.rapid_fire_remaining(12.5), 0.0);
    }

    #[test]
    fn test_rapid_fire_never_shortens() {
        let tuning = Tuning::default();
        let mut weapon = WeaponState::default();
        weapon.grant_rapid_fire(5.0, &tuning);
        weapon.grant_rapid_fire(1.0, &tuning);
        assert_eq!(weapon.rapid_fire_until, 15.0);
    }

    #[test]
    fn test_upgrade_capped() {
        let mut weapon = WeaponState::default();
        assert!(weapon.upgrade());
        assert!(weapon.upgrade());
        assert!(!weapon.upgrade());
        assert_eq!(weapon.level, 3);
    }

    #[test]
    fn test_saturated_pool_drops_shots_silently() {
        let tuning = Tuning::default();
        let mut weapon = WeaponState {
            level: 3,
            ..Default::default()
        };
        let mut pool = EntityPool::with_capacity(3);
        let mut audio = Vec::new();

        run(&mut weapon, &player(), &mut pool, &inputs_at(0.0), &tuning, &mut audio);
        assert_eq!(pool.active_count(), 3);
        assert_eq!(weapon.last_shot, Some(0.0));
    }
}
