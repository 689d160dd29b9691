//! Snapshot builder: converts engine state into a `FrameSnapshot`.

use vanguard_core::components::Entity;
use vanguard_core::enums::GamePhase;
use vanguard_core::events::AudioCue;
use vanguard_core::missions::Mission;
use vanguard_core::run_state::RunState;
use vanguard_core::state::{EntityView, FrameSnapshot, HudView, PlayerView};
use vanguard_core::types::SimTime;

use crate::pool::EntityPool;
use crate::systems::effects::Effects;
use crate::systems::spawn_director::SpawnDirector;
use crate::systems::weapon::WeaponState;
use crate::world::World;

/// Everything outside the world that feeds a snapshot.
pub struct SnapshotSource<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub run: &'a RunState,
    pub weapon: &'a WeaponState,
    pub director: &'a SpawnDirector,
    pub effects: &'a Effects,
    pub briefing: Option<&'a Mission>,
}

fn views(pool: &EntityPool<Entity>) -> Vec<EntityView> {
    pool.iter_active()
        .map(|(slot, e)| EntityView::from_entity(slot, e))
        .collect()
}

/// Build a complete snapshot. `audio_events` are moved in.
pub fn build_snapshot(
    world: &World,
    source: SnapshotSource<'_>,
    audio_events: Vec<AudioCue>,
) -> FrameSnapshot {
    let now = source.time.elapsed_secs;
    let boss_health = world
        .capital()
        .map(|(_, boss)| boss.hp.max(0) as f32 / boss.max_hp.max(1) as f32);

    let hud = HudView {
        score: source.run.score(),
        high_score: source.run.high_score().max(source.run.score()),
        wave: source.run.wave(),
        lives: source.run.lives(),
        health: source.run.health(),
        max_health: source.run.max_health(),
        weapon_level: source.weapon.level,
        rapid_fire_remaining: source.weapon.rapid_fire_remaining(now),
        boss_active: source.director.boss_active(),
        boss_health,
    };

    FrameSnapshot {
        time: source.time,
        phase: source.phase,
        player: PlayerView {
            position: world.player.position,
            size: world.player.size,
            rotation: world.player.rotation,
            invulnerable: world.player.is_invulnerable(now),
        },
        hostiles: views(&world.hostiles),
        projectiles: views(&world.projectiles),
        particles: views(&world.particles),
        pickups: views(&world.pickups),
        stars: world.stars.clone(),
        screen_shake: source.effects.screen_shake(),
        hud,
        briefing: source.briefing.cloned(),
        audio_events,
    }
}
