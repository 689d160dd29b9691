use std::fs;
use std::path::PathBuf;

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vanguard_sim::core::commands::PlayerCommand;
use vanguard_sim::core::constants::DT;
use vanguard_sim::core::enums::GamePhase;
use vanguard_sim::core::missions::Mission;
use vanguard_sim::core::tuning::Tuning;
use vanguard_sim::core::types::TickInput;
use vanguard_sim::{
    GameContext, JsonFileStateStore, SimConfig, SimulationEngine, StateStore,
};

fn temp_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("neon_vanguard_engine_tests");
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

fn start(engine: &mut SimulationEngine, ctx: &mut GameContext) {
    engine.queue_commands([PlayerCommand::StartGame, PlayerCommand::AcknowledgeBriefing]);
    engine.tick(TickInput::default(), ctx);
    assert_eq!(engine.phase(), GamePhase::Playing);
}

// --- Persistence ---

#[test]
fn high_score_survives_restart_through_file_store() {
    let path = temp_file("high_score.json");
    let tuning = Tuning::default();

    let mut ctx = GameContext::new(tuning.clone(), Box::new(JsonFileStateStore::new(&path)));
    let mut engine = SimulationEngine::new(SimConfig::default(), &tuning);
    start(&mut engine, &mut ctx);
    ctx.run.increment_score(1234);
    engine.queue_command(PlayerCommand::Quit);
    engine.tick(TickInput::default(), &mut ctx);
    assert_eq!(engine.phase(), GamePhase::Menu);

    let reopened = GameContext::new(tuning, Box::new(JsonFileStateStore::new(&path)));
    assert_eq!(reopened.run.high_score(), 1234);
    assert_eq!(reopened.run.score(), 0);
}

#[test]
fn lower_score_does_not_overwrite_file() {
    let path = temp_file("keep_best.json");
    let mut store = JsonFileStateStore::new(&path);
    store.save_high_score(5000).unwrap();

    let tuning = Tuning::default();
    let mut ctx = GameContext::new(tuning.clone(), Box::new(JsonFileStateStore::new(&path)));
    let mut engine = SimulationEngine::new(SimConfig::default(), &tuning);
    start(&mut engine, &mut ctx);
    ctx.run.increment_score(100);
    engine.queue_command(PlayerCommand::Restart);
    engine.tick(TickInput::default(), &mut ctx);

    assert_eq!(store.load_high_score().unwrap(), 5000);
}

#[test]
fn malformed_store_starts_from_zero() {
    let path = temp_file("garbage.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json").unwrap();

    let ctx = GameContext::new(Tuning::default(), Box::new(JsonFileStateStore::new(&path)));
    assert_eq!(ctx.run.high_score(), 0);
}

// --- Frame timing ---

#[test]
fn long_frames_are_truncated() {
    let tuning = Tuning::default();
    let mut ctx = GameContext::in_memory(tuning.clone());
    let mut engine = SimulationEngine::new(SimConfig::default(), &tuning);
    start(&mut engine, &mut ctx);

    let before = engine.time().elapsed_secs;
    engine.tick(TickInput::new(5.0, None), &mut ctx);
    let step = engine.time().elapsed_secs - before;
    assert!((step - 0.1).abs() < 1e-6, "step was {step}");
}

#[test]
fn bad_frame_deltas_do_not_move_time() {
    let tuning = Tuning::default();
    let mut ctx = GameContext::in_memory(tuning.clone());
    let mut engine = SimulationEngine::new(SimConfig::default(), &tuning);
    start(&mut engine, &mut ctx);

    let before = engine.time().elapsed_secs;
    for dt in [f32::NAN, f32::INFINITY, -1.0, 0.0] {
        engine.tick(TickInput::new(dt, None), &mut ctx);
    }
    assert_eq!(engine.time().elapsed_secs, before);
}

#[test]
fn pointer_outside_field_is_clamped() {
    let tuning = Tuning::default();
    let mut ctx = GameContext::in_memory(tuning.clone());
    let mut engine = SimulationEngine::new(SimConfig::default(), &tuning);
    start(&mut engine, &mut ctx);

    let mut snap = engine.tick(TickInput::default(), &mut ctx);
    for _ in 0..240 {
        snap = engine.tick(TickInput::new(DT, Some(Vec2::new(-5000.0, 99999.0))), &mut ctx);
    }
    let half = snap.player.size.x / 2.0;
    assert!(snap.player.position.x >= half - 0.01);
    assert!(snap.player.position.y <= tuning.field_height - half + 0.01);
}

// --- Configuration ---

#[test]
fn tuning_json_shrinks_pools() {
    let tuning = Tuning::from_json_str(r#"{ "projectile_capacity": 4, "star_count": 10 }"#).unwrap();
    let mut ctx = GameContext::in_memory(tuning.clone());
    let mut engine = SimulationEngine::new(SimConfig::default(), &tuning);
    start(&mut engine, &mut ctx);

    let mut snap = engine.tick(TickInput::default(), &mut ctx);
    for _ in 0..120 {
        snap = engine.tick(TickInput::default(), &mut ctx);
        assert!(engine.world().projectiles.active_count() <= 4);
    }
    assert_eq!(snap.stars.len(), 10);
}

#[test]
fn custom_mission_table_drives_briefings() {
    let tuning = Tuning::default();
    let missions = vec![
        Mission::new("Even", "Even waves."),
        Mission::new("Odd", "Odd waves."),
    ];
    let mut ctx = GameContext::in_memory(tuning.clone()).with_missions(missions);
    let mut engine = SimulationEngine::new(SimConfig::default(), &tuning);

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(TickInput::default(), &mut ctx);
    assert_eq!(snap.briefing.map(|m| m.title), Some("Odd".to_string()));
}

#[test]
fn empty_mission_table_has_no_briefing() {
    let tuning = Tuning::default();
    let mut ctx = GameContext::in_memory(tuning.clone()).with_missions(Vec::new());
    let mut engine = SimulationEngine::new(SimConfig::default(), &tuning);

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(TickInput::default(), &mut ctx);
    assert_eq!(snap.phase, GamePhase::Briefing);
    assert!(snap.briefing.is_none());
}

#[test]
fn explicit_rng_matches_seeded_engine() {
    let tuning = Tuning::default();
    let mut ctx_a = GameContext::in_memory(tuning.clone());
    let mut ctx_b = GameContext::in_memory(tuning.clone());
    let mut seeded = SimulationEngine::new(SimConfig { seed: 77 }, &tuning);
    let mut explicit = SimulationEngine::with_rng(ChaCha8Rng::seed_from_u64(77), &tuning);
    start(&mut seeded, &mut ctx_a);
    start(&mut explicit, &mut ctx_b);

    for _ in 0..300 {
        let a = serde_json::to_string(&seeded.tick(TickInput::default(), &mut ctx_a)).unwrap();
        let b = serde_json::to_string(&explicit.tick(TickInput::default(), &mut ctx_b)).unwrap();
        assert_eq!(a, b);
    }
}

// --- Invariants under arbitrary input ---

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn pools_and_hud_stay_in_range(
        seed in any::<u64>(),
        pointers in prop::collection::vec(
            prop::option::of((-100.0f32..900.0, -100.0f32..1000.0)),
            60..180,
        ),
    ) {
        let tuning = Tuning::default();
        let mut ctx = GameContext::in_memory(tuning.clone());
        let mut engine = SimulationEngine::new(SimConfig { seed }, &tuning);
        start(&mut engine, &mut ctx);

        for (i, pointer) in pointers.iter().cycle().take(1800).enumerate() {
            if i % 600 == 599 {
                engine.queue_command(PlayerCommand::TogglePause);
            }
            match engine.phase() {
                GamePhase::Briefing => engine.queue_command(PlayerCommand::AcknowledgeBriefing),
                GamePhase::GameOver => engine.queue_command(PlayerCommand::PlayAgain),
                GamePhase::Paused => engine.queue_command(PlayerCommand::TogglePause),
                _ => {}
            }
            let pointer = (*pointer).map(|(x, y)| Vec2::new(x, y));
            let snap = engine.tick(TickInput::new(DT, pointer), &mut ctx);

            let world = engine.world();
            prop_assert!(world.hostiles.active_count() <= tuning.hostile_capacity);
            prop_assert!(world.projectiles.active_count() <= tuning.projectile_capacity);
            prop_assert!(world.particles.active_count() <= tuning.particle_capacity);
            prop_assert!(world.pickups.active_count() <= tuning.pickup_capacity);

            prop_assert!(snap.hud.health >= 0 && snap.hud.health <= snap.hud.max_health);
            prop_assert!(snap.hud.lives <= tuning.max_lives);
            prop_assert!((1..=3).contains(&snap.hud.weapon_level));
            prop_assert!(snap.hostiles.iter().all(|h| h.hp > 0));
            prop_assert!(snap.screen_shake >= 0.0);
        }
    }
}
