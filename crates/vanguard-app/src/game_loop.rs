//! Game loop thread: runs the simulation engine at 60Hz and hands each
//! snapshot to the adapters.
//!
//! The engine and its `GameContext` are created inside the thread, which owns
//! them exclusively. Commands arrive via an `mpsc` channel. The latest
//! snapshot is also stored in shared state for synchronous polling.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{info, trace};

use vanguard_core::commands::PlayerCommand;
use vanguard_core::constants::{DT, TICK_RATE};
use vanguard_core::enums::GamePhase;
use vanguard_core::state::FrameSnapshot;
use vanguard_core::tuning::Tuning;
use vanguard_core::types::TickInput;
use vanguard_sim::{
    GameContext, JsonFileStateStore, MemoryStateStore, SimConfig, SimulationEngine, StateStore,
};

use crate::adapters::{Adapters, AudioAdapter, InputAdapter, RenderAdapter};
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How a loop is started.
#[derive(Debug, Clone, Default)]
pub struct LoopConfig {
    pub sim: SimConfig,
    pub tuning: Tuning,
    /// Persist the high score here. Kept in memory when `None`.
    pub high_score_file: Option<PathBuf>,
    /// Start, acknowledge briefings and play again without a player.
    pub auto_continue: bool,
}

impl LoopConfig {
    pub fn build_context(&self) -> GameContext {
        let store: Box<dyn StateStore> = match &self.high_score_file {
            Some(path) => {
                let store = JsonFileStateStore::new(path);
                info!("High score file: {}", store.path().display());
                Box::new(store)
            }
            None => Box::new(MemoryStateStore::default()),
        };
        GameContext::new(self.tuning.clone(), store)
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the adapters back
/// once the loop stops.
pub fn spawn_game_loop<I, R, A>(
    config: LoopConfig,
    adapters: Adapters<I, R, A>,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<Adapters<I, R, A>>)>
where
    I: InputAdapter + 'static,
    R: RenderAdapter + 'static,
    A: AudioAdapter + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("vanguard-game-loop".into())
        .spawn(move || {
            let mut adapters = adapters;
            run_game_loop(&config, &mut adapters, cmd_rx, &latest_snapshot);
            adapters
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop<I, R, A>(
    config: &LoopConfig,
    adapters: &mut Adapters<I, R, A>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) where
    I: InputAdapter,
    R: RenderAdapter,
    A: AudioAdapter,
{
    let mut ctx = config.build_context();
    let mut engine = SimulationEngine::new(config.sim, &ctx.tuning);
    let mut last: Option<FrameSnapshot> = None;
    let mut next_tick_time = Instant::now();
    info!("Game loop started with seed {}", config.sim.seed);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    close_run(&mut engine, &mut ctx);
                    info!("Game loop stopped after {} ticks", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        if config.auto_continue {
            queue_continue(&mut engine, last.as_ref());
        }

        // 2. Advance one tick and feed the adapters
        let snapshot = step(&mut engine, &mut ctx, adapters, last.as_ref());

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        last = Some(snapshot);

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, skip ahead instead of catching up
            next_tick_time = now;
        }
    }
}

/// Drive `ticks` frames back to back, without sleeping. Returns the last snapshot.
pub fn run_headless<I, R, A>(
    engine: &mut SimulationEngine,
    ctx: &mut GameContext,
    adapters: &mut Adapters<I, R, A>,
    ticks: u64,
    auto_continue: bool,
) -> Option<FrameSnapshot>
where
    I: InputAdapter,
    R: RenderAdapter,
    A: AudioAdapter,
{
    let mut last: Option<FrameSnapshot> = None;
    for _ in 0..ticks {
        if auto_continue {
            queue_continue(engine, last.as_ref());
        }
        last = Some(step(engine, ctx, adapters, last.as_ref()));
    }
    last
}

/// End the current run so a new high score reaches the store.
pub fn close_run(engine: &mut SimulationEngine, ctx: &mut GameContext) {
    engine.queue_command(PlayerCommand::Quit);
    engine.tick(TickInput::new(0.0, None), ctx);
}

/// One tick: poll input, advance, play cues, render.
fn step<I, R, A>(
    engine: &mut SimulationEngine,
    ctx: &mut GameContext,
    adapters: &mut Adapters<I, R, A>,
    last: Option<&FrameSnapshot>,
) -> FrameSnapshot
where
    I: InputAdapter,
    R: RenderAdapter,
    A: AudioAdapter,
{
    let pointer = last.and_then(|frame| adapters.input.pointer(frame));
    let snapshot = engine.tick(TickInput::new(DT, pointer), ctx);

    for cue in &snapshot.audio_events {
        if let Err(e) = adapters.audio.play(*cue) {
            trace!("Dropped {} cue: {e}", cue.key());
        }
    }
    adapters.render.render(&snapshot);
    snapshot
}

fn queue_continue(engine: &mut SimulationEngine, last: Option<&FrameSnapshot>) {
    let phase = last.map_or(engine.phase(), |frame| frame.phase);
    let command = match phase {
        GamePhase::Menu => PlayerCommand::StartGame,
        GamePhase::Briefing => PlayerCommand::AcknowledgeBriefing,
        GamePhase::GameOver => PlayerCommand::PlayAgain,
        GamePhase::Playing | GamePhase::Paused => return,
    };
    engine.queue_command(command);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Autopilot, CountingAudio, FixedPointer, NullAudio, RecordingRenderer};
    use glam::Vec2;

    fn headless(
        seed: u64,
        ticks: u64,
    ) -> (
        GameContext,
        Adapters<Autopilot, RecordingRenderer, CountingAudio>,
        Option<FrameSnapshot>,
    ) {
        let config = LoopConfig {
            sim: SimConfig { seed },
            ..Default::default()
        };
        let mut ctx = config.build_context();
        let mut engine = SimulationEngine::new(config.sim, &ctx.tuning);
        let mut adapters = Adapters::new(
            Autopilot,
            RecordingRenderer::default(),
            CountingAudio::default(),
        );
        let last = run_headless(&mut engine, &mut ctx, &mut adapters, ticks, true);
        (ctx, adapters, last)
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::TogglePause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Player(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Player(PlayerCommand::TogglePause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_headless_run_feeds_adapters() {
        let (_, adapters, last) = headless(42, 600);

        assert_eq!(adapters.render.frames.len(), 600);
        let last = last.unwrap();
        assert_ne!(last.phase, GamePhase::Menu);
        assert!(adapters.audio.count("player_fired") > 0);

        let cues: usize = adapters
            .render
            .frames
            .iter()
            .map(|f| f.audio_events.len())
            .sum();
        assert_eq!(cues, adapters.audio.total());
    }

    #[test]
    fn test_headless_runs_are_reproducible() {
        let (_, a, _) = headless(9, 400);
        let (_, b, _) = headless(9, 400);
        let a = serde_json::to_string(&a.render.frames).unwrap();
        let b = serde_json::to_string(&b.render.frames).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_audio_failures_do_not_stop_loop() {
        let config = LoopConfig::default();
        let mut ctx = config.build_context();
        let mut engine = SimulationEngine::new(config.sim, &ctx.tuning);
        let mut adapters = Adapters::new(
            FixedPointer(Some(Vec2::new(200.0, 700.0))),
            RecordingRenderer::default(),
            CountingAudio::disconnected(),
        );
        run_headless(&mut engine, &mut ctx, &mut adapters, 120, true);

        assert_eq!(adapters.render.frames.len(), 120);
        assert!(adapters.audio.total() > 0);
    }

    #[test]
    fn test_close_run_persists_high_score() {
        let path = std::env::temp_dir()
            .join("neon_vanguard_loop_tests")
            .join("close_run.json");
        let _ = std::fs::remove_file(&path);
        let config = LoopConfig {
            high_score_file: Some(path.clone()),
            ..Default::default()
        };

        let mut ctx = config.build_context();
        let mut engine = SimulationEngine::new(config.sim, &ctx.tuning);
        engine.queue_command(PlayerCommand::StartGame);
        engine.tick(TickInput::default(), &mut ctx);
        ctx.run.increment_score(4200);
        close_run(&mut engine, &mut ctx);

        assert_eq!(engine.phase(), GamePhase::Menu);
        let reopened = config.build_context();
        assert_eq!(reopened.run.high_score(), 4200);
    }

    #[test]
    fn test_spawned_loop_accepts_commands_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let adapters = Adapters::new(
            FixedPointer(None),
            RecordingRenderer::default(),
            NullAudio,
        );
        let (tx, handle) =
            spawn_game_loop(LoopConfig::default(), adapters, Arc::clone(&latest)).unwrap();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::AcknowledgeBriefing))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut phase = None;
        while Instant::now() < deadline {
            phase = latest.lock().unwrap().as_ref().map(|s| s.phase);
            if phase == Some(GamePhase::Playing) {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(phase, Some(GamePhase::Playing));

        tx.send(GameLoopCommand::Shutdown).unwrap();
        let adapters = handle.join().unwrap();
        assert!(!adapters.render.frames.is_empty());
    }
}
