use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;

use vanguard_app::adapters::{Adapters, Autopilot, LogRenderer, NullAudio};
use vanguard_app::game_loop::{close_run, run_headless, spawn_game_loop, LoopConfig, TICK_DURATION};
use vanguard_app::state::AppState;
use vanguard_core::tuning::Tuning;
use vanguard_sim::{SimConfig, SimulationEngine};

/// Run Neon Vanguard without a window, flown by the autopilot.
#[derive(Debug, Parser)]
#[command(name = "neon-vanguard", version, about)]
struct Cli {
    /// RNG seed. Same seed, same run.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate (60 per second).
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// JSON file overriding gameplay tuning.
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,

    /// Where to persist the high score. In memory when omitted.
    #[arg(long, value_name = "FILE")]
    high_score_file: Option<PathBuf>,

    /// Pace the loop at 60Hz on its own thread instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Log the HUD every N ticks.
    #[arg(long, default_value_t = 60)]
    log_interval: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let config = LoopConfig {
        sim: SimConfig { seed: cli.seed },
        tuning,
        high_score_file: cli.high_score_file.clone(),
        auto_continue: true,
    };
    let adapters = Adapters::new(Autopilot, LogRenderer::new(cli.log_interval), NullAudio);

    if cli.realtime {
        run_realtime(config, adapters, cli.ticks)
    } else {
        let mut ctx = config.build_context();
        let mut engine = SimulationEngine::new(config.sim, &ctx.tuning);
        let mut adapters = adapters;
        let last = run_headless(&mut engine, &mut ctx, &mut adapters, cli.ticks, true);
        close_run(&mut engine, &mut ctx);
        if let Some(frame) = last {
            info!(
                "Finished {} ticks on wave {} with score {}",
                cli.ticks, frame.hud.wave, frame.hud.score
            );
        }
        info!("High score: {}", ctx.run.high_score());
        Ok(())
    }
}

fn run_realtime(
    config: LoopConfig,
    adapters: Adapters<Autopilot, LogRenderer, NullAudio>,
    ticks: u64,
) -> Result<()> {
    let app = AppState::new();
    let (tx, handle) = spawn_game_loop(config, adapters, Arc::clone(&app.latest_snapshot))
        .context("failed to spawn game loop thread")?;
    *app.command_tx
        .lock()
        .map_err(|_| anyhow!("command channel lock poisoned"))? = Some(tx);

    let run_for = TICK_DURATION
        .checked_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
        .unwrap_or(TICK_DURATION);
    thread::sleep(run_for);

    let last = app.snapshot();
    app.shutdown();
    handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    if let Some(frame) = last {
        info!(
            "Stopped at tick {} on wave {} with score {}",
            frame.time.tick, frame.hud.wave, frame.hud.score
        );
    }
    Ok(())
}
