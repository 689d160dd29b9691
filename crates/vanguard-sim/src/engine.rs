//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the entity pools, processes player commands, runs
//! all systems in a fixed order and produces `FrameSnapshot`s. Run state,
//! tuning and persistence come in through the `GameContext` each tick.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use vanguard_core::commands::PlayerCommand;
use vanguard_core::enums::GamePhase;
use vanguard_core::events::AudioCue;
use vanguard_core::missions::briefing_for;
use vanguard_core::state::FrameSnapshot;
use vanguard_core::tuning::Tuning;
use vanguard_core::types::{SimTime, TickInput};

use crate::context::{FrameInputs, GameContext};
use crate::systems;
use crate::systems::collision::{CollisionReport, CollisionState};
use crate::systems::effects::Effects;
use crate::systems::snapshot::SnapshotSource;
use crate::systems::spawn_director::{BossRequest, SpawnDirector};
use crate::systems::weapon::WeaponState;
use crate::world::World;
use crate::world_setup;

/// Longest frame delta simulated in one tick. Longer gaps are truncated.
const MAX_FRAME_DT: f32 = 0.1;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the pools and all per-run sim state.
pub struct SimulationEngine<R = ChaCha8Rng> {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: R,
    command_queue: VecDeque<PlayerCommand>,
    audio_events: Vec<AudioCue>,
    weapon: WeaponState,
    director: SpawnDirector,
    effects: Effects,
    /// Collision tally of the most recent Playing tick.
    last_collisions: CollisionReport,
}

impl SimulationEngine<ChaCha8Rng> {
    /// Create a new engine seeded from `config`. Pool capacities come from `tuning`.
    pub fn new(config: SimConfig, tuning: &Tuning) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(config.seed), tuning)
    }
}

impl<R: Rng> SimulationEngine<R> {
    /// Create an engine driven by an arbitrary random source.
    pub fn with_rng(mut rng: R, tuning: &Tuning) -> Self {
        let world = world_setup::build_world(tuning, &mut rng);
        Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng,
            command_queue: VecDeque::new(),
            audio_events: Vec::new(),
            weapon: WeaponState::default(),
            director: SpawnDirector::default(),
            effects: Effects::default(),
            last_collisions: CollisionReport::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    pub fn tick(&mut self, input: TickInput, ctx: &mut GameContext) -> FrameSnapshot {
        self.process_commands(ctx);

        let dt = if input.dt.is_finite() {
            input.dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        if self.phase == GamePhase::Playing {
            let inputs = self.frame_inputs(dt, input.pointer, ctx);
            self.run_systems(&inputs, ctx);
            self.time.advance(dt);
        }

        // Cosmetics run in every phase.
        let rapid_fire = self.weapon.rapid_fire_active(self.time.elapsed_secs);
        systems::effects::run(
            &mut self.world,
            &mut self.effects,
            dt,
            rapid_fire,
            &ctx.tuning,
            &mut self.rng,
        );

        let briefing = if self.phase == GamePhase::Briefing {
            briefing_for(&ctx.missions, ctx.run.wave())
        } else {
            None
        };
        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotSource {
                time: self.time,
                phase: self.phase,
                run: &ctx.run,
                weapon: &self.weapon,
                director: &self.director,
                effects: &self.effects,
                briefing,
            },
            audio_events,
        )
    }

    /// Ask for a capital ship now. Rejected while one is already alive.
    pub fn request_boss(&mut self, ctx: &GameContext) -> BossRequest {
        self.director
            .request_boss(&mut self.world.hostiles, ctx.run.wave(), &ctx.tuning)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn weapon(&self) -> &WeaponState {
        &self.weapon
    }

    pub fn director(&self) -> &SpawnDirector {
        &self.director
    }

    pub fn last_collisions(&self) -> CollisionReport {
        self.last_collisions
    }

    /// Mutable world access (for tests that stage exact situations).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Capture the immutable inputs for this tick.
    fn frame_inputs(&self, dt: f32, pointer: Option<Vec2>, ctx: &GameContext) -> FrameInputs {
        let pointer = pointer
            .filter(|p| p.is_finite())
            .map(|p| systems::input::clamp_pointer(p, self.world.player.size, &ctx.tuning));
        FrameInputs {
            wave: ctx.run.wave(),
            score: ctx.run.score(),
            dt,
            pointer,
            now: self.time.elapsed_secs,
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self, ctx: &mut GameContext) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, ctx);
        }
    }

    /// Handle a single player command. Commands invalid in the current phase are ignored.
    fn handle_command(&mut self, command: PlayerCommand, ctx: &mut GameContext) {
        match (command, self.phase) {
            (PlayerCommand::StartGame, GamePhase::Menu) => {
                self.enter_briefing(ctx);
            }
            (PlayerCommand::AcknowledgeBriefing, GamePhase::Briefing) => {
                self.phase = GamePhase::Playing;
                info!("Wave {} engaged", ctx.run.wave());
            }
            (PlayerCommand::TogglePause, GamePhase::Playing) => {
                self.phase = GamePhase::Paused;
            }
            (PlayerCommand::TogglePause, GamePhase::Paused) => {
                self.phase = GamePhase::Playing;
            }
            (PlayerCommand::Restart, phase) => {
                if phase != GamePhase::Menu {
                    ctx.finish_run();
                }
                self.reset_run(ctx);
                self.phase = GamePhase::Menu;
            }
            (PlayerCommand::PlayAgain, GamePhase::GameOver) => {
                self.reset_run(ctx);
                self.enter_briefing(ctx);
            }
            (PlayerCommand::Quit, phase) if phase != GamePhase::Menu => {
                ctx.finish_run();
                self.reset_run(ctx);
                self.phase = GamePhase::Menu;
            }
            (command, phase) => {
                debug!("Ignoring {command:?} in {phase:?}");
            }
        }
    }

    /// Run all combat systems in order.
    fn run_systems(&mut self, inputs: &FrameInputs, ctx: &mut GameContext) {
        // 1. Input
        systems::input::run(&mut self.world.player, inputs);
        // 2. Weapon
        systems::weapon::run(
            &mut self.weapon,
            &self.world.player,
            &mut self.world.projectiles,
            inputs,
            &ctx.tuning,
            &mut self.audio_events,
        );
        // 3. Spawn director
        self.director
            .run(&mut self.world, inputs, &ctx.tuning, &mut self.rng);
        // 4. Kinematics (movement, hostile fire, bounds culling)
        systems::kinematics::run(
            &mut self.world,
            inputs,
            &ctx.tuning,
            &mut self.rng,
            &mut self.audio_events,
        );
        // 5. Collision
        let mut state = CollisionState {
            run: &mut ctx.run,
            weapon: &mut self.weapon,
            effects: &mut self.effects,
            audio_events: &mut self.audio_events,
        };
        let report =
            systems::collision::run(&mut self.world, &mut state, inputs, &ctx.tuning, &mut self.rng);
        if report != CollisionReport::default() {
            trace!("Collisions at t={:.2}s: {report:?}", inputs.now);
        }
        self.last_collisions = report;
        // 6. Cleanup (score, drops, removal)
        systems::cleanup::run(
            &mut self.world,
            &mut self.director,
            &mut ctx.run,
            &ctx.tuning,
            &mut self.rng,
            &mut self.audio_events,
        );
        // 7. Life depletion, then wave advance
        if ctx.run.is_depleted() {
            self.enter_game_over(ctx);
        } else if systems::progression::should_advance(&ctx.run, &self.director, &ctx.tuning) {
            ctx.run.advance_wave();
            self.director.begin_wave();
            self.enter_briefing(ctx);
        }
    }

    fn enter_briefing(&mut self, ctx: &GameContext) {
        world_setup::clear_for_briefing(&mut self.world);
        world_setup::respawn_player(&mut self.world.player, &ctx.tuning);
        self.phase = GamePhase::Briefing;
        match briefing_for(&ctx.missions, ctx.run.wave()) {
            Some(mission) => info!("Briefing for wave {}: {}", ctx.run.wave(), mission.title),
            None => info!("Briefing for wave {}", ctx.run.wave()),
        }
    }

    fn enter_game_over(&mut self, ctx: &mut GameContext) {
        self.phase = GamePhase::GameOver;
        info!(
            "Game over on wave {} with score {}",
            ctx.run.wave(),
            ctx.run.score()
        );
        ctx.finish_run();
    }

    /// Back to initial values: run state, pools, player, weapon, director, clock.
    fn reset_run(&mut self, ctx: &mut GameContext) {
        ctx.run.reset_run();
        world_setup::clear_combat(&mut self.world);
        self.world.particles.clear();
        world_setup::reset_player(&mut self.world.player, &ctx.tuning);
        self.weapon = WeaponState::default();
        self.director = SpawnDirector::default();
        self.effects.reset();
        self.last_collisions = CollisionReport::default();
        self.time = SimTime::default();
        self.audio_events.clear();
    }
}
