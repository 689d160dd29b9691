//! Wave progression: score thresholds and boss gating.

use vanguard_core::run_state::RunState;
use vanguard_core::tuning::Tuning;

use crate::systems::spawn_director::{is_boss_wave, SpawnDirector};

/// Score needed to leave `wave`.
pub fn wave_threshold(wave: u32, tuning: &Tuning) -> u32 {
    wave.saturating_mul(tuning.wave_score_step)
}

/// Whether the current wave is complete.
///
/// Never while a capital ship is alive. On boss waves score alone is not
/// enough; the boss has to be destroyed first.
pub fn should_advance(run: &RunState, director: &SpawnDirector, tuning: &Tuning) -> bool {
    if director.boss_active() {
        return false;
    }
    if is_boss_wave(run.wave(), tuning) && !director.boss_defeated() {
        return false;
    }
    run.score() >= wave_threshold(run.wave(), tuning)
}
