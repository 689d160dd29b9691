//! Score, lives, wave and health for the current run.
//!
//! These fields are observable by the host but only change through the
//! operations below, so every mutation goes through one audited path.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Result of routing damage into the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Nothing changed (zero damage, or already depleted).
    Absorbed,
    /// Health dropped but stayed positive.
    Damaged,
    /// Health crossed zero, a life was spent and health refilled.
    LifeLost,
    /// Health crossed zero on the last life.
    Depleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    score: u32,
    lives: u32,
    wave: u32,
    health: i32,
    high_score: u32,
    max_health: i32,
    start_lives: u32,
    max_lives: u32,
}

impl RunState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: tuning.start_lives,
            wave: 1,
            health: tuning.max_health,
            high_score: 0,
            max_health: tuning.max_health,
            start_lives: tuning.start_lives,
            max_lives: tuning.max_lives,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_depleted(&self) -> bool {
        self.lives == 0
    }

    pub fn increment_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// The single "player takes damage" operation.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if amount <= 0 || self.health <= 0 || self.lives == 0 {
            return DamageOutcome::Absorbed;
        }

        self.health = self.health.saturating_sub(amount).max(0);
        if self.health > 0 {
            return DamageOutcome::Damaged;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.health = self.max_health;
            DamageOutcome::LifeLost
        } else {
            DamageOutcome::Depleted
        }
    }

    /// Extra life (capped) with health restored.
    pub fn grant_life(&mut self) {
        if self.lives < self.max_lives {
            self.lives += 1;
        }
        self.health = self.max_health;
    }

    pub fn advance_wave(&mut self) {
        self.wave = self.wave.saturating_add(1);
    }

    /// Back to initial values. The high score survives.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.lives = self.start_lives;
        self.wave = 1;
        self.health = self.max_health;
    }

    /// Seed the persisted high score (at startup).
    pub fn restore_high_score(&mut self, high_score: u32) {
        self.high_score = self.high_score.max(high_score);
    }

    /// Close out the run. Returns the new high score if this run beat it.
    pub fn record_run_end(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.high_score)
        } else {
            None
        }
    }
}
