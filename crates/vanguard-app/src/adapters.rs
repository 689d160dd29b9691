//! Host collaborators: where pointer input comes from, where frames and
//! audio cues go.
//!
//! The simulation never calls these. The game loop polls the input adapter
//! before each tick and hands the resulting snapshot to the render and audio
//! adapters afterwards.

use std::collections::BTreeMap;

use glam::Vec2;
use log::info;
use thiserror::Error;

use vanguard_core::enums::GamePhase;
use vanguard_core::events::AudioCue;
use vanguard_core::state::FrameSnapshot;

/// Supplies the pointer target for the next tick.
///
/// `frame` is the most recent snapshot. The engine clamps whatever comes
/// back into the play field.
pub trait InputAdapter: Send {
    fn pointer(&mut self, frame: &FrameSnapshot) -> Option<Vec2>;
}

/// Consumes one snapshot per tick.
pub trait RenderAdapter: Send {
    fn render(&mut self, frame: &FrameSnapshot);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("audio device unavailable")]
    Unavailable,
}

/// Plays audio cues. Errors are logged by the loop and otherwise ignored.
pub trait AudioAdapter: Send {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError>;
}

/// The three adapters a loop runs with.
pub struct Adapters<I, R, A> {
    pub input: I,
    pub render: R,
    pub audio: A,
}

impl<I: InputAdapter, R: RenderAdapter, A: AudioAdapter> Adapters<I, R, A> {
    pub fn new(input: I, render: R, audio: A) -> Self {
        Self {
            input,
            render,
            audio,
        }
    }
}

// ---- Input ----

/// Always the same target, or none to hold position.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPointer(pub Option<Vec2>);

impl InputAdapter for FixedPointer {
    fn pointer(&mut self, _frame: &FrameSnapshot) -> Option<Vec2> {
        self.0
    }
}

/// Slides under the nearest hostile, holding the current altitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl InputAdapter for Autopilot {
    fn pointer(&mut self, frame: &FrameSnapshot) -> Option<Vec2> {
        let player = frame.player.position;
        frame
            .hostiles
            .iter()
            .min_by(|a, b| {
                let da = (a.position.x - player.x).abs();
                let db = (b.position.x - player.x).abs();
                da.total_cmp(&db)
            })
            .map(|target| Vec2::new(target.position.x, player.y))
    }
}

/// Replays a recorded pointer track, then lets go.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPointer {
    track: Vec<Option<Vec2>>,
    cursor: usize,
}

impl ScriptedPointer {
    pub fn new(track: Vec<Option<Vec2>>) -> Self {
        Self { track, cursor: 0 }
    }

    pub fn finished(&self) -> bool {
        self.cursor >= self.track.len()
    }
}

impl InputAdapter for ScriptedPointer {
    fn pointer(&mut self, _frame: &FrameSnapshot) -> Option<Vec2> {
        let next = self.track.get(self.cursor).copied().flatten();
        self.cursor = self.cursor.saturating_add(1);
        next
    }
}

// ---- Render ----

/// Logs the HUD every `interval` ticks and on every phase change.
#[derive(Debug, Clone)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
    last_phase: Option<GamePhase>,
}

impl LogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            last_phase: None,
        }
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl RenderAdapter for LogRenderer {
    fn render(&mut self, frame: &FrameSnapshot) {
        let phase_changed = self.last_phase != Some(frame.phase);
        self.last_phase = Some(frame.phase);
        self.frames += 1;

        if phase_changed {
            match &frame.briefing {
                Some(mission) => info!("{:?}: {}", frame.phase, mission.title),
                None => info!("{:?}", frame.phase),
            }
        }
        if phase_changed || self.frames % self.interval == 0 {
            let hud = &frame.hud;
            info!(
                "t={:.1}s wave={} score={} hi={} lives={} hp={}/{} weapon=L{} hostiles={} boss={}",
                frame.time.elapsed_secs,
                hud.wave,
                hud.score,
                hud.high_score,
                hud.lives,
                hud.health,
                hud.max_health,
                hud.weapon_level,
                frame.hostiles.len(),
                hud.boss_health
                    .map(|f| format!("{:.0}%", f * 100.0))
                    .unwrap_or_else(|| "-".into()),
            );
        }
    }
}

/// Keeps every frame it is handed.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<FrameSnapshot>,
}

impl RenderAdapter for RecordingRenderer {
    fn render(&mut self, frame: &FrameSnapshot) {
        self.frames.push(frame.clone());
    }
}

// ---- Audio ----

#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioAdapter for NullAudio {
    fn play(&mut self, _cue: AudioCue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Tallies cues by key. A disconnected instance counts attempts but fails every play.
#[derive(Debug, Clone, Default)]
pub struct CountingAudio {
    pub counts: BTreeMap<&'static str, usize>,
    disconnected: bool,
}

impl CountingAudio {
    pub fn disconnected() -> Self {
        Self {
            counts: BTreeMap::new(),
            disconnected: true,
        }
    }

    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl AudioAdapter for CountingAudio {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        *self.counts.entry(cue.key()).or_insert(0) += 1;
        if self.disconnected {
            return Err(AudioError::Unavailable);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vanguard_core::components::EntityKind;
    use vanguard_core::state::EntityView;
    use vanguard_core::tuning::Tuning;
    use vanguard_core::types::TickInput;
    use vanguard_sim::{GameContext, SimConfig, SimulationEngine};

    use super::*;

    fn menu_frame() -> FrameSnapshot {
        let tuning = Tuning::default();
        let mut engine = SimulationEngine::new(SimConfig::default(), &tuning);
        let mut ctx = GameContext::in_memory(tuning);
        engine.tick(TickInput::default(), &mut ctx)
    }

    fn hostile_at(x: f32, y: f32) -> EntityView {
        EntityView {
            slot: 0,
            kind: EntityKind::HostileFighter,
            position: Vec2::new(x, y),
            size: Vec2::splat(35.0),
            rotation: 0.0,
            hp: 2,
            max_hp: 2,
        }
    }

    #[test]
    fn test_autopilot_tracks_nearest_hostile() {
        let mut frame = menu_frame();
        frame.player.position = Vec2::new(400.0, 800.0);
        frame.hostiles = vec![hostile_at(100.0, 200.0), hostile_at(450.0, 300.0)];

        let target = Autopilot.pointer(&frame).unwrap();
        assert_eq!(target, Vec2::new(450.0, 800.0));

        frame.hostiles.clear();
        assert!(Autopilot.pointer(&frame).is_none());
    }

    #[test]
    fn test_scripted_pointer_replays_then_releases() {
        let frame = menu_frame();
        let a = Some(Vec2::new(10.0, 20.0));
        let mut script = ScriptedPointer::new(vec![a, None, a]);

        assert_eq!(script.pointer(&frame), a);
        assert_eq!(script.pointer(&frame), None);
        assert_eq!(script.pointer(&frame), a);
        assert!(script.finished());
        assert_eq!(script.pointer(&frame), None);
    }

    #[test]
    fn test_counting_audio_tallies_by_key() {
        let mut audio = CountingAudio::default();
        audio.play(AudioCue::HostileFired).unwrap();
        audio.play(AudioCue::HostileFired).unwrap();
        audio
            .play(AudioCue::Explosion {
                position: Vec2::ZERO,
            })
            .unwrap();
        assert_eq!(audio.count("hostile_fired"), 2);
        assert_eq!(audio.count("explosion"), 1);
        assert_eq!(audio.count("player_fired"), 0);
        assert_eq!(audio.total(), 3);
    }

    #[test]
    fn test_disconnected_audio_reports_error() {
        let mut audio = CountingAudio::disconnected();
        assert_eq!(audio.play(AudioCue::HostileFired), Err(AudioError::Unavailable));
        assert_eq!(audio.total(), 1);
    }

    #[test]
    fn test_recording_renderer_keeps_frames() {
        let frame = menu_frame();
        let mut renderer = RecordingRenderer::default();
        renderer.render(&frame);
        renderer.render(&frame);
        assert_eq!(renderer.frames.len(), 2);
    }
}
