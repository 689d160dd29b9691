//! Player commands sent from the host to the simulation.

use serde::{Deserialize, Serialize};

/// All commands the player (or host UI) can issue.
///
/// Commands are queued and applied at the next tick boundary. A command that
/// makes no sense in the current phase is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Leave the menu and show the first briefing.
    StartGame,
    /// Dismiss the briefing and start the wave.
    AcknowledgeBriefing,
    /// Playing <-> Paused.
    TogglePause,
    /// Full reset back to the menu.
    Restart,
    /// From game over, reset and go straight to the first briefing.
    PlayAgain,
    /// Abandon the run and return to the menu.
    Quit,
}
