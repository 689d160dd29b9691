//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use vanguard_core::commands::PlayerCommand;
use vanguard_core::state::FrameSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `command_tx` is `None` until a loop has been spawned
/// - `latest_snapshot` is written by the loop thread after each tick
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a player command. Returns false if no loop is listening.
    pub fn send(&self, command: PlayerCommand) -> bool {
        let Ok(tx) = self.command_tx.lock() else {
            return false;
        };
        match tx.as_ref() {
            Some(tx) => tx.send(GameLoopCommand::Player(command)).is_ok(),
            None => false,
        }
    }

    /// Clone of the most recent snapshot, if a tick has run.
    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Ask the loop to stop and forget the sender.
    pub fn shutdown(&self) {
        if let Ok(mut tx) = self.command_tx.lock() {
            if let Some(tx) = tx.take() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(state.snapshot().is_none());
    }

    #[test]
    fn test_send_without_loop_is_rejected() {
        let state = AppState::new();
        assert!(!state.send(PlayerCommand::StartGame));
    }

    #[test]
    fn test_send_and_shutdown_reach_channel() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        *state.command_tx.lock().unwrap() = Some(tx);

        assert!(state.send(PlayerCommand::TogglePause));
        state.shutdown();

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert!(matches!(
            received[0],
            GameLoopCommand::Player(PlayerCommand::TogglePause)
        ));
        assert!(matches!(received[1], GameLoopCommand::Shutdown));
        assert!(state.command_tx.lock().unwrap().is_none());
    }
}
