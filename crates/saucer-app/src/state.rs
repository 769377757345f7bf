//! Runner state shared between the main thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use saucer_core::commands::PlayerCommand;
use saucer_core::state::FrameSnapshot;

/// Commands sent from the main thread to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A platform command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("game loop not started")]
    NotRunning,
    #[error("game loop already running")]
    AlreadyRunning,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("shared state poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handles to a running game loop.
///
/// The sender sits behind a `Mutex` so input threads can share one `AppState`.
pub struct AppState {
    /// `None` until the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop after each frame.
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

    /// Record the sender of a freshly spawned loop.
    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) -> Result<(), LoopError> {
        let mut lock = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?;
        if lock.is_some() {
            return Err(LoopError::AlreadyRunning);
        }
        *lock = Some(tx);
        Ok(())
    }

    /// Forward a platform command to the loop.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), LoopError> {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    /// Ask the loop to stop.
    pub fn shutdown(&self) -> Result<(), LoopError> {
        self.send(GameLoopCommand::Shutdown)
    }

    /// Copy of the latest snapshot, if a frame has run yet.
    pub fn snapshot(&self) -> Result<Option<FrameSnapshot>, LoopError> {
        let lock = self.latest_snapshot.lock().map_err(|_| LoopError::Poisoned)?;
        Ok(lock.clone())
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), LoopError> {
        let lock = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?;
        match lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| LoopError::Disconnected),
            None => Err(LoopError::NotRunning),
        }
    }
}
