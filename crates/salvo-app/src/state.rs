//! Application state shared between the runner and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context};

use salvo_core::commands::SimCommand;
use salvo_core::state::SimSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the simulation engine.
    Sim(SimCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` for state that does not exist before the loop starts
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with the game loop thread)
pub struct AppState {
    /// `None` until the game loop has been spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
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

    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) -> anyhow::Result<()> {
        let mut lock = self
            .command_tx
            .lock()
            .map_err(|_| anyhow!("command channel lock poisoned"))?;
        *lock = Some(tx);
        Ok(())
    }

    /// Forward a command to the running simulation.
    pub fn send_command(&self, command: SimCommand) -> anyhow::Result<()> {
        self.send(GameLoopCommand::Sim(command))
    }

    /// Ask the game loop to exit after its current tick.
    pub fn shutdown(&self) -> anyhow::Result<()> {
        self.send(GameLoopCommand::Shutdown)
    }

    fn send(&self, command: GameLoopCommand) -> anyhow::Result<()> {
        let lock = self
            .command_tx
            .lock()
            .map_err(|_| anyhow!("command channel lock poisoned"))?;
        let tx = lock.as_ref().context("simulation not started")?;
        tx.send(command).context("game loop has exited")
    }

    /// Clone of the latest snapshot, if any tick has run.
    pub fn latest(&self) -> Option<SimSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest().is_none());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        let err = state.send_command(SimCommand::Pause).unwrap_err();
        assert!(err.to_string().contains("not started"));
    }

    #[test]
    fn test_send_after_attach_reaches_receiver() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        state.attach(tx).unwrap();

        state.send_command(SimCommand::StopWaves).unwrap();
        state.shutdown().unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            GameLoopCommand::Sim(SimCommand::StopWaves)
        ));
        assert!(matches!(rx.try_recv().unwrap(), GameLoopCommand::Shutdown));

        drop(rx);
        assert!(state.send_command(SimCommand::Resume).is_err());
    }
}
