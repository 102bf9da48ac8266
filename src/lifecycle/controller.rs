// src/lifecycle/controller.rs

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::command::{CommandSpec, ProcessHandle};
use crate::exec::runner::{RunningCommand, spawn_supervised};
use crate::lifecycle::LifecycleState;
use crate::lifecycle::registry::{ProcessRegistry, TerminateOutcome};
use crate::transcript::Transcript;

/// Owns the launched application's process handle and lifecycle state.
///
/// `start` publishes the new process into the registry (overwriting, never
/// killing, a previous one) and watches it in the background: if the
/// process exits on its own while still registered, the registry is
/// cleared and the state goes back to `Stopped`.
#[derive(Debug)]
pub struct LifecycleController {
    launch: CommandSpec,
    transcript: Transcript,
    registry: Arc<ProcessRegistry>,
    state: Arc<watch::Sender<LifecycleState>>,
}

impl LifecycleController {
    pub fn new(launch: CommandSpec, transcript: Transcript) -> Self {
        let (state, _) = watch::channel(LifecycleState::Stopped);
        Self {
            launch,
            transcript,
            registry: Arc::new(ProcessRegistry::new()),
            state: Arc::new(state),
        }
    }

    pub fn status(&self) -> LifecycleState {
        *self.state.borrow()
    }

    /// Receive every state change (used by the CLI to notice an exit).
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn launch_spec(&self) -> &CommandSpec {
        &self.launch
    }

    fn set_state(&self, next: LifecycleState) {
        let prev = self.state.send_replace(next);
        debug!(from = %prev, to = %next, "lifecycle state change");
    }

    /// Launch the application and return its handle once registered.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> Result<ProcessHandle> {
        self.set_state(LifecycleState::Starting);
        self.transcript.info(format!("Starting {}", self.launch));

        let running = match spawn_supervised(self.launch.clone(), &self.transcript, &self.registry) {
            Ok(running) => running,
            Err(e) => {
                let fallback = if self.registry.get().is_some() {
                    LifecycleState::Running
                } else {
                    LifecycleState::Stopped
                };
                self.set_state(fallback);
                return Err(e);
            }
        };

        let handle = running.handle().clone();
        info!(process = %handle, "application started");
        self.set_state(LifecycleState::Running);
        self.spawn_exit_watch(running);
        Ok(handle)
    }

    fn spawn_exit_watch(&self, running: RunningCommand) {
        let registry = Arc::clone(&self.registry);
        let state = Arc::clone(&self.state);
        let transcript = self.transcript.clone();
        let pid = running.handle().pid;

        tokio::spawn(async move {
            let result = running.wait().await;

            if !registry.clear_if(pid) {
                debug!(pid, ok = result.is_ok(), "unregistered process exited");
                return;
            }

            match result {
                Ok(_) => transcript.info("Application exited."),
                Err(e) => transcript.error(format!("Application exited: {e}")),
            }
            state.send_replace(LifecycleState::Stopped);
        });
    }

    /// Kill the registered process tree.
    ///
    /// Returns as soon as the kill has been issued; it does not wait for the
    /// process to be reaped.
    pub async fn stop(&self) -> Result<TerminateOutcome> {
        if self.registry.get().is_none() {
            let outcome = self.registry.terminate(&self.transcript).await?;
            self.set_state(LifecycleState::Stopped);
            return Ok(outcome);
        }

        self.set_state(LifecycleState::Stopping);
        match self.registry.terminate(&self.transcript).await {
            Ok(outcome) => {
                if let TerminateOutcome::Terminated(handle) = &outcome {
                    self.transcript.info(format!("Process terminated: {handle}"));
                }
                self.set_state(LifecycleState::Stopped);
                Ok(outcome)
            }
            Err(e) => {
                self.set_state(LifecycleState::Running);
                Err(e)
            }
        }
    }
}
