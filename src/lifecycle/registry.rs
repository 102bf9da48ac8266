// src/lifecycle/registry.rs

//! The single tracked foreground process.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::errors::Result;
use crate::exec::command::ProcessHandle;
use crate::exec::tree_kill::kill_tree;
use crate::transcript::Transcript;

/// Result of [`ProcessRegistry::terminate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminateOutcome {
    /// Nothing was registered; not an error.
    NothingRunning,
    /// The tree rooted at this process was sent a kill.
    Terminated(ProcessHandle),
}

/// Holds at most one [`ProcessHandle`].
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    current: Mutex<Option<ProcessHandle>>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProcessHandle>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `handle`, returning whatever it replaced.
    ///
    /// The replaced process keeps running and is no longer reachable
    /// through the registry.
    pub fn publish(&self, handle: ProcessHandle) -> Option<ProcessHandle> {
        let previous = self.slot().replace(handle.clone());
        match &previous {
            Some(old) => warn!(
                old = %old,
                new = %handle,
                "replacing registered process without terminating it"
            ),
            None => debug!(process = %handle, "process registered"),
        }
        previous
    }

    pub fn get(&self) -> Option<ProcessHandle> {
        self.slot().clone()
    }

    pub fn take(&self) -> Option<ProcessHandle> {
        self.slot().take()
    }

    /// Clear the slot only if it still refers to `pid`.
    pub fn clear_if(&self, pid: u32) -> bool {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|h| h.pid == pid) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Kill the registered process tree, if any.
    ///
    /// The handle is unregistered before the kill is sent, so an exit
    /// watcher never mistakes the deliberate kill for a crash. With nothing
    /// registered this pushes exactly one informational line and succeeds.
    /// If the kill fails the handle is restored, unless another process was
    /// published meanwhile.
    pub async fn terminate(&self, transcript: &Transcript) -> Result<TerminateOutcome> {
        let Some(handle) = self.take() else {
            transcript.info("No running process is registered; nothing to stop.");
            return Ok(TerminateOutcome::NothingRunning);
        };

        if let Err(e) = kill_tree(handle.pid).await {
            let mut slot = self.slot();
            if slot.is_none() {
                *slot = Some(handle);
            }
            return Err(e);
        }
        debug!(process = %handle, "process tree killed");
        Ok(TerminateOutcome::Terminated(handle))
    }
}
