// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! Provisioning steps talk to a `CommandRunner` instead of spawning
//! processes directly. Production uses [`RealCommandRunner`]; tests can
//! provide an implementation that records invocations and simulates their
//! side effects without touching git or pip.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::exec::command::{CommandSpec, ExitSummary};
use crate::exec::runner::run_and_wait;
use crate::transcript::Transcript;

/// Trait abstracting how a command is run to completion.
pub trait CommandRunner: Send + Sync {
    /// Run `spec` and wait for it, streaming output to the transcript.
    fn run_and_wait(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ExitSummary>> + Send + '_>>;
}

/// Runner that spawns real OS processes.
#[derive(Debug, Clone)]
pub struct RealCommandRunner {
    transcript: Transcript,
}

impl RealCommandRunner {
    pub fn new(transcript: Transcript) -> Self {
        Self { transcript }
    }
}

impl CommandRunner for RealCommandRunner {
    fn run_and_wait(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ExitSummary>> + Send + '_>> {
        Box::pin(async move { run_and_wait(spec, &self.transcript).await })
    }
}
