// src/pipeline/executor.rs

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::pipeline::step::{Step, StepHandler, StepReport, StepStatus};
use crate::transcript::Transcript;

/// What to do with the remaining steps once one fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and run every remaining step anyway. Later steps may
    /// then fail as a consequence; each failure is reported on its own.
    #[default]
    Continue,
    /// Report every remaining step as skipped.
    AbortOnFirstFailure,
}

/// Runs steps one after another.
///
/// Each step executes on its own Tokio task, and the pipeline awaits that
/// task before dispatching the next one, so step N's side effects are
/// visible to step N+1. Step errors and panics are captured into the
/// returned reports and never propagate.
#[derive(Debug, Clone)]
pub struct Pipeline {
    policy: FailurePolicy,
    transcript: Transcript,
}

impl Pipeline {
    pub fn new(policy: FailurePolicy, transcript: Transcript) -> Self {
        Self { policy, transcript }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Run the pipeline in the background and return immediately.
    pub fn spawn<Op, H>(self, steps: Vec<Step<Op>>, handler: Arc<H>) -> JoinHandle<Vec<StepReport>>
    where
        Op: Send + Sync + 'static,
        H: StepHandler<Op>,
    {
        tokio::spawn(async move { self.run_all(steps, handler).await })
    }

    pub async fn run_all<Op, H>(&self, steps: Vec<Step<Op>>, handler: Arc<H>) -> Vec<StepReport>
    where
        Op: Send + Sync + 'static,
        H: StepHandler<Op>,
    {
        let total = steps.len();
        let mut reports = Vec::with_capacity(total);
        let mut aborted = false;

        self.transcript.info("Starting setup...");
        info!(total, policy = ?self.policy, "pipeline started");

        for (index, Step { name, op }) in steps.into_iter().enumerate() {
            if aborted {
                info!(step = %name, index, "skipping step after earlier failure");
                reports.push(StepReport {
                    name,
                    status: StepStatus::Skipped,
                });
                continue;
            }

            self.transcript.info(name.as_str());
            info!(step = %name, index, total, "step started");

            let handler = Arc::clone(&handler);
            let task = tokio::spawn(async move { handler.execute(&op).await });

            let status = match task.await {
                Ok(Ok(())) => StepStatus::Succeeded,
                Ok(Err(e)) => StepStatus::Failed(e.to_string()),
                Err(e) => StepStatus::Failed(format!("step task aborted: {e}")),
            };

            match &status {
                StepStatus::Failed(msg) => {
                    error!(step = %name, index, error = %msg, "step failed");
                    self.transcript.error(format!("Error: {msg}"));
                    if self.policy == FailurePolicy::AbortOnFirstFailure {
                        aborted = true;
                    }
                }
                _ => info!(step = %name, index, "step finished"),
            }

            reports.push(StepReport { name, status });
        }

        let failed = reports.iter().filter(|r| r.is_failed()).count();
        if failed == 0 {
            self.transcript.info("Setup complete.");
        } else {
            self.transcript
                .info(format!("Setup finished with {failed} failed step(s)."));
        }
        info!(total, failed, "pipeline finished");

        reports
    }
}
