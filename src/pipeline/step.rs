// src/pipeline/step.rs

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

/// One named unit of work: a display message plus an operation tag.
///
/// The pipeline never looks inside `op`; a [`StepHandler`] gives it meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<Op> {
    pub name: String,
    pub op: Op,
}

impl<Op> Step<Op> {
    pub fn new(name: impl Into<String>, op: Op) -> Self {
        Self {
            name: name.into(),
            op,
        }
    }
}

/// Executes step operations of type `Op`.
pub trait StepHandler<Op>: Send + Sync + 'static {
    fn execute<'a>(&'a self, op: &'a Op) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Failed(String),
    /// Not run because an earlier step failed under
    /// [`FailurePolicy::AbortOnFirstFailure`](super::FailurePolicy).
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
}

impl StepReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, StepStatus::Failed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            StepStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
