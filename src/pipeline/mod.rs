// src/pipeline/mod.rs

//! Sequential, non-aborting step pipeline.
//!
//! [`step`] defines the `{name, op}` step pairs and the `StepHandler`
//! strategy that executes them; [`executor`] runs a list of steps in order
//! and reports each outcome.

pub mod executor;
pub mod step;

pub use executor::{FailurePolicy, Pipeline};
pub use step::{Step, StepHandler, StepReport, StepStatus};
