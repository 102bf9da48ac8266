// src/lifecycle/mod.rs

//! Start/stop control for the launched web application.
//!
//! - [`registry`] tracks the one foreground process that `stop` targets.
//! - [`controller`] owns the registry together with the lifecycle state.

pub mod controller;
pub mod registry;

use std::fmt;

pub use controller::LifecycleController;
pub use registry::{ProcessRegistry, TerminateOutcome};

/// `Stopped -> Starting -> Running -> Stopping -> Stopped`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// Which user actions make sense in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub can_start: bool,
    pub can_stop: bool,
}

impl LifecycleState {
    pub fn affordances(self) -> Affordances {
        match self {
            LifecycleState::Stopped => Affordances {
                can_start: true,
                can_stop: false,
            },
            LifecycleState::Starting | LifecycleState::Running => Affordances {
                can_start: false,
                can_stop: true,
            },
            LifecycleState::Stopping => Affordances {
                can_start: false,
                can_stop: false,
            },
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Stopped => "stopped",
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::Stopping => "stopping",
        };
        f.write_str(s)
    }
}
