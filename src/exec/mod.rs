// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs external programs with `tokio::process::Command`:
//!
//! - [`command`] holds the plain data types (`CommandSpec`, `ProcessHandle`,
//!   `ExitSummary`).
//! - [`runner`] spawns a command in its own process group, streams its
//!   output and waits with an optional timeout.
//! - [`output`] splits a child stream into transcript lines.
//! - [`tree_kill`] terminates a process together with its descendants.
//! - [`backend`] provides the `CommandRunner` trait and the production
//!   `RealCommandRunner`, which tests can replace with a fake.

pub mod backend;
pub mod command;
pub mod output;
pub mod runner;
pub mod tree_kill;

pub use backend::{CommandRunner, RealCommandRunner};
pub use command::{CommandSpec, ExitSummary, ProcessHandle};
pub use runner::{RunningCommand, run_and_wait, run_supervised, spawn_command, spawn_supervised};
pub use tree_kill::kill_tree;
