// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `SPEECH_INSTALLER_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Two layers are installed:
//! - JSON records to `installer-<timestamp>.log` in the data directory
//!   (transcript lines included).
//! - Human-readable records to STDERR, excluding transcript lines, which
//!   the transcript already prints to stdout.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::{LevelFilter, filter_fn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, fmt};

use crate::cli::LogLevel;
use crate::transcript::TRANSCRIPT_TARGET;

pub const LOG_ENV: &str = "SPEECH_INSTALLER_LOG";

/// Initialise the global subscriber and return the log file path.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, data_dir: &Path) -> Result<PathBuf> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var(LOG_ENV)
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    let path = data_dir.join(log_file_name());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let file_layer = fmt::layer()
        .json()
        .with_writer(Mutex::new(file))
        .with_filter(LevelFilter::from_level(level));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .with_filter(filter_fn(move |meta| {
            meta.target() != TRANSCRIPT_TARGET && *meta.level() <= level
        }));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(path)
}

fn log_file_name() -> String {
    format!("installer-{}.log", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
