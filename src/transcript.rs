// src/transcript.rs

//! The installer transcript: every user-visible line goes through here.
//!
//! A pushed line is delivered to two sinks:
//! - a `tracing` event under the [`TRANSCRIPT_TARGET`] target (picked up by
//!   the JSON log file layer), and
//! - an in-memory, append-only list that stands in for the scrollable log
//!   view, optionally echoed to stdout.
//!
//! `Transcript` is cheap to clone and safe to share across tasks.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing::{error, info};

use crate::types::{LogLine, Severity};

/// `tracing` target used for transcript events.
pub const TRANSCRIPT_TARGET: &str = "transcript";

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Arc<Mutex<Vec<LogLine>>>,
    echo: bool,
}

impl Transcript {
    /// In-memory only (used by tests and library callers).
    pub fn new() -> Self {
        Self::default()
    }

    /// Also print every line to stdout as it arrives.
    pub fn with_echo() -> Self {
        Self {
            lines: Arc::default(),
            echo: true,
        }
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(LogLine::info(text));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(LogLine::error(text));
    }

    pub fn push(&self, line: LogLine) {
        let stream = line.stream.map(|s| s.as_str()).unwrap_or("installer");
        match line.severity {
            Severity::Info => info!(target: TRANSCRIPT_TARGET, stream, "{}", line.text),
            Severity::Error => error!(target: TRANSCRIPT_TARGET, stream, "{}", line.text),
        }

        if self.echo {
            let mut out = std::io::stdout().lock();
            let _ = writeln!(out, "{}", line.text);
        }

        // Append-only, so a poisoned lock still holds a valid list.
        let mut guard = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        guard.push(line);
    }

    /// Snapshot of all lines pushed so far.
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.lines().into_iter().map(|l| l.text).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
