// src/types.rs

use std::fmt;

/// Severity of a transcript line.
///
/// Output read from a child's stderr is tagged `Error`, mirroring how the
/// structured log records it; this does not imply the command failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Which child output stream a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputStream::Stdout => "stdout",
            OutputStream::Stderr => "stderr",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            OutputStream::Stdout => Severity::Info,
            OutputStream::Stderr => Severity::Error,
        }
    }
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the installer transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub severity: Severity,
    /// `None` for messages produced by the installer itself.
    pub stream: Option<OutputStream>,
}

impl LogLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
            stream: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
            stream: None,
        }
    }

    pub fn from_stream(stream: OutputStream, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: stream.severity(),
            stream: Some(stream),
        }
    }
}
