// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("Prerequisite check failed: {0}")]
    Prerequisite(String),

    #[error("program not found: {0}")]
    ProgramNotFound(String),

    #[error("working directory does not exist: {0:?}")]
    DirectoryNotFound(PathBuf),

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open {stream} pipe for '{program}'")]
    Pipe { program: String, stream: &'static str },

    #[error("'{program}' failed: {status}")]
    CommandFailed { program: String, status: String },

    #[error("refusing to signal process group {0}")]
    InvalidPid(u32),

    #[error("'{program}' timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },

    #[error("source directory does not exist: {0:?}")]
    MissingSource(PathBuf),

    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, InstallerError>;
