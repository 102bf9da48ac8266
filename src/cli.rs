// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `speech-installer`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "speech-installer",
    version,
    about = "Provision and launch the zundamon speech web UI.",
    long_about = None
)]
pub struct CliArgs {
    /// Data directory holding the config, logs, repositories and models.
    ///
    /// Default: `SPEECH_INSTALLER_HOME`, else the platform data directory.
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SPEECH_INSTALLER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Verify that git-lfs, a supported Python and CMake are available.
    Check,

    /// Clone/update repositories, build the environment and place models.
    Setup {
        /// Skip the remaining steps after the first failure.
        #[arg(long)]
        fail_fast: bool,

        /// Print the steps without running anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Launch the web UI and keep it running until Ctrl-C.
    Start,

    /// Set the git and/or Python executable.
    Paths {
        #[arg(long, value_name = "PATH")]
        git: Option<PathBuf>,

        #[arg(long, value_name = "PATH")]
        python: Option<PathBuf>,
    },

    /// Print the current configuration.
    ShowConfig,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
