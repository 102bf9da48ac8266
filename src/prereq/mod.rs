// src/prereq/mod.rs

//! Prerequisite check run before the first setup.
//!
//! Verifies, in order: git-lfs, the Python version, CMake. The outcome is
//! persisted as `is_check` in the config file either way.

pub mod version;

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{info, warn};

use crate::config::{InstallerConfig, save};
use crate::errors::{InstallerError, Result};
use crate::transcript::Transcript;

pub use version::{PythonVersion, ensure_supported, parse_python_version, supported_range};

/// Run every check and persist the result into `config.is_check`.
pub async fn check_prerequisites(
    config: &mut InstallerConfig,
    data_dir: &Path,
    transcript: &Transcript,
) -> Result<()> {
    let result = run_checks(config, transcript).await;

    config.is_check = result.is_ok();
    let saved = save(config, data_dir);

    match &result {
        Ok(()) => transcript.info("Prerequisite check passed."),
        Err(e) => {
            warn!(error = %e, "prerequisite check failed");
            transcript.error(format!("Error: {e}"));
        }
    }

    result?;
    saved
}

async fn run_checks(config: &InstallerConfig, transcript: &Transcript) -> Result<()> {
    check_git_lfs(&config.git_path, transcript)?;
    check_python(&config.python_path, transcript).await?;
    check_cmake(transcript)?;
    Ok(())
}

/// git-lfs must be on `PATH` or next to the configured git executable.
pub fn check_git_lfs(git_path: &Path, transcript: &Transcript) -> Result<PathBuf> {
    transcript.info("Checking for git-lfs...");

    if let Ok(found) = which::which("git-lfs") {
        transcript.info("git-lfs found on PATH.");
        return Ok(found);
    }

    let git = if git_path.parent().is_some_and(|p| !p.as_os_str().is_empty()) {
        Some(git_path.to_path_buf())
    } else {
        which::which(git_path).ok()
    };

    if let Some(dir) = git.as_deref().and_then(Path::parent) {
        for name in ["git-lfs", "git-lfs.exe"] {
            let candidate = dir.join(name);
            if candidate.is_file() {
                transcript.info("git-lfs found next to git.");
                return Ok(candidate);
            }
        }
    }

    Err(InstallerError::Prerequisite(
        "git-lfs is not installed or not found in the same directory as git".to_string(),
    ))
}

pub async fn check_python(python_path: &Path, transcript: &Transcript) -> Result<PythonVersion> {
    transcript.info("Checking Python version...");

    let output = Command::new(python_path)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| {
            InstallerError::Prerequisite(format!(
                "failed to execute Python ({}): {e}",
                python_path.display()
            ))
        })?;

    if !output.status.success() {
        return Err(InstallerError::Prerequisite(format!(
            "failed to execute Python ({}): {}",
            python_path.display(),
            output.status
        )));
    }

    // Python 2 printed its version to stderr.
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    if text.trim().is_empty() {
        text = String::from_utf8_lossy(&output.stderr).into_owned();
    }

    let version = parse_python_version(&text)?;
    info!(%version, "detected Python");
    transcript.info(format!("Detected Python {version}"));

    ensure_supported(version)?;
    transcript.info("Python version is supported.");
    Ok(version)
}

pub fn check_cmake(transcript: &Transcript) -> Result<PathBuf> {
    match which::which("cmake") {
        Ok(path) => {
            transcript.info("CMake is installed.");
            Ok(path)
        }
        Err(_) => Err(InstallerError::Prerequisite(
            "CMake was not found on PATH".to_string(),
        )),
    }
}
