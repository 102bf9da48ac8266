// src/exec/tree_kill.rs

//! Forceful termination of a whole process tree.
//!
//! Every command is spawned as the leader of a new process group (see
//! [`super::runner`]), so on POSIX the tree is the group and a single
//! `killpg` reaches descendants that never exec'd into another group. On
//! Windows the same job is done by `taskkill /T /F`.

use tracing::{debug, info};

use crate::errors::{InstallerError, Result};

/// Kill the process group led by `pid`.
///
/// A group that no longer exists counts as success. Pids 0 and 1 are
/// rejected with [`InstallerError::InvalidPid`].
#[cfg(unix)]
pub async fn kill_tree(pid: u32) -> Result<()> {
    let pgid = libc::pid_t::try_from(pid)
        .ok()
        .filter(|p| *p > 1)
        .ok_or(InstallerError::InvalidPid(pid))?;

    info!(pid, "killing process group");

    // SAFETY: killpg has no memory-safety preconditions; it only sends a signal.
    let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if rc == 0 {
        return Ok(());
    }

    let err = std::io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        debug!(pid, "process group already gone");
        return Ok(());
    }
    Err(err.into())
}

#[cfg(windows)]
pub async fn kill_tree(pid: u32) -> Result<()> {
    use std::process::Stdio;
    use tokio::process::Command;

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    // taskkill: "The process ... not found."
    const NOT_FOUND: i32 = 128;

    if pid == 0 {
        return Err(InstallerError::InvalidPid(pid));
    }

    info!(pid, "running taskkill on process tree");

    let status = Command::new("taskkill")
        .args(["/T", "/F", "/PID", &pid.to_string()])
        .creation_flags(CREATE_NO_WINDOW)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|source| InstallerError::Spawn {
            program: "taskkill".to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else if status.code() == Some(NOT_FOUND) {
        debug!(pid, "process tree already gone");
        Ok(())
    } else {
        Err(InstallerError::CommandFailed {
            program: "taskkill".to_string(),
            status: status.to_string(),
        })
    }
}
