// src/exec/runner.rs

//! Spawning, streaming and waiting on external commands.
//!
//! Two entry points:
//! - [`run_and_wait`]: run to completion, nothing else.
//! - [`run_supervised`] / [`spawn_supervised`]: additionally publish the live
//!   handle into a [`ProcessRegistry`] so it can be terminated later.

use std::process::{ExitStatus, Stdio};

use anyhow::anyhow;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::errors::{InstallerError, Result};
use crate::exec::command::{CommandSpec, ExitSummary, ProcessHandle};
use crate::exec::output::spawn_line_forwarder;
use crate::exec::tree_kill::kill_tree;
use crate::lifecycle::registry::ProcessRegistry;
use crate::transcript::Transcript;
use crate::types::OutputStream;

/// A command that has been started and whose output is being streamed.
#[derive(Debug)]
pub struct RunningCommand {
    spec: CommandSpec,
    child: Child,
    handle: ProcessHandle,
    readers: Vec<JoinHandle<()>>,
}

/// Start `spec` in its own process group with both output streams
/// forwarded to `transcript`.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_command(spec: CommandSpec, transcript: &Transcript) -> Result<RunningCommand> {
    if !spec.cwd.is_dir() {
        return Err(InstallerError::DirectoryNotFound(spec.cwd.clone()));
    }

    let program = spec.program_name();
    info!(cmd = %spec, cwd = %spec.cwd.display(), "spawning command");

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .current_dir(&spec.cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    isolate_process_group(&mut cmd);

    let mut child = cmd.spawn().map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            InstallerError::ProgramNotFound(spec.program.display().to_string())
        } else {
            InstallerError::Spawn {
                program: program.clone(),
                source,
            }
        }
    })?;

    let pid = child
        .id()
        .ok_or_else(|| anyhow!("'{program}' exited before its pid could be read"))?;

    let Some(stdout) = child.stdout.take() else {
        let _ = child.start_kill();
        return Err(InstallerError::Pipe {
            program,
            stream: "stdout",
        });
    };
    let Some(stderr) = child.stderr.take() else {
        let _ = child.start_kill();
        return Err(InstallerError::Pipe {
            program,
            stream: "stderr",
        });
    };

    let readers = vec![
        spawn_line_forwarder(stdout, OutputStream::Stdout, transcript.clone()),
        spawn_line_forwarder(stderr, OutputStream::Stderr, transcript.clone()),
    ];

    Ok(RunningCommand {
        spec,
        child,
        handle: ProcessHandle { pid, program },
        readers,
    })
}

#[cfg(unix)]
fn isolate_process_group(cmd: &mut Command) {
    cmd.process_group(0);
}

#[cfg(windows)]
fn isolate_process_group(cmd: &mut Command) {
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NEW_PROCESS_GROUP | CREATE_NO_WINDOW);
}

#[cfg(not(any(unix, windows)))]
fn isolate_process_group(_cmd: &mut Command) {}

impl RunningCommand {
    pub fn handle(&self) -> &ProcessHandle {
        &self.handle
    }

    /// Wait for exit and for both output streams to reach end-of-file.
    ///
    /// If `CommandSpec::timeout` is set and elapses first, the process tree is
    /// killed and reaped and [`InstallerError::TimedOut`] is returned.
    pub async fn wait(mut self) -> Result<ExitSummary> {
        let program = self.handle.program.clone();
        let readers = std::mem::take(&mut self.readers);

        let status = match self.spec.timeout {
            None => wait_and_drain(&mut self.child, readers).await?,
            Some(limit) => {
                let waited =
                    tokio::time::timeout(limit, wait_and_drain(&mut self.child, readers)).await;
                match waited {
                    Ok(status) => status?,
                    Err(_) => {
                        warn!(cmd = %self.spec, timeout = ?limit, "command timed out; killing process tree");
                        if let Err(e) = kill_tree(self.handle.pid).await {
                            warn!(pid = self.handle.pid, error = %e, "failed to kill timed-out process tree");
                        }
                        let _ = self.child.kill().await;
                        return Err(InstallerError::TimedOut {
                            program,
                            timeout: limit,
                        });
                    }
                }
            }
        };

        let code = status.code();
        info!(
            program = %program,
            exit_code = ?code,
            success = status.success(),
            "command exited"
        );

        if status.success() {
            Ok(ExitSummary { program, code })
        } else {
            Err(InstallerError::CommandFailed {
                program,
                status: status.to_string(),
            })
        }
    }
}

async fn wait_and_drain(
    child: &mut Child,
    readers: Vec<JoinHandle<()>>,
) -> std::io::Result<ExitStatus> {
    let status = child.wait().await?;
    for reader in readers {
        let _ = reader.await;
    }
    Ok(status)
}

/// Run `spec` to completion.
pub async fn run_and_wait(spec: CommandSpec, transcript: &Transcript) -> Result<ExitSummary> {
    spawn_command(spec, transcript)?.wait().await
}

/// Start `spec` and publish its handle into `registry` before returning.
///
/// A handle already in the registry is overwritten, not terminated.
pub fn spawn_supervised(
    spec: CommandSpec,
    transcript: &Transcript,
    registry: &ProcessRegistry,
) -> Result<RunningCommand> {
    let running = spawn_command(spec, transcript)?;
    registry.publish(running.handle().clone());
    Ok(running)
}

/// [`spawn_supervised`] followed by [`RunningCommand::wait`].
pub async fn run_supervised(
    spec: CommandSpec,
    transcript: &Transcript,
    registry: &ProcessRegistry,
) -> Result<ExitSummary> {
    spawn_supervised(spec, transcript, registry)?.wait().await
}
