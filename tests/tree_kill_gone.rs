// tests/tree_kill_gone.rs
#![cfg(any(unix, windows))]

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::path::Path;

use speech_installer::errors::InstallerError;
use speech_installer::exec::{CommandSpec, kill_tree, spawn_command};
use speech_installer::transcript::Transcript;

type TestResult = Result<(), Box<dyn Error>>;

#[cfg(unix)]
fn quick_exit(cwd: &Path) -> CommandSpec {
    CommandSpec::new("/bin/sh", cwd).arg("-c").arg("true")
}

#[cfg(windows)]
fn quick_exit(cwd: &Path) -> CommandSpec {
    CommandSpec::new("cmd", cwd).args(["/C", "exit 0"])
}

#[tokio::test]
async fn killing_an_exited_tree_is_not_an_error() -> TestResult {
    init_tracing();

    let tmp = tempfile::tempdir()?;
    let running = spawn_command(quick_exit(tmp.path()), &Transcript::new())?;
    let pid = running.handle().pid;
    with_timeout(running.wait()).await?;

    kill_tree(pid).await?;
    Ok(())
}

#[tokio::test]
async fn pid_zero_is_rejected() {
    assert!(matches!(
        kill_tree(0).await,
        Err(InstallerError::InvalidPid(0))
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn init_is_never_signalled() {
    assert!(matches!(
        kill_tree(1).await,
        Err(InstallerError::InvalidPid(1))
    ));
}
