// tests/cli_commands.rs

use std::error::Error;
use std::fs;

use clap::Parser;
use speech_installer::cli::{CliArgs, Command};
use speech_installer::config::{config_path, load_from_path};
use speech_installer::run;

type TestResult = Result<(), Box<dyn Error>>;

fn args(argv: &[&str]) -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse_from(std::iter::once("speech-installer").chain(argv.iter().copied()))
}

#[test]
fn global_flags_parse_after_subcommand() -> TestResult {
    let parsed = args(&["setup", "--fail-fast", "--data-dir", "/tmp/x", "--log-level", "debug"])?;

    assert_eq!(parsed.data_dir.as_deref(), Some(std::path::Path::new("/tmp/x")));
    assert!(parsed.log_level.is_some());
    assert!(matches!(
        parsed.command,
        Command::Setup {
            fail_fast: true,
            dry_run: false
        }
    ));
    Ok(())
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(args(&["install-everything"]).is_err());
}

#[tokio::test]
async fn paths_updates_and_persists_tool_locations() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let git = tmp.path().join("git");
    fs::write(&git, "")?;

    let parsed = args(&["paths", "--git", git.to_str().ok_or("non-utf8 path")?])?;
    run(parsed, tmp.path().to_path_buf()).await?;

    let saved = load_from_path(config_path(tmp.path()))?;
    assert_eq!(saved.git_path, git);
    assert_eq!(saved.python_path, std::path::Path::new("python"));
    Ok(())
}

#[tokio::test]
async fn paths_rejects_missing_files() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let missing = tmp.path().join("missing-python");

    let parsed = args(&["paths", "--python", missing.to_str().ok_or("non-utf8 path")?])?;
    assert!(run(parsed, tmp.path().to_path_buf()).await.is_err());

    let saved = load_from_path(config_path(tmp.path()))?;
    assert_eq!(saved.python_path, std::path::Path::new("python"));
    Ok(())
}

#[tokio::test]
async fn dry_run_touches_nothing_but_the_config() -> TestResult {
    let tmp = tempfile::tempdir()?;

    run(args(&["setup", "--dry-run"])?, tmp.path().to_path_buf()).await?;

    let entries: Vec<_> = fs::read_dir(tmp.path())?
        .map(|e| e.map(|e| e.file_name()))
        .collect::<Result<_, _>>()?;
    assert_eq!(entries, vec![std::ffi::OsString::from("config.toml")]);
    Ok(())
}

#[tokio::test]
async fn start_without_setup_fails() -> TestResult {
    // No setup has run, so the launcher does not exist.
    let tmp = tempfile::tempdir()?;
    assert!(run(args(&["start"])?, tmp.path().to_path_buf()).await.is_err());
    Ok(())
}
