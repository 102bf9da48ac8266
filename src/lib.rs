// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod lifecycle;
pub mod logging;
pub mod pipeline;
pub mod prereq;
pub mod provision;
pub mod transcript;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::InstallerConfig;
use crate::errors::InstallerError;
use crate::exec::RealCommandRunner;
use crate::lifecycle::{LifecycleController, LifecycleState};
use crate::pipeline::{FailurePolicy, Pipeline, Step};
use crate::provision::{Layout, ProvisionOp, Provisioner, standard_plan};
use crate::transcript::Transcript;

/// High-level entry point used by `main.rs`.
///
/// `data_dir` must already exist (see [`config::resolve_data_dir`]).
pub async fn run(args: CliArgs, data_dir: PathBuf) -> Result<()> {
    let mut cfg = config::load_or_create(&data_dir)?;
    let transcript = Transcript::with_echo();

    match args.command {
        Command::Check => {
            prereq::check_prerequisites(&mut cfg, &data_dir, &transcript).await?;
        }
        Command::Setup { fail_fast, dry_run } => {
            let policy = if fail_fast {
                FailurePolicy::AbortOnFirstFailure
            } else {
                FailurePolicy::Continue
            };
            run_setup(cfg, &data_dir, policy, dry_run, transcript).await?;
        }
        Command::Start => {
            run_start(&data_dir, transcript).await?;
        }
        Command::Paths { git, python } => {
            update_paths(&mut cfg, &data_dir, git, python, &transcript)?;
        }
        Command::ShowConfig => {
            println!("# {}", config::config_path(&data_dir).display());
            print!("{}", toml::to_string_pretty(&cfg)?);
        }
    }

    Ok(())
}

async fn run_setup(
    cfg: InstallerConfig,
    data_dir: &Path,
    policy: FailurePolicy,
    dry_run: bool,
    transcript: Transcript,
) -> Result<()> {
    let layout = Layout::new(data_dir);
    let steps = standard_plan(&layout, &cfg.sources)?;

    if dry_run {
        print_dry_run(&cfg, &layout, &steps);
        return Ok(());
    }

    if !cfg.is_check {
        warn!("setup started before a successful prerequisite check");
        transcript.info("Prerequisite check has not passed yet; consider running `check` first.");
    }

    let runner = Arc::new(RealCommandRunner::new(transcript.clone()));
    let provisioner = Arc::new(Provisioner::new(layout, cfg, runner, transcript.clone())?);

    let reports = Pipeline::new(policy, transcript).spawn(steps, provisioner).await?;

    let failed: Vec<_> = reports.iter().filter(|r| r.is_failed()).collect();
    if !failed.is_empty() {
        let names: Vec<_> = failed.iter().map(|r| r.name.as_str()).collect();
        bail!("{} setup step(s) failed: {}", failed.len(), names.join(", "));
    }
    Ok(())
}

/// Run the web UI until Ctrl-C or until it exits on its own.
async fn run_start(data_dir: &Path, transcript: Transcript) -> Result<()> {
    let layout = Layout::new(data_dir);
    let controller = LifecycleController::new(layout.launch_spec(), transcript);
    let mut state = controller.subscribe();

    let handle = controller.start()?;
    info!(process = %handle, "web UI running; press Ctrl-C to stop");

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("Ctrl-C received; stopping web UI");
            controller.stop().await?;
        }
        res = state.wait_for(|s| *s == LifecycleState::Stopped) => {
            res?;
            debug!("web UI exited on its own");
        }
    }

    Ok(())
}

fn update_paths(
    cfg: &mut InstallerConfig,
    data_dir: &Path,
    git: Option<PathBuf>,
    python: Option<PathBuf>,
    transcript: &Transcript,
) -> Result<()> {
    if git.is_none() && python.is_none() {
        bail!("nothing to update; pass --git and/or --python");
    }

    for path in git.iter().chain(python.iter()) {
        if !path.is_file() {
            return Err(InstallerError::ConfigError(format!(
                "{} is not an existing file",
                path.display()
            ))
            .into());
        }
    }

    if let Some(git) = git {
        transcript.info(format!("git: {}", git.display()));
        cfg.git_path = git;
    }
    if let Some(python) = python {
        transcript.info(format!("python: {}", python.display()));
        cfg.python_path = python;
    }

    config::validate_config(cfg)?;
    config::save(cfg, data_dir)?;
    Ok(())
}

/// Simple dry-run output: print paths and every step.
fn print_dry_run(cfg: &InstallerConfig, layout: &Layout, steps: &[Step<ProvisionOp>]) {
    println!("speech-installer dry-run");
    println!("  data_dir = {}", layout.data_dir.display());
    println!("  git_path = {}", cfg.git_path.display());
    println!("  python_path = {}", cfg.python_path.display());
    println!("  is_check = {}", cfg.is_check);
    println!();

    println!("steps ({}):", steps.len());
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step.name);
        match &step.op {
            ProvisionOp::SyncRepo { path, url } => {
                println!("      repo: {url}");
                println!("      path: {}", path.display());
            }
            ProvisionOp::SetupEnvironment => {
                println!("      venv: {}", layout.venv_dir().display());
                println!("      torch: {:?}", cfg.sources.torch_packages);
            }
            ProvisionOp::FetchArchive(fetch) => {
                println!("      url: {}", fetch.url);
                println!("      archive: {}", fetch.archive.display());
                if let Some(dest) = &fetch.install_to {
                    println!("      install_to: {}", dest.display());
                }
            }
            ProvisionOp::Mirror(pairs) => {
                for pair in pairs {
                    println!("      copy: {} -> {}", pair.from.display(), pair.to.display());
                }
            }
        }
    }
    println!();
    println!("launch: {}", layout.launch_spec());

    debug!("dry-run complete (no execution)");
}
