use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use speech_installer::errors::{InstallerError, Result};
use speech_installer::exec::{CommandRunner, CommandSpec, ExitSummary};

/// A fake runner that:
/// - records every command it is asked to run
/// - simulates the filesystem effect of `git clone` and `python -m venv`
///   (creates the target directory)
/// - fails commands whose rendered form contains a configured substring.
#[derive(Clone, Default)]
pub struct FakeRunner {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    failures: Arc<Mutex<Vec<String>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command whose `Display` output contains `needle`.
    pub fn fail_when(&self, needle: &str) {
        self.failures.lock().unwrap().push(needle.to_string());
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Arguments of each recorded call, joined with spaces.
    pub fn arg_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| {
                c.args
                    .iter()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    fn simulate(spec: &CommandSpec) -> std::io::Result<()> {
        let args: Vec<_> = spec.args.iter().map(|a| a.to_str()).collect();
        match args.as_slice() {
            [Some("clone"), _, _] | [Some("-m"), Some("venv"), _] => {
                std::fs::create_dir_all(PathBuf::from(&spec.args[2]))
            }
            _ => Ok(()),
        }
    }
}

impl CommandRunner for FakeRunner {
    fn run_and_wait(
        &self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ExitSummary>> + Send + '_>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(spec.clone());

            let rendered = spec.to_string();
            let failing = self
                .failures
                .lock()
                .unwrap()
                .iter()
                .any(|needle| rendered.contains(needle.as_str()));
            if failing {
                return Err(InstallerError::CommandFailed {
                    program: spec.program_name(),
                    status: "exit status: 1".to_string(),
                });
            }

            Self::simulate(&spec)?;
            Ok(ExitSummary {
                program: spec.program_name(),
                code: Some(0),
            })
        })
    }
}
