// src/provision/repo.rs

use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::exec::command::CommandSpec;
use crate::provision::Provisioner;

/// What [`Provisioner::sync_repo`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoSync {
    Cloned,
    Updated,
}

impl Provisioner {
    /// Clone `url` into `path`, or update it if `path` already exists.
    ///
    /// Only existence is checked: a directory that is not a repository makes
    /// the update commands fail rather than triggering a fresh clone.
    pub async fn sync_repo(&self, path: &Path, url: &str) -> Result<RepoSync> {
        let git = &self.config.git_path;
        let timeout = self.config.timeouts.command();

        if path.exists() {
            info!(path = %path.display(), "repository present; updating");
            self.transcript
                .info(format!("Updating {}", path.display()));

            self.runner
                .run_and_wait(
                    CommandSpec::new(git, path)
                        .args(["pull", "--rebase", "origin", self.config.sources.branch.as_str()])
                        .timeout(timeout),
                )
                .await?;
            self.runner
                .run_and_wait(CommandSpec::new(git, path).args(["lfs", "pull"]).timeout(timeout))
                .await?;

            return Ok(RepoSync::Updated);
        }

        info!(path = %path.display(), url, "repository missing; cloning");
        self.transcript.info(format!("Cloning {url}"));

        self.runner
            .run_and_wait(
                CommandSpec::new(git, &self.layout.data_dir)
                    .arg("clone")
                    .arg(url)
                    .arg(path)
                    .timeout(timeout),
            )
            .await?;

        Ok(RepoSync::Cloned)
    }
}
