// src/provision/venv.rs

use tracing::info;

use crate::errors::Result;
use crate::exec::command::CommandSpec;
use crate::provision::Provisioner;

impl Provisioner {
    /// Create the virtual environment if needed, then install dependencies
    /// in two passes: `requirements.txt`, followed by the pinned
    /// accelerator packages from their own index.
    pub async fn setup_environment(&self) -> Result<()> {
        let repo = self.layout.repo_dir();
        let venv = self.layout.venv_dir();
        let timeout = self.config.timeouts.command();

        if venv.exists() {
            info!(venv = %venv.display(), "reusing existing virtual environment");
            self.transcript.info("Reusing existing Python environment.");
        } else {
            self.runner
                .run_and_wait(
                    CommandSpec::new(&self.config.python_path, &repo)
                        .args(["-m", "venv"])
                        .arg(&venv)
                        .timeout(timeout),
                )
                .await?;
        }

        let python = self.layout.venv_python();

        self.runner
            .run_and_wait(
                CommandSpec::new(&python, &repo)
                    .args(["-m", "pip", "install", "-r", "requirements.txt"])
                    .timeout(timeout),
            )
            .await?;

        let sources = &self.config.sources;
        if sources.torch_packages.is_empty() {
            return Ok(());
        }

        self.runner
            .run_and_wait(
                CommandSpec::new(&python, &repo)
                    .args(["-m", "pip", "install"])
                    .args(sources.torch_packages.iter().cloned())
                    .args(["--index-url", sources.torch_index_url.as_str()])
                    .timeout(timeout),
            )
            .await?;

        Ok(())
    }
}
