// src/provision/layout.rs

//! Where everything lives under the data directory.

use std::path::{Path, PathBuf};

use crate::exec::command::CommandSpec;

const REPO_DIR: &str = "zundamon";
const PRETRAINED_DIR: &str = "models";
const FINETUNED_DIR: &str = "zundamon_GPT-SoVITS";
const APP_SUBDIR: &str = "GPT-SoVITS";
const WEBUI_SCRIPT: &str = "zundamon_webui.py";

/// Filesystem layout of an installation rooted at the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub data_dir: PathBuf,
}

impl Layout {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Checkout of the web UI source repository.
    pub fn repo_dir(&self) -> PathBuf {
        self.data_dir.join(REPO_DIR)
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.repo_dir().join(".venv")
    }

    pub fn venv_python(&self) -> PathBuf {
        venv_executable(&self.venv_dir(), "python")
    }

    pub fn venv_launcher(&self) -> PathBuf {
        venv_executable(&self.venv_dir(), "streamlit")
    }

    /// Directory the web UI is launched from.
    pub fn app_dir(&self) -> PathBuf {
        self.repo_dir().join(APP_SUBDIR)
    }

    pub fn pretrained_repo_dir(&self) -> PathBuf {
        self.data_dir.join(PRETRAINED_DIR)
    }

    pub fn pretrained_dest(&self) -> PathBuf {
        self.app_dir().join("GPT_SoVITS").join("pretrained_models")
    }

    pub fn finetuned_repo_dir(&self) -> PathBuf {
        self.data_dir.join(FINETUNED_DIR)
    }

    /// `(source, destination)` for each fine-tuned weight directory.
    pub fn finetuned_pairs(&self) -> Vec<(PathBuf, PathBuf)> {
        ["GPT_weights_v2", "SoVITS_weights_v2"]
            .into_iter()
            .map(|name| (self.finetuned_repo_dir().join(name), self.app_dir().join(name)))
            .collect()
    }

    pub fn g2pw_dest(&self) -> PathBuf {
        self.app_dir().join("GPT_SoVITS").join("text").join("G2PWModel")
    }

    /// Command that runs the web UI inside the virtual environment.
    pub fn launch_spec(&self) -> CommandSpec {
        CommandSpec::new(self.venv_launcher(), self.app_dir())
            .arg("run")
            .arg(WEBUI_SCRIPT)
    }
}

#[cfg(windows)]
fn venv_executable(venv: &Path, name: &str) -> PathBuf {
    venv.join("Scripts").join(format!("{name}.exe"))
}

#[cfg(not(windows))]
fn venv_executable(venv: &Path, name: &str) -> PathBuf {
    venv.join("bin").join(name)
}
