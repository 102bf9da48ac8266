// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration as stored in `config.toml`.
///
/// ```toml
/// git_path = "C:/Program Files/Git/cmd/git.exe"
/// python_path = "C:/Python311/python.exe"
/// is_check = true
///
/// [sources]
/// webui_repo = "https://github.com/zunzun999/zundamon-speech-webui"
///
/// [timeouts]
/// command_secs = 900
/// ```
///
/// Every field is optional; a missing file is created from the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Git executable used for every repository operation.
    #[serde(default = "default_git_path")]
    pub git_path: PathBuf,

    /// Interpreter used to create the virtual environment and for the
    /// version check.
    #[serde(default = "default_python_path")]
    pub python_path: PathBuf,

    /// Set once the prerequisite check has passed.
    #[serde(default)]
    pub is_check: bool,

    #[serde(default)]
    pub sources: Sources,

    #[serde(default)]
    pub timeouts: Timeouts,
}

fn default_git_path() -> PathBuf {
    PathBuf::from("git")
}

fn default_python_path() -> PathBuf {
    PathBuf::from("python")
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            git_path: default_git_path(),
            python_path: default_python_path(),
            is_check: false,
            sources: Sources::default(),
            timeouts: Timeouts::default(),
        }
    }
}

/// `[sources]`: where the web UI and its models come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub webui_repo: String,
    pub pretrained_repo: String,
    pub finetuned_repo: String,
    pub g2pw_url: String,
    /// Branch pulled (with `--rebase`) when a repository already exists.
    pub branch: String,
    /// Accelerator-specific packages installed after `requirements.txt`.
    pub torch_packages: Vec<String>,
    pub torch_index_url: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            webui_repo: "https://github.com/zunzun999/zundamon-speech-webui".to_string(),
            pretrained_repo: "https://huggingface.co/lj1995/GPT-SoVITS".to_string(),
            finetuned_repo: "https://huggingface.co/zunzunpj/zundamon_GPT-SoVITS".to_string(),
            g2pw_url:
                "https://paddlespeech.bj.bcebos.com/Parakeet/released_models/g2p/G2PWModel_1.1.zip"
                    .to_string(),
            branch: "main".to_string(),
            torch_packages: vec![
                "torch==2.1.2".to_string(),
                "torchvision==0.16.2".to_string(),
                "torchaudio==2.1.2".to_string(),
            ],
            torch_index_url: "https://download.pytorch.org/whl/cu121".to_string(),
        }
    }
}

/// `[timeouts]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Upper bound for each provisioning command (clone, pip install, ...).
    pub command_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { command_secs: 15 * 60 }
    }
}

impl Timeouts {
    pub fn command(&self) -> Duration {
        Duration::from_secs(self.command_secs)
    }
}
