// src/config/validate.rs

use crate::config::model::InstallerConfig;
use crate::errors::{InstallerError, Result};

/// Check the invariants serde cannot express.
pub fn validate_config(cfg: &InstallerConfig) -> Result<()> {
    validate_tool_paths(cfg)?;
    validate_sources(cfg)?;
    validate_timeouts(cfg)?;
    Ok(())
}

fn validate_tool_paths(cfg: &InstallerConfig) -> Result<()> {
    if cfg.git_path.as_os_str().is_empty() {
        return Err(InstallerError::ConfigError(
            "git_path must not be empty".to_string(),
        ));
    }
    if cfg.python_path.as_os_str().is_empty() {
        return Err(InstallerError::ConfigError(
            "python_path must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_sources(cfg: &InstallerConfig) -> Result<()> {
    let s = &cfg.sources;
    let named = [
        ("webui_repo", &s.webui_repo),
        ("pretrained_repo", &s.pretrained_repo),
        ("finetuned_repo", &s.finetuned_repo),
        ("g2pw_url", &s.g2pw_url),
        ("branch", &s.branch),
    ];
    for (key, value) in named {
        if value.trim().is_empty() {
            return Err(InstallerError::ConfigError(format!(
                "[sources].{key} must not be empty"
            )));
        }
    }

    if !s.g2pw_url.ends_with(".zip") {
        return Err(InstallerError::ConfigError(format!(
            "[sources].g2pw_url must point to a .zip archive (got {})",
            s.g2pw_url
        )));
    }

    Ok(())
}

fn validate_timeouts(cfg: &InstallerConfig) -> Result<()> {
    if cfg.timeouts.command_secs == 0 {
        return Err(InstallerError::ConfigError(
            "[timeouts].command_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
