// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::InstallerConfig;
use crate::config::validate::validate_config;
use crate::errors::{InstallerError, Result};

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "speech-webui-installer";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "SPEECH_INSTALLER_HOME";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve (and create) the per-application data directory.
///
/// Priority:
/// 1. explicit override (`--data-dir`)
/// 2. `SPEECH_INSTALLER_HOME`
/// 3. `<platform data dir>/speech-webui-installer`
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => match std::env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::data_dir()
                .ok_or_else(|| {
                    InstallerError::ConfigError(
                        "could not determine the user data directory".to_string(),
                    )
                })?
                .join(APP_DIR_NAME),
        },
    };

    create_private_dir(&dir)?;
    Ok(dir)
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}

/// Read and validate a config file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<InstallerConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: InstallerConfig = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load `config.toml` from the data directory, writing the defaults first
/// if the file does not exist yet.
pub fn load_or_create(data_dir: &Path) -> Result<InstallerConfig> {
    let path = config_path(data_dir);

    match fs::metadata(&path) {
        Ok(_) => {
            debug!(path = %path.display(), "loading config");
            load_from_path(&path)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "config not found; writing defaults");
            let config = InstallerConfig::default();
            save(&config, data_dir)?;
            Ok(config)
        }
        Err(e) => Err(e.into()),
    }
}

/// Overwrite `config.toml` in the data directory.
pub fn save(config: &InstallerConfig, data_dir: &Path) -> Result<()> {
    let path = config_path(data_dir);
    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents)?;
    debug!(path = %path.display(), is_check = config.is_check, "config saved");
    Ok(())
}
