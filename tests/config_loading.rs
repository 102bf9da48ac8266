// tests/config_loading.rs

use std::error::Error;
use std::fs;
use std::time::Duration;

use speech_installer::config::{
    InstallerConfig, config_path, load_from_path, load_or_create, resolve_data_dir, save,
    validate_config,
};
use speech_installer::errors::InstallerError;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn missing_config_is_created_with_defaults() -> TestResult {
    let tmp = tempfile::tempdir()?;

    let cfg = load_or_create(tmp.path())?;

    assert_eq!(cfg, InstallerConfig::default());
    assert!(!cfg.is_check);
    assert!(config_path(tmp.path()).is_file());
    assert_eq!(load_from_path(config_path(tmp.path()))?, cfg);
    Ok(())
}

#[test]
fn saved_values_survive_reload() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let mut cfg = InstallerConfig::default();
    cfg.git_path = "/usr/local/bin/git".into();
    cfg.is_check = true;
    cfg.timeouts.command_secs = 60;

    save(&cfg, tmp.path())?;
    let loaded = load_or_create(tmp.path())?;

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.timeouts.command(), Duration::from_secs(60));
    Ok(())
}

#[test]
fn partial_file_falls_back_to_defaults() -> TestResult {
    let tmp = tempfile::tempdir()?;
    fs::write(
        config_path(tmp.path()),
        r#"
python_path = "/opt/python3.10/bin/python3"

[sources]
branch = "develop"
"#,
    )?;

    let cfg = load_or_create(tmp.path())?;

    assert_eq!(cfg.python_path, std::path::Path::new("/opt/python3.10/bin/python3"));
    assert_eq!(cfg.git_path, std::path::Path::new("git"));
    assert_eq!(cfg.sources.branch, "develop");
    assert_eq!(cfg.sources.webui_repo, InstallerConfig::default().sources.webui_repo);
    assert_eq!(cfg.timeouts.command_secs, 900);
    Ok(())
}

#[test]
fn malformed_toml_is_rejected() -> TestResult {
    let tmp = tempfile::tempdir()?;
    fs::write(config_path(tmp.path()), "is_check = [not toml")?;

    let err = load_or_create(tmp.path()).unwrap_err();
    assert!(matches!(err, InstallerError::TomlError(_)));
    Ok(())
}

#[test]
fn validation_catches_bad_values() {
    let mut cfg = InstallerConfig::default();
    cfg.timeouts.command_secs = 0;
    assert!(matches!(validate_config(&cfg), Err(InstallerError::ConfigError(_))));

    let mut cfg = InstallerConfig::default();
    cfg.sources.g2pw_url = "https://example.invalid/model.tar.gz".to_string();
    assert!(validate_config(&cfg).is_err());

    let mut cfg = InstallerConfig::default();
    cfg.git_path = "".into();
    assert!(validate_config(&cfg).is_err());

    let mut cfg = InstallerConfig::default();
    cfg.sources.branch = "  ".to_string();
    assert!(validate_config(&cfg).is_err());

    assert!(validate_config(&InstallerConfig::default()).is_ok());
}

#[test]
fn explicit_data_dir_is_created() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let wanted = tmp.path().join("nested/data");

    let resolved = resolve_data_dir(Some(wanted.as_path()))?;

    assert_eq!(resolved, wanted);
    assert!(wanted.is_dir());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&wanted)?.permissions().mode() & 0o777;
        assert_eq!(mode & 0o077, 0);
    }
    Ok(())
}
