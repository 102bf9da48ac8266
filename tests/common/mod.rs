// tests/common/mod.rs

#![allow(dead_code)]

pub use speech_installer_test_utils::{builders, fake_runner, init_tracing, with_timeout};

use std::path::Path;

/// Write an executable shell script (unix only).
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
