// src/provision/mirror.rs

use std::fs;
use std::path::Path;

use anyhow::anyhow;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{InstallerError, Result};

/// Replace `to` with a recursive copy of `from`.
///
/// The source is checked first: when it is missing the destination is left
/// untouched and [`InstallerError::MissingSource`] is returned. Returns the
/// number of files copied.
pub fn mirror_tree(from: &Path, to: &Path) -> Result<u64> {
    if !from.is_dir() {
        return Err(InstallerError::MissingSource(from.to_path_buf()));
    }

    remove_path(to)?;
    fs::create_dir_all(to)?;

    let mut copied = 0;
    for entry in WalkDir::new(from).min_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| anyhow!("walked outside {}: {e}", from.display()))?;
        let target = to.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
            copied += 1;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    debug!(from = %from.display(), to = %to.display(), files = copied, "tree mirrored");
    Ok(copied)
}

/// Remove a file, symlink or directory tree if present.
pub(crate) fn remove_path(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to = fs::read_link(link)?;
    std::os::unix::fs::symlink(points_to, target)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    fs::copy(link, target)?;
    Ok(())
}
