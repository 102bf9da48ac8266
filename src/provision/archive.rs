// src/provision/archive.rs

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing::info;
use zip::ZipArchive;

use crate::errors::Result;
use crate::provision::Provisioner;
use crate::provision::download::download_file;
use crate::provision::mirror::{mirror_tree, remove_path};

/// A zip archive to fetch, unpack and optionally install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFetch {
    pub url: String,
    /// Cache location; the download is skipped when this file exists.
    pub archive: PathBuf,
    /// Entries are extracted relative to this directory.
    pub extract_root: PathBuf,
    /// Directory the archive unpacks into; recreated on every run.
    pub extracted_dir: PathBuf,
    /// Where the extracted tree is mirrored afterwards.
    pub install_to: Option<PathBuf>,
}

impl Provisioner {
    pub async fn fetch_archive(&self, fetch: &ArchiveFetch) -> Result<()> {
        if fetch.archive.exists() {
            info!(archive = %fetch.archive.display(), "using cached archive");
        } else {
            self.transcript
                .info(format!("Downloading {}", fetch.url));
            download_file(&self.http, &fetch.url, &fetch.archive).await?;
        }

        self.transcript
            .info(format!("Extracting {}", fetch.archive.display()));

        let fetch = fetch.clone();
        let transcript = self.transcript.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            remove_path(&fetch.extracted_dir)?;
            fs::create_dir_all(&fetch.extracted_dir)?;

            let files = extract_zip(&fetch.archive, &fetch.extract_root)?;
            info!(files, root = %fetch.extract_root.display(), "archive extracted");

            if let Some(dest) = &fetch.install_to {
                transcript.info(format!("Copying {} to {}", fetch.extracted_dir.display(), dest.display()));
                mirror_tree(&fetch.extracted_dir, dest)?;
            }
            Ok(())
        })
        .await
        .map_err(|e| anyhow!("extraction task failed: {e}"))?
    }
}

/// Extract every file entry of `archive` under `dest_root`.
///
/// Directory entries are skipped (parents are created from file paths).
/// Unix permission bits stored in the archive are applied. Entries whose
/// path would escape `dest_root` abort the extraction. Returns the number
/// of files written.
pub fn extract_zip(archive: &Path, dest_root: &Path) -> Result<usize> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file))?;
    let mut written = 0;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let relative = entry
            .enclosed_name()
            .ok_or_else(|| anyhow!("archive entry escapes extraction root: {}", entry.name()))?;
        let target = dest_root.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777))?;
        }

        written += 1;
    }

    Ok(written)
}
