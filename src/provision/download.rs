// src/provision/download.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::errors::Result;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(30);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(1);

/// HTTP client for prerequisite downloads.
///
/// There is no overall request deadline: model archives are large, so only
/// connection setup and idle reads are bounded.
pub fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .user_agent(concat!("speech-installer/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Stream `url` into `dest`.
///
/// Data goes to `<dest>.part` first and is renamed on completion, so an
/// interrupted download never leaves a file at `dest`.
pub async fn download_file(client: &reqwest::Client, url: &str, dest: &Path) -> Result<u64> {
    let part = part_path(dest);
    info!(url, dest = %dest.display(), "downloading");

    let mut response = client.get(url).send().await?.error_for_status()?;
    let mut file = tokio::fs::File::create(&part).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&part, dest).await?;
    debug!(bytes = written, dest = %dest.display(), "download complete");
    Ok(written)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
