// src/provision/mod.rs

//! Provisioning steps: everything `setup` does to the filesystem.
//!
//! - [`layout`] names every path under the data directory.
//! - [`repo`] clones or updates a git repository.
//! - [`venv`] builds the Python environment and installs dependencies.
//! - [`download`] / [`archive`] fetch and unpack the G2PW model.
//! - [`mirror`] replaces a directory with a copy of another.
//! - [`plan`] assembles the standard step list.
//!
//! [`Provisioner`] carries the shared context and implements
//! [`StepHandler`] for [`ProvisionOp`], so the pipeline can drive it without
//! knowing what any step does.

pub mod archive;
pub mod download;
pub mod layout;
pub mod mirror;
pub mod plan;
pub mod repo;
pub mod venv;

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::anyhow;
use tracing::info;

use crate::config::InstallerConfig;
use crate::errors::Result;
use crate::exec::CommandRunner;
use crate::pipeline::StepHandler;
use crate::transcript::Transcript;

pub use archive::{ArchiveFetch, extract_zip};
pub use layout::Layout;
pub use mirror::mirror_tree;
pub use plan::standard_plan;
pub use repo::RepoSync;

/// One directory copy performed by [`ProvisionOp::Mirror`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPair {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// The operations a provisioning step can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOp {
    SyncRepo { path: PathBuf, url: String },
    SetupEnvironment,
    FetchArchive(ArchiveFetch),
    Mirror(Vec<MirrorPair>),
}

/// Shared context for every provisioning operation.
pub struct Provisioner {
    layout: Layout,
    config: InstallerConfig,
    runner: Arc<dyn CommandRunner>,
    transcript: Transcript,
    http: reqwest::Client,
}

impl std::fmt::Debug for Provisioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provisioner")
            .field("layout", &self.layout)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Provisioner {
    pub fn new(
        layout: Layout,
        config: InstallerConfig,
        runner: Arc<dyn CommandRunner>,
        transcript: Transcript,
    ) -> Result<Self> {
        Ok(Self {
            layout,
            config,
            runner,
            transcript,
            http: download::http_client()?,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Copy each pair in order, stopping at the first failure.
    pub async fn mirror(&self, pairs: &[MirrorPair]) -> Result<()> {
        for pair in pairs {
            self.transcript.info(format!(
                "Copying {} to {}",
                pair.from.display(),
                pair.to.display()
            ));

            let MirrorPair { from, to } = pair.clone();
            let files = tokio::task::spawn_blocking(move || mirror_tree(&from, &to))
                .await
                .map_err(|e| anyhow!("copy task failed: {e}"))??;
            info!(from = %pair.from.display(), to = %pair.to.display(), files, "mirrored");
        }
        Ok(())
    }
}

impl StepHandler<ProvisionOp> for Provisioner {
    fn execute<'a>(
        &'a self,
        op: &'a ProvisionOp,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            match op {
                ProvisionOp::SyncRepo { path, url } => self.sync_repo(path, url).await.map(|_| ()),
                ProvisionOp::SetupEnvironment => self.setup_environment().await,
                ProvisionOp::FetchArchive(fetch) => self.fetch_archive(fetch).await,
                ProvisionOp::Mirror(pairs) => self.mirror(pairs).await,
            }
        })
    }
}
