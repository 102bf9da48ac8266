// src/provision/plan.rs

use crate::config::Sources;
use crate::errors::{InstallerError, Result};
use crate::pipeline::Step;
use crate::provision::archive::ArchiveFetch;
use crate::provision::layout::Layout;
use crate::provision::{MirrorPair, ProvisionOp};

/// The full setup sequence, in the order it must run.
pub fn standard_plan(layout: &Layout, sources: &Sources) -> Result<Vec<Step<ProvisionOp>>> {
    let archive_name = archive_file_name(&sources.g2pw_url)?;
    let extracted_name = archive_name
        .strip_suffix(".zip")
        .unwrap_or(&archive_name)
        .to_string();

    let steps = vec![
        Step::new(
            "Updating repository...",
            ProvisionOp::SyncRepo {
                path: layout.repo_dir(),
                url: sources.webui_repo.clone(),
            },
        ),
        Step::new("Setting up Python environment...", ProvisionOp::SetupEnvironment),
        Step::new(
            "Fetching pretrained models...",
            ProvisionOp::SyncRepo {
                path: layout.pretrained_repo_dir(),
                url: sources.pretrained_repo.clone(),
            },
        ),
        Step::new(
            "Copying pretrained models...",
            ProvisionOp::Mirror(vec![MirrorPair {
                from: layout.pretrained_repo_dir(),
                to: layout.pretrained_dest(),
            }]),
        ),
        Step::new(
            "Downloading G2PW model...",
            ProvisionOp::FetchArchive(ArchiveFetch {
                url: sources.g2pw_url.clone(),
                archive: layout.data_dir.join(&archive_name),
                extract_root: layout.data_dir.clone(),
                extracted_dir: layout.data_dir.join(&extracted_name),
                install_to: Some(layout.g2pw_dest()),
            }),
        ),
        Step::new(
            "Fetching fine-tuned models...",
            ProvisionOp::SyncRepo {
                path: layout.finetuned_repo_dir(),
                url: sources.finetuned_repo.clone(),
            },
        ),
        Step::new(
            "Copying fine-tuned models...",
            ProvisionOp::Mirror(
                layout
                    .finetuned_pairs()
                    .into_iter()
                    .map(|(from, to)| MirrorPair { from, to })
                    .collect(),
            ),
        ),
    ];

    Ok(steps)
}

/// Last path segment of an archive URL, query and fragment stripped.
pub fn archive_file_name(url: &str) -> Result<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .next()
        .filter(|name| name.ends_with(".zip") && name.len() > ".zip".len())
        .map(str::to_string)
        .ok_or_else(|| {
            InstallerError::ConfigError(format!("cannot derive an archive file name from {url}"))
        })
}
