// SPDX-License-Identifier: Apache-2.0

//! Two-step world backup: archive inside the container, then copy it out.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::DataLayout;
use crate::gateway::{argv, CommandGateway};

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("failed to create archive {archive} inside the container: {detail}")]
    ArchiveFailed { archive: String, detail: String },
    #[error("failed to copy {archive} to {}: {detail}", destination.display())]
    TransferFailed {
        archive: String,
        destination: PathBuf,
        detail: String,
    },
}

pub struct BackupOrchestrator<G> {
    gateway: G,
    container: String,
    worlds_dir: String,
    backups_dir: String,
}

impl<G: CommandGateway> BackupOrchestrator<G> {
    pub fn new<S: Into<String>>(gateway: G, container: S, layout: &DataLayout) -> Self {
        BackupOrchestrator {
            gateway,
            container: container.into(),
            worlds_dir: layout.worlds_dir.clone(),
            backups_dir: layout.backups_dir.clone(),
        }
    }

    /// Archives the worlds directory as `name` and copies it into `destination`.
    ///
    /// Returns the local path of the copied archive. The archive is left inside
    /// the container whether or not the copy succeeds.
    pub fn backup(&self, name: &str, destination: &Path) -> Result<PathBuf, BackupError> {
        let archive = format!("{}/{name}", self.backups_dir.trim_end_matches('/'));

        info!(archive = %archive, "creating archive inside container");
        let archived = self.gateway.run(&argv([
            "exec",
            self.container.as_str(),
            "tar",
            "czf",
            archive.as_str(),
            self.worlds_dir.as_str(),
        ]));
        match archived {
            Ok(out) if out.success() => {}
            Ok(out) => {
                return Err(BackupError::ArchiveFailed {
                    archive,
                    detail: out.failure_detail(),
                })
            }
            Err(e) => {
                return Err(BackupError::ArchiveFailed {
                    archive,
                    detail: e.to_string(),
                })
            }
        }

        let local = destination.join(name);
        let transfer_failed = |detail: String| BackupError::TransferFailed {
            archive: archive.clone(),
            destination: destination.to_path_buf(),
            detail,
        };

        fs::create_dir_all(destination).map_err(|e| transfer_failed(e.to_string()))?;

        info!(archive = %archive, destination = %local.display(), "copying archive to local filesystem");
        let source = format!("{}:{archive}", self.container);
        let local_arg = local.to_string_lossy();
        let out = self
            .gateway
            .run(&argv(["cp", source.as_str(), &*local_arg]))
            .map_err(|e| transfer_failed(e.to_string()))?;
        if !out.success() {
            return Err(transfer_failed(out.failure_detail()));
        }

        Ok(local)
    }
}
