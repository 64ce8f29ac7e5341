// SPDX-License-Identifier: Apache-2.0

//! Reading and replacing files inside the managed container's data volume.

use std::io::{self, Write};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::gateway::{argv, CommandGateway};

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to read {path} from the container: {source}")]
    Fetch { path: String, source: io::Error },
    #[error("failed to stage {path} locally: {source}")]
    Stage { path: String, source: io::Error },
    #[error("failed to copy {path} into the container: {source}")]
    Spawn { path: String, source: io::Error },
    #[error("failed to copy {path} into the container: {detail}")]
    Copy { path: String, detail: String },
}

/// Content retrieved from the container. `found` is false when the file is
/// absent or could not be read; `bytes` is empty in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub found: bool,
}

/// File access scoped to one container.
#[derive(Debug, Clone)]
pub struct RemoteFiles<G> {
    gateway: G,
    container: String,
}

impl<G: CommandGateway> RemoteFiles<G> {
    pub fn new<S: Into<String>>(gateway: G, container: S) -> Self {
        RemoteFiles {
            gateway,
            container: container.into(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Reads `path` through `exec <container> cat <path>`.
    pub fn fetch(&self, path: &str) -> Fetched {
        self.read(path).unwrap_or_else(|e| {
            warn!(path, error = %e, "could not invoke container runtime to read file");
            Fetched::default()
        })
    }

    /// Like [`fetch`](Self::fetch), but a runtime that cannot be invoked is an
    /// error rather than a missing file.
    pub fn read(&self, path: &str) -> Result<Fetched, TransferError> {
        let args = argv(["exec", self.container.as_str(), "cat", path]);
        let out = self
            .gateway
            .run(&args)
            .map_err(|source| TransferError::Fetch {
                path: path.to_string(),
                source,
            })?;

        if !out.success() {
            debug!(path, detail = %out.failure_detail(), "remote file not readable");
            return Ok(Fetched::default());
        }
        Ok(Fetched {
            bytes: out.stdout,
            found: true,
        })
    }

    /// Replaces `path` with `bytes`.
    ///
    /// The content is staged in a local temporary file which is copied in one
    /// `cp` and removed when this returns, whatever the outcome. A failed copy
    /// leaves the previous remote content in place.
    pub fn publish(&self, path: &str, bytes: &[u8]) -> Result<(), TransferError> {
        let stage_err = |source| TransferError::Stage {
            path: path.to_string(),
            source,
        };

        let mut staged = tempfile::Builder::new()
            .prefix("mc-cli-")
            .suffix(".json")
            .tempfile()
            .map_err(stage_err)?;
        staged.write_all(bytes).map_err(stage_err)?;
        staged.flush().map_err(stage_err)?;

        self.copy_in(&staged, path)
    }

    fn copy_in(&self, staged: &NamedTempFile, path: &str) -> Result<(), TransferError> {
        let local = staged.path().to_string_lossy().into_owned();
        let target = format!("{}:{path}", self.container);
        let out = self
            .gateway
            .run(&argv(["cp", local.as_str(), target.as_str()]))
            .map_err(|source| TransferError::Spawn {
                path: path.to_string(),
                source,
            })?;

        if !out.success() {
            return Err(TransferError::Copy {
                path: path.to_string(),
                detail: out.failure_detail(),
            });
        }
        let bytes = staged.as_file().metadata().map(|m| m.len()).unwrap_or(0);
        debug!(path, bytes, "published remote file");
        Ok(())
    }
}
