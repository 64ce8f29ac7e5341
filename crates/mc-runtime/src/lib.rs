// SPDX-License-Identifier: Apache-2.0

//! Synchronous Docker plumbing for a single managed Minecraft Bedrock container.
//!
//! Everything here shells out to the container runtime through a
//! [`CommandGateway`]. Calls block without a timeout, so a hung `docker`
//! invocation hangs the caller.

pub mod backup;
pub mod config;
pub mod gateway;
pub mod lifecycle;
pub mod logs;
pub mod remote;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use backup::{BackupError, BackupOrchestrator};
pub use config::{ConfigError, ContainerConfig, DataLayout, Settings, DEFAULT_BACKUP_NAME};
pub use gateway::{CommandGateway, CommandOutput, DockerCli};
pub use lifecycle::{ContainerManager, ContainerStatus, LifecycleError};
pub use logs::{follow_logs, FollowOutcome};
pub use remote::{Fetched, RemoteFiles, TransferError};
