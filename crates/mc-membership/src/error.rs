// SPDX-License-Identifier: Apache-2.0

use mc_runtime::TransferError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("user already exists in allowlist (name `{name}` or uuid `{uuid}`)")]
    DuplicateUser { name: String, uuid: String },
    #[error("user `{0}` does not exist in allowlist")]
    UserNotFound(String),
    #[error("user `{0}` has not connected to the server yet, so has no xuid to grant against")]
    UserNotConnected(String),
    #[error("user `{0}` is not in the permission list")]
    UserNotInPermissionList(String),
    #[error("`{0}` is not a recognized permission level (expected visitor, member, operator or admin)")]
    InvalidPermission(String),
    #[error("{path} is valid JSON but not a list of entries: {source}")]
    Malformed {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("failed to encode list: {0}")]
    Encode(#[from] serde_json::Error),
}
