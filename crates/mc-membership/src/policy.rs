// SPDX-License-Identifier: Apache-2.0

//! The closed set of permission levels a player can be granted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MembershipError;

/// Server permission level, ordered from least to most privileged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Visitor,
    #[default]
    Member,
    Operator,
    Admin,
}

impl PermissionLevel {
    pub const ALL: [PermissionLevel; 4] = [
        PermissionLevel::Visitor,
        PermissionLevel::Member,
        PermissionLevel::Operator,
        PermissionLevel::Admin,
    ];

    /// Lower-cases `input` and matches it against the known levels.
    pub fn normalize(input: &str) -> Result<PermissionLevel, MembershipError> {
        let lowered = input.to_lowercase();
        PermissionLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == lowered)
            .ok_or_else(|| MembershipError::InvalidPermission(input.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PermissionLevel::Visitor => "visitor",
            PermissionLevel::Member => "member",
            PermissionLevel::Operator => "operator",
            PermissionLevel::Admin => "admin",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionLevel::normalize(s)
    }
}
