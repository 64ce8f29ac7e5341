// SPDX-License-Identifier: Apache-2.0

//! Fetch, mutate and republish the membership documents.

use mc_runtime::{CommandGateway, DataLayout, RemoteFiles};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::MembershipError;
use crate::lists::{Allowlist, AllowlistEntry, PermissionList};
use crate::policy::PermissionLevel;

/// An allowlisted player joined with the levels granted to their xuid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub name: String,
    pub uuid: Option<String>,
    pub xuid: Option<String>,
    /// Levels as written in the permission list.
    pub permissions: Vec<String>,
}

pub struct MembershipStore<G> {
    files: RemoteFiles<G>,
    allowlist_path: String,
    permission_list_path: String,
}

impl<G: CommandGateway> MembershipStore<G> {
    pub fn new(files: RemoteFiles<G>, layout: &DataLayout) -> Self {
        MembershipStore {
            files,
            allowlist_path: layout.allowlist.clone(),
            permission_list_path: layout.permission_list.clone(),
        }
    }

    /// Current allowlist; empty if the document is missing or not JSON.
    pub fn allowlist(&self) -> Result<Allowlist, MembershipError> {
        self.load(&self.allowlist_path)
    }

    /// Current permission list; empty if the document is missing or not JSON.
    pub fn permission_list(&self) -> Result<PermissionList, MembershipError> {
        self.load(&self.permission_list_path)
    }

    /// Lists a new player. Fails if the name or uuid is already present.
    pub fn add_allowlist_entry(&self, name: &str, uuid: &str) -> Result<(), MembershipError> {
        let mut allowlist = self.allowlist()?;
        allowlist.insert(AllowlistEntry::new(name, uuid))?;
        self.save(&self.allowlist_path, &allowlist)?;
        info!(name, uuid, "added user to allowlist");
        Ok(())
    }

    /// Removes every allowlist entry named `name`.
    pub fn remove_allowlist_entry(&self, name: &str) -> Result<(), MembershipError> {
        let mut allowlist = self.allowlist()?;
        if allowlist.remove_named(name) == 0 {
            return Err(MembershipError::UserNotFound(name.to_string()));
        }
        self.save(&self.allowlist_path, &allowlist)?;
        info!(name, "removed user from allowlist");
        Ok(())
    }

    /// Grants `level` to the player named `name`, returning the normalized level.
    ///
    /// The player must have connected at least once so the server has filled
    /// in their xuid. Existing grants for the same xuid are not replaced.
    pub fn grant_permission(
        &self,
        name: &str,
        level: &str,
    ) -> Result<PermissionLevel, MembershipError> {
        let allowlist = self.allowlist()?;
        let entry = allowlist
            .find_by_name(name)
            .ok_or_else(|| MembershipError::UserNotFound(name.to_string()))?;
        let xuid = entry
            .xuid
            .as_deref()
            .ok_or_else(|| MembershipError::UserNotConnected(name.to_string()))?;
        let level = PermissionLevel::normalize(level)?;

        let mut permissions = self.permission_list()?;
        permissions.grant(xuid, level);
        self.save(&self.permission_list_path, &permissions)?;
        info!(name, xuid, %level, "granted permission");
        Ok(level)
    }

    /// Removes every grant held by the player named `name`.
    ///
    /// The player is looked up by name among entries that carry an xuid, so a
    /// listed player who never connected is reported as not found.
    pub fn revoke_permission(&self, name: &str) -> Result<(), MembershipError> {
        let allowlist = self.allowlist()?;
        let xuid = allowlist
            .find_by_name(name)
            .and_then(|e| e.xuid.as_deref())
            .ok_or_else(|| MembershipError::UserNotFound(name.to_string()))?;

        let mut permissions = self.permission_list()?;
        if permissions.revoke(xuid) == 0 {
            return Err(MembershipError::UserNotInPermissionList(name.to_string()));
        }
        self.save(&self.permission_list_path, &permissions)?;
        info!(name, xuid, "revoked permissions");
        Ok(())
    }

    /// Allowlist entries in order, each with its granted levels.
    pub fn members(&self) -> Result<Vec<Member>, MembershipError> {
        let allowlist = self.allowlist()?;
        let permissions = self.permission_list()?;
        let members = allowlist
            .entries()
            .iter()
            .map(|e| Member {
                name: e.name.clone().unwrap_or_default(),
                uuid: e.uuid.clone(),
                xuid: e.xuid.clone(),
                permissions: e
                    .xuid
                    .as_deref()
                    .map(|x| permissions.levels_for(x))
                    .unwrap_or_default()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
            .collect();
        Ok(members)
    }

    /// Missing or non-JSON documents load as empty. JSON that does not have
    /// the shape of the list is an error so it is never overwritten.
    fn load<T: DeserializeOwned + Default>(&self, path: &str) -> Result<T, MembershipError> {
        let fetched = self.files.read(path)?;
        if !fetched.found {
            return Ok(T::default());
        }
        let value: Value = match serde_json::from_slice(&fetched.bytes) {
            Ok(value) => value,
            Err(e) => {
                warn!(path, error = %e, "remote document is not valid JSON, treating it as empty");
                return Ok(T::default());
            }
        };
        serde_json::from_value(value).map_err(|source| MembershipError::Malformed {
            path: path.to_string(),
            source,
        })
    }

    fn save<T: Serialize>(&self, path: &str, doc: &T) -> Result<(), MembershipError> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        self.files.publish(path, &bytes)?;
        Ok(())
    }
}
