// SPDX-License-Identifier: Apache-2.0

//! In-memory forms of `allowlist.json` and `permissionlist.json`.
//!
//! Both documents are bare JSON arrays. Keys the server adds to an entry that
//! this crate does not model are carried through rewrites untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MembershipError;
use crate::policy::PermissionLevel;

/// One allowlist record.
///
/// Every field is optional on read so hand-edited or server-written entries
/// survive a rewrite as they were; absent fields stay absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowlistEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Filled in by the server the first time the player connects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xuid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AllowlistEntry {
    /// A freshly listed player who has not connected yet.
    pub fn new<N: Into<String>, U: Into<String>>(name: N, uuid: U) -> Self {
        AllowlistEntry {
            name: Some(name.into()),
            uuid: Some(uuid.into()),
            xuid: None,
            extra: Map::new(),
        }
    }

    pub fn with_xuid<X: Into<String>>(mut self, xuid: X) -> Self {
        self.xuid = Some(xuid.into());
        self
    }

    pub fn has_connected(&self) -> bool {
        self.xuid.is_some()
    }

    fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// One permission grant. The level is kept as written so grants this crate
/// would not issue itself, such as `"Operator"`, are carried through rewrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionEntry {
    pub xuid: String,
    pub permission: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PermissionEntry {
    pub fn new<X: Into<String>>(xuid: X, level: PermissionLevel) -> Self {
        PermissionEntry {
            xuid: xuid.into(),
            permission: level.as_str().to_string(),
            extra: Map::new(),
        }
    }
}

/// Players allowed to join, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allowlist {
    entries: Vec<AllowlistEntry>,
}

impl Allowlist {
    pub fn new(entries: Vec<AllowlistEntry>) -> Self {
        Allowlist { entries }
    }

    pub fn entries(&self) -> &[AllowlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `entry` unless its name or uuid is already listed. Only
    /// values present on both sides are compared.
    pub fn insert(&mut self, entry: AllowlistEntry) -> Result<(), MembershipError> {
        let same = |a: &Option<String>, b: &Option<String>| a.is_some() && a == b;
        let clash = self
            .entries
            .iter()
            .any(|e| same(&e.name, &entry.name) || same(&e.uuid, &entry.uuid));
        if clash {
            return Err(MembershipError::DuplicateUser {
                name: entry.name.unwrap_or_default(),
                uuid: entry.uuid.unwrap_or_default(),
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Drops every entry named `name`, returning how many were removed.
    pub fn remove_named(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_named(name));
        before - self.entries.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&AllowlistEntry> {
        self.entries.iter().find(|e| e.is_named(name))
    }
}

/// Permission grants keyed by xuid, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionList {
    entries: Vec<PermissionEntry>,
}

impl PermissionList {
    pub fn new(entries: Vec<PermissionEntry>) -> Self {
        PermissionList { entries }
    }

    pub fn entries(&self) -> &[PermissionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a grant. Earlier grants for the same xuid are kept.
    pub fn grant(&mut self, xuid: &str, level: PermissionLevel) {
        self.entries.push(PermissionEntry::new(xuid, level));
    }

    /// Drops every grant for `xuid`, returning how many were removed.
    pub fn revoke(&mut self, xuid: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.xuid != xuid);
        before - self.entries.len()
    }

    /// Levels granted to `xuid` as written, in grant order.
    pub fn levels_for(&self, xuid: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.xuid == xuid)
            .map(|e| e.permission.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &Allowlist) -> Vec<&str> {
        list.entries()
            .iter()
            .map(|e| e.name.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn insert_rejects_name_or_uuid_clash() {
        let mut list = Allowlist::new(vec![
            AllowlistEntry::new("alice", "u1"),
            AllowlistEntry::new("bob", "u2"),
        ]);

        assert!(matches!(
            list.insert(AllowlistEntry::new("alice", "u9")),
            Err(MembershipError::DuplicateUser { .. })
        ));
        assert!(matches!(
            list.insert(AllowlistEntry::new("carol", "u2")),
            Err(MembershipError::DuplicateUser { .. })
        ));
        assert_eq!(list.len(), 2);

        list.insert(AllowlistEntry::new("Alice", "U1")).unwrap();
        assert_eq!(names(&list), vec!["alice", "bob", "Alice"]);
    }

    #[test]
    fn remove_named_preserves_survivor_order() {
        let mut list = Allowlist::new(vec![
            AllowlistEntry::new("alice", "u1"),
            AllowlistEntry::new("bob", "u2"),
            AllowlistEntry::new("carol", "u3"),
        ]);

        assert_eq!(list.remove_named("bob"), 1);
        assert_eq!(names(&list), vec!["alice", "carol"]);
        assert_eq!(list.remove_named("bob"), 0);
        assert_eq!(names(&list), vec!["alice", "carol"]);
    }

    #[test]
    fn grants_accumulate_and_revoke_clears_all() {
        let mut perms = PermissionList::default();
        perms.grant("x1", PermissionLevel::Member);
        perms.grant("x2", PermissionLevel::Visitor);
        perms.grant("x1", PermissionLevel::Admin);

        assert_eq!(perms.levels_for("x1"), vec!["member", "admin"]);
        assert_eq!(perms.revoke("x1"), 2);
        assert_eq!(perms.entries(), &[PermissionEntry::new("x2", PermissionLevel::Visitor)]);
    }

    #[test]
    fn server_written_entries_survive_a_rewrite() {
        let raw = r#"[{"name":"steve","xuid":"x9","ignoresPlayerLimit":false}]"#;
        let list: Allowlist = serde_json::from_str(raw).unwrap();

        let entry = &list.entries()[0];
        assert_eq!(entry.uuid, None);
        assert_eq!(entry.xuid.as_deref(), Some("x9"));

        let rewritten: Value = serde_json::to_value(&list).unwrap();
        assert_eq!(rewritten, serde_json::from_str::<Value>(raw).unwrap());
    }

    #[test]
    fn missing_uuid_does_not_clash_with_empty_uuid() {
        let mut list: Allowlist =
            serde_json::from_str(r#"[{"name":"steve","xuid":"x9"}]"#).unwrap();

        list.insert(AllowlistEntry::new("bob", "")).unwrap();
        assert!(matches!(
            list.insert(AllowlistEntry::new("carl", "")),
            Err(MembershipError::DuplicateUser { .. })
        ));
        assert_eq!(names(&list), vec!["steve", "bob"]);
    }

    #[test]
    fn unrecognized_levels_and_nameless_entries_are_kept() {
        let perms: PermissionList =
            serde_json::from_str(r#"[{"xuid":"x3","permission":"Operator"}]"#).unwrap();
        assert_eq!(perms.levels_for("x3"), vec!["Operator"]);

        let mut list: Allowlist = serde_json::from_str(r#"[{"uuid":"u7"}]"#).unwrap();
        list.insert(AllowlistEntry::new("alice", "u1")).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0].name, None);
    }

    #[test]
    fn absent_xuid_is_omitted() {
        let list = Allowlist::new(vec![AllowlistEntry::new("alice", "u1")]);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"name":"alice","uuid":"u1"}]"#);
    }
}
