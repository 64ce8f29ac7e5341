// SPDX-License-Identifier: Apache-2.0

//! Allowlist and permission list kept as JSON documents inside the server's
//! data volume.
//!
//! Every mutation is a single fetch, one in-memory change, and a full
//! rewrite of the document. There is no version check between the fetch and
//! the rewrite, so two writers racing on the same file can lose an update.

pub mod error;
pub mod lists;
pub mod policy;
pub mod store;

pub use error::MembershipError;
pub use lists::{Allowlist, AllowlistEntry, PermissionEntry, PermissionList};
pub use policy::PermissionLevel;
pub use store::{Member, MembershipStore};
