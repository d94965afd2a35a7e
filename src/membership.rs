//! Group membership collaborator.
//!
//! The engine never determines roles itself: who belongs to a group and who
//! administers it is supplied from outside through [`MembershipProvider`].
//! [`StaticMembership`] is an in-memory implementation for tests and
//! embedded deployments.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Role of a member within a group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Regular member: may manage only their own unavailability entries.
    Member,
    /// Administrator: may confirm and delete appointments.
    Admin,
}

/// One member of a group, as reported by the membership collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GroupMember {
    /// Identifier of the member.
    pub member_id: String,
    /// Role within the group.
    pub role: MemberRole,
}

impl GroupMember {
    /// Create a regular member.
    pub fn new(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            role: MemberRole::Member,
        }
    }

    /// Create an administrator.
    pub fn admin(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            role: MemberRole::Admin,
        }
    }
}

/// Trait for membership backends.
#[async_trait]
pub trait MembershipProvider: Send + Sync {
    /// List the members of a group. Unknown groups have no members.
    async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMember>>;

    /// Whether a member administers a group.
    async fn is_admin(&self, group_id: &str, member_id: &str) -> Result<bool>;
}

/// In-memory membership for testing and simple deployments.
pub struct StaticMembership {
    groups: RwLock<HashMap<String, Vec<GroupMember>>>,
}

impl StaticMembership {
    /// Create an empty membership table.
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// Add a member to a group, replacing any existing entry for the same id.
    pub fn add_member(&self, group_id: impl Into<String>, member: GroupMember) {
        let mut groups = self.groups.write().unwrap();
        let members = groups.entry(group_id.into()).or_default();
        members.retain(|m| m.member_id != member.member_id);
        members.push(member);
    }

    /// Remove a member from a group.
    pub fn remove_member(&self, group_id: &str, member_id: &str) {
        let mut groups = self.groups.write().unwrap();
        if let Some(members) = groups.get_mut(group_id) {
            members.retain(|m| m.member_id != member_id);
        }
    }
}

impl Default for StaticMembership {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipProvider for StaticMembership {
    async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMember>> {
        let groups = self.groups.read().unwrap();
        Ok(groups.get(group_id).cloned().unwrap_or_default())
    }

    async fn is_admin(&self, group_id: &str, member_id: &str) -> Result<bool> {
        let groups = self.groups.read().unwrap();
        Ok(groups
            .get(group_id)
            .is_some_and(|members| {
                members
                    .iter()
                    .any(|m| m.member_id == member_id && m.role == MemberRole::Admin)
            }))
    }
}
