//! Project type and its ownership/membership predicates

use super::ids::{ProjectId, SectionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project: one owner, any number of members, and an ordered list of sections.
///
/// Titles are globally unique on the server; that constraint is enforced there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    pub title: String,
    pub owner: UserId,
    #[serde(default)]
    pub members: Vec<UserId>,
    #[serde(default)]
    pub sections: Vec<SectionId>,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Create a new project owned by `owner`
    pub fn new(id: impl Into<ProjectId>, title: impl Into<String>, owner: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            owner: owner.into(),
            members: Vec::new(),
            sections: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// True iff `user` is the owner, compared by id value
    pub fn is_owner(&self, user: &UserId) -> bool {
        self.owner == *user
    }

    /// True iff `user` appears in the member list. An absent user is never a member.
    pub fn is_member(&self, user: Option<&UserId>) -> bool {
        match user {
            Some(user) => self.members.iter().any(|member| member == user),
            None => false,
        }
    }

    /// Owners are always authorized, whatever the member list says
    pub fn can_access(&self, user: Option<&UserId>) -> bool {
        user.is_some_and(|u| self.is_owner(u)) || self.is_member(user)
    }

    /// Add a member unless already present or the owner. Returns whether the list changed.
    pub fn add_member(&mut self, user: UserId) -> bool {
        if self.is_owner(&user) || self.is_member(Some(&user)) {
            return false;
        }
        self.members.push(user);
        true
    }

    /// Remove a member. Returns whether the list changed.
    pub fn remove_member(&mut self, user: &UserId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != user);
        self.members.len() != before
    }
}
