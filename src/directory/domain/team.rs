//! Teams group employees for bulk task assignment.

use super::{DirectoryDomainError, TeamId, UserId};
use serde::{Deserialize, Serialize};

/// A named group of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    members: Vec<UserId>,
}

impl Team {
    /// Creates a team with no members.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyTeamName`] when the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let trimmed_name = name.into().trim().to_owned();
        if trimmed_name.is_empty() {
            return Err(DirectoryDomainError::EmptyTeamName);
        }
        Ok(Self {
            id: TeamId::new(),
            name: trimmed_name,
            members: Vec::new(),
        })
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns member identifiers in the order they joined.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// Returns `true` when the user belongs to the team.
    #[must_use]
    pub fn has_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }

    /// Adds a member.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::AlreadyMember`] if the user already
    /// belongs to the team.
    pub fn add_member(&mut self, user_id: UserId) -> Result<(), DirectoryDomainError> {
        if self.has_member(user_id) {
            return Err(DirectoryDomainError::AlreadyMember {
                team_id: self.id,
                user_id,
            });
        }
        self.members.push(user_id);
        Ok(())
    }

    /// Removes a member, returning whether the user was present.
    pub fn remove_member(&mut self, user_id: UserId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| *member != user_id);
        self.members.len() != before
    }
}
