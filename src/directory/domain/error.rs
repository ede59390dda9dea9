//! Error types for directory validation and parsing.

use super::{TeamId, UserId};
use thiserror::Error;

/// Errors returned while constructing or mutating directory values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The user name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// Another user already uses the email address.
    #[error("email address '{0}' is already registered")]
    DuplicateEmail(String),

    /// The team name is empty after trimming.
    #[error("team name must not be empty")]
    EmptyTeamName,

    /// The user already belongs to the team.
    #[error("user {user_id} is already a member of team {team_id}")]
    AlreadyMember {
        /// Team being modified.
        team_id: TeamId,
        /// User that is already a member.
        user_id: UserId,
    },
}

/// Error returned while parsing a role name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
