//! Registered portal users and their roles.

use super::{DirectoryDomainError, EmailAddress, ParseRoleError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access role of a portal user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Creates, assigns and reviews tasks.
    Admin,
    /// Works on and submits assigned tasks.
    Employee,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered portal user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    role: Role,
    team: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyUserName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        email: EmailAddress,
        role: Role,
        team: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        let trimmed_name = name.into().trim().to_owned();
        if trimmed_name.is_empty() {
            return Err(DirectoryDomainError::EmptyUserName);
        }
        Ok(Self {
            id: UserId::new(),
            name: trimmed_name,
            email,
            role,
            team: team.into().trim().to_owned(),
            created_at: clock.utc(),
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the access role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` for administrators.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns the descriptive team label.
    #[must_use]
    pub fn team(&self) -> &str {
        &self.team
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
