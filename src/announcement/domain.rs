//! Firm-wide announcements.

use crate::identifier::uuid_identifier;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

uuid_identifier! {
    /// Unique identifier for an announcement.
    AnnouncementId
}

/// Errors returned while constructing announcements.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnnouncementDomainError {
    /// The title is empty after trimming.
    #[error("announcement title must not be empty")]
    EmptyTitle,
    /// The content is empty after trimming.
    #[error("announcement content must not be empty")]
    EmptyContent,
}

/// A notice shown to every user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    id: AnnouncementId,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl Announcement {
    /// Creates an announcement stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AnnouncementDomainError`] when the title or content is
    /// blank.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, AnnouncementDomainError> {
        let trimmed_title = title.into().trim().to_owned();
        if trimmed_title.is_empty() {
            return Err(AnnouncementDomainError::EmptyTitle);
        }
        let trimmed_content = content.into().trim().to_owned();
        if trimmed_content.is_empty() {
            return Err(AnnouncementDomainError::EmptyContent);
        }
        Ok(Self {
            id: AnnouncementId::new(),
            title: trimmed_title,
            content: trimmed_content,
            created_at: clock.utc(),
        })
    }

    /// Returns the announcement identifier.
    #[must_use]
    pub const fn id(&self) -> AnnouncementId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the publication timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
