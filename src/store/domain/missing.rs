//! Identifies a record that an operation referenced but could not find.

use crate::announcement::domain::AnnouncementId;
use crate::directory::domain::{TeamId, UserId};
use crate::task::domain::TaskId;
use thiserror::Error;

/// A referenced record absent from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingEntity {
    /// No user has this identifier.
    #[error("user {0} not found")]
    User(UserId),
    /// No team has this identifier.
    #[error("team {0} not found")]
    Team(TeamId),
    /// No task has this identifier.
    #[error("task {0} not found")]
    Task(TaskId),
    /// No announcement has this identifier.
    #[error("announcement {0} not found")]
    Announcement(AnnouncementId),
}
