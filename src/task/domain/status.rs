//! Task lifecycle status and priority.

use super::{ParsePriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Task has been created and assigned but work has not started.
    #[serde(rename = "Yet to Start")]
    YetToStart,
    /// Task is being worked on, or was sent back after review.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Task has been closed without the approval workflow.
    #[serde(rename = "Completed")]
    Completed,
    /// Work has been submitted and awaits review.
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    /// Submitted work has been approved.
    #[serde(rename = "Approved")]
    Approved,
}

impl TaskStatus {
    /// Every status in display order.
    pub const ALL: [Self; 5] = [
        Self::YetToStart,
        Self::InProgress,
        Self::Completed,
        Self::PendingApproval,
        Self::Approved,
    ];

    /// Returns the display label, which is also the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YetToStart => "Yet to Start",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::PendingApproval => "Pending Approval",
            Self::Approved => "Approved",
        }
    }

    /// Returns `true` when the lifecycle permits moving to `target`.
    ///
    /// Manual administrator edits bypass this table.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::YetToStart, Self::InProgress | Self::PendingApproval)
                | (Self::InProgress, Self::PendingApproval)
                | (Self::PendingApproval, Self::Approved | Self::InProgress)
        )
    }

    /// Returns `true` for statuses with no outgoing lifecycle transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Completed)
    }

    /// Returns `true` while work on the task is still outstanding.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::YetToStart | Self::InProgress)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|character| !matches!(character, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "yettostart" => Ok(Self::YetToStart),
            "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "pendingapproval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Urgent client work.
    High,
    /// Regular client work.
    #[default]
    Medium,
    /// Work that can wait.
    Low,
}

impl Priority {
    /// Every priority from highest to lowest.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
