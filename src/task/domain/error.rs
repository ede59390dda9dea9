//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::directory::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or transitioning domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The client name is empty after trimming.
    #[error("client name must not be empty")]
    EmptyClientName,

    /// The assignment resolved to no users.
    #[error("task must be assigned to at least one employee")]
    NoAssignees,

    /// Rejection remarks are empty after trimming.
    #[error("rejection remarks must not be empty")]
    EmptyRejectionRemarks,

    /// The requested lifecycle transition is not permitted.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current lifecycle status.
        from: TaskStatus,
        /// Requested lifecycle status.
        to: TaskStatus,
    },

    /// The acting employee is not assigned to the task.
    #[error("user {user_id} is not assigned to task {task_id}")]
    NotAssigned {
        /// Task being acted on.
        task_id: TaskId,
        /// Acting user.
        user_id: UserId,
    },

    /// The acting user does not hold the administrator role.
    #[error("user {0} is not permitted to perform administrator actions")]
    NotPermitted(UserId),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
