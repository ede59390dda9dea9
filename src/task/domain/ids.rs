//! Identifier types for the task domain.

use crate::identifier::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a task record.
    TaskId
}

uuid_identifier! {
    /// Unique identifier for a work submission.
    SubmissionId
}

uuid_identifier! {
    /// Unique identifier for a task history record.
    HistoryId
}
