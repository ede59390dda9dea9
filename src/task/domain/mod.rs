//! Domain model for the task lifecycle.
//!
//! Tasks move through a small status machine; every move is written to an
//! append-only history and submissions capture the work handed in for
//! review. All infrastructure concerns stay outside this boundary.

mod assignment;
mod error;
mod history;
mod ids;
mod status;
mod submission;
mod task;

pub use assignment::{Assignment, ResolvedAssignment, UnresolvedAssignment};
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use history::{HistoryRecorder, PersistedHistoryData, TaskHistoryEntry, history_for};
pub use ids::{HistoryId, SubmissionId, TaskId};
pub use status::{Priority, TaskStatus};
pub use submission::{Submission, SubmissionStatus};
pub use task::{PersistedTaskData, Task, TaskDetails};
