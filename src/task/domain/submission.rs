//! Work submitted by an employee for approval.

use super::{SubmissionId, TaskId};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Review outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// Awaiting review.
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    /// Accepted by a reviewer.
    #[serde(rename = "Approved")]
    Approved,
    /// Sent back by a reviewer.
    #[serde(rename = "Rejected")]
    Rejected,
}

impl SubmissionStatus {
    /// Returns the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingApproval => "Pending Approval",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// Files and remarks handed in for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    id: SubmissionId,
    task_id: TaskId,
    employee_id: UserId,
    submitted_files: Vec<String>,
    remarks: String,
    status: SubmissionStatus,
    submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Records a new pending submission.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        employee_id: UserId,
        submitted_files: Vec<String>,
        remarks: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            task_id,
            employee_id,
            submitted_files,
            remarks: remarks.into().trim().to_owned(),
            status: SubmissionStatus::PendingApproval,
            submitted_at: clock.utc(),
        }
    }

    /// Returns the submission identifier.
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting employee.
    #[must_use]
    pub const fn employee_id(&self) -> UserId {
        self.employee_id
    }

    /// Returns submitted file names in upload order.
    #[must_use]
    pub fn submitted_files(&self) -> &[String] {
        &self.submitted_files
    }

    /// Returns the employee's remarks.
    #[must_use]
    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    /// Returns the review outcome.
    #[must_use]
    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Records the review outcome once; later calls are ignored.
    pub(crate) fn record_review(&mut self, outcome: SubmissionStatus) {
        if self.status == SubmissionStatus::PendingApproval {
            self.status = outcome;
        }
    }
}
