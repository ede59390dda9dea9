//! Request and query payloads accepted by the task lifecycle service.

use crate::directory::domain::UserId;
use crate::task::domain::{Assignment, Priority, Task, TaskDetails, TaskId, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) details: TaskDetails,
    pub(super) assignment: Assignment,
    pub(super) team_head: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request from the task details and its assignment.
    #[must_use]
    pub const fn new(details: TaskDetails, assignment: Assignment) -> Self {
        Self {
            details,
            assignment,
            team_head: None,
        }
    }

    /// Sets the supervising user; the creator supervises by default.
    #[must_use]
    pub const fn with_team_head(mut self, team_head: UserId) -> Self {
        self.team_head = Some(team_head);
        self
    }
}

/// Partial edit of an existing task. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    client_name: Option<String>,
    client_group: Option<String>,
    priority: Option<Priority>,
    inward_date: Option<DateTime<Utc>>,
    due_date: Option<NaiveDate>,
    target_date: Option<NaiveDate>,
    internal_work: Option<bool>,
    description: Option<String>,
    work_type: Option<Vec<String>>,
    attachments: Option<Vec<String>>,
    pub(super) assignment: Option<Assignment>,
    pub(super) team_head: Option<UserId>,
    pub(super) status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client name.
    #[must_use]
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    /// Sets the client group.
    #[must_use]
    pub fn with_client_group(mut self, client_group: impl Into<String>) -> Self {
        self.client_group = Some(client_group.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the inward date.
    #[must_use]
    pub const fn with_inward_date(mut self, inward_date: DateTime<Utc>) -> Self {
        self.inward_date = Some(inward_date);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the target date.
    #[must_use]
    pub const fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Marks the task as internal work or client work.
    #[must_use]
    pub const fn with_internal_work(mut self, internal_work: bool) -> Self {
        self.internal_work = Some(internal_work);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the work types.
    #[must_use]
    pub fn with_work_type(mut self, work_type: impl IntoIterator<Item = String>) -> Self {
        self.work_type = Some(work_type.into_iter().collect());
        self
    }

    /// Replaces the attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = String>) -> Self {
        self.attachments = Some(attachments.into_iter().collect());
        self
    }

    /// Reassigns the task; the assignment is resolved again.
    #[must_use]
    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignment = Some(assignment);
        self
    }

    /// Changes the supervising user.
    #[must_use]
    pub const fn with_team_head(mut self, team_head: UserId) -> Self {
        self.team_head = Some(team_head);
        self
    }

    /// Sets the status directly, bypassing the lifecycle table.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Applies the descriptive part of the edit on top of `current`.
    pub(super) fn patched_details(self, current: &TaskDetails) -> TaskDetails {
        let mut details = current.clone();
        if let Some(client_name) = self.client_name {
            details.client_name = client_name;
        }
        if let Some(client_group) = self.client_group {
            details.client_group = client_group;
        }
        if let Some(description) = self.description {
            details.description = description;
        }
        if let Some(work_type) = self.work_type {
            details.work_type = work_type;
        }
        if let Some(attachments) = self.attachments {
            details.attachments = attachments;
        }
        details.priority = self.priority.unwrap_or(details.priority);
        details.inward_date = self.inward_date.unwrap_or(details.inward_date);
        details.due_date = self.due_date.unwrap_or(details.due_date);
        details.target_date = self.target_date.unwrap_or(details.target_date);
        details.internal_work = self.internal_work.unwrap_or(details.internal_work);
        details
    }
}

/// Request payload for handing in work on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTaskRequest {
    pub(super) task_id: TaskId,
    pub(super) employee_id: UserId,
    pub(super) files: Vec<String>,
    pub(super) remarks: String,
}

impl SubmitTaskRequest {
    /// Creates a submission request with no files or remarks.
    #[must_use]
    pub const fn new(task_id: TaskId, employee_id: UserId) -> Self {
        Self {
            task_id,
            employee_id,
            files: Vec::new(),
            remarks: String::new(),
        }
    }

    /// Sets the submitted file names in upload order.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = String>) -> Self {
        self.files = files.into_iter().collect();
        self
    }

    /// Sets the employee's remarks.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }
}

/// Narrows the task list. Unset criteria match every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    search: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    assignee: Option<UserId>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps tasks whose client name contains `search`, ignoring case.
    /// Blank text matches every task.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let needle = search.into().trim().to_lowercase();
        self.search = (!needle.is_empty()).then_some(needle);
        self
    }

    /// Keeps tasks in `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keeps tasks of `priority`.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Keeps tasks assigned to `user_id`.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assignee = Some(user_id);
        self
    }

    /// Returns `true` when the task meets every criterion that is set.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.search
            .as_deref()
            .is_none_or(|needle| task.client_name().to_lowercase().contains(needle))
            && self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.assignee.is_none_or(|user_id| task.is_assigned_to(user_id))
    }
}
