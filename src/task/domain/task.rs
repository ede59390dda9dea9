//! Task aggregate root and its descriptive details.

use super::{Priority, ResolvedAssignment, TaskDomainError, TaskId, TaskStatus};
use crate::directory::domain::{TeamId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Descriptive client-work fields of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    /// Client the work is for.
    pub client_name: String,
    /// Client grouping such as `Corporate` or `Internal`.
    #[serde(default)]
    pub client_group: String,
    /// Task priority.
    #[serde(default)]
    pub priority: Priority,
    /// When the work came in.
    pub inward_date: DateTime<Utc>,
    /// Hard deadline.
    pub due_date: NaiveDate,
    /// Internal target date, usually ahead of the deadline.
    pub target_date: NaiveDate,
    /// Whether the task is internal work rather than client work.
    #[serde(default)]
    pub internal_work: bool,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Work categories such as `GST` or `Audit`.
    #[serde(default)]
    pub work_type: Vec<String>,
    /// Attachment references in upload order.
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl TaskDetails {
    /// Creates details with the required fields and defaults elsewhere.
    #[must_use]
    pub fn new(
        client_name: impl Into<String>,
        inward_date: DateTime<Utc>,
        due_date: NaiveDate,
        target_date: NaiveDate,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            client_group: String::new(),
            priority: Priority::default(),
            inward_date,
            due_date,
            target_date,
            internal_work: false,
            description: String::new(),
            work_type: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Trims text fields and collapses work types into a duplicate-free
    /// list.
    fn normalized(self) -> Result<Self, TaskDomainError> {
        let client_name = self.client_name.trim().to_owned();
        if client_name.is_empty() {
            return Err(TaskDomainError::EmptyClientName);
        }

        let mut work_type: Vec<String> = Vec::with_capacity(self.work_type.len());
        for kind in self.work_type {
            let trimmed = kind.trim();
            if !trimmed.is_empty() && !work_type.iter().any(|existing| existing == trimmed) {
                work_type.push(trimmed.to_owned());
            }
        }

        Ok(Self {
            client_name,
            client_group: self.client_group.trim().to_owned(),
            description: self.description.trim().to_owned(),
            work_type,
            ..self
        })
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    #[serde(flatten)]
    details: TaskDetails,
    assigned_to: Vec<UserId>,
    #[serde(default)]
    assigned_teams: Vec<TeamId>,
    team_head: UserId,
    created_by: UserId,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted descriptive details.
    pub details: TaskDetails,
    /// Persisted assignees.
    pub assigned_to: Vec<UserId>,
    /// Persisted assigned teams.
    pub assigned_teams: Vec<TeamId>,
    /// Persisted team head.
    pub team_head: UserId,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::YetToStart`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyClientName`] when the client name is
    /// blank.
    pub fn new(
        details: TaskDetails,
        assignment: ResolvedAssignment,
        created_by: UserId,
        team_head: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let normalized = details.normalized()?;
        let (assigned_to, assigned_teams) = assignment.into_parts();
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            details: normalized,
            assigned_to,
            assigned_teams,
            team_head,
            created_by,
            status: TaskStatus::YetToStart,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            details: data.details,
            assigned_to: data.assigned_to,
            assigned_teams: data.assigned_teams,
            team_head: data.team_head,
            created_by: data.created_by,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the descriptive details.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the client name.
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.details.client_name
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.details.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the resolved assignees.
    #[must_use]
    pub fn assigned_to(&self) -> &[UserId] {
        &self.assigned_to
    }

    /// Returns the teams the task was assigned through.
    #[must_use]
    pub fn assigned_teams(&self) -> &[TeamId] {
        &self.assigned_teams
    }

    /// Returns the supervising user.
    #[must_use]
    pub const fn team_head(&self) -> UserId {
        self.team_head
    }

    /// Returns the user who created the task.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the user is one of the assignees.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assigned_to.contains(&user_id)
    }

    /// Moves the task along the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the current
    /// status does not permit `target`; the task is left unchanged.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task as in progress on behalf of an assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssigned`] for users outside the
    /// assignment, or [`TaskDomainError::InvalidStateTransition`] unless the
    /// task has yet to start.
    pub fn start(&mut self, employee: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_assigned(employee)?;
        self.transition_to(TaskStatus::InProgress, clock)
    }

    /// Sends the task for approval on behalf of an assignee.
    ///
    /// Resubmitting while approval is pending is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssigned`] for users outside the
    /// assignment, or [`TaskDomainError::InvalidStateTransition`] when the
    /// task is not open.
    pub fn submit(&mut self, employee: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_assigned(employee)?;
        self.transition_to(TaskStatus::PendingApproval, clock)
    }

    /// Approves submitted work.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless approval
    /// is pending.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Approved, clock)
    }

    /// Sends submitted work back for revision.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless approval
    /// is pending.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::PendingApproval {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: TaskStatus::InProgress,
            });
        }
        self.transition_to(TaskStatus::InProgress, clock)
    }

    /// Sets the status directly, bypassing the lifecycle table.
    ///
    /// Returns `true` when the status actually changed.
    pub fn override_status(&mut self, status: TaskStatus, clock: &impl Clock) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.touch(clock);
        true
    }

    /// Replaces the descriptive details.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyClientName`] when the new client name
    /// is blank; the task is left unchanged.
    pub fn replace_details(
        &mut self,
        details: TaskDetails,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.details = details.normalized()?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the assignees with a freshly resolved assignment.
    pub fn reassign(&mut self, assignment: ResolvedAssignment, clock: &impl Clock) {
        let (assigned_to, assigned_teams) = assignment.into_parts();
        self.assigned_to = assigned_to;
        self.assigned_teams = assigned_teams;
        self.touch(clock);
    }

    /// Sets the supervising user.
    pub fn set_team_head(&mut self, team_head: UserId, clock: &impl Clock) {
        self.team_head = team_head;
        self.touch(clock);
    }

    /// Drops a deleted team from `assigned_teams`, keeping resolved
    /// assignees. Returns `true` when the team was referenced.
    pub fn detach_team(&mut self, team_id: TeamId) -> bool {
        let before = self.assigned_teams.len();
        self.assigned_teams.retain(|assigned| *assigned != team_id);
        self.assigned_teams.len() != before
    }

    fn ensure_assigned(&self, user_id: UserId) -> Result<(), TaskDomainError> {
        if self.is_assigned_to(user_id) {
            return Ok(());
        }
        Err(TaskDomainError::NotAssigned {
            task_id: self.id,
            user_id,
        })
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
