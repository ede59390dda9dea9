//! Service layer for the task lifecycle and approval workflow.

use super::requests::{CreateTaskRequest, SubmitTaskRequest, TaskFilter, UpdateTaskRequest};
use crate::directory::domain::UserId;
use crate::store::{
    domain::{MissingEntity, PortalSnapshot},
    ports::{SnapshotRepository, SnapshotRepositoryError},
    services::EntityStore,
};
use crate::task::domain::{
    Assignment, HistoryRecorder, ResolvedAssignment, Submission, SubmissionStatus, Task,
    TaskDomainError, TaskHistoryEntry, TaskId, TaskStatus, UnresolvedAssignment, history_for,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// A referenced task, user or team does not exist.
    #[error(transparent)]
    NotFound(#[from] MissingEntity),
    /// Persisting the store failed.
    #[error(transparent)]
    Store(#[from] SnapshotRepositoryError),
}

impl TaskLifecycleError {
    /// Returns `true` for validation failures, including invalid
    /// transitions.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` when a referenced record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<UnresolvedAssignment> for TaskLifecycleError {
    fn from(err: UnresolvedAssignment) -> Self {
        match err {
            UnresolvedAssignment::UnknownTeam(team_id) => {
                Self::NotFound(MissingEntity::Team(team_id))
            }
            UnresolvedAssignment::UnknownUser(user_id) => {
                Self::NotFound(MissingEntity::User(user_id))
            }
            UnresolvedAssignment::NoAssignees => Self::Validation(TaskDomainError::NoAssignees),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Outcome of a bulk approval or rejection.
///
/// Both lists keep input order; an id repeated in the input appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Tasks that moved.
    pub changed: Vec<TaskId>,
    /// Tasks that were unknown or not awaiting approval.
    pub skipped: Vec<TaskId>,
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    store: Arc<EntityStore<R>>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<EntityStore<R>>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a task in [`TaskStatus::YetToStart`] on behalf of an
    /// administrator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown actor, team
    /// head, team or user, and [`TaskLifecycleError::Validation`] when the
    /// actor is not an administrator, the client name is blank or nobody is
    /// assigned.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
        actor: UserId,
    ) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        let task = self
            .store
            .write(|snapshot| {
                require_admin(snapshot, actor)?;
                let team_head = request.team_head.unwrap_or(actor);
                snapshot.require_user(team_head)?;
                let assignment = resolve_assignment(snapshot, &request.assignment)?;
                let task = Task::new(request.details, assignment, actor, team_head, clock)?;
                HistoryRecorder::new(&mut snapshot.task_history, clock).record(
                    task.id(),
                    task.status(),
                    actor,
                    None,
                );
                snapshot.tasks.insert(task.clone());
                Ok::<_, TaskLifecycleError>(task)
            })
            .await?;
        info!(
            task_id = %task.id(),
            actor = %actor,
            assignees = task.assigned_to().len(),
            "created task"
        );
        Ok(task)
    }

    /// Applies a partial edit.
    ///
    /// A status in the edit bypasses the lifecycle table; history is
    /// recorded only when the status actually changes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, actor,
    /// team head, team or user, and [`TaskLifecycleError::Validation`] when
    /// the actor is not an administrator, the client name becomes blank or
    /// the new assignment resolves to nobody.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        mut request: UpdateTaskRequest,
        actor: UserId,
    ) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        let new_assignment = request.assignment.take();
        let new_team_head = request.team_head;
        let new_status = request.status;
        let task = self
            .store
            .write(|snapshot| {
                require_admin(snapshot, actor)?;
                let assignment = new_assignment
                    .as_ref()
                    .map(|assignment| resolve_assignment(snapshot, assignment))
                    .transpose()?;
                if let Some(team_head) = new_team_head {
                    snapshot.require_user(team_head)?;
                }

                let task = snapshot.require_task_mut(task_id)?;
                let details = request.patched_details(task.details());
                if details != *task.details() {
                    task.replace_details(details, clock)?;
                }
                if let Some(resolved) = assignment {
                    task.reassign(resolved, clock);
                }
                if let Some(team_head) = new_team_head {
                    task.set_team_head(team_head, clock);
                }
                let status_changed =
                    new_status.is_some_and(|status| task.override_status(status, clock));
                let updated = task.clone();

                if status_changed {
                    HistoryRecorder::new(&mut snapshot.task_history, clock).record(
                        task_id,
                        updated.status(),
                        actor,
                        None,
                    );
                }
                Ok::<_, TaskLifecycleError>(updated)
            })
            .await?;
        info!(task_id = %task_id, actor = %actor, status = %task.status(), "updated task");
        Ok(task)
    }

    /// Sets the status directly, bypassing the lifecycle table.
    ///
    /// History is recorded only when the status differs from the current
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task or
    /// actor and [`TaskLifecycleError::Validation`] when the actor is not an
    /// administrator.
    pub async fn update_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        actor: UserId,
    ) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        self.store
            .write(|snapshot| {
                require_admin(snapshot, actor)?;
                let task = snapshot.require_task_mut(task_id)?;
                let previous = task.status();
                let changed = task.override_status(status, clock);
                let updated = task.clone();
                if changed {
                    HistoryRecorder::new(&mut snapshot.task_history, clock)
                        .record(task_id, status, actor, None);
                    info!(
                        task_id = %task_id,
                        actor = %actor,
                        from = %previous,
                        to = %status,
                        "set task status"
                    );
                }
                Ok(updated)
            })
            .await
    }

    /// Deletes a task with its submissions, history and time entries.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task or
    /// actor and [`TaskLifecycleError::Validation`] when the actor is not an
    /// administrator.
    pub async fn delete_task(&self, task_id: TaskId, actor: UserId) -> TaskLifecycleResult<()> {
        self.store
            .write(|snapshot| {
                require_admin(snapshot, actor)?;
                snapshot
                    .remove_task_cascade(task_id)
                    .ok_or(MissingEntity::Task(task_id))?;
                Ok::<_, TaskLifecycleError>(())
            })
            .await?;
        info!(task_id = %task_id, actor = %actor, "deleted task");
        Ok(())
    }

    /// Marks a task as in progress on behalf of an assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task or
    /// employee and [`TaskLifecycleError::Validation`] when the employee is
    /// not assigned or the task has already started.
    pub async fn start_task(&self, task_id: TaskId, employee: UserId) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        let task = self
            .store
            .write(|snapshot| {
                snapshot.require_user(employee)?;
                let task = snapshot.require_task_mut(task_id)?;
                task.start(employee, clock)?;
                let started = task.clone();
                HistoryRecorder::new(&mut snapshot.task_history, clock).record(
                    task_id,
                    TaskStatus::InProgress,
                    employee,
                    None,
                );
                Ok::<_, TaskLifecycleError>(started)
            })
            .await?;
        info!(task_id = %task_id, actor = %employee, "started task");
        Ok(task)
    }

    /// Hands in work and sends the task for approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task or
    /// employee and [`TaskLifecycleError::Validation`] when the employee is
    /// not assigned, approval is already pending or the task is finished.
    pub async fn submit_task(&self, request: SubmitTaskRequest) -> TaskLifecycleResult<Submission> {
        let SubmitTaskRequest {
            task_id,
            employee_id,
            files,
            remarks,
        } = request;
        let clock = &*self.clock;
        let submission = self
            .store
            .write(|snapshot| {
                snapshot.require_user(employee_id)?;
                snapshot.require_task_mut(task_id)?.submit(employee_id, clock)?;
                let submission = Submission::new(task_id, employee_id, files, remarks, clock);
                snapshot.submissions.insert(submission.clone());
                HistoryRecorder::new(&mut snapshot.task_history, clock).record(
                    task_id,
                    TaskStatus::PendingApproval,
                    employee_id,
                    None,
                );
                Ok::<_, TaskLifecycleError>(submission)
            })
            .await?;
        info!(
            task_id = %task_id,
            actor = %employee_id,
            submission_id = %submission.id(),
            "submitted task for approval"
        );
        Ok(submission)
    }

    /// Approves submitted work.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task or
    /// actor and [`TaskLifecycleError::Validation`] when the actor is not an
    /// administrator or approval is not pending.
    pub async fn approve_task(&self, task_id: TaskId, actor: UserId) -> TaskLifecycleResult<Task> {
        let clock = &*self.clock;
        let task = self
            .store
            .write(|snapshot| {
                require_admin(snapshot, actor)?;
                approve_one(snapshot, task_id, actor, clock)
            })
            .await?;
        info!(task_id = %task_id, actor = %actor, "approved task");
        Ok(task)
    }

    /// Sends submitted work back for revision.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the remarks are
    /// blank, the actor is not an administrator or approval is not pending,
    /// and [`TaskLifecycleError::NotFound`] for an unknown task or actor.
    pub async fn reject_task(
        &self,
        task_id: TaskId,
        actor: UserId,
        remarks: &str,
    ) -> TaskLifecycleResult<Task> {
        let reason = rejection_remarks(remarks)?;
        let clock = &*self.clock;
        let task = self
            .store
            .write(|snapshot| {
                require_admin(snapshot, actor)?;
                reject_one(snapshot, task_id, actor, reason, clock)
            })
            .await?;
        info!(task_id = %task_id, actor = %actor, "rejected task");
        Ok(task)
    }

    /// Approves every listed task that is awaiting approval.
    ///
    /// Unknown tasks and tasks in any other status are skipped. The batch
    /// is persisted as one write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown actor,
    /// [`TaskLifecycleError::Validation`] for a non-administrator and
    /// [`TaskLifecycleError::Store`] when persisting fails.
    pub async fn approve_tasks(
        &self,
        task_ids: &[TaskId],
        actor: UserId,
    ) -> TaskLifecycleResult<BulkOutcome> {
        let clock = &*self.clock;
        let outcome = self
            .store
            .write(|snapshot| {
                require_admin(snapshot, actor)?;
                Ok::<_, TaskLifecycleError>(apply_bulk(snapshot, task_ids, |batch, task_id| {
                    approve_one(batch, task_id, actor, clock).is_ok()
                }))
            })
            .await?;
        info!(
            actor = %actor,
            changed = outcome.changed.len(),
            skipped = outcome.skipped.len(),
            "bulk approved tasks"
        );
        Ok(outcome)
    }

    /// Rejects every listed task that is awaiting approval.
    ///
    /// The remarks are validated before any task is touched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for blank remarks or a
    /// non-administrator, [`TaskLifecycleError::NotFound`] for an unknown
    /// actor and [`TaskLifecycleError::Store`] when persisting fails.
    pub async fn reject_tasks(
        &self,
        task_ids: &[TaskId],
        actor: UserId,
        remarks: &str,
    ) -> TaskLifecycleResult<BulkOutcome> {
        let reason = rejection_remarks(remarks)?;
        let clock = &*self.clock;
        let outcome = self
            .store
            .write(|snapshot| {
                require_admin(snapshot, actor)?;
                Ok::<_, TaskLifecycleError>(apply_bulk(snapshot, task_ids, |batch, task_id| {
                    reject_one(batch, task_id, actor, reason, clock).is_ok()
                }))
            })
            .await?;
        info!(
            actor = %actor,
            changed = outcome.changed.len(),
            skipped = outcome.skipped.len(),
            "bulk rejected tasks"
        );
        Ok(outcome)
    }

    /// Returns the tasks that pass `filter` in creation order.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.store
            .read(|snapshot| {
                snapshot
                    .tasks
                    .iter()
                    .filter(|task| filter.matches(task))
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Finds a task by identifier.
    pub async fn get_task(&self, task_id: TaskId) -> Option<Task> {
        self.store
            .read(|snapshot| snapshot.tasks.get(task_id).cloned())
            .await
    }

    /// Returns the history of a task, newest first.
    ///
    /// Unknown tasks have an empty history.
    pub async fn task_history(&self, task_id: TaskId) -> Vec<TaskHistoryEntry> {
        self.store
            .read(|snapshot| history_for(&snapshot.task_history, task_id))
            .await
    }

    /// Returns the submissions of a task, oldest first.
    pub async fn submissions_for_task(&self, task_id: TaskId) -> Vec<Submission> {
        self.store
            .read(|snapshot| {
                snapshot
                    .submissions
                    .iter()
                    .filter(|submission| submission.task_id() == task_id)
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Returns the submission currently shown for a task.
    pub async fn latest_submission(&self, task_id: TaskId) -> Option<Submission> {
        self.store
            .read(|snapshot| {
                snapshot
                    .submissions
                    .iter()
                    .filter(|submission| submission.task_id() == task_id)
                    .max_by_key(|submission| submission.submitted_at())
                    .cloned()
            })
            .await
    }

    /// Returns the tasks awaiting approval.
    pub async fn pending_approvals(&self) -> Vec<Task> {
        self.store
            .read(|snapshot| {
                snapshot
                    .tasks
                    .iter()
                    .filter(|task| task.status() == TaskStatus::PendingApproval)
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Returns the tasks assigned to a user.
    pub async fn tasks_for(&self, user_id: UserId) -> Vec<Task> {
        self.store
            .read(|snapshot| {
                snapshot
                    .tasks
                    .iter()
                    .filter(|task| task.is_assigned_to(user_id))
                    .cloned()
                    .collect()
            })
            .await
    }
}

fn require_admin(snapshot: &PortalSnapshot, actor: UserId) -> TaskLifecycleResult<()> {
    if snapshot.require_user(actor)?.is_admin() {
        return Ok(());
    }
    Err(TaskDomainError::NotPermitted(actor).into())
}

fn resolve_assignment(
    snapshot: &PortalSnapshot,
    assignment: &Assignment,
) -> TaskLifecycleResult<ResolvedAssignment> {
    let resolved = ResolvedAssignment::resolve(
        assignment,
        |team_id| {
            snapshot
                .teams
                .get(team_id)
                .map(|team| team.members().to_vec())
        },
        |user_id| snapshot.users.contains(user_id),
    )?;
    Ok(resolved)
}

fn rejection_remarks(remarks: &str) -> TaskLifecycleResult<&str> {
    let trimmed = remarks.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyRejectionRemarks.into());
    }
    Ok(trimmed)
}

fn approve_one(
    snapshot: &mut PortalSnapshot,
    task_id: TaskId,
    actor: UserId,
    clock: &impl Clock,
) -> TaskLifecycleResult<Task> {
    let task = snapshot.require_task_mut(task_id)?;
    task.approve(clock)?;
    let approved = task.clone();
    review_latest_submission(snapshot, task_id, SubmissionStatus::Approved);
    HistoryRecorder::new(&mut snapshot.task_history, clock).record(
        task_id,
        TaskStatus::Approved,
        actor,
        None,
    );
    Ok(approved)
}

fn reject_one(
    snapshot: &mut PortalSnapshot,
    task_id: TaskId,
    actor: UserId,
    remarks: &str,
    clock: &impl Clock,
) -> TaskLifecycleResult<Task> {
    let task = snapshot.require_task_mut(task_id)?;
    task.reject(clock)?;
    let rejected = task.clone();
    review_latest_submission(snapshot, task_id, SubmissionStatus::Rejected);
    HistoryRecorder::new(&mut snapshot.task_history, clock).record(
        task_id,
        TaskStatus::InProgress,
        actor,
        Some(remarks),
    );
    Ok(rejected)
}

fn review_latest_submission(
    snapshot: &mut PortalSnapshot,
    task_id: TaskId,
    outcome: SubmissionStatus,
) {
    if let Some(latest) = snapshot
        .submissions
        .iter_mut()
        .filter(|submission| submission.task_id() == task_id)
        .max_by_key(|submission| submission.submitted_at())
    {
        latest.record_review(outcome);
    }
}

/// Runs `apply` once per distinct id. A single failed transition leaves
/// the snapshot untouched, so skipping it needs no rollback.
fn apply_bulk(
    snapshot: &mut PortalSnapshot,
    task_ids: &[TaskId],
    mut apply: impl FnMut(&mut PortalSnapshot, TaskId) -> bool,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for &task_id in task_ids {
        if outcome.changed.contains(&task_id) || outcome.skipped.contains(&task_id) {
            continue;
        }
        if apply(snapshot, task_id) {
            outcome.changed.push(task_id);
        } else {
            debug!(task_id = %task_id, "skipped task in bulk transition");
            outcome.skipped.push(task_id);
        }
    }
    outcome
}
