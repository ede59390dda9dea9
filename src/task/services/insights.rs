//! Read-only dashboard counters and analytics over tasks.

use crate::directory::domain::UserId;
use crate::store::{
    domain::{Collection, MissingEntity, PortalSnapshot},
    ports::SnapshotRepository,
    services::EntityStore,
};
use crate::task::domain::{Priority, Task, TaskStatus};
use std::sync::Arc;

/// Counters shown to administrators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminDashboard {
    /// Every task.
    pub total_tasks: usize,
    /// Tasks that are completed or approved.
    pub completed: usize,
    /// Tasks not yet handed in.
    pub pending: usize,
    /// Tasks awaiting approval.
    pub pending_approvals: usize,
}

/// Counters shown to one employee over their assigned tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmployeeDashboard {
    /// Tasks assigned to the employee.
    pub assigned: usize,
    /// Assigned tasks not yet handed in.
    pub pending: usize,
    /// Assigned tasks handed in, approved or completed.
    pub completed: usize,
}

/// Number of tasks assigned to one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeWorkload {
    /// The assignee.
    pub user_id: UserId,
    /// Tasks naming the assignee.
    pub tasks: usize,
}

/// Task distribution across statuses, priorities and assignees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskAnalytics {
    /// Statuses with at least one task, in lifecycle order.
    pub by_status: Vec<(TaskStatus, usize)>,
    /// Every priority, highest first, including empty ones.
    pub by_priority: Vec<(Priority, usize)>,
    /// Assignees in first-seen task order.
    pub by_employee: Vec<EmployeeWorkload>,
}

/// Computes dashboards and analytics from the committed snapshot.
#[derive(Clone)]
pub struct TaskInsightsService<R>
where
    R: SnapshotRepository,
{
    store: Arc<EntityStore<R>>,
}

impl<R> TaskInsightsService<R>
where
    R: SnapshotRepository,
{
    /// Creates a new insights service.
    #[must_use]
    pub const fn new(store: Arc<EntityStore<R>>) -> Self {
        Self { store }
    }

    /// Returns the administrator counters.
    pub async fn admin_dashboard(&self) -> AdminDashboard {
        self.store
            .read(|snapshot| admin_dashboard(snapshot.tasks.iter()))
            .await
    }

    /// Returns the counters for one employee.
    ///
    /// # Errors
    ///
    /// Returns [`MissingEntity::User`] for an unknown user.
    pub async fn employee_dashboard(
        &self,
        user_id: UserId,
    ) -> Result<EmployeeDashboard, MissingEntity> {
        self.store
            .read(|snapshot| employee_dashboard(snapshot, user_id))
            .await
    }

    /// Returns the task distribution.
    pub async fn analytics(&self) -> TaskAnalytics {
        self.store
            .read(|snapshot| analytics(&snapshot.tasks))
            .await
    }
}

fn admin_dashboard<'a>(tasks: impl Iterator<Item = &'a Task>) -> AdminDashboard {
    tasks.fold(AdminDashboard::default(), |mut counts, task| {
        counts.total_tasks += 1;
        match task.status() {
            TaskStatus::Completed | TaskStatus::Approved => counts.completed += 1,
            TaskStatus::YetToStart | TaskStatus::InProgress => counts.pending += 1,
            TaskStatus::PendingApproval => counts.pending_approvals += 1,
        }
        counts
    })
}

fn employee_dashboard(
    snapshot: &PortalSnapshot,
    user_id: UserId,
) -> Result<EmployeeDashboard, MissingEntity> {
    snapshot.require_user(user_id)?;
    let counts = snapshot
        .tasks
        .iter()
        .filter(|task| task.is_assigned_to(user_id))
        .fold(EmployeeDashboard::default(), |mut counts, task| {
            counts.assigned += 1;
            if task.status().is_open() {
                counts.pending += 1;
            } else {
                counts.completed += 1;
            }
            counts
        });
    Ok(counts)
}

fn analytics(tasks: &Collection<Task>) -> TaskAnalytics {
    let by_status = TaskStatus::ALL
        .into_iter()
        .map(|status| {
            let count = tasks.iter().filter(|task| task.status() == status).count();
            (status, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    let by_priority = Priority::ALL
        .into_iter()
        .map(|priority| {
            let count = tasks
                .iter()
                .filter(|task| task.priority() == priority)
                .count();
            (priority, count)
        })
        .collect();

    let mut assignees: Vec<UserId> = Vec::new();
    for user_id in tasks
        .iter()
        .flat_map(|task| task.assigned_to().iter().copied())
    {
        if !assignees.contains(&user_id) {
            assignees.push(user_id);
        }
    }
    let by_employee = assignees
        .into_iter()
        .map(|user_id| EmployeeWorkload {
            user_id,
            tasks: tasks
                .iter()
                .filter(|task| task.is_assigned_to(user_id))
                .count(),
        })
        .collect();

    TaskAnalytics {
        by_status,
        by_priority,
        by_employee,
    }
}
