//! Demonstration data for a freshly created store.

use super::PortalSnapshot;
use crate::announcement::domain::{Announcement, AnnouncementDomainError};
use crate::directory::domain::{DirectoryDomainError, EmailAddress, Role, Team, User, UserId};
use crate::task::domain::{
    Assignment, HistoryRecorder, Priority, ResolvedAssignment, Submission, Task, TaskDetails,
    TaskDomainError, TaskId, TaskStatus,
};
use crate::timesheet::domain::{TimeEntry, TimesheetDomainError, WorkedTime};
use chrono::TimeDelta;
use mockable::Clock;
use thiserror::Error;

/// Errors raised while building demonstration data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A demo user or team was invalid.
    #[error(transparent)]
    Directory(#[from] DirectoryDomainError),
    /// A demo task was invalid.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// A demo announcement was invalid.
    #[error(transparent)]
    Announcement(#[from] AnnouncementDomainError),
    /// A demo time entry was invalid.
    #[error(transparent)]
    Timesheet(#[from] TimesheetDomainError),
    /// A demo assignment referenced nobody.
    #[error("demo task assignment did not resolve")]
    Assignment,
}

struct DemoTask<'a> {
    client_name: &'a str,
    client_group: &'a str,
    priority: Priority,
    due_in_days: i64,
    description: &'a str,
    work_type: &'a [&'a str],
    internal_work: bool,
    assignment: Assignment,
}

impl PortalSnapshot {
    /// Builds a small practice with an administrator, five employees, two
    /// teams and tasks spread across the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if any demo record fails validation.
    pub fn demo(clock: &impl Clock) -> Result<Self, SeedError> {
        let mut snapshot = Self::empty();

        let admin = register(
            &mut snapshot,
            ("Admin User", "admin@firm.com", Role::Admin, "Management"),
            clock,
        )?;
        let sravan = register(
            &mut snapshot,
            ("Sravan", "sravan@firm.com", Role::Employee, "Audit Team"),
            clock,
        )?;
        let ajay = register(
            &mut snapshot,
            ("Ajay", "ajay@firm.com", Role::Employee, "Tax Team"),
            clock,
        )?;
        let sai = register(
            &mut snapshot,
            ("Sai", "sai@firm.com", Role::Employee, "Audit Team"),
            clock,
        )?;
        register(
            &mut snapshot,
            ("Abdul", "abdul@firm.com", Role::Employee, "Audit Team"),
            clock,
        )?;
        register(
            &mut snapshot,
            ("Sreeja", "sreeja@firm.com", Role::Employee, "Tax Team"),
            clock,
        )?;

        let mut audit_team = Team::new("Audit Superstars")?;
        audit_team.add_member(sravan)?;
        audit_team.add_member(sai)?;
        let audit_team_id = audit_team.id();
        snapshot.teams.insert(audit_team);

        let mut tax_team = Team::new("Tax Wizards")?;
        tax_team.add_member(ajay)?;
        snapshot.teams.insert(tax_team);

        let gst = add_task(
            &mut snapshot,
            admin,
            clock,
            &DemoTask {
                client_name: "ABC Pvt Ltd",
                client_group: "Corporate",
                priority: Priority::High,
                due_in_days: 4,
                description: "Prepare GST filing for Q3",
                work_type: &["GST", "Audit"],
                internal_work: false,
                assignment: Assignment::Employees(vec![sravan, sai]),
            },
        )?;
        advance(&mut snapshot, gst, sravan, TaskStatus::InProgress, clock);

        add_task(
            &mut snapshot,
            admin,
            clock,
            &DemoTask {
                client_name: "XYZ Corp",
                client_group: "Corporate",
                priority: Priority::Medium,
                due_in_days: 12,
                description: "Annual tax audit for FY 2024-25",
                work_type: &["Tax", "Audit"],
                internal_work: false,
                assignment: Assignment::Employees(vec![ajay]),
            },
        )?;

        let review = add_task(
            &mut snapshot,
            admin,
            clock,
            &DemoTask {
                client_name: "Internal Meeting",
                client_group: "Internal",
                priority: Priority::Low,
                due_in_days: 0,
                description: "Team performance review meeting",
                work_type: &["Internal"],
                internal_work: true,
                assignment: Assignment::Employees(vec![sravan, ajay, sai]),
            },
        )?;
        advance(&mut snapshot, review, ajay, TaskStatus::Completed, clock);

        let deck = add_task(
            &mut snapshot,
            admin,
            clock,
            &DemoTask {
                client_name: "Innovate LLC",
                client_group: "Startup",
                priority: Priority::High,
                due_in_days: 7,
                description: "Finalize investment deck financials.",
                work_type: &["Consulting"],
                internal_work: false,
                assignment: Assignment::Employees(vec![sravan]),
            },
        )?;
        advance(&mut snapshot, deck, sravan, TaskStatus::InProgress, clock);
        snapshot.submissions.insert(Submission::new(
            deck,
            sravan,
            vec!["financials_v3.xlsx".to_owned()],
            "Completed financials.",
            clock,
        ));
        advance(&mut snapshot, deck, sravan, TaskStatus::PendingApproval, clock);

        add_task(
            &mut snapshot,
            admin,
            clock,
            &DemoTask {
                client_name: "Team Task Inc",
                client_group: "Corporate",
                priority: Priority::Medium,
                due_in_days: 14,
                description: "Group audit planning session",
                work_type: &["Audit", "Planning"],
                internal_work: false,
                assignment: Assignment::Teams(vec![audit_team_id]),
            },
        )?;

        snapshot.announcements.insert(Announcement::new(
            "Upcoming Holiday",
            "The office will be closed this Friday for a national holiday.",
            clock,
        )?);
        snapshot.announcements.insert(Announcement::new(
            "New Coffee Machine!",
            "Enjoy the new espresso machine in the break room. Please keep it clean!",
            clock,
        )?);

        let today = clock.utc().date_naive();
        let yesterday = today - TimeDelta::days(1);
        for (user, task, date, minutes, description) in [
            (sravan, gst, today, 270, "Drafted initial GST report."),
            (
                sravan,
                gst,
                today - TimeDelta::days(2),
                180,
                "Follow-up queries on transactions.",
            ),
            (admin, review, yesterday, 90, "Conducted team performance review."),
        ] {
            let worked = WorkedTime::from_minutes(minutes)?;
            snapshot
                .time_entries
                .insert(TimeEntry::new(user, task, date, worked, description, clock)?);
        }

        Ok(snapshot)
    }
}

fn register(
    snapshot: &mut PortalSnapshot,
    (name, email, role, team): (&str, &str, Role, &str),
    clock: &impl Clock,
) -> Result<UserId, SeedError> {
    let user = User::new(name, EmailAddress::new(email)?, role, team, clock)?;
    let id = user.id();
    snapshot.users.insert(user);
    Ok(id)
}

fn add_task(
    snapshot: &mut PortalSnapshot,
    admin: UserId,
    clock: &impl Clock,
    demo: &DemoTask<'_>,
) -> Result<TaskId, SeedError> {
    let resolved = ResolvedAssignment::resolve(
        &demo.assignment,
        |team_id| snapshot.teams.get(team_id).map(|team| team.members().to_vec()),
        |user_id| snapshot.users.contains(user_id),
    )
    .map_err(|_| SeedError::Assignment)?;

    let now = clock.utc();
    let due_date = now.date_naive() + TimeDelta::days(demo.due_in_days);
    let target_date = due_date - TimeDelta::days(1);
    let mut details = TaskDetails::new(demo.client_name, now, due_date, target_date);
    details.client_group = demo.client_group.to_owned();
    details.priority = demo.priority;
    details.description = demo.description.to_owned();
    details.work_type = demo.work_type.iter().map(|kind| (*kind).to_owned()).collect();
    details.internal_work = demo.internal_work;

    let task = Task::new(details, resolved, admin, admin, clock)?;
    let task_id = task.id();
    snapshot.tasks.insert(task);
    HistoryRecorder::new(&mut snapshot.task_history, clock).record(
        task_id,
        TaskStatus::YetToStart,
        admin,
        None,
    );
    Ok(task_id)
}

fn advance(
    snapshot: &mut PortalSnapshot,
    task_id: TaskId,
    actor: UserId,
    status: TaskStatus,
    clock: &impl Clock,
) {
    let Some(task) = snapshot.tasks.get_mut(task_id) else {
        return;
    };
    if task.override_status(status, clock) {
        HistoryRecorder::new(&mut snapshot.task_history, clock)
            .record(task_id, status, actor, None);
    }
}
