//! Executes parsed commands against a portal.

use super::{
    AnnouncementCommand, Command, CreateTaskArgs, TaskCommand, TeamCommand, TimeCommand,
    UserCommand, render,
};
use crate::announcement::services::AnnouncementError;
use crate::directory::domain::UserId;
use crate::directory::services::{DirectoryError, RegisterUserRequest};
use crate::portal::Portal;
use crate::store::{
    domain::{MissingEntity, PortalSnapshot, SeedError},
    ports::{SnapshotRepository, SnapshotRepositoryError},
};
use crate::task::domain::{Assignment, Priority, TaskDetails, TaskStatus};
use crate::task::services::{CreateTaskRequest, SubmitTaskRequest, TaskFilter, TaskLifecycleError};
use crate::timesheet::services::{TimeEntryFilter, TimesheetError};
use mockable::Clock;
use std::io::{self, Write};
use thiserror::Error;
use tracing::info;

/// Errors surfaced by a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A user or team operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// A task operation failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
    /// An announcement operation failed.
    #[error(transparent)]
    Announcement(#[from] AnnouncementError),
    /// A timesheet operation failed.
    #[error(transparent)]
    Timesheet(#[from] TimesheetError),
    /// A record named on the command line does not exist.
    #[error(transparent)]
    NotFound(#[from] MissingEntity),
    /// Persisting the store failed.
    #[error(transparent)]
    Store(#[from] SnapshotRepositoryError),
    /// Building the demonstration data failed.
    #[error(transparent)]
    Seed(#[from] SeedError),
    /// `seed` was asked to overwrite existing data without `--force`.
    #[error("the store already holds data; pass --force to replace it")]
    StoreNotEmpty,
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Runs one command and writes its output to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when the underlying operation fails or the output
/// cannot be written.
pub async fn run<R, C>(
    command: Command,
    portal: &Portal<R, C>,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    match command {
        Command::Seed { force } => seed(portal, force, out).await,
        Command::Users(users) => run_users(users, portal, out).await,
        Command::Teams(teams) => run_teams(teams, portal, out).await,
        Command::Tasks(tasks) => run_tasks(tasks, portal, out).await,
        Command::Announce(announcement) => run_announcements(announcement, portal, out).await,
        Command::Time(time) => run_time(time, portal, out).await,
        Command::Stats { user: Some(user_id) } => {
            let dashboard = portal.insights.employee_dashboard(user_id).await?;
            Ok(render::employee_dashboard(out, &dashboard)?)
        }
        Command::Stats { user: None } => {
            let dashboard = portal.insights.admin_dashboard().await;
            let analytics = portal.insights.analytics().await;
            Ok(render::admin_dashboard(out, &dashboard, &analytics)?)
        }
    }
}

async fn seed<R, C>(portal: &Portal<R, C>, force: bool, out: &mut impl Write) -> Result<(), CliError>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    let demo = PortalSnapshot::demo(&*portal.clock)?;
    let (users, tasks) = (demo.users.len(), demo.tasks.len());
    portal
        .store
        .write(|snapshot| {
            if !force && *snapshot != PortalSnapshot::empty() {
                return Err(CliError::StoreNotEmpty);
            }
            *snapshot = demo;
            Ok(())
        })
        .await?;
    info!(users, tasks, "seeded demo data");
    writeln!(out, "seeded {users} users and {tasks} tasks")?;
    Ok(())
}

async fn run_users<R, C>(
    command: UserCommand,
    portal: &Portal<R, C>,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    match command {
        UserCommand::List => render::users(out, &portal.directory.list_users().await)?,
        UserCommand::Add {
            name,
            email,
            role,
            team,
        } => {
            let request = RegisterUserRequest::new(name, email, role).with_team(team);
            let user = portal.directory.register_user(request).await?;
            writeln!(out, "{}", user.id())?;
        }
    }
    Ok(())
}

async fn run_teams<R, C>(
    command: TeamCommand,
    portal: &Portal<R, C>,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    let directory = &portal.directory;
    match command {
        TeamCommand::List => render::teams(out, &directory.list_teams().await)?,
        TeamCommand::Create { name } => {
            let team = directory.create_team(name).await?;
            writeln!(out, "{}", team.id())?;
        }
        TeamCommand::AddMember { team, user } => {
            let updated = directory.add_member(team, user).await?;
            render::teams(out, &[updated])?;
        }
        TeamCommand::RemoveMember { team, user } => {
            let updated = directory.remove_member(team, user).await?;
            render::teams(out, &[updated])?;
        }
        TeamCommand::Delete { team } => {
            directory.delete_team(team).await?;
            writeln!(out, "deleted {team}")?;
        }
    }
    Ok(())
}

async fn run_tasks<R, C>(
    command: TaskCommand,
    portal: &Portal<R, C>,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    let tasks = &portal.tasks;
    match command {
        TaskCommand::List {
            assignee,
            search,
            status,
            priority,
            pending_approval,
        } => {
            let filter = task_filter(assignee, search, status, priority, pending_approval);
            render::tasks(out, &tasks.list_tasks(&filter).await)?;
        }
        TaskCommand::Show { task } => {
            let found = tasks
                .get_task(task)
                .await
                .ok_or(MissingEntity::Task(task))?;
            let latest = tasks.latest_submission(task).await;
            render::task_detail(out, &found, latest.as_ref())?;
        }
        TaskCommand::Create(args) => {
            let actor = args.actor;
            let request = create_request(args, &*portal.clock);
            let created = tasks.create_task(request, actor).await?;
            writeln!(out, "{}", created.id())?;
        }
        TaskCommand::Start { task, employee } => {
            let started = tasks.start_task(task, employee).await?;
            render::tasks(out, &[started])?;
        }
        TaskCommand::Submit {
            task,
            employee,
            files,
            remarks,
        } => {
            let request = SubmitTaskRequest::new(task, employee)
                .with_files(files)
                .with_remarks(remarks);
            let submission = tasks.submit_task(request).await?;
            writeln!(out, "{}", submission.id())?;
        }
        TaskCommand::Approve { tasks: ids, actor } => {
            let outcome = tasks.approve_tasks(&ids, actor).await?;
            render::bulk(out, "approved", &outcome)?;
        }
        TaskCommand::Reject {
            tasks: ids,
            actor,
            remarks,
        } => {
            let outcome = tasks.reject_tasks(&ids, actor, &remarks).await?;
            render::bulk(out, "rejected", &outcome)?;
        }
        TaskCommand::Status {
            task,
            status,
            actor,
        } => {
            let updated = tasks.update_status(task, status, actor).await?;
            render::tasks(out, &[updated])?;
        }
        TaskCommand::Delete { task, actor } => {
            tasks.delete_task(task, actor).await?;
            writeln!(out, "deleted {task}")?;
        }
        TaskCommand::History { task } => render::history(out, &tasks.task_history(task).await)?,
    }
    Ok(())
}

async fn run_announcements<R, C>(
    command: AnnouncementCommand,
    portal: &Portal<R, C>,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    let announcements = &portal.announcements;
    match command {
        AnnouncementCommand::List => render::announcements(out, &announcements.list().await)?,
        AnnouncementCommand::Post { title, content } => {
            let posted = announcements.create(&title, &content).await?;
            writeln!(out, "{}", posted.id())?;
        }
        AnnouncementCommand::Delete { announcement } => {
            announcements.delete(announcement).await?;
            writeln!(out, "deleted {announcement}")?;
        }
    }
    Ok(())
}

async fn run_time<R, C>(
    command: TimeCommand,
    portal: &Portal<R, C>,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    let today = portal.clock.utc().date_naive();
    let timesheets = &portal.timesheets;
    match command {
        TimeCommand::Log {
            user,
            task,
            date,
            minutes,
            description,
        } => {
            let entry = timesheets
                .log(user, task, date.unwrap_or(today), minutes, &description)
                .await?;
            writeln!(out, "{}", entry.id())?;
        }
        TimeCommand::List { user, from, to } => {
            let mut filter = TimeEntryFilter::new();
            if let Some(user_id) = user {
                filter = filter.with_user(user_id);
            }
            if let Some(first) = from {
                filter = filter.with_from(first);
            }
            if let Some(last) = to {
                filter = filter.with_to(last);
            }
            render::time_entries(out, &timesheets.entries(filter).await)?;
        }
        TimeCommand::Week { user, date } => {
            let week = timesheets.week_of(user, date.unwrap_or(today)).await?;
            render::week(out, &week)?;
        }
    }
    Ok(())
}

fn task_filter(
    assignee: Option<UserId>,
    search: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    pending_approval: bool,
) -> TaskFilter {
    let mut filter = TaskFilter::new();
    if let Some(user_id) = assignee {
        filter = filter.with_assignee(user_id);
    }
    if let Some(text) = search {
        filter = filter.with_search(text);
    }
    if let Some(wanted) = status {
        filter = filter.with_status(wanted);
    }
    if pending_approval {
        filter = filter.with_status(TaskStatus::PendingApproval);
    }
    if let Some(level) = priority {
        filter = filter.with_priority(level);
    }
    filter
}

fn create_request(args: CreateTaskArgs, clock: &impl Clock) -> CreateTaskRequest {
    let CreateTaskArgs {
        client,
        due,
        target,
        priority,
        employees,
        teams,
        team_head,
        group,
        description,
        work_type,
        internal,
        ..
    } = args;
    let mut details = TaskDetails::new(client, clock.utc(), due, target);
    details.priority = priority;
    details.client_group = group;
    details.description = description;
    details.work_type = work_type;
    details.internal_work = internal;

    let assignment = if teams.is_empty() {
        Assignment::Employees(employees)
    } else {
        Assignment::Teams(teams)
    };
    let mut request = CreateTaskRequest::new(details, assignment);
    if let Some(head) = team_head {
        request = request.with_team_head(head);
    }
    request
}
