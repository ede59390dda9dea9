//! Command-line surface of the `taskdesk` binary.
//!
//! Argument definitions live here; [`run`] executes a parsed command
//! against a [`crate::portal::Portal`] and writes human-readable output.

mod render;
mod run;

pub use run::{CliError, run};

use crate::announcement::domain::AnnouncementId;
use crate::directory::domain::{Role, TeamId, UserId};
use crate::task::domain::{Priority, TaskId, TaskStatus};
use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Task lifecycle and approval portal for a professional-services firm.
#[derive(Debug, Parser)]
#[command(name = "taskdesk", version, about)]
pub struct Cli {
    /// Configuration file to load instead of `taskdesk.toml`.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace the store with demonstration data.
    Seed {
        /// Overwrite a store that already holds data.
        #[arg(long)]
        force: bool,
    },
    /// Manage users.
    #[command(subcommand)]
    Users(UserCommand),
    /// Manage teams.
    #[command(subcommand)]
    Teams(TeamCommand),
    /// Work with tasks.
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Manage announcements.
    #[command(subcommand)]
    Announce(AnnouncementCommand),
    /// Log and review time.
    #[command(subcommand)]
    Time(TimeCommand),
    /// Show dashboard counters; with `--user`, that employee's counters.
    Stats {
        /// Employee whose dashboard to show.
        #[arg(long)]
        user: Option<UserId>,
    },
}

/// User commands.
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List every user.
    List,
    /// Register a user.
    Add {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Login email.
        #[arg(long)]
        email: String,
        /// `admin` or `employee`.
        #[arg(long, default_value = "employee")]
        role: Role,
        /// Descriptive team label.
        #[arg(long, default_value = "")]
        team: String,
    },
}

/// Team commands.
#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// List every team with its members.
    List,
    /// Create an empty team.
    Create {
        /// Team name.
        name: String,
    },
    /// Add a user to a team.
    AddMember {
        /// Team to change.
        team: TeamId,
        /// User to add.
        user: UserId,
    },
    /// Remove a user from a team.
    RemoveMember {
        /// Team to change.
        team: TeamId,
        /// User to remove.
        user: UserId,
    },
    /// Delete a team and detach it from its tasks.
    Delete {
        /// Team to delete.
        team: TeamId,
    },
}

/// Task commands.
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// List tasks.
    List {
        /// Only tasks assigned to this user.
        #[arg(long)]
        assignee: Option<UserId>,
        /// Only tasks whose client name contains this text, ignoring case.
        #[arg(long)]
        search: Option<String>,
        /// Only tasks in this status, for example `in-progress`.
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Only tasks of this priority.
        #[arg(long)]
        priority: Option<Priority>,
        /// Only tasks awaiting approval; shorthand for
        /// `--status pending-approval`.
        #[arg(long, conflicts_with = "status")]
        pending_approval: bool,
    },
    /// Show one task with its latest submission.
    Show {
        /// Task to show.
        task: TaskId,
    },
    /// Create a task.
    Create(CreateTaskArgs),
    /// Start work on a task.
    Start {
        /// Task to start.
        task: TaskId,
        /// Assigned employee starting the work.
        #[arg(long)]
        employee: UserId,
    },
    /// Hand in work for approval.
    Submit {
        /// Task to submit.
        task: TaskId,
        /// Assigned employee submitting the work.
        #[arg(long)]
        employee: UserId,
        /// Submitted file name; may be repeated.
        #[arg(long = "file")]
        files: Vec<String>,
        /// Notes for the reviewer.
        #[arg(long, default_value = "")]
        remarks: String,
    },
    /// Approve one or more tasks awaiting approval.
    Approve {
        /// Tasks to approve.
        #[arg(required = true)]
        tasks: Vec<TaskId>,
        /// Approving administrator.
        #[arg(long)]
        actor: UserId,
    },
    /// Send one or more tasks back for revision.
    Reject {
        /// Tasks to reject.
        #[arg(required = true)]
        tasks: Vec<TaskId>,
        /// Rejecting administrator.
        #[arg(long)]
        actor: UserId,
        /// Reason for the rejection.
        #[arg(long)]
        remarks: String,
    },
    /// Set a task status directly.
    Status {
        /// Task to change.
        task: TaskId,
        /// New status, for example `in-progress`.
        status: TaskStatus,
        /// Administrator making the change.
        #[arg(long)]
        actor: UserId,
    },
    /// Delete a task with its submissions, history and time entries.
    Delete {
        /// Task to delete.
        task: TaskId,
        /// Administrator deleting the task.
        #[arg(long)]
        actor: UserId,
    },
    /// Show the status history of a task, newest first.
    History {
        /// Task whose history to show.
        task: TaskId,
    },
}

/// Arguments of `tasks create`.
#[derive(Debug, clap::Args)]
pub struct CreateTaskArgs {
    /// Administrator creating the task.
    #[arg(long)]
    pub actor: UserId,
    /// Client the work is for.
    #[arg(long)]
    pub client: String,
    /// Hard deadline.
    #[arg(long)]
    pub due: NaiveDate,
    /// Internal target date.
    #[arg(long)]
    pub target: NaiveDate,
    /// `high`, `medium` or `low`.
    #[arg(long, default_value = "medium")]
    pub priority: Priority,
    /// Assigned employee; may be repeated.
    #[arg(long = "employee", conflicts_with = "teams")]
    pub employees: Vec<UserId>,
    /// Assigned team; may be repeated.
    #[arg(long = "team")]
    pub teams: Vec<TeamId>,
    /// Supervising user; defaults to the actor.
    #[arg(long)]
    pub team_head: Option<UserId>,
    /// Client grouping.
    #[arg(long, default_value = "")]
    pub group: String,
    /// Free-text description.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Work category; may be repeated.
    #[arg(long = "work-type")]
    pub work_type: Vec<String>,
    /// Mark as internal work.
    #[arg(long)]
    pub internal: bool,
}

/// Announcement commands.
#[derive(Debug, Subcommand)]
pub enum AnnouncementCommand {
    /// List announcements, newest first.
    List,
    /// Post an announcement.
    Post {
        /// Headline.
        #[arg(long)]
        title: String,
        /// Body text.
        #[arg(long)]
        content: String,
    },
    /// Delete an announcement.
    Delete {
        /// Announcement to delete.
        announcement: AnnouncementId,
    },
}

/// Time logging commands.
#[derive(Debug, Subcommand)]
pub enum TimeCommand {
    /// Log time against a task.
    Log {
        /// User who did the work.
        #[arg(long)]
        user: UserId,
        /// Task worked on.
        #[arg(long)]
        task: TaskId,
        /// Day of the work; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Whole minutes worked.
        #[arg(long)]
        minutes: u32,
        /// What was done.
        #[arg(long)]
        description: String,
    },
    /// List time entries, newest date first.
    List {
        /// Only this user's entries.
        #[arg(long)]
        user: Option<UserId>,
        /// Earliest entry date to include.
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest entry date to include.
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show a user's Sunday-to-Saturday timesheet.
    Week {
        /// User whose week to show.
        #[arg(long)]
        user: UserId,
        /// Any day in the week; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}
