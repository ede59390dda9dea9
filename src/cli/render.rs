//! Plain-text rendering of command results.

use crate::announcement::domain::Announcement;
use crate::directory::domain::{Team, User};
use crate::task::domain::{Submission, Task, TaskHistoryEntry};
use crate::task::services::{AdminDashboard, BulkOutcome, EmployeeDashboard, TaskAnalytics};
use crate::timesheet::domain::TimeEntry;
use crate::timesheet::services::WeeklyTimesheet;
use std::io::{self, Write};

pub(super) fn users(out: &mut impl Write, users: &[User]) -> io::Result<()> {
    for user in users {
        writeln!(
            out,
            "{}  {:<8}  {}  <{}>  {}",
            user.id(),
            user.role().as_str(),
            user.name(),
            user.email().as_str(),
            user.team()
        )?;
    }
    Ok(())
}

pub(super) fn teams(out: &mut impl Write, teams: &[Team]) -> io::Result<()> {
    for team in teams {
        writeln!(out, "{}  {} ({} members)", team.id(), team.name(), team.members().len())?;
        for member in team.members() {
            writeln!(out, "    {member}")?;
        }
    }
    Ok(())
}

pub(super) fn tasks(out: &mut impl Write, tasks: &[Task]) -> io::Result<()> {
    for task in tasks {
        writeln!(
            out,
            "{}  {:<16}  {:<6}  due {}  {}",
            task.id(),
            task.status().as_str(),
            task.priority().as_str(),
            task.details().due_date,
            task.client_name()
        )?;
    }
    Ok(())
}

pub(super) fn task_detail(
    out: &mut impl Write,
    task: &Task,
    latest: Option<&Submission>,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, task)?;
    writeln!(out)?;
    if let Some(submission) = latest {
        writeln!(out, "latest submission:")?;
        serde_json::to_writer_pretty(&mut *out, submission)?;
        writeln!(out)?;
    }
    Ok(())
}

pub(super) fn history(out: &mut impl Write, entries: &[TaskHistoryEntry]) -> io::Result<()> {
    for entry in entries {
        let remarks = entry
            .remarks()
            .map(|text| format!("  ({text})"))
            .unwrap_or_default();
        writeln!(
            out,
            "{}  {:<16}  by {}{remarks}",
            entry.timestamp().to_rfc3339(),
            entry.new_status().as_str(),
            entry.changed_by()
        )?;
    }
    Ok(())
}

pub(super) fn bulk(out: &mut impl Write, verb: &str, outcome: &BulkOutcome) -> io::Result<()> {
    for task_id in &outcome.changed {
        writeln!(out, "{verb} {task_id}")?;
    }
    for task_id in &outcome.skipped {
        writeln!(out, "skipped {task_id}")?;
    }
    Ok(())
}

pub(super) fn announcements(out: &mut impl Write, announcements: &[Announcement]) -> io::Result<()> {
    for announcement in announcements {
        writeln!(
            out,
            "{}  {}  {}",
            announcement.id(),
            announcement.created_at().date_naive(),
            announcement.title()
        )?;
        writeln!(out, "    {}", announcement.content())?;
    }
    Ok(())
}

pub(super) fn time_entries(out: &mut impl Write, entries: &[TimeEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(
            out,
            "{}  {:>7}  user {}  task {}  {}",
            entry.date(),
            entry.worked().to_string(),
            entry.user_id(),
            entry.task_id(),
            entry.description()
        )?;
    }
    Ok(())
}

pub(super) fn week(out: &mut impl Write, week: &WeeklyTimesheet) -> io::Result<()> {
    writeln!(out, "week {} to {}", week.week_start, week.week_end)?;
    for day in week.week_start.iter_days().take(7) {
        writeln!(out, "  {}  {:>5} min", day.format("%a %Y-%m-%d"), week.minutes_on(day))?;
    }
    writeln!(out, "total {} min", week.total_minutes())
}

pub(super) fn admin_dashboard(
    out: &mut impl Write,
    dashboard: &AdminDashboard,
    analytics: &TaskAnalytics,
) -> io::Result<()> {
    writeln!(out, "total tasks        {}", dashboard.total_tasks)?;
    writeln!(out, "completed          {}", dashboard.completed)?;
    writeln!(out, "pending            {}", dashboard.pending)?;
    writeln!(out, "pending approvals  {}", dashboard.pending_approvals)?;
    writeln!(out, "by status:")?;
    for (status, count) in &analytics.by_status {
        writeln!(out, "  {:<16}  {count}", status.as_str())?;
    }
    writeln!(out, "by priority:")?;
    for (priority, count) in &analytics.by_priority {
        writeln!(out, "  {:<16}  {count}", priority.as_str())?;
    }
    writeln!(out, "by employee:")?;
    for workload in &analytics.by_employee {
        writeln!(out, "  {}  {}", workload.user_id, workload.tasks)?;
    }
    Ok(())
}

pub(super) fn employee_dashboard(
    out: &mut impl Write,
    dashboard: &EmployeeDashboard,
) -> io::Result<()> {
    writeln!(out, "assigned   {}", dashboard.assigned)?;
    writeln!(out, "pending    {}", dashboard.pending)?;
    writeln!(out, "completed  {}", dashboard.completed)
}
