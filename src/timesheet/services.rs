//! Logging time and building weekly timesheets.

use super::domain::{TimeEntry, TimesheetDomainError, WorkedTime};
use crate::directory::domain::UserId;
use crate::store::{
    domain::MissingEntity,
    ports::{SnapshotRepository, SnapshotRepositoryError},
    services::EntityStore,
};
use crate::task::domain::TaskId;
use chrono::{NaiveDate, Weekday};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for timesheet operations.
#[derive(Debug, Error)]
pub enum TimesheetError {
    /// The duration or description is invalid.
    #[error(transparent)]
    Validation(#[from] TimesheetDomainError),
    /// The user or task does not exist.
    #[error(transparent)]
    NotFound(#[from] MissingEntity),
    /// Persisting the store failed.
    #[error(transparent)]
    Store(#[from] SnapshotRepositoryError),
}

impl TimesheetError {
    /// Returns `true` for input validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` when the user or task does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Narrows the time entry list by user and inclusive date bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeEntryFilter {
    user_id: Option<UserId>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl TimeEntryFilter {
    /// Creates a filter that keeps every entry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            user_id: None,
            from: None,
            to: None,
        }
    }

    /// Keeps only entries logged by `user_id`.
    #[must_use]
    pub const fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Keeps only entries dated on or after `from`.
    #[must_use]
    pub const fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Keeps only entries dated on or before `to`.
    #[must_use]
    pub const fn with_to(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    /// Returns `true` when the entry passes every bound that is set.
    #[must_use]
    pub fn matches(&self, entry: &TimeEntry) -> bool {
        self.user_id.is_none_or(|user| entry.user_id() == user)
            && self.from.is_none_or(|from| entry.date() >= from)
            && self.to.is_none_or(|to| entry.date() <= to)
    }
}

/// One user's entries for a Sunday-to-Saturday week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyTimesheet {
    /// The user the entries belong to.
    pub user_id: UserId,
    /// The Sunday the week starts on.
    pub week_start: NaiveDate,
    /// The Saturday the week ends on.
    pub week_end: NaiveDate,
    /// Entries in date order.
    pub entries: Vec<TimeEntry>,
}

impl WeeklyTimesheet {
    /// Total minutes logged over the week.
    #[must_use]
    pub fn total_minutes(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.worked().minutes()))
            .sum()
    }

    /// Minutes logged on one day.
    #[must_use]
    pub fn minutes_on(&self, date: NaiveDate) -> u64 {
        self.entries
            .iter()
            .filter(|entry| entry.date() == date)
            .map(|entry| u64::from(entry.worked().minutes()))
            .sum()
    }
}

/// Time logging service.
#[derive(Clone)]
pub struct TimesheetService<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    store: Arc<EntityStore<R>>,
    clock: Arc<C>,
}

impl<R, C> TimesheetService<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new timesheet service.
    #[must_use]
    pub const fn new(store: Arc<EntityStore<R>>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Logs time spent by a user on a task.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetError::Validation`] when `minutes` is outside
    /// `1..=1440` or the description is blank, and
    /// [`TimesheetError::NotFound`] for an unknown user or task.
    pub async fn log(
        &self,
        user_id: UserId,
        task_id: TaskId,
        date: NaiveDate,
        minutes: u32,
        description: &str,
    ) -> Result<TimeEntry, TimesheetError> {
        let worked = WorkedTime::from_minutes(minutes)?;
        let entry = TimeEntry::new(user_id, task_id, date, worked, description, &*self.clock)?;
        self.store
            .write(|snapshot| {
                snapshot.require_user(user_id)?;
                snapshot.require_task(task_id)?;
                snapshot.time_entries.insert(entry.clone());
                Ok::<_, TimesheetError>(())
            })
            .await?;
        info!(
            user_id = %user_id,
            task_id = %task_id,
            %date,
            minutes,
            "logged time"
        );
        Ok(entry)
    }

    /// Returns the entries that pass `filter`, newest date first.
    pub async fn entries(&self, filter: TimeEntryFilter) -> Vec<TimeEntry> {
        self.store
            .read(|snapshot| {
                let mut entries: Vec<TimeEntry> = snapshot
                    .time_entries
                    .iter()
                    .rev()
                    .filter(|entry| filter.matches(entry))
                    .cloned()
                    .collect();
                entries.sort_by(|left, right| right.date().cmp(&left.date()));
                entries
            })
            .await
    }

    /// Returns a user's entries for the week containing `date`.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetError::Validation`] when the week around `date`
    /// runs past the supported calendar range.
    pub async fn week_of(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<WeeklyTimesheet, TimesheetError> {
        let week = date.week(Weekday::Sun);
        let out_of_range = TimesheetDomainError::WeekOutOfRange(date);
        let week_start = week.checked_first_day().ok_or(out_of_range)?;
        let week_end = week.checked_last_day().ok_or(out_of_range)?;
        let entries = self
            .store
            .read(|snapshot| {
                let mut entries: Vec<TimeEntry> = snapshot
                    .time_entries
                    .iter()
                    .filter(|entry| entry.user_id() == user_id)
                    .filter(|entry| (week_start..=week_end).contains(&entry.date()))
                    .cloned()
                    .collect();
                entries.sort_by_key(TimeEntry::date);
                entries
            })
            .await;
        Ok(WeeklyTimesheet {
            user_id,
            week_start,
            week_end,
            entries,
        })
    }
}
