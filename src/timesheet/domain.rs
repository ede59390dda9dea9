//! Time logged by users against tasks.

use crate::directory::domain::UserId;
use crate::identifier::uuid_identifier;
use crate::task::domain::TaskId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

uuid_identifier! {
    /// Unique identifier for a time entry.
    TimeEntryId
}

/// Errors returned while constructing time entries.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TimesheetDomainError {
    /// The worked duration is zero or longer than a day.
    #[error("worked time must be between 1 and {max} minutes, got {0}", max = WorkedTime::MAX_MINUTES)]
    InvalidDuration(u32),
    /// The description is empty after trimming.
    #[error("time entry description must not be empty")]
    EmptyDescription,
    /// The Sunday-to-Saturday week around the date is not representable.
    #[error("no complete week contains {0}")]
    WeekOutOfRange(NaiveDate),
}

/// Whole minutes worked, between one minute and one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WorkedTime(u32);

impl WorkedTime {
    /// Longest duration a single entry may record.
    pub const MAX_MINUTES: u32 = 24 * 60;

    /// Creates a validated duration.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetDomainError::InvalidDuration`] when `minutes` is
    /// zero or exceeds [`Self::MAX_MINUTES`].
    pub const fn from_minutes(minutes: u32) -> Result<Self, TimesheetDomainError> {
        if minutes == 0 || minutes > Self::MAX_MINUTES {
            return Err(TimesheetDomainError::InvalidDuration(minutes));
        }
        Ok(Self(minutes))
    }

    /// Returns the duration in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for WorkedTime {
    type Error = TimesheetDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(value)
    }
}

impl From<WorkedTime> for u32 {
    fn from(value: WorkedTime) -> Self {
        value.0
    }
}

impl fmt::Display for WorkedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{:02}m", self.0.div_euclid(60), self.0.rem_euclid(60))
    }
}

/// Time one user spent on one task on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    id: TimeEntryId,
    user_id: UserId,
    task_id: TaskId,
    date: NaiveDate,
    #[serde(rename = "minutes")]
    worked: WorkedTime,
    description: String,
    created_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Creates a time entry.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetDomainError::EmptyDescription`] when the
    /// description is blank.
    pub fn new(
        user_id: UserId,
        task_id: TaskId,
        date: NaiveDate,
        worked: WorkedTime,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TimesheetDomainError> {
        let trimmed = description.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(TimesheetDomainError::EmptyDescription);
        }
        Ok(Self {
            id: TimeEntryId::new(),
            user_id,
            task_id,
            date,
            worked,
            description: trimmed,
            created_at: clock.utc(),
        })
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> TimeEntryId {
        self.id
    }

    /// Returns the user who logged the time.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the task the time was spent on.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the day the work happened.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the worked duration.
    #[must_use]
    pub const fn worked(&self) -> WorkedTime {
        self.worked
    }

    /// Returns the work description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns when the entry was logged.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
