//! Append-only audit trail of task status changes.

use super::{HistoryId, TaskId, TaskStatus};
use crate::directory::domain::UserId;
use crate::store::domain::Collection;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One status change of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHistoryEntry {
    id: HistoryId,
    task_id: TaskId,
    new_status: TaskStatus,
    changed_by: UserId,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remarks: Option<String>,
}

/// Parameter object for reconstructing a persisted history record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedHistoryData {
    /// Persisted record identifier.
    pub id: HistoryId,
    /// Task the record belongs to.
    pub task_id: TaskId,
    /// Status the task moved to.
    pub new_status: TaskStatus,
    /// User responsible for the change.
    pub changed_by: UserId,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
    /// Reviewer remarks, if any.
    pub remarks: Option<String>,
}

impl TaskHistoryEntry {
    /// Reconstructs a history record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedHistoryData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            new_status: data.new_status,
            changed_by: data.changed_by,
            timestamp: data.timestamp,
            remarks: data.remarks,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryId {
        self.id
    }

    /// Returns the task the record belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status the task moved to.
    #[must_use]
    pub const fn new_status(&self) -> TaskStatus {
        self.new_status
    }

    /// Returns the user responsible for the change.
    #[must_use]
    pub const fn changed_by(&self) -> UserId {
        self.changed_by
    }

    /// Returns when the change happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns reviewer remarks, present on rejections only.
    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }
}

/// Writes history records into a history collection.
///
/// The recorder can only append; there is no way to edit or remove a single
/// record through it.
pub struct HistoryRecorder<'a, C: Clock> {
    history: &'a mut Collection<TaskHistoryEntry>,
    clock: &'a C,
}

impl<'a, C: Clock> HistoryRecorder<'a, C> {
    /// Creates a recorder over a history collection.
    pub const fn new(history: &'a mut Collection<TaskHistoryEntry>, clock: &'a C) -> Self {
        Self { history, clock }
    }

    /// Appends a record stamped with the current clock time.
    ///
    /// Blank remarks are stored as absent.
    pub fn record(
        &mut self,
        task_id: TaskId,
        new_status: TaskStatus,
        changed_by: UserId,
        remarks: Option<&str>,
    ) -> HistoryId {
        let entry = TaskHistoryEntry {
            id: HistoryId::new(),
            task_id,
            new_status,
            changed_by,
            timestamp: self.clock.utc(),
            remarks: remarks
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned),
        };
        let id = entry.id;
        self.history.insert(entry);
        id
    }
}

/// Returns the history of one task, newest first.
///
/// Records sharing a timestamp are ordered by reverse insertion, so the
/// latest recorded change always comes first.
#[must_use]
pub fn history_for(history: &Collection<TaskHistoryEntry>, task_id: TaskId) -> Vec<TaskHistoryEntry> {
    let mut entries: Vec<TaskHistoryEntry> = history
        .iter()
        .rev()
        .filter(|entry| entry.task_id == task_id)
        .cloned()
        .collect();
    entries.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
    entries
}
