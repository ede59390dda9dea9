//! The whole portal state persisted as a single document.

use super::{Collection, Entity, MissingEntity};
use crate::announcement::domain::{Announcement, AnnouncementId};
use crate::directory::domain::{Team, TeamId, User, UserId};
use crate::task::domain::{
    HistoryId, Submission, SubmissionId, Task, TaskHistoryEntry, TaskId,
};
use crate::timesheet::domain::{TimeEntry, TimeEntryId};
use serde::{Deserialize, Serialize};

/// Every entity collection of the portal.
///
/// Serialized as one JSON object with one array per collection. There is
/// no schema version; a change to any record shape needs a reset of the
/// stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSnapshot {
    /// Registered users.
    #[serde(default)]
    pub users: Collection<User>,
    /// Client tasks.
    #[serde(default)]
    pub tasks: Collection<Task>,
    /// Work submissions, oldest first.
    #[serde(default)]
    pub submissions: Collection<Submission>,
    /// Teams.
    #[serde(default)]
    pub teams: Collection<Team>,
    /// Announcements.
    #[serde(default)]
    pub announcements: Collection<Announcement>,
    /// Logged time.
    #[serde(default)]
    pub time_entries: Collection<TimeEntry>,
    /// Task status history in recording order.
    #[serde(default)]
    pub task_history: Collection<TaskHistoryEntry>,
}

impl PortalSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a user that an operation depends on.
    ///
    /// # Errors
    ///
    /// Returns [`MissingEntity::User`] when no such user is registered.
    pub fn require_user(&self, user_id: UserId) -> Result<&User, MissingEntity> {
        self.users.get(user_id).ok_or(MissingEntity::User(user_id))
    }

    /// Looks up a task that an operation depends on.
    ///
    /// # Errors
    ///
    /// Returns [`MissingEntity::Task`] when no such task exists.
    pub fn require_task(&self, task_id: TaskId) -> Result<&Task, MissingEntity> {
        self.tasks.get(task_id).ok_or(MissingEntity::Task(task_id))
    }

    /// Mutable form of [`Self::require_task`].
    ///
    /// # Errors
    ///
    /// Returns [`MissingEntity::Task`] when no such task exists.
    pub fn require_task_mut(&mut self, task_id: TaskId) -> Result<&mut Task, MissingEntity> {
        self.tasks.get_mut(task_id).ok_or(MissingEntity::Task(task_id))
    }

    /// Removes a task together with every record that references it.
    ///
    /// Returns the removed task, or `None` when it did not exist; in that
    /// case nothing else is touched.
    pub fn remove_task_cascade(&mut self, task_id: TaskId) -> Option<Task> {
        let task = self.tasks.remove(task_id)?;
        self.submissions
            .retain(|submission| submission.task_id() != task_id);
        self.task_history.retain(|entry| entry.task_id() != task_id);
        self.time_entries.retain(|entry| entry.task_id() != task_id);
        Some(task)
    }

    /// Removes a team and detaches it from every task.
    ///
    /// Resolved task assignees are left as they are. Returns the removed
    /// team and the number of tasks that referenced it.
    pub fn remove_team_cascade(&mut self, team_id: TeamId) -> Option<(Team, usize)> {
        let team = self.teams.remove(team_id)?;
        let detached = self
            .tasks
            .iter_mut()
            .map(|task| task.detach_team(team_id))
            .filter(|was_detached| *was_detached)
            .count();
        Some((team, detached))
    }
}

impl Entity for User {
    type Id = UserId;

    fn entity_id(&self) -> Self::Id {
        self.id()
    }
}

impl Entity for Team {
    type Id = TeamId;

    fn entity_id(&self) -> Self::Id {
        self.id()
    }
}

impl Entity for Task {
    type Id = TaskId;

    fn entity_id(&self) -> Self::Id {
        self.id()
    }
}

impl Entity for Submission {
    type Id = SubmissionId;

    fn entity_id(&self) -> Self::Id {
        self.id()
    }
}

impl Entity for TaskHistoryEntry {
    type Id = HistoryId;

    fn entity_id(&self) -> Self::Id {
        self.id()
    }
}

impl Entity for Announcement {
    type Id = AnnouncementId;

    fn entity_id(&self) -> Self::Id {
        self.id()
    }
}

impl Entity for TimeEntry {
    type Id = TimeEntryId;

    fn entity_id(&self) -> Self::Id {
        self.id()
    }
}
