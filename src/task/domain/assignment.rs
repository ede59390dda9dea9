//! Task assignment and its resolution to concrete assignees.

use crate::directory::domain::{TeamId, UserId};

/// How a task is assigned when it is created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Assign named employees directly.
    Employees(Vec<UserId>),
    /// Assign every member of the listed teams.
    Teams(Vec<TeamId>),
}

/// Reason an [`Assignment`] could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedAssignment {
    /// A referenced team does not exist.
    UnknownTeam(TeamId),
    /// A referenced user does not exist.
    UnknownUser(UserId),
    /// The assignment resolved to nobody.
    NoAssignees,
}

/// Assignees captured on a task at creation or edit time.
///
/// Team membership is copied into `assigned_to`; later team changes do not
/// alter it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssignment {
    assigned_to: Vec<UserId>,
    assigned_teams: Vec<TeamId>,
}

impl ResolvedAssignment {
    /// Resolves an assignment using directory lookups.
    ///
    /// `team_members` returns the members of a team, or `None` when the
    /// team does not exist. Resolved users keep first-seen order without
    /// duplicates.
    ///
    /// # Errors
    ///
    /// Returns an [`UnresolvedAssignment`] naming the first unknown team or
    /// user, or [`UnresolvedAssignment::NoAssignees`] when nobody resolves.
    pub fn resolve<T, U>(
        assignment: &Assignment,
        team_members: T,
        user_exists: U,
    ) -> Result<Self, UnresolvedAssignment>
    where
        T: Fn(TeamId) -> Option<Vec<UserId>>,
        U: Fn(UserId) -> bool,
    {
        let (candidates, assigned_teams) = match assignment {
            Assignment::Employees(user_ids) => (user_ids.clone(), Vec::new()),
            Assignment::Teams(team_ids) => {
                let mut members = Vec::new();
                let mut teams = Vec::new();
                for team_id in team_ids {
                    let team_member_ids =
                        team_members(*team_id).ok_or(UnresolvedAssignment::UnknownTeam(*team_id))?;
                    members.extend(team_member_ids);
                    push_unique(&mut teams, *team_id);
                }
                (members, teams)
            }
        };

        let mut assigned_to = Vec::with_capacity(candidates.len());
        for user_id in candidates {
            if !user_exists(user_id) {
                return Err(UnresolvedAssignment::UnknownUser(user_id));
            }
            push_unique(&mut assigned_to, user_id);
        }

        if assigned_to.is_empty() {
            return Err(UnresolvedAssignment::NoAssignees);
        }
        Ok(Self {
            assigned_to,
            assigned_teams,
        })
    }

    /// Returns the resolved assignees.
    #[must_use]
    pub fn assigned_to(&self) -> &[UserId] {
        &self.assigned_to
    }

    /// Returns the teams the task was assigned through.
    #[must_use]
    pub fn assigned_teams(&self) -> &[TeamId] {
        &self.assigned_teams
    }

    pub(crate) fn into_parts(self) -> (Vec<UserId>, Vec<TeamId>) {
        (self.assigned_to, self.assigned_teams)
    }
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}
