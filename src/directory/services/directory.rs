//! Service layer for user registration and team management.

use crate::directory::domain::{
    DirectoryDomainError, EmailAddress, Role, Team, TeamId, User, UserId,
};
use crate::store::{
    domain::MissingEntity,
    ports::{SnapshotRepository, SnapshotRepositoryError},
    services::EntityStore,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    role: Role,
    team: String,
}

impl RegisterUserRequest {
    /// Creates a request with the required user fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            team: String::new(),
        }
    }

    /// Sets the descriptive team label.
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }
}

/// Service-level errors for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] DirectoryDomainError),
    /// A referenced user or team does not exist.
    #[error(transparent)]
    NotFound(#[from] MissingEntity),
    /// Persisting the store failed.
    #[error(transparent)]
    Store(#[from] SnapshotRepositoryError),
}

impl DirectoryError {
    /// Returns `true` for input validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` when a referenced user or team does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for directory service operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// User and team orchestration service.
#[derive(Clone)]
pub struct DirectoryService<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    store: Arc<EntityStore<R>>,
    clock: Arc<C>,
}

impl<R, C> DirectoryService<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service.
    #[must_use]
    pub const fn new(store: Arc<EntityStore<R>>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] for a blank name, a malformed
    /// email or an email already in use.
    pub async fn register_user(&self, request: RegisterUserRequest) -> DirectoryResult<User> {
        let RegisterUserRequest {
            name,
            email,
            role,
            team,
        } = request;
        let address = EmailAddress::new(email)?;
        let user = User::new(name, address, role, team, &*self.clock)?;

        let registered = self
            .store
            .write(|snapshot| {
                if snapshot
                    .users
                    .iter()
                    .any(|existing| existing.email() == user.email())
                {
                    return Err(DirectoryError::Validation(
                        DirectoryDomainError::DuplicateEmail(user.email().to_string()),
                    ));
                }
                snapshot.users.insert(user.clone());
                Ok(user)
            })
            .await?;
        info!(user_id = %registered.id(), role = %registered.role(), "registered user");
        Ok(registered)
    }

    /// Returns every registered user in registration order.
    pub async fn list_users(&self) -> Vec<User> {
        self.store
            .read(|snapshot| snapshot.users.iter().cloned().collect())
            .await
    }

    /// Returns users with the employee role.
    pub async fn list_employees(&self) -> Vec<User> {
        self.store
            .read(|snapshot| {
                snapshot
                    .users
                    .iter()
                    .filter(|user| user.role() == Role::Employee)
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Finds a user by identifier.
    pub async fn get_user(&self, user_id: UserId) -> Option<User> {
        self.store
            .read(|snapshot| snapshot.users.get(user_id).cloned())
            .await
    }

    /// Returns every team in creation order.
    pub async fn list_teams(&self) -> Vec<Team> {
        self.store
            .read(|snapshot| snapshot.teams.iter().cloned().collect())
            .await
    }

    /// Finds a team by identifier.
    pub async fn get_team(&self, team_id: TeamId) -> Option<Team> {
        self.store
            .read(|snapshot| snapshot.teams.get(team_id).cloned())
            .await
    }

    /// Creates an empty team.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Validation`] when the name is blank.
    pub async fn create_team(&self, name: impl Into<String>) -> DirectoryResult<Team> {
        let team = Team::new(name)?;
        let created = self
            .store
            .write(|snapshot| {
                snapshot.teams.insert(team.clone());
                Ok::<_, DirectoryError>(team)
            })
            .await?;
        info!(team_id = %created.id(), name = created.name(), "created team");
        Ok(created)
    }

    /// Adds a user to a team.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] for an unknown team or
    /// user, and
    /// [`DirectoryError::Validation`] when the user is already a member.
    pub async fn add_member(&self, team_id: TeamId, user_id: UserId) -> DirectoryResult<Team> {
        let team = self
            .store
            .write(|snapshot| {
                snapshot.require_user(user_id)?;
                let team = snapshot
                    .teams
                    .get_mut(team_id)
                    .ok_or(MissingEntity::Team(team_id))?;
                team.add_member(user_id)?;
                Ok::<_, DirectoryError>(team.clone())
            })
            .await?;
        info!(team_id = %team_id, user_id = %user_id, "added team member");
        Ok(team)
    }

    /// Removes a user from a team; removing a non-member changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] for an unknown team.
    pub async fn remove_member(&self, team_id: TeamId, user_id: UserId) -> DirectoryResult<Team> {
        self.store
            .write(|snapshot| {
                let team = snapshot
                    .teams
                    .get_mut(team_id)
                    .ok_or(MissingEntity::Team(team_id))?;
                if team.remove_member(user_id) {
                    info!(team_id = %team_id, user_id = %user_id, "removed team member");
                }
                Ok(team.clone())
            })
            .await
    }

    /// Deletes a team and detaches it from every task.
    ///
    /// Users already resolved onto those tasks stay assigned.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] for an unknown team.
    pub async fn delete_team(&self, team_id: TeamId) -> DirectoryResult<()> {
        let detached = self
            .store
            .write(|snapshot| {
                snapshot
                    .remove_team_cascade(team_id)
                    .map(|(_, detached)| detached)
                    .ok_or(DirectoryError::NotFound(MissingEntity::Team(team_id)))
            })
            .await?;
        info!(team_id = %team_id, detached_tasks = detached, "deleted team");
        Ok(())
    }
}
