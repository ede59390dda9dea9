//! Posting and listing announcements.

use super::domain::{Announcement, AnnouncementDomainError, AnnouncementId};
use crate::store::{
    domain::MissingEntity,
    ports::{SnapshotRepository, SnapshotRepositoryError},
    services::EntityStore,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for announcement operations.
#[derive(Debug, Error)]
pub enum AnnouncementError {
    /// The title or content is blank.
    #[error(transparent)]
    Validation(#[from] AnnouncementDomainError),
    /// The announcement does not exist.
    #[error(transparent)]
    NotFound(#[from] MissingEntity),
    /// Persisting the store failed.
    #[error(transparent)]
    Store(#[from] SnapshotRepositoryError),
}

impl AnnouncementError {
    /// Returns `true` for input validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` when the announcement does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Announcement board service.
#[derive(Clone)]
pub struct AnnouncementService<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    store: Arc<EntityStore<R>>,
    clock: Arc<C>,
}

impl<R, C> AnnouncementService<R, C>
where
    R: SnapshotRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new announcement service.
    #[must_use]
    pub const fn new(store: Arc<EntityStore<R>>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Posts an announcement.
    ///
    /// # Errors
    ///
    /// Returns [`AnnouncementError::Validation`] for a blank title or
    /// content.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
    ) -> Result<Announcement, AnnouncementError> {
        let announcement = Announcement::new(title, content, &*self.clock)?;
        self.store
            .write(|snapshot| {
                snapshot.announcements.insert(announcement.clone());
                Ok::<_, AnnouncementError>(())
            })
            .await?;
        info!(announcement_id = %announcement.id(), "posted announcement");
        Ok(announcement)
    }

    /// Returns every announcement, newest first.
    pub async fn list(&self) -> Vec<Announcement> {
        self.store
            .read(|snapshot| {
                let mut announcements: Vec<Announcement> =
                    snapshot.announcements.iter().rev().cloned().collect();
                announcements.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
                announcements
            })
            .await
    }

    /// Removes an announcement.
    ///
    /// # Errors
    ///
    /// Returns [`AnnouncementError::NotFound`] for an unknown id.
    pub async fn delete(&self, announcement_id: AnnouncementId) -> Result<(), AnnouncementError> {
        self.store
            .write(|snapshot| {
                snapshot
                    .announcements
                    .remove(announcement_id)
                    .ok_or(MissingEntity::Announcement(announcement_id))?;
                Ok::<_, AnnouncementError>(())
            })
            .await?;
        info!(announcement_id = %announcement_id, "deleted announcement");
        Ok(())
    }
}
