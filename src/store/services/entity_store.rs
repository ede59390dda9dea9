//! The single owner of portal state within a process.

use crate::store::{
    domain::PortalSnapshot,
    ports::{SnapshotRepository, SnapshotRepositoryError, SnapshotRepositoryResult},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Holds the committed [`PortalSnapshot`] and persists it through a
/// [`SnapshotRepository`].
///
/// Construct one store per process and share it with every service through
/// an [`Arc`]. Writers are serialized; each write runs against a working
/// copy that is saved and committed only when the mutation succeeds.
#[derive(Debug)]
pub struct EntityStore<R>
where
    R: SnapshotRepository,
{
    repository: Arc<R>,
    committed: Mutex<PortalSnapshot>,
}

impl<R> EntityStore<R>
where
    R: SnapshotRepository,
{
    /// Opens the store, starting empty when the repository holds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotRepositoryError`] when the stored snapshot cannot
    /// be loaded.
    pub async fn open(repository: Arc<R>) -> SnapshotRepositoryResult<Self> {
        Self::open_with_default(repository, PortalSnapshot::empty).await
    }

    /// Opens the store, saving the snapshot produced by `initial` when the
    /// repository holds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotRepositoryError`] when loading or the initial save
    /// fails.
    pub async fn open_with_default(
        repository: Arc<R>,
        initial: impl FnOnce() -> PortalSnapshot + Send,
    ) -> SnapshotRepositoryResult<Self> {
        let snapshot = match repository.load().await? {
            Some(stored) => stored,
            None => {
                let fresh = initial();
                repository.save(&fresh).await?;
                debug!(
                    users = fresh.users.len(),
                    tasks = fresh.tasks.len(),
                    "initialised snapshot"
                );
                fresh
            }
        };
        Ok(Self {
            repository,
            committed: Mutex::new(snapshot),
        })
    }

    /// Runs a read-only query against the committed snapshot.
    pub async fn read<T>(&self, query: impl FnOnce(&PortalSnapshot) -> T) -> T {
        let committed = self.committed.lock().await;
        let snapshot: &PortalSnapshot = &committed;
        query(snapshot)
    }

    /// Returns a copy of the committed snapshot.
    pub async fn snapshot(&self) -> PortalSnapshot {
        self.read(PortalSnapshot::clone).await
    }

    /// Applies a mutation as one unit.
    ///
    /// The mutation receives a working copy. When it returns `Ok` and
    /// changed anything, the copy is saved through the repository and then
    /// becomes the committed snapshot. When it returns `Err`, or saving
    /// fails, the committed snapshot is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns the mutation's own error, or the repository error converted
    /// into `E`.
    pub async fn write<T, E>(
        &self,
        mutation: impl FnOnce(&mut PortalSnapshot) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<SnapshotRepositoryError>,
    {
        let mut committed = self.committed.lock().await;
        let mut working = committed.clone();
        let outcome = mutation(&mut working)?;
        if working != *committed {
            self.repository.save(&working).await?;
            *committed = working;
            debug!("committed snapshot");
        }
        Ok(outcome)
    }
}
