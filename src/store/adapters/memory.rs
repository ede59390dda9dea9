//! In-memory snapshot repository for tests and ephemeral runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::store::{
    domain::PortalSnapshot,
    ports::{SnapshotRepository, SnapshotRepositoryError, SnapshotRepositoryResult},
};

/// Thread-safe in-memory snapshot repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotRepository {
    state: Arc<RwLock<InMemorySnapshotState>>,
}

#[derive(Debug, Default)]
struct InMemorySnapshotState {
    snapshot: Option<PortalSnapshot>,
    saves: usize,
}

impl InMemorySnapshotRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds a snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: PortalSnapshot) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemorySnapshotState {
                snapshot: Some(snapshot),
                saves: 0,
            })),
        }
    }

    /// Returns how many times a snapshot has been saved.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state
            .read()
            .map(|state| state.saves)
            .unwrap_or_default()
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    async fn load(&self) -> SnapshotRepositoryResult<Option<PortalSnapshot>> {
        let state = self.state.read().map_err(|err| {
            SnapshotRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.snapshot.clone())
    }

    async fn save(&self, snapshot: &PortalSnapshot) -> SnapshotRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SnapshotRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.snapshot = Some(snapshot.clone());
        state.saves = state.saves.saturating_add(1);
        Ok(())
    }
}
