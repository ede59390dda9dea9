//! Repository port for whole-document snapshot persistence.

use crate::store::domain::PortalSnapshot;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for snapshot repository operations.
pub type SnapshotRepositoryResult<T> = Result<T, SnapshotRepositoryError>;

/// Snapshot persistence contract.
///
/// Implementations store the complete portal state as one unit; there are
/// no per-entity writes.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Loads the stored snapshot.
    ///
    /// Returns `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotRepositoryError`] when the document cannot be read
    /// or decoded.
    async fn load(&self) -> SnapshotRepositoryResult<Option<PortalSnapshot>>;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotRepositoryError`] when the document cannot be
    /// encoded or written.
    async fn save(&self, snapshot: &PortalSnapshot) -> SnapshotRepositoryResult<()>;
}

/// Errors returned by snapshot repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SnapshotRepositoryError {
    /// The stored document is not a valid snapshot.
    #[error("corrupt snapshot document: {0}")]
    Corrupt(Arc<serde_json::Error>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a decoding error.
    #[must_use]
    pub fn corrupt(err: serde_json::Error) -> Self {
        Self::Corrupt(Arc::new(err))
    }
}
