//! Port contracts for the entity store.

pub mod repository;

pub use repository::{SnapshotRepository, SnapshotRepositoryError, SnapshotRepositoryResult};
