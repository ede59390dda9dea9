//! Snapshot repository backed by a single JSON file.
//!
//! The document lives in a directory opened with capability-based access;
//! every save writes a sibling temporary file and renames it over the
//! document, so readers never observe a half-written snapshot.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;
use tracing::debug;

use crate::store::{
    domain::PortalSnapshot,
    ports::{SnapshotRepository, SnapshotRepositoryError, SnapshotRepositoryResult},
};

/// Snapshot repository storing one JSON document in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotRepository {
    directory: Arc<Dir>,
    file_name: Utf8PathBuf,
}

impl JsonFileSnapshotRepository {
    /// Opens (creating if needed) `directory` and stores the snapshot under
    /// `file_name` inside it.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotRepositoryError::Persistence`] when the directory
    /// cannot be created or opened.
    pub fn open(
        directory: impl AsRef<Utf8Path>,
        file_name: impl Into<Utf8PathBuf>,
    ) -> SnapshotRepositoryResult<Self> {
        let path = directory.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(SnapshotRepositoryError::persistence)?;
        let opened = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(SnapshotRepositoryError::persistence)?;
        Ok(Self::from_dir(opened, file_name))
    }

    /// Uses an already opened directory.
    #[must_use]
    pub fn from_dir(directory: Dir, file_name: impl Into<Utf8PathBuf>) -> Self {
        Self {
            directory: Arc::new(directory),
            file_name: file_name.into(),
        }
    }

    /// Returns the document file name.
    #[must_use]
    pub fn file_name(&self) -> &Utf8Path {
        &self.file_name
    }

    async fn run_blocking<F, T>(&self, f: F) -> SnapshotRepositoryResult<T>
    where
        F: FnOnce(&Dir, &Utf8Path) -> SnapshotRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let directory = Arc::clone(&self.directory);
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || f(&directory, &file_name))
            .await
            .map_err(SnapshotRepositoryError::persistence)?
    }
}

#[async_trait]
impl SnapshotRepository for JsonFileSnapshotRepository {
    async fn load(&self) -> SnapshotRepositoryResult<Option<PortalSnapshot>> {
        self.run_blocking(|directory, file_name| {
            let contents = match directory.read_to_string(file_name) {
                Ok(contents) => contents,
                Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(SnapshotRepositoryError::persistence(err)),
            };
            if contents.trim().is_empty() {
                return Ok(None);
            }
            let snapshot =
                serde_json::from_str(&contents).map_err(SnapshotRepositoryError::corrupt)?;
            debug!(file = %file_name, "loaded snapshot document");
            Ok(Some(snapshot))
        })
        .await
    }

    async fn save(&self, snapshot: &PortalSnapshot) -> SnapshotRepositoryResult<()> {
        let encoded =
            serde_json::to_vec_pretty(snapshot).map_err(SnapshotRepositoryError::persistence)?;
        self.run_blocking(move |directory, file_name| {
            let staging = Utf8PathBuf::from(format!("{file_name}.tmp"));
            directory
                .write(&staging, &encoded)
                .map_err(SnapshotRepositoryError::persistence)?;
            directory
                .rename(&staging, directory, file_name)
                .map_err(SnapshotRepositoryError::persistence)?;
            debug!(file = %file_name, bytes = encoded.len(), "saved snapshot document");
            Ok(())
        })
        .await
    }
}
