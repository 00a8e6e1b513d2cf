//! Filesystem artifact store
//!
//! One file per user, named `<id>.txt`, holding the raw artifact bytes.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::artifact::ArtifactStore;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Artifact store backed by a flat directory
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    root: PathBuf,
}

impl FileArtifactStore {
    /// Create a store rooted at `root` without touching the filesystem
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store rooted at `root`, creating the directory if missing
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let store = Self::new(root);

        tokio::fs::create_dir_all(&store.root).await.map_err(|e| {
            DomainError::artifact(format!(
                "Failed to create artifact directory '{}': {}",
                store.root.display(),
                e
            ))
        })?;

        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the artifact for `id`
    pub fn path_for(&self, id: &UserId) -> PathBuf {
        self.root.join(format!("{}.txt", id))
    }
}

#[async_trait]
impl ArtifactStore for FileArtifactStore {
    async fn write(&self, id: &UserId, contents: &str) -> Result<(), DomainError> {
        let path = self.path_for(id);

        tokio::fs::write(&path, contents.as_bytes())
            .await
            .map_err(|e| {
                DomainError::artifact(format!("Failed to write '{}': {}", path.display(), e))
            })
    }

    async fn read(&self, id: &UserId) -> Result<Option<String>, DomainError> {
        let path = self.path_for(id);

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::artifact(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, id: &UserId) -> Result<bool, DomainError> {
        let path = self.path_for(id);

        tokio::fs::try_exists(&path).await.map_err(|e| {
            DomainError::artifact(format!("Failed to stat '{}': {}", path.display(), e))
        })
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let path = self.path_for(id);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::artifact(format!(
                "Failed to delete '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let metadata = tokio::fs::metadata(&self.root).await.map_err(|e| {
            DomainError::artifact(format!(
                "Artifact directory '{}' unavailable: {}",
                self.root.display(),
                e
            ))
        })?;

        if !metadata.is_dir() {
            return Err(DomainError::artifact(format!(
                "Artifact path '{}' is not a directory",
                self.root.display()
            )));
        }

        Ok(())
    }
}
