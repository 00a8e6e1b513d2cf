//! In-memory artifact store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::artifact::ArtifactStore;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of ArtifactStore
#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    artifacts: Arc<RwLock<HashMap<UserId, String>>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn write(&self, id: &UserId, contents: &str) -> Result<(), DomainError> {
        let mut artifacts = self.artifacts.write().await;
        artifacts.insert(*id, contents.to_string());
        Ok(())
    }

    async fn read(&self, id: &UserId) -> Result<Option<String>, DomainError> {
        let artifacts = self.artifacts.read().await;
        Ok(artifacts.get(id).cloned())
    }

    async fn exists(&self, id: &UserId) -> Result<bool, DomainError> {
        let artifacts = self.artifacts.read().await;
        Ok(artifacts.contains_key(id))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut artifacts = self.artifacts.write().await;
        Ok(artifacts.remove(id).is_some())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read_delete() {
        let store = InMemoryArtifactStore::new();
        let id = UserId::generate();

        assert!(store.read(&id).await.unwrap().is_none());

        store.write(&id, "note").await.unwrap();
        assert_eq!(store.read(&id).await.unwrap().as_deref(), Some("note"));

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.exists(&id).await.unwrap());
    }
}
