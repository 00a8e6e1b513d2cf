//! Artifact store trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Key-addressed store holding one text blob per user
#[async_trait]
pub trait ArtifactStore: Send + Sync + Debug {
    /// Create or overwrite the artifact for `id`
    async fn write(&self, id: &UserId, contents: &str) -> Result<(), DomainError>;

    /// Read the artifact for `id`, if any
    async fn read(&self, id: &UserId) -> Result<Option<String>, DomainError>;

    /// Check whether an artifact exists for `id`
    async fn exists(&self, id: &UserId) -> Result<bool, DomainError>;

    /// Remove the artifact for `id`. Returns false if it was already absent.
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// Verify the store is usable
    async fn ping(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::RwLock;

    /// Mock artifact store with per-operation failure switches
    #[derive(Debug, Default)]
    pub struct MockArtifactStore {
        artifacts: Arc<RwLock<HashMap<UserId, String>>>,
        fail_writes: Arc<RwLock<bool>>,
        fail_deletes: Arc<RwLock<bool>>,
        fail_lookups: Arc<RwLock<bool>>,
        write_delay: Arc<RwLock<Option<Duration>>>,
    }

    impl MockArtifactStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn set_fail_writes(&self, fail: bool) {
            *self.fail_writes.write().await = fail;
        }

        pub async fn set_fail_deletes(&self, fail: bool) {
            *self.fail_deletes.write().await = fail;
        }

        pub async fn set_fail_lookups(&self, fail: bool) {
            *self.fail_lookups.write().await = fail;
        }

        /// Slow down writes, to exercise deadlines
        pub async fn set_write_delay(&self, delay: Duration) {
            *self.write_delay.write().await = Some(delay);
        }
    }

    #[async_trait]
    impl ArtifactStore for MockArtifactStore {
        async fn write(&self, id: &UserId, contents: &str) -> Result<(), DomainError> {
            if let Some(delay) = *self.write_delay.read().await {
                tokio::time::sleep(delay).await;
            }

            if *self.fail_writes.read().await {
                return Err(DomainError::artifact("Mock artifact store configured to fail writes"));
            }

            self.artifacts.write().await.insert(*id, contents.to_string());
            Ok(())
        }

        async fn read(&self, id: &UserId) -> Result<Option<String>, DomainError> {
            Ok(self.artifacts.read().await.get(id).cloned())
        }

        async fn exists(&self, id: &UserId) -> Result<bool, DomainError> {
            if *self.fail_lookups.read().await {
                return Err(DomainError::artifact("Mock artifact store configured to fail lookups"));
            }

            Ok(self.artifacts.read().await.contains_key(id))
        }

        async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
            if *self.fail_deletes.read().await {
                return Err(DomainError::artifact("Mock artifact store configured to fail deletes"));
            }

            Ok(self.artifacts.write().await.remove(id).is_some())
        }

        async fn ping(&self) -> Result<(), DomainError> {
            Ok(())
        }
    }
}
