//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn insert(&self, mut user: User) -> Result<UserId, DomainError> {
        // Check and insert under one write lock so concurrent inserts of the
        // same id cannot both succeed
        let mut users = self.users.write().await;

        if user.id().is_unset() {
            user.assign_id(UserId::generate());
        }

        let id = *user.id();

        if users.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        users.insert(id, user);

        Ok(id)
    }

    async fn replace(&self, id: &UserId, user: &User) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        let Some(existing) = users.get_mut(id) else {
            return Ok(false);
        };

        let mut replacement = user.clone();
        replacement.assign_id(*id);
        *existing = replacement;

        Ok(true)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
