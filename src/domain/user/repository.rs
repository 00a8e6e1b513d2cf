//! User record store trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Record store for users, keyed by [`UserId`]
///
/// Implementations must enforce id uniqueness on insert and report a
/// duplicate as [`DomainError::Conflict`].
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by id
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Insert a new user, assigning an id when the user has none.
    /// Returns the id the record was stored under.
    async fn insert(&self, user: User) -> Result<UserId, DomainError>;

    /// Replace the whole record stored at `id`. Returns false if absent.
    async fn replace(&self, id: &UserId, user: &User) -> Result<bool, DomainError>;

    /// Delete a user. Returns false if absent.
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// Scan all users in store-defined order
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Verify the store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::RwLock;

    /// Mock user repository for testing
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<HashMap<UserId, User>>>,
        should_fail: Arc<RwLock<bool>>,
        fail_inserts: Arc<RwLock<bool>>,
        fail_replaces: Arc<RwLock<bool>>,
        fail_deletes: Arc<RwLock<bool>>,
        fail_decode: Arc<RwLock<bool>>,
        delay: Arc<RwLock<Option<Duration>>>,
    }

    impl MockUserRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether all operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        /// Set whether inserts alone should fail
        pub async fn set_fail_inserts(&self, fail: bool) {
            *self.fail_inserts.write().await = fail;
        }

        /// Set whether replaces alone should fail
        pub async fn set_fail_replaces(&self, fail: bool) {
            *self.fail_replaces.write().await = fail;
        }

        /// Set whether deletes alone should fail
        pub async fn set_fail_deletes(&self, fail: bool) {
            *self.fail_deletes.write().await = fail;
        }

        /// Make scans fail the way a stored document that no longer decodes does
        pub async fn set_fail_decode(&self, fail: bool) {
            *self.fail_decode.write().await = fail;
        }

        /// Delay every operation, to exercise deadlines
        pub async fn set_delay(&self, delay: Duration) {
            *self.delay.write().await = Some(delay);
        }

        /// Number of stored records
        pub async fn len(&self) -> usize {
            self.users.read().await.len()
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if let Some(delay) = *self.delay.read().await {
                tokio::time::sleep(delay).await;
            }

            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.get(id).cloned())
        }

        async fn insert(&self, mut user: User) -> Result<UserId, DomainError> {
            self.check_should_fail().await?;

            if *self.fail_inserts.read().await {
                return Err(DomainError::storage("Mock repository configured to fail inserts"));
            }

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
            self.check_should_fail().await?;

            if *self.fail_replaces.read().await {
                return Err(DomainError::storage("Mock repository configured to fail replaces"));
            }

            let mut users = self.users.write().await;

            match users.get_mut(id) {
                Some(existing) => {
                    let mut replacement = user.clone();
                    replacement.assign_id(*id);
                    *existing = replacement;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
            self.check_should_fail().await?;

            if *self.fail_deletes.read().await {
                return Err(DomainError::storage("Mock repository configured to fail deletes"));
            }

            let mut users = self.users.write().await;
            Ok(users.remove(id).is_some())
        }

        async fn list(&self) -> Result<Vec<User>, DomainError> {
            self.check_should_fail().await?;

            if *self.fail_decode.read().await {
                return Err(DomainError::internal("Failed to decode stored user document"));
            }

            let users = self.users.read().await;
            Ok(users.values().cloned().collect())
        }

        async fn ping(&self) -> Result<(), DomainError> {
            self.check_should_fail().await
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::user::UserProfile;

        fn create_test_user(name: &str) -> User {
            let profile = UserProfile {
                name: name.to_string(),
                ..Default::default()
            };
            User::new("hashed_password", profile, "")
        }

        #[tokio::test]
        async fn test_insert_assigns_id() {
            let repo = MockUserRepository::new();

            let id = repo.insert(create_test_user("ann")).await.unwrap();
            assert!(!id.is_unset());

            let retrieved = repo.get(&id).await.unwrap().unwrap();
            assert_eq!(retrieved.id(), &id);
            assert_eq!(retrieved.profile().name, "ann");
        }

        #[tokio::test]
        async fn test_insert_duplicate_id() {
            let repo = MockUserRepository::new();
            let id = repo.insert(create_test_user("ann")).await.unwrap();

            let mut duplicate = create_test_user("bob");
            duplicate.assign_id(id);

            let result = repo.insert(duplicate).await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
            assert_eq!(repo.len().await, 1);
        }

        #[tokio::test]
        async fn test_targeted_failures_leave_other_calls_working() {
            let repo = MockUserRepository::new();
            let id = repo.insert(create_test_user("ann")).await.unwrap();

            repo.set_fail_replaces(true).await;
            repo.set_fail_deletes(true).await;
            repo.set_fail_decode(true).await;

            assert!(repo.get(&id).await.unwrap().is_some());
            assert!(matches!(
                repo.replace(&id, &create_test_user("bob")).await,
                Err(DomainError::Storage { .. })
            ));
            assert!(matches!(repo.delete(&id).await, Err(DomainError::Storage { .. })));
            assert!(matches!(repo.list().await, Err(DomainError::Internal { .. })));
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = MockUserRepository::new();
            repo.set_should_fail(true).await;

            assert!(repo.list().await.is_err());
            assert!(repo.ping().await.is_err());
        }
    }
}
