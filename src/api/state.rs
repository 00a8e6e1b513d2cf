//! Application state for shared services

use std::sync::Arc;
use std::time::Duration;

use crate::domain::artifact::ArtifactStore;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::{DomainError, RequestContext};
use crate::infrastructure::user::{AccountService, PasswordHasher};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    /// Deadline given to each request's store calls
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(account_service: Arc<dyn AccountServiceTrait>, request_timeout: Duration) -> Self {
        Self {
            account_service,
            request_timeout,
        }
    }
}

/// Trait for account service operations
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create_user(&self, ctx: &RequestContext, payload: &str) -> Result<UserId, DomainError>;
    async fn login(
        &self,
        ctx: &RequestContext,
        id: &str,
        password: &str,
    ) -> Result<String, DomainError>;
    async fn delete_user(&self, ctx: &RequestContext, id: &str) -> Result<(), DomainError>;
    async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, DomainError>;
    async fn get_user(&self, ctx: &RequestContext, id: &str) -> Result<User, DomainError>;
    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: &str,
        payload: &str,
    ) -> Result<(), DomainError>;
    async fn check_records(&self, ctx: &RequestContext) -> Result<(), DomainError>;
    async fn check_artifacts(&self, ctx: &RequestContext) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R, A, H> AccountServiceTrait for AccountService<R, A, H>
where
    R: UserRepository + 'static,
    A: ArtifactStore + 'static,
    H: PasswordHasher + 'static,
{
    async fn create_user(&self, ctx: &RequestContext, payload: &str) -> Result<UserId, DomainError> {
        AccountService::create_user(self, ctx, payload).await
    }

    async fn login(
        &self,
        ctx: &RequestContext,
        id: &str,
        password: &str,
    ) -> Result<String, DomainError> {
        AccountService::login(self, ctx, id, password).await
    }

    async fn delete_user(&self, ctx: &RequestContext, id: &str) -> Result<(), DomainError> {
        AccountService::delete_user(self, ctx, id).await
    }

    async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, DomainError> {
        AccountService::list_users(self, ctx).await
    }

    async fn get_user(&self, ctx: &RequestContext, id: &str) -> Result<User, DomainError> {
        AccountService::get_user(self, ctx, id).await
    }

    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: &str,
        payload: &str,
    ) -> Result<(), DomainError> {
        AccountService::update_user(self, ctx, id, payload).await
    }

    async fn check_records(&self, ctx: &RequestContext) -> Result<(), DomainError> {
        AccountService::check_records(self, ctx).await
    }

    async fn check_artifacts(&self, ctx: &RequestContext) -> Result<(), DomainError> {
        AccountService::check_artifacts(self, ctx).await
    }
}
