//! Account service: user lifecycle across the record and artifact stores
//!
//! Every create, update and delete touches two stores without a shared
//! transaction. When the artifact step fails after the record step has
//! succeeded, the record change is undone. If the undo also fails the
//! divergence is logged at error level with enough detail to reconcile by
//! hand, and the caller still gets the artifact error.
//!
//! Once the record change has committed, the artifact step and any undo run
//! on their own [`STEP_TIMEOUT`] deadline instead of the request's. Cutting
//! the artifact step short would only leave the stores apart: a file write
//! abandoned on timeout keeps running on the blocking pool and can land after
//! the undo. That window remains if the step deadline itself expires.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::artifact::ArtifactStore;
use crate::domain::user::{
    decode_user_payload, validate_id_unset, User, UserId, UserRepository,
};
use crate::domain::{DomainError, RequestContext};

use super::password::PasswordHasher;
use super::token::TokenIssuer;

/// Budget for each artifact step after a committed record change, and for
/// each undo step
const STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of undoing a record change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rollback {
    /// The record change was reverted
    Applied,
    /// Nothing to revert: the record had already changed again
    NoOp,
    /// The undo itself failed; the stores diverge
    Failed,
}

/// Parse a caller-supplied id. Failures are authentication errors so that
/// malformed and unknown ids look alike from outside.
fn parse_id(id: &str) -> Result<UserId, DomainError> {
    match UserId::parse(id) {
        Ok(user_id) if !user_id.is_unset() => Ok(user_id),
        _ => Err(DomainError::auth("invalid id")),
    }
}

/// Fresh deadline for a step that must not be cut short by the request's
fn step_scope(ctx: &RequestContext) -> RequestContext {
    RequestContext::new(ctx.request_id(), STEP_TIMEOUT)
}

/// Collapse any lookup failure other than a conflict into a storage error
fn storage_failure(err: DomainError) -> DomainError {
    match err {
        DomainError::Storage { .. } | DomainError::Conflict { .. } => err,
        other => DomainError::storage(other.message().to_string()),
    }
}

/// Account service for user management and authentication
#[derive(Debug)]
pub struct AccountService<R: UserRepository, A: ArtifactStore, H: PasswordHasher> {
    repository: Arc<R>,
    artifacts: Arc<A>,
    hasher: Arc<H>,
    tokens: TokenIssuer,
}

impl<R: UserRepository, A: ArtifactStore, H: PasswordHasher> AccountService<R, A, H> {
    /// Create a new account service
    pub fn new(repository: Arc<R>, artifacts: Arc<A>, hasher: Arc<H>, tokens: TokenIssuer) -> Self {
        Self {
            repository,
            artifacts,
            hasher,
            tokens,
        }
    }

    /// Create a user from a JSON-encoded payload and return its id
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        payload: &str,
    ) -> Result<UserId, DomainError> {
        info!(request_id = ctx.request_id(), "Creating user");

        let mut user =
            decode_user_payload(payload).map_err(|e| DomainError::validation(e.to_string()))?;

        // Advisory only: the store's uniqueness check on insert is authoritative
        if !user.id().is_unset() {
            let existing = ctx
                .bound("user lookup", self.repository.get(user.id()))
                .await
                .map_err(storage_failure)?;

            if existing.is_some() {
                return Err(DomainError::conflict("User already exists"));
            }
        }

        let hash = self.hasher.hash(user.password())?;
        user.set_password_hash(hash);

        let data = user.data().to_string();

        let user_id = ctx
            .bound("user insert", self.repository.insert(user))
            .await
            .map_err(storage_failure)?;

        if let Err(e) = step_scope(ctx)
            .bound("artifact write", self.artifacts.write(&user_id, &data))
            .await
        {
            self.compensate(ctx, &user_id, "artifact write", &e, "delete inserted record", async {
                self.repository.delete(&user_id).await
            })
            .await;

            return Err(e);
        }

        info!(request_id = ctx.request_id(), user_id = %user_id, "User created");

        Ok(user_id)
    }

    /// Authenticate a user and issue an opaque token
    ///
    /// The token is not recorded or signed; nothing validates it later.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        id: &str,
        password: &str,
    ) -> Result<String, DomainError> {
        info!(request_id = ctx.request_id(), "Logging user in");

        let user_id = parse_id(id)?;

        let user = match ctx.bound("user lookup", self.repository.get(&user_id)).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(request_id = ctx.request_id(), user_id = %user_id, "Login for unknown user");
                return Err(DomainError::auth("no such user"));
            }
            Err(e) => {
                warn!(request_id = ctx.request_id(), user_id = %user_id, error = %e, "Login lookup failed");
                return Err(DomainError::auth("invalid credentials"));
            }
        };

        if !self.hasher.verify(password, user.password()) {
            warn!(request_id = ctx.request_id(), user_id = %user_id, "Login with wrong password");
            return Err(DomainError::auth("invalid credentials"));
        }

        let token = self.tokens.issue_default();

        info!(request_id = ctx.request_id(), user_id = %user_id, "User logged in");

        Ok(token)
    }

    /// Delete a user and its artifact
    pub async fn delete_user(&self, ctx: &RequestContext, id: &str) -> Result<(), DomainError> {
        info!(request_id = ctx.request_id(), "Deleting user");

        let user_id = parse_id(id)?;
        let existing = self.find_existing(ctx, &user_id).await?;

        let deleted = ctx
            .bound("user delete", self.repository.delete(&user_id))
            .await
            .map_err(storage_failure)?;

        if !deleted {
            return Err(DomainError::not_found("User not found"));
        }

        match step_scope(ctx)
            .bound("artifact delete", self.artifacts.delete(&user_id))
            .await
        {
            Ok(true) => {}
            Ok(false) => debug!(user_id = %user_id, "No artifact to delete"),
            Err(e) => {
                self.compensate(ctx, &user_id, "artifact delete", &e, "restore deleted record", async {
                    // A conflict means the id is back in the store already
                    match self.repository.insert(existing.clone()).await {
                        Ok(_) => Ok(true),
                        Err(e) if e.is_conflict() => Ok(false),
                        Err(e) => Err(e),
                    }
                })
                .await;

                return Err(e);
            }
        }

        info!(request_id = ctx.request_id(), user_id = %user_id, "User deleted");

        Ok(())
    }

    /// List all users in store-defined order
    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, DomainError> {
        info!(request_id = ctx.request_id(), "Listing users");

        ctx.bound("user scan", self.repository.list()).await
    }

    /// Get a user by id
    pub async fn get_user(&self, ctx: &RequestContext, id: &str) -> Result<User, DomainError> {
        info!(request_id = ctx.request_id(), "Getting user by id");

        let user_id = parse_id(id)?;
        self.find_existing(ctx, &user_id).await
    }

    /// Replace every field of a user except its id
    ///
    /// The artifact is only rewritten when one already exists.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        id: &str,
        payload: &str,
    ) -> Result<(), DomainError> {
        info!(request_id = ctx.request_id(), "Updating user");

        let user_id = parse_id(id)?;

        let mut candidate =
            decode_user_payload(payload).map_err(|e| DomainError::validation(e.to_string()))?;

        validate_id_unset(&candidate).map_err(|_| DomainError::validation("id immutable"))?;

        let existing = self.find_existing(ctx, &user_id).await?;

        // Stored passwords are always hashes, so an omitted password keeps
        // the current one rather than storing an empty string
        if candidate.password().is_empty() {
            candidate.set_password_hash(existing.password());
        } else {
            let hash = self.hasher.hash(candidate.password())?;
            candidate.set_password_hash(hash);
        }

        let replaced = ctx
            .bound("user replace", self.repository.replace(&user_id, &candidate))
            .await
            .map_err(storage_failure)?;

        if !replaced {
            return Err(DomainError::not_found("User not found"));
        }

        let step = step_scope(ctx);

        let artifact_result = match step
            .bound("artifact lookup", self.artifacts.exists(&user_id))
            .await
        {
            Ok(true) => {
                step.bound("artifact write", self.artifacts.write(&user_id, candidate.data()))
                    .await
            }
            Ok(false) => {
                debug!(user_id = %user_id, "No artifact present; leaving it absent");
                Ok(())
            }
            Err(e) => Err(e),
        };

        if let Err(e) = artifact_result {
            self.compensate(ctx, &user_id, "artifact update", &e, "restore previous record", async {
                self.repository.replace(&user_id, &existing).await
            })
            .await;

            return Err(e);
        }

        info!(request_id = ctx.request_id(), user_id = %user_id, "User updated");

        Ok(())
    }

    /// Check the record store
    pub async fn check_records(&self, ctx: &RequestContext) -> Result<(), DomainError> {
        ctx.bound("record store ping", self.repository.ping()).await
    }

    /// Check the artifact store
    pub async fn check_artifacts(&self, ctx: &RequestContext) -> Result<(), DomainError> {
        ctx.bound("artifact store ping", self.artifacts.ping()).await
    }

    async fn find_existing(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
    ) -> Result<User, DomainError> {
        ctx.bound("user lookup", self.repository.get(user_id))
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }

    /// Undo a committed record change after its artifact step failed.
    /// `undo` resolves to whether it changed anything.
    async fn compensate<F>(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
        failed_step: &str,
        cause: &DomainError,
        action: &str,
        undo: F,
    ) -> Rollback
    where
        F: Future<Output = Result<bool, DomainError>>,
    {
        match step_scope(ctx).bound(action, undo).await {
            Ok(true) => {
                warn!(
                    request_id = ctx.request_id(),
                    user_id = %user_id,
                    failed_step,
                    action,
                    error = %cause,
                    "Artifact step failed; record change rolled back"
                );
                Rollback::Applied
            }
            Ok(false) => {
                warn!(
                    request_id = ctx.request_id(),
                    user_id = %user_id,
                    failed_step,
                    action,
                    error = %cause,
                    "Artifact step failed; record already changed, nothing rolled back"
                );
                Rollback::NoOp
            }
            Err(undo_error) => {
                error!(
                    request_id = ctx.request_id(),
                    user_id = %user_id,
                    failed_step,
                    action,
                    error = %cause,
                    compensation_error = %undo_error,
                    "Artifact step failed and rollback failed; record and artifact diverge"
                );
                Rollback::Failed
            }
        }
    }
}
