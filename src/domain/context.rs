//! Per-request context threaded through every store call

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use super::DomainError;

/// Deadline and correlation id for a single request
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    deadline: Instant,
}

impl RequestContext {
    /// Create a context whose deadline is `timeout` from now
    pub fn new(request_id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            request_id: request_id.into(),
            deadline: Instant::now() + timeout,
        }
    }

    /// Create a context with a fresh request id
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), timeout)
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Run a store call, failing with a storage timeout once the deadline passes
    pub async fn bound<T, F>(&self, operation: &str, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout_at(self.deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::storage(format!("{} timed out", operation))),
        }
    }
}
