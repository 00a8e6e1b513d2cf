//! Request context extractor

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use super::logging::REQUEST_ID_HEADER;
use crate::api::state::AppState;
use crate::domain::RequestContext;

/// Builds the [`RequestContext`] for a handler: the request id from the
/// `x-request-id` header (or a fresh one) and the configured deadline.
#[derive(Debug, Clone)]
pub struct RequestScope(pub RequestContext);

impl FromRequestParts<AppState> for RequestScope {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = match parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        {
            Some(request_id) => RequestContext::new(request_id, state.request_timeout),
            None => RequestContext::with_timeout(state.request_timeout),
        };

        Ok(RequestScope(ctx))
    }
}
