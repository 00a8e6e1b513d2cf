//! User payload validation utilities

use thiserror::Error;

use super::entity::User;

/// Errors that can occur while decoding or validating user input
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Invalid user id: '{0}'")]
    InvalidId(String),

    #[error("Malformed user payload: {0}")]
    MalformedPayload(String),

    #[error("User id is immutable and cannot be set in the payload")]
    IdImmutable,
}

/// Decode a JSON-encoded user payload
///
/// Missing fields take their zero value. A present but unparsable id, or
/// any type mismatch, is a malformed payload.
pub fn decode_user_payload(payload: &str) -> Result<User, UserValidationError> {
    serde_json::from_str(payload).map_err(|e| UserValidationError::MalformedPayload(e.to_string()))
}

/// Reject payloads that try to set the id
pub fn validate_id_unset(user: &User) -> Result<(), UserValidationError> {
    if user.id().is_unset() {
        Ok(())
    } else {
        Err(UserValidationError::IdImmutable)
    }
}
