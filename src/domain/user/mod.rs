//! User domain
//!
//! This module provides the user record type, identity keys, payload
//! validation, and the record store trait.

mod entity;
mod repository;
mod validation;

pub use entity::{Friend, User, UserId, UserProfile};
pub use repository::UserRepository;
pub use validation::{decode_user_payload, validate_id_unset, UserValidationError};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
