//! User infrastructure module
//!
//! This module provides implementations for account management, including
//! password hashing with Argon2, opaque token issuing, in-memory and
//! PostgreSQL record stores, and the account service.

mod password;
mod postgres_repository;
mod repository;
mod service;
mod token;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::AccountService;
pub use token::{TokenIssuer, DEFAULT_TOKEN_LENGTH};
