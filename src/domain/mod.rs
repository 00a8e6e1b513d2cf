//! Domain layer - Core business logic and entities

pub mod artifact;
pub mod context;
pub mod error;
pub mod user;

pub use artifact::ArtifactStore;
pub use context::RequestContext;
pub use error::DomainError;
pub use user::{Friend, User, UserId, UserProfile, UserRepository};
