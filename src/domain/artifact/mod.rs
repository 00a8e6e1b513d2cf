//! Artifact domain
//!
//! Each user owns at most one free-text artifact, addressed by user id and
//! kept outside the record store.

mod repository;

pub use repository::ArtifactStore;

#[cfg(test)]
pub use repository::mock::MockArtifactStore;
