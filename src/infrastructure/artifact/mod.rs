//! Artifact store implementations

mod file_store;
mod in_memory;

pub use file_store::FileArtifactStore;
pub use in_memory::InMemoryArtifactStore;
