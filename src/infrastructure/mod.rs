//! Infrastructure layer - store implementations, hashing, logging

pub mod artifact;
pub mod logging;
pub mod storage;
pub mod user;
