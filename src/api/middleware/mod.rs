//! API middleware components

pub mod logging;
pub mod request_context;

pub use logging::logging_middleware;
pub use request_context::RequestScope;
