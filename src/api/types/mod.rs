//! API request/response types

pub mod error;
pub mod json;
pub mod users;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use users::{
    CreateUserRequest, CreateUserResponse, GetUserResponse, ListUsersResponse, LoginRequest,
    LoginResponse, MessageResponse, UpdateUserRequest,
};
