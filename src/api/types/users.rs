//! User endpoint request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Body of `POST /api/users`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// JSON-encoded user
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user_id: String,
}

/// Body of `POST /api/users/login`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Body of `PUT /api/users/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    /// JSON-encoded user, without an id
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_response_uses_user_id_key() {
        let response = CreateUserResponse {
            user_id: "abc".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["userId"], "abc");
    }

    #[test]
    fn test_login_request_missing_fields_default_to_empty() {
        let request: LoginRequest = serde_json::from_str("{}").unwrap();

        assert!(request.id.is_empty());
        assert!(request.password.is_empty());
    }

    #[test]
    fn test_create_request_requires_file() {
        assert!(serde_json::from_str::<CreateUserRequest>("{}").is_err());
    }
}
