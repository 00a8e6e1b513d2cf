//! User management endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use tracing::debug;

use crate::api::middleware::RequestScope;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CreateUserRequest, CreateUserResponse, GetUserResponse, Json, ListUsersResponse,
    LoginRequest, LoginResponse, MessageResponse, UpdateUserRequest,
};

/// Routes mounted under `/api/users`
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/login", post(login))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    debug!(request_id = ctx.request_id(), "Create user request");

    let user_id = state.account_service.create_user(&ctx, &request.file).await?;

    Ok(Json(CreateUserResponse {
        user_id: user_id.to_string(),
    }))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    debug!(request_id = ctx.request_id(), "Login request");

    let token = state
        .account_service
        .login(&ctx, &request.id, &request.password)
        .await?;

    Ok(Json(LoginResponse { token }))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let users = state.account_service.list_users(&ctx).await?;

    Ok(Json(ListUsersResponse { users }))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    Path(id): Path<String>,
) -> Result<Json<GetUserResponse>, ApiError> {
    let user = state.account_service.get_user(&ctx, &id).await?;

    Ok(Json(GetUserResponse { user }))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(request_id = ctx.request_id(), user_id = %id, "Delete user request");

    state.account_service.delete_user(&ctx, &id).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(request_id = ctx.request_id(), user_id = %id, "Update user request");

    state
        .account_service
        .update_user(&ctx, &id, &request.file)
        .await?;

    Ok(Json(MessageResponse::new("User updated successfully")))
}
