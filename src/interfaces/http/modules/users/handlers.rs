//! User management API handlers
//!
//! Admin-only endpoints for adding, listing and deleting accounts.
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateUserRequest, UserDto, UserListResponse};
use crate::application::identity::UserService;
use crate::domain::DomainError;
use crate::infrastructure::store::CsvUserStore;
use crate::interfaces::http::common::ApiResponse;

/// User handler state — concrete over `CsvUserStore` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub service: Arc<UserService<CsvUserStore>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User list, hashes omitted", body = ApiResponse<UserListResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admins only")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
) -> Result<Json<ApiResponse<UserListResponse>>, (StatusCode, Json<ApiResponse<UserListResponse>>)> {
    match state.service.list_users().await {
        Ok(records) => {
            let mut users: Vec<UserDto> = records.into_iter().map(UserDto::from).collect();
            users.sort_by(|a, b| {
                a.role
                    .as_str()
                    .cmp(b.role.as_str())
                    .then_with(|| a.username.cmp(&b.username))
            });
            let total = users.len();
            Ok(Json(ApiResponse::success(UserListResponse { users, total })))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<UserDto>>)> {
    match state
        .service
        .add_user(&request.username, &request.password, request.role)
        .await
    {
        Ok(record) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(UserDto::from(record))),
        )),
        Err(e) => {
            let status = match &e {
                DomainError::EmptyField | DomainError::PasswordTooShort { .. } => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::DuplicateUsername(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(ApiResponse::error(e.to_string()))))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{username}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username to delete")),
    responses(
        (status = 200, description = "User absent after the call"),
        (status = 400, description = "No user selected")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.delete_user(&username).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => {
            let status = match &e {
                DomainError::UserNotSelected => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(ApiResponse::error(e.to_string()))))
        }
    }
}
