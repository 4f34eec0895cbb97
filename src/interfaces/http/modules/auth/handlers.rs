//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{LoginRequest, LoginResponse, SessionInfo};
use crate::application::identity::UserService;
use crate::domain::DomainError;
use crate::infrastructure::store::CsvUserStore;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Auth handler state — concrete over `CsvUserStore` for Axum compatibility.
#[derive(Clone)]
pub struct AuthHandlerState {
    pub service: Arc<UserService<CsvUserStore>>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    match state.service.login(&request.username, &request.password).await {
        Ok(auth) => Ok(Json(ApiResponse::success(LoginResponse {
            token: auth.token,
            username: auth.username,
            role: auth.role,
        }))),
        // Unknown-username and wrong-password stay distinct in the service
        // (and its logs) but collapse to one message at this boundary.
        Err(DomainError::UsernameNotFound | DomainError::IncorrectPassword) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session closed"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<()>> {
    state.service.logout(&user.token);
    Json(ApiResponse::success(()))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session identity", body = ApiResponse<SessionInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<SessionInfo>> {
    Json(ApiResponse::success(SessionInfo {
        username: user.username,
        role: user.role,
    }))
}
