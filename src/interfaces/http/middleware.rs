//! Authentication middleware for Axum
//!
//! Resolves `Authorization: Bearer <token>` against the in-memory session
//! registry and attaches the authenticated identity to the request as an
//! extension. A second layer gates admin-only routes on the role.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::session::SharedSessionRegistry;
use crate::domain::Role;
use crate::interfaces::http::common::ApiResponse;

/// Authentication state shared by all protected routes.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: SharedSessionRegistry,
}

/// Authenticated identity riding the request.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub token: String,
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Session-token authentication middleware.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(StatusCode::UNAUTHORIZED, "Not authenticated");
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(StatusCode::UNAUTHORIZED, "Invalid authorization header");
    };

    match auth_state.sessions.get(token) {
        Some(session) => {
            request.extensions_mut().insert(AuthenticatedUser {
                token: session.token,
                username: session.username,
                role: session.role,
            });
            next.run(request).await
        }
        None => auth_error_response(StatusCode::UNAUTHORIZED, "Session expired or unknown"),
    }
}

/// Role gate for admin-only routes. Layered after `auth_middleware`.
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => auth_error_response(StatusCode::FORBIDDEN, "Access denied: admins only"),
        None => auth_error_response(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

fn auth_error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
