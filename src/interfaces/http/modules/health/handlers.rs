//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::session::SharedSessionRegistry;
use crate::domain::UserStore;
use crate::infrastructure::store::CsvUserStore;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub user_store: Arc<CsvUserStore>,
    pub sessions: SharedSessionRegistry,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub user_store: ComponentHealth,
    pub active_sessions: u32,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is degraded", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();
    let active_sessions = state.sessions.active_count() as u32;

    // Probe the user store with a full read; it is small by construction.
    let store_start = Instant::now();
    let store_health = match state.user_store.load().await {
        Ok(_) => ComponentHealth {
            status: "ok".to_string(),
            latency_ms: Some(store_start.elapsed().as_millis() as u64),
        },
        Err(_) => ComponentHealth {
            status: "error".to_string(),
            latency_ms: None,
        },
    };

    let overall_status = if store_health.status == "ok" {
        "ok"
    } else {
        "degraded"
    };

    let http_status = if overall_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            user_store: store_health,
            active_sessions,
        }),
    )
}
