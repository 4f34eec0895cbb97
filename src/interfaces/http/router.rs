//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::identity::UserService;
use crate::application::reporting::ReportingService;
use crate::application::session::SharedSessionRegistry;
use crate::infrastructure::store::{CsvSalesStore, CsvUserStore};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, require_admin, AuthState};
use crate::interfaces::http::modules::{auth, health, reports, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Opaque session token from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::logout,
        auth::get_current_user,
        // Users
        users::list_users,
        users::create_user,
        users::delete_user,
        // Reports
        reports::summary,
        reports::revenue_by_customer,
        reports::units_by_product,
        reports::revenue_trend,
        reports::sales_history,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::SessionInfo,
            // Users
            users::CreateUserRequest,
            users::UserDto,
            users::UserListResponse,
            // Reports
            reports::SummaryResponse,
            reports::CustomerRevenueDto,
            reports::RevenueByCustomerResponse,
            reports::ProductUnitsDto,
            reports::UnitsByProductResponse,
            reports::TrendPointDto,
            reports::RevenueTrendResponse,
            reports::SaleDto,
            reports::SalesHistoryResponse,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Login, logout and session inspection"),
        (name = "Users", description = "User management (admin only)"),
        (name = "Reports", description = "Sales KPIs and chart-ready series (admin only)"),
    ),
    info(
        title = "SalesTrack API",
        version = "1.0.0",
        description = "REST API for the internal sales-tracking system",
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    user_service: Arc<UserService<CsvUserStore>>,
    reporting: Arc<ReportingService<CsvSalesStore>>,
    user_store: Arc<CsvUserStore>,
    sessions: SharedSessionRegistry,
) -> Router {
    let middleware_state = AuthState {
        sessions: sessions.clone(),
    };

    let auth_state = auth::AuthHandlerState {
        service: user_service.clone(),
    };
    let user_state = users::UserHandlerState {
        service: user_service,
    };
    let reports_state = reports::ReportsHandlerState { reporting };
    let health_state = health::HealthState {
        user_store,
        sessions,
        started_at: Arc::new(Instant::now()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // User management routes (admin only)
    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{username}", delete(users::delete_user))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    // Reporting routes (admin only)
    let report_routes = Router::new()
        .route("/summary", get(reports::summary))
        .route("/revenue-by-customer", get(reports::revenue_by_customer))
        .route("/units-by-product", get(reports::units_by_product))
        .route("/revenue-trend", get(reports::revenue_trend))
        .route("/sales", get(reports::sales_history))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(reports_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check).with_state(health_state))
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Reports
        .nest("/api/v1/reports", report_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
