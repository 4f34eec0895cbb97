//!
//! SalesTrack server — login, user management and sales reporting over
//! flat-file record stores.
//! Reads configuration from TOML file (~/.config/salestrack/config.toml).

use std::sync::Arc;

use tracing::{error, info};

use salestrack::application::session::SessionRegistry;
use salestrack::config::AppConfig;
use salestrack::infrastructure::crypto::hash_password;
use salestrack::infrastructure::store::{CsvSalesStore, CsvUserStore};
use salestrack::support::errors::StoreError;
use salestrack::{create_api_router, default_config_path, ReportingService, UserService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("SALESTRACK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting SalesTrack server...");

    // ── Record stores ──────────────────────────────────────────
    let user_store = Arc::new(CsvUserStore::new(&app_cfg.store.users_file));
    let sales_store = Arc::new(CsvSalesStore::new(&app_cfg.store.sales_file));
    info!("User store: {}", user_store.path().display());
    info!("Sales store: {}", sales_store.path().display());

    // A missing user store is seeded with the bootstrap admin; an existing
    // but unparseable one stops the server with a diagnostic.
    if let Err(e) = ensure_user_store(&user_store, &app_cfg).await {
        error!("User store unusable: {}", e);
        return Err(e.into());
    }

    // ── Services ───────────────────────────────────────────────
    let sessions = SessionRegistry::shared();
    let user_service = Arc::new(UserService::new(
        user_store.clone(),
        sessions.clone(),
        app_cfg.security.clone(),
    ));
    let reporting = Arc::new(ReportingService::new(sales_store));

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(user_service, reporting, user_store, sessions);

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("SalesTrack server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

/// Seed the user store with the configured admin account when the file does
/// not exist yet. Any other load failure propagates: the server must not
/// start on a partially-loaded store.
async fn ensure_user_store(
    store: &CsvUserStore,
    app_cfg: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    use salestrack::domain::{Role, UserRecord, UserStore};

    match store.load().await {
        Ok(records) => {
            info!("User store loaded: {} record(s)", records.len());
            Ok(())
        }
        Err(StoreError::NotFound { .. }) => {
            info!("User store not found, creating default admin user...");

            let password_hash =
                hash_password(&app_cfg.admin.password, app_cfg.security.bcrypt_cost)?;
            let admin = UserRecord {
                username: app_cfg.admin.username.clone(),
                password_hash,
                role: Role::Admin,
            };
            store.save(&[admin]).await?;

            info!("Default admin created: {}", app_cfg.admin.username);
            info!("⚠️  Please change the admin password immediately!");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
