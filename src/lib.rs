//! # SalesTrack Service
//!
//! Internal sales-tracking service: login backed by a flat-file user store,
//! admin reporting over a sales-records file, and user management.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and store traits
//! - **application**: Business logic — identity, sessions, reporting
//! - **infrastructure**: External concerns (password hashing, CSV stores)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export the API router
pub use interfaces::http::create_api_router;

// Re-export core types for easy access
pub use application::identity::UserService;
pub use application::reporting::ReportingService;
pub use application::session::{SessionRegistry, SharedSessionRegistry};
pub use domain::{Role, SaleRecord, UserRecord};
