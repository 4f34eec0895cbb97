//! HTTP REST API interfaces
//!
//! - `middleware`: Session-token authentication middleware + admin gate
//! - `modules`: Request handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
