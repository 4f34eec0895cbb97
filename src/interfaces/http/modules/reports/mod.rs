//! Reports module — dashboard KPIs and chart-ready series (admin-only)

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
