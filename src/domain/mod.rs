pub mod sale;
pub mod user;

// Re-export commonly used types
pub use sale::{SaleRecord, SalesStore};
pub use user::{find_user, Role, UserRecord, UserStore};

// Re-export DomainError from support for convenience
pub use crate::support::errors::{DomainError, DomainResult};
