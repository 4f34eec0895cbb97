//! Application layer — business logic and use-case orchestration.

pub mod identity;
pub mod reporting;
pub mod session;

pub use identity::{AuthResult, UserService};
pub use reporting::ReportingService;
pub use session::{Session, SessionRegistry, SharedSessionRegistry};
