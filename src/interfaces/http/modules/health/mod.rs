//! Health module — service liveness

pub mod handlers;

pub use handlers::*;
