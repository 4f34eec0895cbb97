//! Interface adapters — the HTTP REST surface.

pub mod http;
