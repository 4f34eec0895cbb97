//! In-memory session registry
//!
//! An authenticated identity is an explicit `Session` object resolved from
//! an opaque bearer token — never ambient global state. Sessions live only
//! in process memory and are lost on restart.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::RngCore;

use crate::domain::Role;

/// An authenticated identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Registry of live sessions, keyed by token.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
}

pub type SharedSessionRegistry = Arc<SessionRegistry>;

impl SessionRegistry {
    pub fn shared() -> SharedSessionRegistry {
        Arc::new(Self::default())
    }

    /// Create a session for a freshly authenticated user.
    pub fn create(&self, username: &str, role: Role) -> Session {
        let session = Session {
            token: generate_token(),
            username: username.to_string(),
            role,
            created_at: Utc::now(),
        };
        self.sessions.insert(session.token.clone(), session.clone());
        session
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|s| s.value().clone())
    }

    /// Drop a session. Returns whether one existed.
    pub fn remove(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}

/// 32 bytes of CSPRNG output, URL-safe base64.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique() {
        let registry = SessionRegistry::default();
        let first = registry.create("alice", Role::Admin);
        let second = registry.create("alice", Role::Admin);
        assert_ne!(first.token, second.token);
        assert_eq!(registry.active_count(), 2);
    }

    #[test]
    fn lookup_resolves_identity() {
        let registry = SessionRegistry::default();
        let session = registry.create("bob", Role::Salesperson);

        let resolved = registry.get(&session.token).unwrap();
        assert_eq!(resolved.username, "bob");
        assert_eq!(resolved.role, Role::Salesperson);

        assert!(registry.get("no-such-token").is_none());
    }

    #[test]
    fn remove_invalidates_the_token() {
        let registry = SessionRegistry::default();
        let session = registry.create("carol", Role::Admin);

        assert!(registry.remove(&session.token));
        assert!(registry.get(&session.token).is_none());
        assert!(!registry.remove(&session.token));
    }
}
