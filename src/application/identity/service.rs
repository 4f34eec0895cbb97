//! User management service — application-layer orchestration
//!
//! All credential-store business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::session::{Session, SharedSessionRegistry};
use crate::config::SecurityConfig;
use crate::domain::{find_user, DomainError, DomainResult, Role, UserRecord, UserStore};
use crate::infrastructure::crypto::{hash_password, migrate_plaintext, verify_password};
use crate::support::errors::StoreError;

/// Authentication result returned after a successful login.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// User service — orchestrates all identity / user-management use-cases.
///
/// Generic over `S: UserStore` so it stays decoupled from the flat-file
/// persistence layer.
pub struct UserService<S: UserStore> {
    store: Arc<S>,
    sessions: SharedSessionRegistry,
    security: SecurityConfig,
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: Arc<S>, sessions: SharedSessionRegistry, security: SecurityConfig) -> Self {
        Self {
            store,
            sessions,
            security,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username + password and open a session.
    ///
    /// The two failure kinds stay distinct here so callers can log them;
    /// the HTTP boundary collapses both into one generic message.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let records = self.store.load().await?;

        let Some(user) = find_user(&records, username) else {
            warn!(username, "Login rejected: unknown username");
            return Err(DomainError::UsernameNotFound);
        };

        if !verify_password(password, &user.password_hash) {
            warn!(username, "Login rejected: incorrect password");
            return Err(DomainError::IncorrectPassword);
        }

        let session = self.sessions.create(&user.username, user.role);
        info!(username = %user.username, role = %user.role, "Login succeeded");

        Ok(AuthResult {
            token: session.token,
            username: session.username,
            role: session.role,
        })
    }

    /// Close a session. Unknown tokens are already logged out.
    pub fn logout(&self, token: &str) {
        if self.sessions.remove(token) {
            info!("Session closed");
        }
    }

    /// Resolve a bearer token to a live session.
    pub fn authenticate(&self, token: &str) -> Option<Session> {
        self.sessions.get(token)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// All records, in store order. Callers expose these without hashes.
    pub async fn list_users(&self) -> DomainResult<Vec<UserRecord>> {
        Ok(self.store.load().await?)
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Add a user. Existing records are never touched; the new record is
    /// appended with a freshly salted hash.
    pub async fn add_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> DomainResult<UserRecord> {
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::EmptyField);
        }
        let min = self.security.min_password_length;
        if password.chars().count() < min {
            return Err(DomainError::PasswordTooShort { min });
        }

        let mut records = self.store.load().await?;
        if find_user(&records, username).is_some() {
            return Err(DomainError::DuplicateUsername(username.to_string()));
        }

        let password_hash =
            hash_password(password, self.security.bcrypt_cost).map_err(StoreError::Crypto)?;
        let record = UserRecord {
            username: username.to_string(),
            password_hash,
            role,
        };
        records.push(record.clone());
        self.store.save(&records).await?;

        info!(username, role = %role, "User added");
        Ok(record)
    }

    /// Delete every record with the exact username. Deleting an absent
    /// username still succeeds: the post-condition "record absent" holds
    /// either way.
    pub async fn delete_user(&self, username: &str) -> DomainResult<()> {
        if username.is_empty() {
            return Err(DomainError::UserNotSelected);
        }

        let mut records = self.store.load().await?;
        let before = records.len();
        records.retain(|r| r.username != username);

        if records.len() != before {
            self.store.save(&records).await?;
            info!(username, removed = before - records.len(), "User deleted");
        }
        Ok(())
    }

    // ── Migration ───────────────────────────────────────────────

    /// One-shot pass converting any remaining plaintext passwords to
    /// salted hashes. Idempotent; returns the number of records rehashed.
    pub async fn migrate_store(&self) -> DomainResult<usize> {
        let mut records = self.store.load().await?;
        let migrated =
            migrate_plaintext(&mut records, self.security.bcrypt_cost).map_err(StoreError::Crypto)?;
        if migrated > 0 {
            self.store.save(&records).await?;
        }
        info!(migrated, total = records.len(), "Password migration pass complete");
        Ok(migrated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::SessionRegistry;
    use crate::infrastructure::store::CsvUserStore;
    use crate::infrastructure::crypto::is_hashed;

    fn test_security() -> SecurityConfig {
        SecurityConfig {
            min_password_length: 5,
            bcrypt_cost: 4,
        }
    }

    fn service_in(dir: &std::path::Path) -> UserService<CsvUserStore> {
        let store = Arc::new(CsvUserStore::new(dir.join("users.csv")));
        UserService::new(store, SessionRegistry::shared(), test_security())
    }

    async fn seeded_service(dir: &std::path::Path) -> UserService<CsvUserStore> {
        let service = service_in(dir);
        service.store.save(&[]).await.unwrap();
        service
    }

    #[tokio::test]
    async fn add_then_login_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(dir.path()).await;

        service
            .add_user("carol", "abcdef", Role::Admin)
            .await
            .unwrap();

        let auth = service.login("carol", "abcdef").await.unwrap();
        assert_eq!(auth.username, "carol");
        assert_eq!(auth.role, Role::Admin);
        assert!(service.authenticate(&auth.token).is_some());
    }

    #[tokio::test]
    async fn login_failures_stay_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(dir.path()).await;
        service
            .add_user("carol", "abcdef", Role::Admin)
            .await
            .unwrap();

        assert!(matches!(
            service.login("carol", "wrong").await,
            Err(DomainError::IncorrectPassword)
        ));
        assert!(matches!(
            service.login("dave", "x").await,
            Err(DomainError::UsernameNotFound)
        ));
    }

    #[tokio::test]
    async fn stored_passwords_are_hashed_at_rest() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(dir.path()).await;
        service
            .add_user("alice", "pw1234", Role::Salesperson)
            .await
            .unwrap();

        let records = service.list_users().await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(is_hashed(&records[0].password_hash));
        assert_ne!(records[0].password_hash, "pw1234");
    }

    #[tokio::test]
    async fn duplicate_username_rejected_and_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(dir.path()).await;

        service
            .add_user("alice", "pw1234", Role::Admin)
            .await
            .unwrap();
        let after_first = service.list_users().await.unwrap();

        let err = service
            .add_user("alice", "other9", Role::Salesperson)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateUsername(ref u) if u == "alice"));
        assert_eq!(service.list_users().await.unwrap(), after_first);
    }

    #[tokio::test]
    async fn short_or_empty_fields_rejected_without_writes() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(dir.path()).await;

        assert!(matches!(
            service.add_user("bob", "ab", Role::Salesperson).await,
            Err(DomainError::PasswordTooShort { min: 5 })
        ));
        assert!(matches!(
            service.add_user("", "abcdef", Role::Salesperson).await,
            Err(DomainError::EmptyField)
        ));
        assert!(matches!(
            service.add_user("bob", "", Role::Salesperson).await,
            Err(DomainError::EmptyField)
        ));
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_then_lookup_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(dir.path()).await;

        service
            .add_user("carol", "abcdef", Role::Admin)
            .await
            .unwrap();
        service.delete_user("carol").await.unwrap();

        let records = service.list_users().await.unwrap();
        assert!(find_user(&records, "carol").is_none());

        // Deleting an already-absent user is still a success.
        service.delete_user("carol").await.unwrap();

        assert!(matches!(
            service.delete_user("").await,
            Err(DomainError::UserNotSelected)
        ));
    }

    #[tokio::test]
    async fn migrate_store_hashes_legacy_rows_once() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(dir.path()).await;

        let store = service.store();
        store
            .save(&[
                UserRecord {
                    username: "legacy".to_string(),
                    password_hash: "plaintext1".to_string(),
                    role: Role::Salesperson,
                },
                UserRecord {
                    username: "carol".to_string(),
                    password_hash: hash_password("abcdef", 4).unwrap(),
                    role: Role::Admin,
                },
            ])
            .await
            .unwrap();

        assert_eq!(service.migrate_store().await.unwrap(), 1);
        assert_eq!(service.migrate_store().await.unwrap(), 0);

        // Legacy password now logs in through the normal verify path.
        let auth = service.login("legacy", "plaintext1").await.unwrap();
        assert_eq!(auth.role, Role::Salesperson);
    }

    #[tokio::test]
    async fn missing_store_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        assert!(matches!(
            service.login("carol", "abcdef").await,
            Err(DomainError::Store(StoreError::NotFound { .. }))
        ));
    }
}
