use std::path::PathBuf;

use thiserror::Error;

/// Typed rejections surfaced to callers. All recoverable; none abort the
/// process.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Username and password cannot be empty")]
    EmptyField,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("No user selected to delete")]
    UserNotSelected,

    #[error("Username not found")]
    UsernameNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Infrastructure failures from the flat-file record stores.
///
/// A store file that is absent or unparseable stops the affected flow with
/// a diagnostic; the caller must never proceed on a partially-loaded store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record store not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record store {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Hashing error: {0}")]
    Crypto(#[from] bcrypt::BcryptError),
}

pub type DomainResult<T> = Result<T, DomainError>;
