//! Password hashing utilities
//!
//! bcrypt throughout: a deliberately slow, adaptive-cost algorithm with a
//! fresh random salt per hash. The cost factor comes from configuration.

use crate::domain::UserRecord;

/// The two bcrypt variant tags in circulation in our stores.
const BCRYPT_PREFIXES: [&str; 2] = ["$2b$", "$2a$"];

/// Whether `value` already looks like a stored bcrypt hash.
///
/// Prefix check only — not a structural validator. A plaintext password
/// that happens to start with one of the variant tags is treated as
/// already hashed. Never errors on malformed input.
pub fn is_hashed(value: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|p| value.starts_with(p))
}

/// Hash a password with a fresh random salt.
///
/// Two calls with the same input produce different, both-valid hashes.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Verify a password against a stored hash.
///
/// Fails closed: a malformed or unparseable hash verifies as `false`
/// rather than erroring. The digest comparison inside `bcrypt::verify` is
/// constant-time.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Replace every legacy plaintext password with a salted bcrypt hash.
///
/// Records that already pass [`is_hashed`] are left untouched, so the pass
/// is idempotent. Record order and non-password fields are preserved.
/// Returns the number of records rehashed.
pub fn migrate_plaintext(
    records: &mut [UserRecord],
    cost: u32,
) -> Result<usize, bcrypt::BcryptError> {
    let mut migrated = 0;
    for record in records.iter_mut() {
        if !is_hashed(&record.password_hash) {
            record.password_hash = hash_password(&record.password_hash, cost)?;
            migrated += 1;
        }
    }
    Ok(migrated)
}
