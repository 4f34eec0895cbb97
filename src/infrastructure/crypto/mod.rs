pub mod password;

pub use password::{hash_password, is_hashed, migrate_plaintext, verify_password};
