use async_trait::async_trait;

use super::UserRecord;
use crate::support::errors::StoreError;

/// Backing store for user credential records.
///
/// The flat-file implementation reads the whole file before every operation
/// and rewrites it in full after every mutation; isolating that behind this
/// trait keeps the credential logic untouched if the backing store ever
/// becomes transactional.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Load every record, preserving file order.
    async fn load(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Replace the entire store with `records`. Atomic from the caller's
    /// perspective: readers never observe a partially written store.
    async fn save(&self, records: &[UserRecord]) -> Result<(), StoreError>;
}
