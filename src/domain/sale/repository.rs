use async_trait::async_trait;

use super::SaleRecord;
use crate::support::errors::StoreError;

/// Read-only access to the sales-records dataset.
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Load every sale, preserving file order. A missing file yields an
    /// empty dataset; an unreadable one is an error.
    async fn load(&self) -> Result<Vec<SaleRecord>, StoreError>;
}
