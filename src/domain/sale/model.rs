use chrono::{DateTime, Utc};

/// One sales transaction as loaded from the sales-records file.
///
/// Fields are already coerced: unparseable numbers arrive as zero and an
/// unparseable timestamp as `None`, so aggregation code never deals with
/// raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    /// When the sale was recorded. `None` if the source cell did not parse.
    pub recorded_at: Option<DateTime<Utc>>,
    pub customer: String,
    pub product: String,
    pub units: i64,
    /// Revenue in whole currency units (dollars).
    pub revenue: f64,
    pub customer_email: String,
}
