//! CSV sales store
//!
//! Read-only. The source file is hand-maintained, so every cell is coerced
//! rather than trusted: numbers that fail to parse become zero, timestamps
//! become `None`, and missing columns become empty values.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::domain::{SaleRecord, SalesStore};
use crate::support::errors::StoreError;

/// Flat-file sales store.
#[derive(Debug, Clone)]
pub struct CsvSalesStore {
    path: PathBuf,
}

/// Raw row as it appears in the file, before coercion.
#[derive(Debug, Deserialize)]
struct RawSaleRow {
    #[serde(rename = "Date & Time", default)]
    recorded_at: Option<String>,
    #[serde(rename = "Customer Name", default)]
    customer: Option<String>,
    #[serde(rename = "Product", default)]
    product: Option<String>,
    #[serde(rename = "Units Bought", default)]
    units: Option<String>,
    #[serde(rename = "Revenue ($)", default)]
    revenue: Option<String>,
    #[serde(rename = "Customer Email", default)]
    customer_email: Option<String>,
}

impl CsvSalesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SalesStore for CsvSalesStore {
    async fn load(&self) -> Result<Vec<SaleRecord>, StoreError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            // No sales recorded yet: the dashboard renders an empty frame.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let mut sales = Vec::new();
        for row in reader.deserialize::<RawSaleRow>() {
            let raw = row.map_err(|e| StoreError::Malformed {
                path: self.path.clone(),
                source: e,
            })?;
            sales.push(coerce(raw));
        }
        Ok(sales)
    }
}

fn coerce(raw: RawSaleRow) -> SaleRecord {
    SaleRecord {
        recorded_at: raw.recorded_at.as_deref().and_then(parse_timestamp),
        customer: raw.customer.unwrap_or_default(),
        product: raw.product.unwrap_or_default(),
        units: coerce_number(raw.units.as_deref()) as i64,
        revenue: coerce_number(raw.revenue.as_deref()),
        customer_email: raw.customer_email.unwrap_or_default(),
    }
}

fn coerce_number(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0)
}

/// Accepts the timestamp shapes seen in hand-maintained exports.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }
    None
}
