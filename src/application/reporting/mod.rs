//! Reporting — descriptive aggregations over the sales dataset.

pub mod service;

pub use service::{CustomerRevenue, ProductUnits, ReportingService, SalesSummary, TrendPoint};
