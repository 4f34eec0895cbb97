//! Reporting API data transfer objects

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::reporting::{CustomerRevenue, ProductUnits, SalesSummary, TrendPoint};
use crate::domain::SaleRecord;

// ── Summary ────────────────────────────────────────────────────

/// Dashboard KPI block.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    /// Total revenue over the whole dataset, in dollars.
    pub total_revenue: f64,
    /// Number of recorded transactions.
    pub transactions: u64,
    /// Customer with the highest revenue sum, absent while no revenue exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_customer: Option<String>,
    /// Total units sold.
    pub total_units: i64,
}

impl From<SalesSummary> for SummaryResponse {
    fn from(s: SalesSummary) -> Self {
        Self {
            total_revenue: s.total_revenue,
            transactions: s.transactions,
            top_customer: s.top_customer,
            total_units: s.total_units,
        }
    }
}

// ── Revenue by customer ────────────────────────────────────────

/// Revenue sum for one customer.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerRevenueDto {
    pub customer: String,
    pub revenue: f64,
}

/// Revenue-by-customer series, highest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueByCustomerResponse {
    pub customers: Vec<CustomerRevenueDto>,
    /// Sum over all customers.
    pub total_revenue: f64,
}

impl From<Vec<CustomerRevenue>> for RevenueByCustomerResponse {
    fn from(series: Vec<CustomerRevenue>) -> Self {
        let total_revenue = series.iter().map(|c| c.revenue).sum();
        Self {
            customers: series
                .into_iter()
                .map(|c| CustomerRevenueDto {
                    customer: c.customer,
                    revenue: c.revenue,
                })
                .collect(),
            total_revenue,
        }
    }
}

// ── Units by product ───────────────────────────────────────────

/// Units sum for one product.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductUnitsDto {
    pub product: String,
    pub units: i64,
}

/// Units-by-product series, highest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct UnitsByProductResponse {
    pub products: Vec<ProductUnitsDto>,
    /// Sum over all products.
    pub total_units: i64,
}

impl From<Vec<ProductUnits>> for UnitsByProductResponse {
    fn from(series: Vec<ProductUnits>) -> Self {
        let total_units = series.iter().map(|p| p.units).sum();
        Self {
            products: series
                .into_iter()
                .map(|p| ProductUnitsDto {
                    product: p.product,
                    units: p.units,
                })
                .collect(),
            total_units,
        }
    }
}

// ── Revenue trend ──────────────────────────────────────────────

/// Revenue for one calendar day.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrendPointDto {
    /// ISO date (YYYY-MM-DD).
    pub date: String,
    pub revenue: f64,
}

/// Revenue-over-time series, chronological.
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueTrendResponse {
    pub points: Vec<TrendPointDto>,
}

impl From<Vec<TrendPoint>> for RevenueTrendResponse {
    fn from(series: Vec<TrendPoint>) -> Self {
        Self {
            points: series
                .into_iter()
                .map(|p| TrendPointDto {
                    date: p.date.to_string(),
                    revenue: p.revenue,
                })
                .collect(),
        }
    }
}

// ── Sales history ──────────────────────────────────────────────

/// One row of the sales-history table.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaleDto {
    /// RFC 3339 timestamp; absent when the source cell did not parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
    pub customer: String,
    pub product: String,
    pub units: i64,
    pub revenue: f64,
    pub customer_email: String,
}

impl From<SaleRecord> for SaleDto {
    fn from(sale: SaleRecord) -> Self {
        Self {
            recorded_at: sale.recorded_at.map(|t| t.to_rfc3339()),
            customer: sale.customer,
            product: sale.product,
            units: sale.units,
            revenue: sale.revenue,
            customer_email: sale.customer_email,
        }
    }
}

/// The sales-history table.
#[derive(Debug, Serialize, ToSchema)]
pub struct SalesHistoryResponse {
    pub sales: Vec<SaleDto>,
    pub total: usize,
}
