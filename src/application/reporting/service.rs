//! Dashboard aggregations
//!
//! Sums and group-bys over the sales records, computed in memory on every
//! request. The dataset is small and hand-maintained; nothing here caches.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{DomainResult, SaleRecord, SalesStore};

/// Dashboard KPI block.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub transactions: u64,
    /// Customer with the highest revenue sum. Absent while there is no
    /// revenue at all.
    pub top_customer: Option<String>,
    pub total_units: i64,
}

/// Revenue sum for one customer.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRevenue {
    pub customer: String,
    pub revenue: f64,
}

/// Units sum for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUnits {
    pub product: String,
    pub units: i64,
}

/// Revenue sum for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// Reporting service — read-only aggregations for the admin dashboard.
///
/// Generic over `S: SalesStore`; has no interface to the credential store.
pub struct ReportingService<S: SalesStore> {
    store: Arc<S>,
}

impl<S: SalesStore> ReportingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The full sales-history table, in file order.
    pub async fn sales_history(&self) -> DomainResult<Vec<SaleRecord>> {
        Ok(self.store.load().await?)
    }

    /// Headline KPIs.
    pub async fn summary(&self) -> DomainResult<SalesSummary> {
        let sales = self.store.load().await?;

        let total_revenue: f64 = sales.iter().map(|s| s.revenue).sum();
        let total_units: i64 = sales.iter().map(|s| s.units).sum();

        let top_customer = if total_revenue > 0.0 {
            revenue_per_customer(&sales)
                .into_iter()
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(customer, _)| customer)
        } else {
            None
        };

        Ok(SalesSummary {
            total_revenue,
            transactions: sales.len() as u64,
            top_customer,
            total_units,
        })
    }

    /// Revenue grouped by customer, highest first.
    pub async fn revenue_by_customer(&self) -> DomainResult<Vec<CustomerRevenue>> {
        let sales = self.store.load().await?;

        let mut series: Vec<CustomerRevenue> = revenue_per_customer(&sales)
            .into_iter()
            .map(|(customer, revenue)| CustomerRevenue { customer, revenue })
            .collect();
        series.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then(a.customer.cmp(&b.customer)));
        Ok(series)
    }

    /// Units sold grouped by product, highest first.
    pub async fn units_by_product(&self) -> DomainResult<Vec<ProductUnits>> {
        let sales = self.store.load().await?;

        let mut per_product: HashMap<String, i64> = HashMap::new();
        for sale in &sales {
            *per_product.entry(sale.product.clone()).or_insert(0) += sale.units;
        }

        let mut series: Vec<ProductUnits> = per_product
            .into_iter()
            .map(|(product, units)| ProductUnits { product, units })
            .collect();
        series.sort_by(|a, b| b.units.cmp(&a.units).then(a.product.cmp(&b.product)));
        Ok(series)
    }

    /// Revenue per calendar day, chronological. Rows without a parseable
    /// timestamp fall out of the trend, as they do from the history table's
    /// date grouping.
    pub async fn revenue_trend(&self) -> DomainResult<Vec<TrendPoint>> {
        let sales = self.store.load().await?;

        let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for sale in &sales {
            if let Some(recorded_at) = sale.recorded_at {
                *per_day.entry(recorded_at.date_naive()).or_insert(0.0) += sale.revenue;
            }
        }

        Ok(per_day
            .into_iter()
            .map(|(date, revenue)| TrendPoint { date, revenue })
            .collect())
    }
}

fn revenue_per_customer(sales: &[SaleRecord]) -> HashMap<String, f64> {
    let mut per_customer: HashMap<String, f64> = HashMap::new();
    for sale in sales {
        *per_customer.entry(sale.customer.clone()).or_insert(0.0) += sale.revenue;
    }
    per_customer
}
