//! Reporting API handlers
//!
//! Every endpoint re-reads the sales file and aggregates in memory; the
//! dataset is bounded by a small record count.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{
    RevenueByCustomerResponse, RevenueTrendResponse, SaleDto, SalesHistoryResponse,
    SummaryResponse, UnitsByProductResponse,
};
use crate::application::reporting::ReportingService;
use crate::infrastructure::store::CsvSalesStore;
use crate::interfaces::http::common::ApiResponse;

/// Reports handler state — concrete over `CsvSalesStore` for Axum
/// compatibility.
#[derive(Clone)]
pub struct ReportsHandlerState {
    pub reporting: Arc<ReportingService<CsvSalesStore>>,
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn internal_error<T>(e: impl std::fmt::Display) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/summary",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard KPIs", body = ApiResponse<SummaryResponse>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn summary(State(state): State<ReportsHandlerState>) -> HandlerResult<SummaryResponse> {
    match state.reporting.summary().await {
        Ok(summary) => Ok(Json(ApiResponse::success(summary.into()))),
        Err(e) => Err(internal_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/revenue-by-customer",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Revenue per customer", body = ApiResponse<RevenueByCustomerResponse>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn revenue_by_customer(
    State(state): State<ReportsHandlerState>,
) -> HandlerResult<RevenueByCustomerResponse> {
    match state.reporting.revenue_by_customer().await {
        Ok(series) => Ok(Json(ApiResponse::success(series.into()))),
        Err(e) => Err(internal_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/units-by-product",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Units sold per product", body = ApiResponse<UnitsByProductResponse>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn units_by_product(
    State(state): State<ReportsHandlerState>,
) -> HandlerResult<UnitsByProductResponse> {
    match state.reporting.units_by_product().await {
        Ok(series) => Ok(Json(ApiResponse::success(series.into()))),
        Err(e) => Err(internal_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/revenue-trend",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Revenue per calendar day", body = ApiResponse<RevenueTrendResponse>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn revenue_trend(
    State(state): State<ReportsHandlerState>,
) -> HandlerResult<RevenueTrendResponse> {
    match state.reporting.revenue_trend().await {
        Ok(series) => Ok(Json(ApiResponse::success(series.into()))),
        Err(e) => Err(internal_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/sales",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sales history table", body = ApiResponse<SalesHistoryResponse>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn sales_history(
    State(state): State<ReportsHandlerState>,
) -> HandlerResult<SalesHistoryResponse> {
    match state.reporting.sales_history().await {
        Ok(sales) => {
            let sales: Vec<SaleDto> = sales.into_iter().map(SaleDto::from).collect();
            let total = sales.len();
            Ok(Json(ApiResponse::success(SalesHistoryResponse {
                sales,
                total,
            })))
        }
        Err(e) => Err(internal_error(e)),
    }
}
