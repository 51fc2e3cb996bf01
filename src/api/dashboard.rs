use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use super::response::ApiResponse;
use crate::error::{AppError, Result};
use crate::models::{ContentPerMonth, DashboardSummary};
use crate::services::DashboardService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/content-per-month", get(get_content_per_month))
}

async fn get_summary(
    State(state): State<AppState>,
) -> Result<ApiResponse<DashboardSummary>> {
    let dashboard_service = DashboardService::new(state.reports.clone());
    let summary = dashboard_service.summary(Utc::now()).await?;

    Ok(ApiResponse::ok(summary))
}

#[derive(Debug, Deserialize)]
pub struct ContentPerMonthQuery {
    pub year: Option<i32>,
}

async fn get_content_per_month(
    State(state): State<AppState>,
    query: std::result::Result<Query<ContentPerMonthQuery>, QueryRejection>,
) -> Result<ApiResponse<ContentPerMonth>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let dashboard_service = DashboardService::new(state.reports.clone());
    let stats = dashboard_service.content_per_month(year).await?;

    Ok(ApiResponse::ok(stats))
}
