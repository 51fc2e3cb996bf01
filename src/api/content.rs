use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

use super::response::{json_body, ApiMessage, ApiResponse};
use crate::error::Result;
use crate::middleware::Principal;
use crate::models::{ContentPayload, ContentRecord, DateRange};
use crate::services::export_service::{build_rows, render_workbook, EXPORT_FILENAME, XLSX_CONTENT_TYPE};
use crate::services::ContentService;
use crate::AppState;

/// Mounted at the API root: the collection answers with and without a trailing slash
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/content", get(list_content).post(create_content))
        .route("/content/", get(list_content).post(create_content))
        .route("/content/export-excel", get(export_content))
        .route("/content/:id", get(get_content).put(update_content).delete(delete_content))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListContentQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ListContentQuery {
    fn range(&self) -> Option<DateRange> {
        DateRange::from_query(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

async fn create_content(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: std::result::Result<Json<ContentPayload>, JsonRejection>,
) -> Result<ApiResponse<ContentRecord>> {
    let payload = json_body(payload)?;

    let content_service = ContentService::new(state.content.clone());
    let record = content_service.create(&principal, payload).await?;

    Ok(ApiResponse::created(record))
}

async fn list_content(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListContentQuery>,
) -> Result<ApiResponse<Vec<ContentRecord>>> {
    let content_service = ContentService::new(state.content.clone());
    let records = content_service.list(&principal, query.range()).await?;

    Ok(ApiResponse::ok(records))
}

async fn export_content(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListContentQuery>,
) -> Result<Response> {
    let content_service = ContentService::new(state.content.clone());
    let records = content_service.list(&principal, query.range()).await?;

    let rows = build_rows(&records);
    let workbook = render_workbook(&rows)?;
    tracing::info!(
        owner_id = %principal.user_id,
        records = records.len(),
        rows = rows.len(),
        "content exported"
    );

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", EXPORT_FILENAME),
        ),
    ];

    Ok((headers, workbook).into_response())
}

async fn get_content(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ContentRecord>> {
    let content_service = ContentService::new(state.content.clone());
    let record = content_service.get(&principal, &id).await?;

    Ok(ApiResponse::ok(record))
}

async fn update_content(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ContentPayload>, JsonRejection>,
) -> Result<ApiResponse<ContentRecord>> {
    let payload = json_body(payload)?;

    let content_service = ContentService::new(state.content.clone());
    let record = content_service.update(&principal, &id, payload).await?;

    Ok(ApiResponse::ok(record))
}

async fn delete_content(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiMessage> {
    let content_service = ContentService::new(state.content.clone());
    content_service.delete(&principal, &id).await?;

    Ok(ApiMessage("Content deleted successfully"))
}
