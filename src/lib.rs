pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::db::Database;
use crate::repository::{ContentRepository, PgRepository, ReportingRepository};

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentRepository>,
    pub reports: Arc<dyn ReportingRepository>,
    pub config: Config,
}

impl AppState {
    pub fn new(db: &Database, config: Config) -> Self {
        let repo = Arc::new(PgRepository::new(db.pg.clone()));
        Self {
            content: repo.clone(),
            reports: repo,
            config,
        }
    }
}

/// Full router: public health check plus the authenticated `/api/v1` tree
pub fn app(state: AppState) -> Router {
    let api = api::routes().route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::require_auth,
    ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api)
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
