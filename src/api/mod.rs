mod content;
mod dashboard;
mod response;

use axum::Router;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(content::routes())
        .nest("/dashboard", dashboard::routes())
}
