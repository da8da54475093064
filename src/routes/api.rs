use std::path::Path;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{api, synthesize};
use crate::state::AppState;

/// Create the API router
///
/// - `GET /` browser form, `POST /` synthesis
/// - `GET /health`
/// - `GET /static/{filename}` produced audio from `static_dir`
pub fn create_api_router(static_dir: &Path) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::index_page).post(synthesize::synthesize_handler))
        .route("/health", get(api::health_check))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}
