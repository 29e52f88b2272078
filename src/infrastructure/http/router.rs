use crate::infrastructure::http::controllers::dashboard;
use crate::infrastructure::http::middleware::AppState;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/dashboard/summary", get(dashboard::get_summary))
        .route("/api/dashboard/open-at", get(dashboard::get_open_at));

    Router::new()
        .route("/health", get(dashboard::health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
