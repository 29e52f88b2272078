use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::entities::Summary,
    infrastructure::http::middleware::{ApiError, ApiResult, AppState, AuthenticatedCaller},
};

#[derive(Debug, Deserialize)]
pub struct OpenAtQuery {
    pub at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAtResponse {
    pub at: DateTime<Utc>,
    pub open_tickets: i64,
}

/// GET /api/dashboard/summary
pub async fn get_summary(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
) -> ApiResult<Json<Summary>> {
    let now = state.clock.now();
    let summary = state.dashboard_service.compute_summary(now, &caller).await?;
    Ok(Json(summary))
}

/// GET /api/dashboard/open-at?at=<rfc3339>
pub async fn get_open_at(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Query(query): Query<OpenAtQuery>,
) -> ApiResult<Json<OpenAtResponse>> {
    let at = DateTime::parse_from_rfc3339(&query.at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::BadRequest(format!("Invalid 'at' timestamp: {}", e)))?;

    let open_tickets = state.dashboard_service.count_open_at(at, &caller).await?;
    Ok(Json(OpenAtResponse { at, open_tickets }))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
