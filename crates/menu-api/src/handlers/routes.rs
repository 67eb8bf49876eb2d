//! Module routing table handler

use axum::{extract::State, Json};

use menu_core::domain::RouteMap;

use crate::response::ApiResponse;
use crate::state::AppState;

/// Route table handler - GET /api/v1/routes
pub async fn list_routes(State(state): State<AppState>) -> Json<ApiResponse<RouteMap>> {
    Json(ApiResponse::success(state.routes.snapshot()))
}
