//! Liveness check

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use menu_shared::config::StorageBackend;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: String,
    version: &'static str,
    storage: StorageBackend,
    storage_reachable: bool,
    route_modules: usize,
}

/// 200 while storage answers, 503 otherwise. The body is the same either way.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = match state.menus.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check could not reach storage: {}", e);
            false
        }
    };

    let (status_code, status) = if reachable {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            service: state.config.app.name.clone(),
            version: env!("CARGO_PKG_VERSION"),
            storage: state.config.database.backend,
            storage_reachable: reachable,
            route_modules: state.routes.snapshot().len(),
        }),
    )
}
