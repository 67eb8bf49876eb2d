use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::handlers::{health, menu, menu_item, routes};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.app.allowed_origins);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Menu item writes
        .route("/api/v1/menuitem", post(menu_item::create))
        .route("/api/v1/menuitem/update", post(menu_item::update))
        .route("/api/v1/menuitem/delete", post(menu_item::delete))
        .route("/api/v1/menuitem/resolve", get(menu_item::resolve))
        // Menu reads
        .route("/api/v1/menus/{menu_id}/items", get(menu::items))
        .route("/api/v1/menus/{menu_id}/root", get(menu::root))
        .route("/api/v1/menus/{menu_id}/tree", get(menu::tree))
        // Route table
        .route("/api/v1/routes", get(routes::list_routes))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
