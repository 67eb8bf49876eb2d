// ============================================================================
// Menu API - Menu Item Handlers
// File: crates/menu-api/src/handlers/menu_item.rs
// ============================================================================
//! Menu item write handlers and reverse uri lookup

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use menu_core::domain::{MenuItem, NewMenuItem};

use crate::dto::{DeleteMenuItemRequest, DeletedResponse, ResolveQuery, UpdateMenuItemRequest};
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create handler - POST /api/v1/menuitem
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewMenuItem>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItem>>), ApiError> {
    payload.validate()?;

    let created = state.menus.create(payload).await?;
    state.events.publish_all(created.events);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created.item))))
}

/// Update handler - POST /api/v1/menuitem/update
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> ApiResult<MenuItem> {
    payload.validate()?;

    if payload.changes.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let item = state.menus.find_by_id(payload.menuitem).await?;
    let updated = state.menus.update(&item, payload.changes).await?;
    state.refresh_routes().await;

    Ok(Json(ApiResponse::success(updated)))
}

/// Delete handler - POST /api/v1/menuitem/delete
pub async fn delete(
    State(state): State<AppState>,
    Json(payload): Json<DeleteMenuItemRequest>,
) -> ApiResult<DeletedResponse> {
    state.menus.delete(payload.menuitem).await?;
    state.refresh_routes().await;

    info!("Menu item {} removed via API", payload.menuitem);
    Ok(Json(ApiResponse::success(DeletedResponse { id: payload.menuitem })))
}

/// Reverse lookup handler - GET /api/v1/menuitem/resolve?uri=&locale=
pub async fn resolve(
    State(state): State<AppState>,
    Query(params): Query<ResolveQuery>,
) -> ApiResult<MenuItem> {
    params.validate()?;

    let locale = state.locale_or_default(params.locale.as_deref());
    let item = state
        .menus
        .find_by_uri_in_language(&params.uri, &locale)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No menu item for {} in {}", params.uri.trim(), locale))
        })?;

    Ok(Json(ApiResponse::success(item)))
}
