// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menu.rs
// ============================================================================
//! Read-side menu handlers (item lists, root, tree)

use axum::{
    extract::{Path, Query, State},
    Json,
};

use menu_core::domain::{Menu, MenuItem, MenuItemTreeNode};
use menu_shared::MenuId;

use crate::dto::{ItemsQuery, LocaleQuery};
use crate::error::ApiResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Menu items handler - GET /api/v1/menus/{menu_id}/items
pub async fn items(
    State(state): State<AppState>,
    Path(menu_id): Path<MenuId>,
    Query(params): Query<ItemsQuery>,
) -> ApiResult<Menu> {
    let items = if params.all {
        state.menus.all_roots_for_menu(menu_id).await?
    } else {
        let locale = state.locale_or_default(params.locale.as_deref());
        state.menus.roots_for_menu(menu_id, &locale).await?
    };

    Ok(Json(ApiResponse::success(Menu::new(menu_id, items))))
}

/// Menu root handler - GET /api/v1/menus/{menu_id}/root
pub async fn root(
    State(state): State<AppState>,
    Path(menu_id): Path<MenuId>,
) -> ApiResult<MenuItem> {
    let root = state.menus.get_root_for_menu(menu_id).await?;
    Ok(Json(ApiResponse::success(root)))
}

/// Menu tree handler - GET /api/v1/menus/{menu_id}/tree
pub async fn tree(
    State(state): State<AppState>,
    Path(menu_id): Path<MenuId>,
    Query(params): Query<LocaleQuery>,
) -> ApiResult<Vec<MenuItemTreeNode>> {
    let locale = state.locale_or_default(params.locale.as_deref());
    let tree = state.menus.get_tree_for_menu(menu_id, &locale).await?;
    Ok(Json(ApiResponse::success(tree)))
}
