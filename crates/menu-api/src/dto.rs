//! Request and response payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use menu_core::domain::MenuItemChanges;
use menu_shared::MenuItemId;

/// Body of `POST /menuitem/update`
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMenuItemRequest {
    pub menuitem: MenuItemId,

    #[serde(flatten)]
    #[validate(nested)]
    pub changes: MenuItemChanges,
}

/// Body of `POST /menuitem/delete`
#[derive(Debug, Deserialize)]
pub struct DeleteMenuItemRequest {
    pub menuitem: MenuItemId,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: MenuItemId,
}

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    pub locale: Option<String>,
    /// Skip the publish filter and return every item.
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResolveQuery {
    #[validate(length(min = 1, max = 255, message = "URI must be between 1 and 255 characters"))]
    pub uri: String,
    pub locale: Option<String>,
}
