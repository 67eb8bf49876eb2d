//! Menu aggregate

use serde::Serialize;

use menu_shared::MenuId;

use super::menu_item::MenuItem;

/// A menu with its items in position order
#[derive(Debug, Clone, Serialize)]
pub struct Menu {
    pub id: MenuId,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(id: MenuId, items: Vec<MenuItem>) -> Self {
        Self { id, items }
    }
}
