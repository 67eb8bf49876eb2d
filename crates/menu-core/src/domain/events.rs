// ============================================================================
// Menu Core - Domain Events
// File: crates/menu-core/src/domain/events.rs
// ============================================================================

use serde::Serialize;

use super::menu_item::MenuItem;

/// Notifications raised by menu item writes, for outside subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum MenuItemEvent {
    Created { item: MenuItem },
}

impl MenuItemEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MenuItemEvent::Created { .. } => "menu_item_created",
        }
    }
}

/// Result of a create: the stored item plus the events it raised.
/// Dispatching the events is left to the caller.
#[derive(Debug, Clone)]
pub struct CreatedMenuItem {
    pub item: MenuItem,
    pub events: Vec<MenuItemEvent>,
}

impl CreatedMenuItem {
    pub fn new(item: MenuItem) -> Self {
        let events = vec![MenuItemEvent::Created { item: item.clone() }];
        Self { item, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewMenuItem;
    use chrono::Utc;

    #[test]
    fn test_created_carries_single_event() {
        let item = MenuItem::from_new(3, &NewMenuItem::new(1), Utc::now());
        let created = CreatedMenuItem::new(item.clone());

        assert_eq!(created.events, vec![MenuItemEvent::Created { item }]);
        assert_eq!(created.events[0].name(), "menu_item_created");
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let item = MenuItem::from_new(3, &NewMenuItem::new(1), Utc::now());
        let json = serde_json::to_value(MenuItemEvent::Created { item }).unwrap();

        assert_eq!(json["type"], "created");
        assert_eq!(json["payload"]["item"]["id"], 3);
    }
}
