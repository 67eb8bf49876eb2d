//! # Menu Core - Domain Module
//! 
//! Domain entities for the menu service.

pub mod translation;
pub mod menu_item;
pub mod menu;
pub mod tree;
pub mod events;
pub mod route;

// Re-export all entities and enums
pub use translation::{MenuItemTranslation, TranslationStatus};
pub use menu_item::{MenuItem, NewMenuItem, MenuItemChanges};
pub use menu::Menu;
pub use tree::{build_tree, prune_unpublished, MenuItemTreeNode, TreeError};
pub use events::{MenuItemEvent, CreatedMenuItem};
pub use route::{fold_routes, RouteEntry, RouteMap};
