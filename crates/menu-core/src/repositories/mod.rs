//! Repository traits (ports)

pub mod menu_item_repository;

pub use menu_item_repository::{MenuItemQuery, MenuItemRepository, TranslationFilter};

#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
