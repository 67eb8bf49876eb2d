//! Domain errors

use thiserror::Error;

use menu_shared::{MenuId, MenuItemId};

use crate::domain::TreeError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(MenuItemId),
    
    #[error("Root item not found for menu {0}")]
    MenuRootNotFound(MenuId),
    
    #[error("Menu {0} already has a root item")]
    MenuRootAlreadyExists(MenuId),
    
    #[error("Menu items form a parent cycle: {0:?}")]
    CyclicHierarchy(Vec<MenuItemId>),
    
    #[error("Menu item {0} appears more than once")]
    DuplicateMenuItem(MenuItemId),

    #[error("Menu {menu_id} is nested deeper than {limit} levels")]
    HierarchyTooDeep { menu_id: MenuId, limit: usize },

    #[error("Parent menu item not found: {0}")]
    ParentNotFound(MenuItemId),
    
    #[error("Validation error: {0}")]
    ValidationError(String),
    
    #[error("Database error: {0}")]
    DatabaseError(String),
    
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<TreeError> for DomainError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::Cycle { ids } => DomainError::CyclicHierarchy(ids),
            TreeError::DuplicateId(id) => DomainError::DuplicateMenuItem(id),
        }
    }
}
