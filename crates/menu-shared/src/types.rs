//! Common types

pub type MenuId = i64;
pub type MenuItemId = i64;
