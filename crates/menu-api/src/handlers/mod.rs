//! HTTP handlers

pub mod health;
pub mod menu;
pub mod menu_item;
pub mod routes;
