//! # Menu Infrastructure
//! 
//! Storage implementations (adapters) of the menu item repository.

pub mod database;

pub use database::{create_pool, run_migrations, InMemoryMenuItemRepository, PgMenuItemRepository};
