//! # Menu API
//! 
//! HTTP handlers, DTOs, router, and event listeners.

pub mod handlers;
pub mod dto;
pub mod error;
pub mod listeners;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
