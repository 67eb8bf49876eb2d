//! Domain services (business logic)

pub mod menu_service;
pub mod event_bus;
pub mod route_table;

pub use menu_service::MenuService;
pub use event_bus::EventBus;
pub use route_table::RouteTable;
