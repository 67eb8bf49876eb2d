//! Application-wide constants

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Deepest menu tree rendered by the API.
pub const MAX_TREE_DEPTH: usize = 64;
pub const LOG_FILE_PREFIX: &str = "menu-server.log";
