//! Module-to-URI routing entries

use std::collections::BTreeMap;

use serde::Serialize;

use menu_shared::MenuItemId;

/// `module_name -> locale -> uri`
pub type RouteMap = BTreeMap<String, BTreeMap<String, String>>;

/// One published, primary translation of a module-bound menu item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub menuitem_id: MenuItemId,
    pub module_name: String,
    pub locale: String,
    pub uri: String,
}

impl RouteEntry {
    pub fn new(menuitem_id: MenuItemId, module_name: &str, locale: &str, uri: &str) -> Self {
        Self {
            menuitem_id,
            module_name: module_name.to_string(),
            locale: locale.to_string(),
            uri: uri.to_string(),
        }
    }
}

/// Folds entries in order; a later entry for the same `(module, locale)` wins.
pub fn fold_routes<I>(entries: I) -> RouteMap
where
    I: IntoIterator<Item = RouteEntry>,
{
    let mut routes = RouteMap::new();
    for entry in entries {
        routes
            .entry(entry.module_name)
            .or_default()
            .insert(entry.locale, entry.uri);
    }
    routes
}
