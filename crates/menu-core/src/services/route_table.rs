//! Live copy of the module routing table

use parking_lot::RwLock;
use tracing::info;

use crate::domain::RouteMap;
use crate::error::DomainError;
use crate::repositories::MenuItemRepository;
use crate::services::MenuService;

#[derive(Default)]
pub struct RouteTable {
    routes: RwLock<RouteMap>,
}

impl RouteTable {
    pub fn new(routes: RouteMap) -> Self {
        Self {
            routes: RwLock::new(routes),
        }
    }

    pub fn replace(&self, routes: RouteMap) {
        *self.routes.write() = routes;
    }

    pub fn snapshot(&self) -> RouteMap {
        self.routes.read().clone()
    }

    pub fn uri_for(&self, module_name: &str, locale: &str) -> Option<String> {
        self.routes
            .read()
            .get(module_name)
            .and_then(|locales| locales.get(locale))
            .cloned()
    }

    /// Reloads the table from storage.
    pub async fn refresh<R>(&self, service: &MenuService<R>) -> Result<(), DomainError>
    where
        R: MenuItemRepository + ?Sized,
    {
        let routes = service.get_for_routes().await?;
        info!("Route table refreshed: {} modules", routes.len());
        self.replace(routes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{fold_routes, RouteEntry};
    use crate::repositories::MockMenuItemRepository;
    use std::sync::Arc;

    #[test]
    fn test_uri_lookup() {
        let table = RouteTable::new(fold_routes(vec![RouteEntry::new(1, "blog", "en", "/blog")]));

        assert_eq!(table.uri_for("blog", "en").as_deref(), Some("/blog"));
        assert_eq!(table.uri_for("blog", "fr"), None);
        assert_eq!(table.uri_for("shop", "en"), None);
    }

    #[tokio::test]
    async fn test_refresh_replaces_contents() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_route_entries()
            .returning(|| Ok(vec![RouteEntry::new(3, "page", "en", "/pages")]));
        let service = MenuService::new(Arc::new(repo));

        let table = RouteTable::new(fold_routes(vec![RouteEntry::new(1, "blog", "en", "/blog")]));
        table.refresh(&service).await.unwrap();

        let routes = table.snapshot();
        assert!(!routes.contains_key("blog"));
        assert_eq!(routes["page"]["en"], "/pages");
    }
}
