// ============================================================================
// Menu Infrastructure - In-Memory Menu Item Repository
// File: crates/menu-infrastructure/src/database/memory/menu_item_repo_impl.rs
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use menu_core::domain::{MenuItem, NewMenuItem, RouteEntry};
use menu_core::error::DomainError;
use menu_core::repositories::{MenuItemQuery, MenuItemRepository};
use menu_shared::{MenuId, MenuItemId};

/// Process-local store with the same semantics as the PostgreSQL adapter:
/// one root per menu, parents must exist, menus exist implicitly.
pub struct InMemoryMenuItemRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    items: BTreeMap<MenuItemId, MenuItem>,
    last_id: MenuItemId,
}

impl MemoryState {
    fn other_root(&self, menu_id: MenuId, except: Option<MenuItemId>) -> bool {
        self.items
            .values()
            .any(|i| i.menu_id == menu_id && i.is_root && Some(i.id) != except)
    }

    fn check_parent(&self, parent_id: Option<MenuItemId>) -> Result<(), DomainError> {
        match parent_id {
            Some(id) if !self.items.contains_key(&id) => {
                warn!("Rejected menu item with unknown parent {}", id);
                Err(DomainError::ParentNotFound(id))
            }
            _ => Ok(()),
        }
    }
}

impl InMemoryMenuItemRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
        }
    }
}

impl Default for InMemoryMenuItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryMenuItemRepository {
    async fn find_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.state.read().items.get(&id).cloned())
    }

    async fn find(&self, query: &MenuItemQuery) -> Result<Vec<MenuItem>, DomainError> {
        let state = self.state.read();
        let mut items: Vec<MenuItem> = state
            .items
            .values()
            .filter(|item| query.matches(item))
            .cloned()
            .collect();

        items.sort_by_key(|item| (item.position, item.id));
        if let Some(limit) = query.limit {
            items.truncate(usize::try_from(limit).unwrap_or(0));
        }

        debug!("Menu item query {:?} matched {} items", query, items.len());
        Ok(items)
    }

    async fn create(&self, data: &NewMenuItem) -> Result<MenuItem, DomainError> {
        let mut state = self.state.write();

        if data.is_root && state.other_root(data.menu_id, None) {
            warn!("Rejected second root item for menu {}", data.menu_id);
            return Err(DomainError::MenuRootAlreadyExists(data.menu_id));
        }
        state.check_parent(data.parent_id)?;

        state.last_id += 1;
        let item = MenuItem::from_new(state.last_id, data, Utc::now());
        state.items.insert(item.id, item.clone());

        info!("Menu item created successfully: {}", item.id);
        Ok(item)
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let mut state = self.state.write();

        if !state.items.contains_key(&item.id) {
            return Err(DomainError::MenuItemNotFound(item.id));
        }
        if item.is_root && state.other_root(item.menu_id, Some(item.id)) {
            warn!("Rejected second root item for menu {}", item.menu_id);
            return Err(DomainError::MenuRootAlreadyExists(item.menu_id));
        }
        state.check_parent(item.parent_id)?;

        let mut stored = item.clone();
        stored.updated_at = Some(item.updated_at.unwrap_or_else(Utc::now));
        state.items.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: MenuItemId) -> Result<(), DomainError> {
        let mut state = self.state.write();

        let removed = state
            .items
            .remove(&id)
            .ok_or(DomainError::MenuItemNotFound(id))?;

        let now = Utc::now();
        for child in state.items.values_mut().filter(|i| i.parent_id == Some(id)) {
            child.parent_id = removed.parent_id;
            child.updated_at = Some(now);
        }

        info!("Menu item {} deleted", id);
        Ok(())
    }

    async fn route_entries(&self) -> Result<Vec<RouteEntry>, DomainError> {
        let state = self.state.read();
        let mut entries: Vec<RouteEntry> = state
            .items
            .values()
            .filter(|item| item.primary && !item.module_name.is_empty())
            .flat_map(|item| {
                item.translations
                    .iter()
                    .filter(|t| t.is_published() && !t.uri.is_empty())
                    .map(move |t| RouteEntry::new(item.id, &item.module_name, &t.locale, &t.uri))
            })
            .collect();

        entries.sort_by(|a, b| {
            (&a.module_name, a.menuitem_id, &a.locale).cmp(&(&b.module_name, b.menuitem_id, &b.locale))
        });
        Ok(entries)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::domain::{MenuItemChanges, MenuItemTranslation};
    use menu_core::services::MenuService;
    use std::sync::Arc;

    fn service() -> MenuService<InMemoryMenuItemRepository> {
        MenuService::new(Arc::new(InMemoryMenuItemRepository::new()))
    }

    #[tokio::test]
    async fn test_roots_for_menu_excludes_items_unpublished_in_locale() {
        let service = service();
        service
            .create(
                NewMenuItem::new(1)
                    .with_position(1)
                    .with_translation(MenuItemTranslation::draft("en", "About", "/about"))
                    .with_translation(MenuItemTranslation::published("fr", "A propos", "/a-propos")),
            )
            .await
            .unwrap();
        let shown = service
            .create(
                NewMenuItem::new(1)
                    .with_position(0)
                    .with_translation(MenuItemTranslation::published("en", "Home", "/")),
            )
            .await
            .unwrap();

        let en = service.roots_for_menu(1, "en").await.unwrap();
        assert_eq!(en.iter().map(|i| i.id).collect::<Vec<_>>(), vec![shown.item.id]);

        let fr = service.roots_for_menu(1, "fr").await.unwrap();
        assert_eq!(fr.len(), 1);

        let all = service.all_roots_for_menu(1).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, shown.item.id, "ordered by position");

        assert!(service.roots_for_menu(2, "en").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_root_is_rejected() {
        let service = service();
        service.create(NewMenuItem::root(1)).await.unwrap();
        service.create(NewMenuItem::root(2)).await.unwrap();

        let err = service.create(NewMenuItem::root(1)).await.unwrap_err();
        assert!(matches!(err, DomainError::MenuRootAlreadyExists(1)));

        let child = service.create(NewMenuItem::new(1)).await.unwrap().item;
        let err = service
            .update(&child, MenuItemChanges { is_root: Some(true), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MenuRootAlreadyExists(1)));
    }

    #[tokio::test]
    async fn test_get_root_for_menu() {
        let service = service();
        let root = service.create(NewMenuItem::root(4)).await.unwrap().item;
        service.create(NewMenuItem::new(4).with_parent(root.id)).await.unwrap();

        assert_eq!(service.get_root_for_menu(4).await.unwrap().id, root.id);
        assert!(matches!(
            service.get_root_for_menu(5).await.unwrap_err(),
            DomainError::MenuRootNotFound(5)
        ));
    }

    #[tokio::test]
    async fn test_tree_for_menu_nests_by_parent() {
        let service = service();
        let root = service.create(NewMenuItem::root(1)).await.unwrap().item;
        let blog = service
            .create(
                NewMenuItem::new(1)
                    .with_parent(root.id)
                    .with_position(1)
                    .with_translation(MenuItemTranslation::published("en", "Blog", "/blog")),
            )
            .await
            .unwrap()
            .item;
        let home = service
            .create(
                NewMenuItem::new(1)
                    .with_parent(root.id)
                    .with_position(0)
                    .with_translation(MenuItemTranslation::published("en", "Home", "/")),
            )
            .await
            .unwrap()
            .item;

        let tree = service.get_tree_for_menu(1, "en").await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].ids(), vec![root.id, home.id, blog.id]);
    }

    #[tokio::test]
    async fn test_find_by_uri_in_language() {
        let service = service();
        let item = service
            .create(
                NewMenuItem::new(1)
                    .with_translation(MenuItemTranslation::published("en", "Blog", "/blog"))
                    .with_translation(MenuItemTranslation::draft("fr", "Blogue", "/blogue")),
            )
            .await
            .unwrap()
            .item;

        let found = service.find_by_uri_in_language("/blog", "en").await.unwrap();
        assert_eq!(found.map(|i| i.id), Some(item.id));
        assert!(service.find_by_uri_in_language("/blogue", "fr").await.unwrap().is_none());
        assert!(service.find_by_uri_in_language("/blog", "fr").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_for_routes_filters_and_folds() {
        let service = service();
        for (module, primary, uri) in [
            ("blog", true, "/blog"),
            ("blog", true, "/blog2"),
            ("page", false, "/pages"),
            ("", true, "/orphan"),
        ] {
            service
                .create(
                    NewMenuItem::new(1)
                        .with_module(module, primary)
                        .with_translation(MenuItemTranslation::published("en", "x", uri)),
                )
                .await
                .unwrap();
        }

        let routes = service.get_for_routes().await.unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes["blog"]["en"], "/blog2");
    }

    #[tokio::test]
    async fn test_delete_moves_children_up() {
        let service = service();
        let root = service.create(NewMenuItem::root(1)).await.unwrap().item;
        let section = service
            .create(NewMenuItem::new(1).with_parent(root.id))
            .await
            .unwrap()
            .item;
        let leaf = service
            .create(NewMenuItem::new(1).with_parent(section.id))
            .await
            .unwrap()
            .item;

        service.delete(section.id).await.unwrap();

        let moved = service.find_by_id(leaf.id).await.unwrap();
        assert_eq!(moved.parent_id, Some(root.id));
        assert!(matches!(
            service.delete(section.id).await.unwrap_err(),
            DomainError::MenuItemNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_unknown_parent_is_rejected() {
        let service = service();
        let err = service
            .create(NewMenuItem::new(1).with_parent(404))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ParentNotFound(404)));

        let item = service.create(NewMenuItem::new(1)).await.unwrap().item;
        let err = service
            .update(&item, MenuItemChanges { parent_id: Some(Some(404)), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ParentNotFound(404)));
        assert_eq!(service.find_by_id(item.id).await.unwrap().parent_id, None);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let repo = InMemoryMenuItemRepository::new();
        let ghost = MenuItem::from_new(99, &NewMenuItem::new(1), Utc::now());

        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::MenuItemNotFound(99)));
    }
}
