// ============================================================================
// Menu Core - Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Menu item store operations on top of a [`MenuItemRepository`]

use std::sync::Arc;
use tracing::{debug, info, warn};

use menu_shared::constants::MAX_TREE_DEPTH;
use menu_shared::{MenuId, MenuItemId};

use crate::domain::{
    build_tree, fold_routes, prune_unpublished, CreatedMenuItem, MenuItem, MenuItemChanges,
    MenuItemTreeNode, NewMenuItem, RouteMap,
};
use crate::error::DomainError;
use crate::repositories::{MenuItemQuery, MenuItemRepository};

/// Menu item store: persistence, lookups and tree rendering
pub struct MenuService<R: MenuItemRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: MenuItemRepository + ?Sized> MenuService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Persist a new menu item. The returned events have not been dispatched yet.
    pub async fn create(&self, data: NewMenuItem) -> Result<CreatedMenuItem, DomainError> {
        let item = self.repo.create(&data).await?;
        info!("Menu item created: {} (menu {})", item.id, item.menu_id);
        Ok(CreatedMenuItem::new(item))
    }

    /// Apply a partial update to an existing item
    pub async fn update(
        &self,
        item: &MenuItem,
        changes: MenuItemChanges,
    ) -> Result<MenuItem, DomainError> {
        let mut updated = item.clone();
        updated.apply(changes);

        let saved = self.repo.update(&updated).await?;
        info!("Menu item updated: {}", saved.id);
        Ok(saved)
    }

    pub async fn delete(&self, id: MenuItemId) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        info!("Menu item deleted: {}", id);
        Ok(())
    }

    pub async fn find_by_id(&self, id: MenuItemId) -> Result<MenuItem, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MenuItemNotFound(id))
    }

    /// Items of the menu published in `locale`, by position
    pub async fn roots_for_menu(
        &self,
        menu_id: MenuId,
        locale: &str,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let items = self
            .repo
            .find(&MenuItemQuery::for_menu(menu_id).published_in(locale))
            .await?;
        debug!("Menu {} has {} items published in {}", menu_id, items.len(), locale);
        Ok(items)
    }

    /// Every item of the menu regardless of status, by position
    pub async fn all_roots_for_menu(&self, menu_id: MenuId) -> Result<Vec<MenuItem>, DomainError> {
        self.repo.find(&MenuItemQuery::for_menu(menu_id)).await
    }

    /// The `is_root` sentinel of the menu
    pub async fn get_root_for_menu(&self, menu_id: MenuId) -> Result<MenuItem, DomainError> {
        let mut roots = self
            .repo
            .find(&MenuItemQuery::for_menu(menu_id).roots_only())
            .await?;

        if roots.len() > 1 {
            warn!("Menu {} has {} root items, using the first", menu_id, roots.len());
        }

        if roots.is_empty() {
            return Err(DomainError::MenuRootNotFound(menu_id));
        }
        Ok(roots.swap_remove(0))
    }

    /// Nested view of the menu as published in `locale`.
    ///
    /// Built from every item and then pruned, so an unpublished item hides its
    /// whole subtree instead of stranding its children as extra roots.
    pub async fn get_tree_for_menu(
        &self,
        menu_id: MenuId,
        locale: &str,
    ) -> Result<Vec<MenuItemTreeNode>, DomainError> {
        let items = self.all_roots_for_menu(menu_id).await?;
        let tree = prune_unpublished(build_tree(items)?, locale);

        let depth = tree.iter().map(MenuItemTreeNode::depth).max().unwrap_or(0);
        if depth > MAX_TREE_DEPTH {
            warn!("Menu {} tree is {} levels deep, refusing to render", menu_id, depth);
            return Err(DomainError::HierarchyTooDeep {
                menu_id,
                limit: MAX_TREE_DEPTH,
            });
        }
        Ok(tree)
    }

    /// Reverse lookup of a published uri. `None` is the normal miss.
    /// Both `uri` and `locale` are normalized the way stored translations are.
    pub async fn find_by_uri_in_language(
        &self,
        uri: &str,
        locale: &str,
    ) -> Result<Option<MenuItem>, DomainError> {
        let query = MenuItemQuery::default()
            .published_in(locale)
            .with_uri(uri)
            .limit(1);
        Ok(self.repo.find(&query).await?.into_iter().next())
    }

    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repo.ping().await
    }

    /// Routing table of primary, module-bound items
    pub async fn get_for_routes(&self) -> Result<RouteMap, DomainError> {
        let entries = self.repo.route_entries().await?;
        debug!("Building routes from {} entries", entries.len());
        Ok(fold_routes(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuItemEvent, MenuItemTranslation, RouteEntry};
    use crate::repositories::MockMenuItemRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn item(id: MenuItemId, parent: Option<MenuItemId>) -> MenuItem {
        let mut data = NewMenuItem::new(1);
        data.parent_id = parent;
        MenuItem::from_new(id, &data, Utc::now())
    }

    fn published(mut item: MenuItem) -> MenuItem {
        item.upsert_translation(MenuItemTranslation::published("en", "x", "/x"));
        item
    }

    fn service(repo: MockMenuItemRepository) -> MenuService<MockMenuItemRepository> {
        MenuService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_returns_created_event() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|data| Ok(MenuItem::from_new(42, data, Utc::now())));

        let created = service(repo).create(NewMenuItem::new(1)).await.unwrap();

        assert_eq!(created.item.id, 42);
        assert_eq!(
            created.events,
            vec![MenuItemEvent::Created { item: created.item.clone() }]
        );
    }

    #[tokio::test]
    async fn test_create_failure_raises_no_event() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_create()
            .returning(|_| Err(DomainError::DatabaseError("connection reset".into())));

        let err = service(repo).create(NewMenuItem::new(1)).await.unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_update_writes_applied_changes() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_update()
            .withf(|item| item.position == 9 && item.parent_id.is_none())
            .returning(|item| Ok(item.clone()));

        let original = item(5, Some(1));
        let changes = MenuItemChanges {
            parent_id: Some(None),
            position: Some(9),
            ..Default::default()
        };
        let saved = service(repo).update(&original, changes).await.unwrap();

        assert_eq!(saved.position, 9);
        assert_eq!(original.parent_id, Some(1));
    }

    #[tokio::test]
    async fn test_roots_for_menu_queries_published_locale() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find()
            .with(eq(MenuItemQuery::for_menu(3).published_in("fr")))
            .returning(|_| Ok(Vec::new()));

        let items = service(repo).roots_for_menu(3, "fr").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_get_root_for_menu_not_found() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find().returning(|_| Ok(Vec::new()));

        let err = service(repo).get_root_for_menu(8).await.unwrap_err();
        assert!(matches!(err, DomainError::MenuRootNotFound(8)));
    }

    #[tokio::test]
    async fn test_get_root_for_menu_takes_first_of_many() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find()
            .with(eq(MenuItemQuery::for_menu(1).roots_only()))
            .returning(|_| Ok(vec![item(2, None), item(6, None)]));

        let root = service(repo).get_root_for_menu(1).await.unwrap();
        assert_eq!(root.id, 2);
    }

    #[tokio::test]
    async fn test_tree_hides_children_of_unpublished_parent() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find()
            .with(eq(MenuItemQuery::for_menu(1)))
            .returning(|_| {
                let mut root = item(1, None);
                root.is_root = true;
                Ok(vec![
                    root,
                    item(2, Some(1)),
                    published(item(3, Some(2))),
                    published(item(4, Some(1))),
                ])
            });

        let tree = service(repo).get_tree_for_menu(1, "en").await.unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].ids(), vec![1, 4]);
    }

    #[tokio::test]
    async fn test_tree_reports_cycle() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find()
            .returning(|_| Ok(vec![item(1, Some(2)), item(2, Some(1))]));

        let err = service(repo).get_tree_for_menu(1, "en").await.unwrap_err();
        assert!(matches!(err, DomainError::CyclicHierarchy(_)));
    }

    #[tokio::test]
    async fn test_find_by_uri_miss_is_none() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find()
            .withf(|q| {
                q.limit == Some(1)
                    && q.translation.as_ref().and_then(|t| t.uri.as_deref()) == Some("/nope")
            })
            .returning(|_| Ok(Vec::new()));

        let found = service(repo).find_by_uri_in_language("/nope", "en").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_by_uri_normalizes_input() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find()
            .withf(|q| {
                q.translation.as_ref().is_some_and(|t| {
                    t.locale == "en" && t.uri.as_deref() == Some("/blog")
                })
            })
            .returning(|_| Ok(vec![published(item(9, None))]));

        let found = service(repo).find_by_uri_in_language(" /blog/ ", "EN").await.unwrap();
        assert_eq!(found.map(|i| i.id), Some(9));
    }

    #[tokio::test]
    async fn test_tree_deeper_than_limit_is_rejected() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find().returning(|_| {
            let depth = MAX_TREE_DEPTH as MenuItemId + 1;
            Ok((1..=depth)
                .map(|id| published(item(id, if id == 1 { None } else { Some(id - 1) })))
                .collect())
        });

        let err = service(repo).get_tree_for_menu(1, "en").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::HierarchyTooDeep { menu_id: 1, limit: MAX_TREE_DEPTH }
        ));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_not_found() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find_by_id().with(eq(77)).returning(|_| Ok(None));

        let err = service(repo).find_by_id(77).await.unwrap_err();
        assert!(matches!(err, DomainError::MenuItemNotFound(77)));
    }

    #[tokio::test]
    async fn test_get_for_routes_last_write_wins() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_route_entries().returning(|| {
            Ok(vec![
                RouteEntry::new(1, "blog", "en", "/blog"),
                RouteEntry::new(2, "blog", "en", "/blog2"),
            ])
        });

        let routes = service(repo).get_for_routes().await.unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes["blog"].len(), 1);
        assert_eq!(routes["blog"]["en"], "/blog2");
    }
}
