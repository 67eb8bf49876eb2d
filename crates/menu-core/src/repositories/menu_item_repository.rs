//! Menu item repository trait (port)

use async_trait::async_trait;

use menu_shared::utils::{normalize_locale, normalize_uri};
use menu_shared::{MenuId, MenuItemId};

use crate::domain::{MenuItem, NewMenuItem, RouteEntry, TranslationStatus};
use crate::error::DomainError;

/// Conditions a single translation row must meet for its item to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFilter {
    pub locale: String,
    pub status: Option<TranslationStatus>,
    pub uri: Option<String>,
}

impl TranslationFilter {
    pub fn published(locale: &str) -> Self {
        Self {
            locale: normalize_locale(locale),
            status: Some(TranslationStatus::Published),
            uri: None,
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        item.translations.iter().any(|t| {
            t.locale == self.locale
                && self.status.map_or(true, |status| t.status == status)
                && self.uri.as_deref().map_or(true, |uri| t.uri == uri)
        })
    }
}

/// Typed filter set for [`MenuItemRepository::find`]. Unset fields do not
/// filter. Results are always ordered by `position`, then `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemQuery {
    pub menu_id: Option<MenuId>,
    pub is_root: Option<bool>,
    pub translation: Option<TranslationFilter>,
    pub limit: Option<i64>,
}

impl MenuItemQuery {
    pub fn for_menu(menu_id: MenuId) -> Self {
        Self {
            menu_id: Some(menu_id),
            ..Self::default()
        }
    }

    pub fn published_in(mut self, locale: &str) -> Self {
        self.translation = Some(TranslationFilter::published(locale));
        self
    }

    /// Narrows the translation filter to one uri. Call after `published_in`.
    pub fn with_uri(mut self, uri: &str) -> Self {
        if let Some(filter) = self.translation.as_mut() {
            filter.uri = Some(normalize_uri(uri));
        }
        self
    }

    pub fn roots_only(mut self) -> Self {
        self.is_root = Some(true);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        self.menu_id.map_or(true, |id| item.menu_id == id)
            && self.is_root.map_or(true, |is_root| item.is_root == is_root)
            && self.translation.as_ref().map_or(true, |f| f.matches(item))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn find_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, DomainError>;
    async fn find(&self, query: &MenuItemQuery) -> Result<Vec<MenuItem>, DomainError>;
    async fn create(&self, data: &NewMenuItem) -> Result<MenuItem, DomainError>;
    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    /// Removes the item; its direct children move up to its parent.
    async fn delete(&self, id: MenuItemId) -> Result<(), DomainError>;
    /// Published, primary, module-bound translations ordered by
    /// `module_name`, item id, then locale.
    async fn route_entries(&self) -> Result<Vec<RouteEntry>, DomainError>;

    /// Cheap round trip to the backing store.
    async fn ping(&self) -> Result<(), DomainError>;
}
