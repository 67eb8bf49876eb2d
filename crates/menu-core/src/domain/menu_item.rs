// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: Navigable menu node with per-locale translations
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use menu_shared::{MenuId, MenuItemId};

use super::translation::MenuItemTranslation;

/// Menu Item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub menu_id: MenuId,
    pub parent_id: Option<MenuItemId>,
    pub module_name: String,
    pub is_root: bool,
    pub position: i32,
    pub primary: bool,
    pub translations: Vec<MenuItemTranslation>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MenuItem {
    /// Materializes a freshly inserted item.
    pub fn from_new(id: MenuItemId, data: &NewMenuItem, created_at: DateTime<Utc>) -> Self {
        let mut item = Self {
            id,
            menu_id: data.menu_id,
            parent_id: data.parent_id,
            module_name: data.module_name.trim().to_string(),
            is_root: data.is_root,
            position: data.position,
            primary: data.primary,
            translations: Vec::with_capacity(data.translations.len()),
            created_at,
            updated_at: None,
        };
        for translation in &data.translations {
            item.upsert_translation(translation.clone());
        }
        item
    }

    pub fn translation(&self, locale: &str) -> Option<&MenuItemTranslation> {
        self.translations.iter().find(|t| t.locale == locale)
    }

    pub fn is_published_in(&self, locale: &str) -> bool {
        self.translation(locale).is_some_and(|t| t.is_published())
    }

    /// Replaces the translation for the same locale, or appends a new one.
    pub fn upsert_translation(&mut self, translation: MenuItemTranslation) {
        let translation = translation.normalized();
        match self
            .translations
            .iter_mut()
            .find(|t| t.locale == translation.locale)
        {
            Some(existing) => *existing = translation,
            None => self.translations.push(translation),
        }
    }

    /// Applies every field present in `changes`; absent fields are untouched.
    pub fn apply(&mut self, changes: MenuItemChanges) {
        if let Some(parent_id) = changes.parent_id {
            self.parent_id = parent_id;
        }
        if let Some(module_name) = changes.module_name {
            self.module_name = module_name.trim().to_string();
        }
        if let Some(is_root) = changes.is_root {
            self.is_root = is_root;
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
        if let Some(primary) = changes.primary {
            self.primary = primary;
        }
        if let Some(translations) = changes.translations {
            for translation in translations {
                self.upsert_translation(translation);
            }
        }
        self.updated_at = Some(Utc::now());
    }
}

/// Field set for creating a menu item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMenuItem {
    pub menu_id: MenuId,

    #[serde(default)]
    pub parent_id: Option<MenuItemId>,

    #[serde(default)]
    #[validate(length(max = 100, message = "Module name too long"))]
    pub module_name: String,

    #[serde(default)]
    pub is_root: bool,

    #[serde(default)]
    pub position: i32,

    #[serde(default)]
    pub primary: bool,

    #[serde(default)]
    #[validate(nested)]
    pub translations: Vec<MenuItemTranslation>,
}

impl NewMenuItem {
    pub fn new(menu_id: MenuId) -> Self {
        Self {
            menu_id,
            parent_id: None,
            module_name: String::new(),
            is_root: false,
            position: 0,
            primary: false,
            translations: Vec::new(),
        }
    }

    /// The sentinel item every menu hangs its tree from.
    pub fn root(menu_id: MenuId) -> Self {
        Self {
            is_root: true,
            ..Self::new(menu_id)
        }
    }

    pub fn with_parent(mut self, parent_id: MenuItemId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn with_module(mut self, module_name: &str, primary: bool) -> Self {
        self.module_name = module_name.to_string();
        self.primary = primary;
        self
    }

    pub fn with_translation(mut self, translation: MenuItemTranslation) -> Self {
        self.translations.push(translation);
        self
    }
}

/// Partial field set for updating a menu item
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MenuItemChanges {
    /// Outer `None` leaves the parent alone, `Some(None)` detaches the item.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<MenuItemId>>,

    #[serde(default)]
    #[validate(length(max = 100, message = "Module name too long"))]
    pub module_name: Option<String>,

    #[serde(default)]
    pub is_root: Option<bool>,

    #[serde(default)]
    pub position: Option<i32>,

    #[serde(default)]
    pub primary: Option<bool>,

    #[serde(default)]
    #[validate(nested)]
    pub translations: Option<Vec<MenuItemTranslation>>,
}

impl MenuItemChanges {
    pub fn is_empty(&self) -> bool {
        self.parent_id.is_none()
            && self.module_name.is_none()
            && self.is_root.is_none()
            && self.position.is_none()
            && self.primary.is_none()
            && self.translations.is_none()
    }
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
