// ============================================================================
// Menu Core - Menu Item Translation Entity
// File: crates/menu-core/src/domain/translation.rs
// Description: Per-locale presentation of a menu item
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use menu_shared::utils::{normalize_locale, normalize_uri};

/// Publish status of a translation, stored as `0`/`1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    #[default]
    Draft,
    Published,
}

impl TranslationStatus {
    pub fn as_i32(&self) -> i32 {
        match self {
            TranslationStatus::Draft => 0,
            TranslationStatus::Published => 1,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(TranslationStatus::Draft),
            1 => Some(TranslationStatus::Published),
            _ => None,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, TranslationStatus::Published)
    }
}

/// Menu item translation, one per `(menuitem_id, locale)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MenuItemTranslation {
    #[validate(length(min = 2, max = 10, message = "Locale must be between 2 and 10 characters"))]
    pub locale: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Title too long"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "URI too long"))]
    pub uri: String,

    #[serde(default)]
    pub status: TranslationStatus,
}

impl MenuItemTranslation {
    pub fn new(locale: &str, title: &str, uri: &str, status: TranslationStatus) -> Self {
        Self {
            locale: normalize_locale(locale),
            title: title.trim().to_string(),
            uri: normalize_uri(uri),
            status,
        }
    }

    pub fn published(locale: &str, title: &str, uri: &str) -> Self {
        Self::new(locale, title, uri, TranslationStatus::Published)
    }

    pub fn draft(locale: &str, title: &str, uri: &str) -> Self {
        Self::new(locale, title, uri, TranslationStatus::Draft)
    }

    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }

    /// Same normalization `new` applies, for values that arrived through serde.
    pub fn normalized(self) -> Self {
        Self::new(&self.locale, &self.title, &self.uri, self.status)
    }
}
