use std::sync::Arc;
use tracing::warn;

use menu_core::repositories::MenuItemRepository;
use menu_core::services::{EventBus, MenuService, RouteTable};
use menu_shared::config::AppConfig;
use menu_shared::utils::normalize_locale;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub menus: Arc<MenuService<dyn MenuItemRepository>>,
    pub events: Arc<EventBus>,
    pub routes: Arc<RouteTable>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(repo: Arc<dyn MenuItemRepository>, config: AppConfig) -> Self {
        Self {
            menus: Arc::new(MenuService::new(repo)),
            events: Arc::new(EventBus::new(config.events.capacity)),
            routes: Arc::new(RouteTable::default()),
            config,
        }
    }

    /// The requested locale, or the configured default when absent or blank.
    pub fn locale_or_default(&self, locale: Option<&str>) -> String {
        match locale.map(normalize_locale) {
            Some(locale) if !locale.is_empty() => locale,
            _ => normalize_locale(&self.config.app.default_locale),
        }
    }

    /// Reloads the route table. A failure keeps the previous table.
    pub async fn refresh_routes(&self) {
        if let Err(e) = self.routes.refresh(&*self.menus).await {
            warn!("Route table refresh failed, keeping previous table: {}", e);
        }
    }
}
