// ============================================================================
// Menu Infrastructure - PostgreSQL Menu Item Repository
// File: crates/menu-infrastructure/src/database/postgres/menu_item_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{debug, error, info, warn};

use menu_core::domain::{MenuItem, MenuItemTranslation, NewMenuItem, RouteEntry, TranslationStatus};
use menu_core::error::DomainError;
use menu_core::repositories::{MenuItemQuery, MenuItemRepository};
use menu_shared::{MenuId, MenuItemId};

const ROOT_CONSTRAINT: &str = "menuitems_one_root_per_menu";
const PARENT_CONSTRAINT: &str = "menuitems_parent_id_fkey";

const ITEM_COLUMNS: &str = r#"
    mi.id, mi.menu_id, mi.parent_id, mi.module_name,
    mi.is_root, mi.position, mi."primary",
    mi.created_at, mi.updated_at
"#;

const RETURNING_COLUMNS: &str = r#"
    id, menu_id, parent_id, module_name,
    is_root, position, "primary",
    created_at, updated_at
"#;

pub struct PgMenuItemRepository {
    pool: PgPool,
}

impl PgMenuItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn attach_translations(
        &self,
        rows: Vec<MenuItemRow>,
    ) -> Result<Vec<MenuItem>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<MenuItemId> = rows.iter().map(|r| r.id).collect();
        let translations: Vec<TranslationRow> = sqlx::query_as(
            r#"
            SELECT menuitem_id, locale, title, uri, status
            FROM menuitem_translations
            WHERE menuitem_id = ANY($1)
            ORDER BY menuitem_id, locale
            "#
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading translations"))?;

        let mut by_item: HashMap<MenuItemId, Vec<MenuItemTranslation>> = HashMap::new();
        for row in translations {
            by_item.entry(row.menuitem_id).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let translations = by_item.remove(&row.id).unwrap_or_default();
                row.into_item(translations)
            })
            .collect())
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: MenuItemId,
    pub menu_id: MenuId,
    pub parent_id: Option<MenuItemId>,
    pub module_name: String,
    pub is_root: bool,
    pub position: i32,
    pub primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MenuItemRow {
    fn into_item(self, translations: Vec<MenuItemTranslation>) -> MenuItem {
        MenuItem {
            id: self.id,
            menu_id: self.menu_id,
            parent_id: self.parent_id,
            module_name: self.module_name,
            is_root: self.is_root,
            position: self.position,
            primary: self.primary,
            translations,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct TranslationRow {
    pub menuitem_id: MenuItemId,
    pub locale: String,
    pub title: String,
    pub uri: String,
    pub status: i32,
}

impl From<TranslationRow> for MenuItemTranslation {
    fn from(row: TranslationRow) -> Self {
        MenuItemTranslation {
            locale: row.locale,
            title: row.title,
            uri: row.uri,
            status: TranslationStatus::from_i32(row.status).unwrap_or_default(),
        }
    }
}

#[derive(Debug, FromRow)]
struct RouteEntryRow {
    pub menuitem_id: MenuItemId,
    pub module_name: String,
    pub locale: String,
    pub uri: String,
}

impl From<RouteEntryRow> for RouteEntry {
    fn from(row: RouteEntryRow) -> Self {
        RouteEntry {
            menuitem_id: row.menuitem_id,
            module_name: row.module_name,
            locale: row.locale,
            uri: row.uri,
        }
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

/// Like [`db_error`], but reports a second root for the menu as a conflict
/// and a dangling `parent_id` as a missing parent.
fn write_error(item: &MenuItem, context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    let (menu_id, parent_id) = (item.menu_id, item.parent_id);
    move |e| {
        match e.as_database_error().and_then(|d| d.constraint()) {
            Some(ROOT_CONSTRAINT) => {
                warn!("Rejected second root item for menu {}", menu_id);
                return DomainError::MenuRootAlreadyExists(menu_id);
            }
            Some(PARENT_CONSTRAINT) => {
                if let Some(parent_id) = parent_id {
                    warn!("Rejected menu item with unknown parent {}", parent_id);
                    return DomainError::ParentNotFound(parent_id);
                }
            }
            _ => {}
        }
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

/// Menus are created on first use; items only carry the menu id.
async fn ensure_menu(tx: &mut Transaction<'_, Postgres>, menu_id: MenuId) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO menus (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(menu_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

fn build_find_query(query: &MenuItemQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {ITEM_COLUMNS} FROM menuitems mi WHERE TRUE"));

    if let Some(menu_id) = query.menu_id {
        qb.push(" AND mi.menu_id = ").push_bind(menu_id);
    }
    if let Some(is_root) = query.is_root {
        qb.push(" AND mi.is_root = ").push_bind(is_root);
    }
    if let Some(filter) = &query.translation {
        qb.push(" AND EXISTS (SELECT 1 FROM menuitem_translations t WHERE t.menuitem_id = mi.id AND t.locale = ")
            .push_bind(filter.locale.clone());
        if let Some(status) = filter.status {
            qb.push(" AND t.status = ").push_bind(status.as_i32());
        }
        if let Some(uri) = &filter.uri {
            qb.push(" AND t.uri = ").push_bind(uri.clone());
        }
        qb.push(")");
    }

    qb.push(" ORDER BY mi.position ASC, mi.id ASC");
    if let Some(limit) = query.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }
    qb
}

async fn upsert_translations(
    tx: &mut Transaction<'_, Postgres>,
    menuitem_id: MenuItemId,
    translations: &[MenuItemTranslation],
) -> Result<(), sqlx::Error> {
    for translation in translations {
        sqlx::query(
            r#"
            INSERT INTO menuitem_translations (menuitem_id, locale, title, uri, status)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (menuitem_id, locale) DO UPDATE
            SET title = EXCLUDED.title, uri = EXCLUDED.uri, status = EXCLUDED.status
            "#
        )
        .bind(menuitem_id)
        .bind(&translation.locale)
        .bind(&translation.title)
        .bind(&translation.uri)
        .bind(translation.status.as_i32())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl MenuItemRepository for PgMenuItemRepository {
    async fn find_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM menuitems mi WHERE mi.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding menu item by id"))?;

        match row {
            Some(row) => Ok(self.attach_translations(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find(&self, query: &MenuItemQuery) -> Result<Vec<MenuItem>, DomainError> {
        let mut qb = build_find_query(query);
        let rows: Vec<MenuItemRow> = qb
            .build_query_as::<MenuItemRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("querying menu items"))?;

        debug!("Menu item query {:?} matched {} rows", query, rows.len());
        self.attach_translations(rows).await
    }

    async fn create(&self, data: &NewMenuItem) -> Result<MenuItem, DomainError> {
        info!("Creating menu item in menu {}", data.menu_id);

        // Normalized copy of the payload; its id is replaced by the insert.
        let draft = MenuItem::from_new(0, data, Utc::now());
        let on_write = write_error(&draft, "creating menu item");

        let mut tx = self.pool.begin().await.map_err(db_error("beginning transaction"))?;
        ensure_menu(&mut tx, draft.menu_id).await.map_err(&on_write)?;

        let row: MenuItemRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO menuitems (menu_id, parent_id, module_name, is_root, position, "primary")
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(draft.menu_id)
        .bind(draft.parent_id)
        .bind(&draft.module_name)
        .bind(draft.is_root)
        .bind(draft.position)
        .bind(draft.primary)
        .fetch_one(&mut *tx)
        .await
        .map_err(&on_write)?;

        upsert_translations(&mut tx, row.id, &draft.translations)
            .await
            .map_err(&on_write)?;
        tx.commit().await.map_err(&on_write)?;

        info!("Menu item created successfully: {}", row.id);
        Ok(row.into_item(draft.translations))
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let on_write = write_error(item, "updating menu item");

        let mut tx = self.pool.begin().await.map_err(db_error("beginning transaction"))?;

        let row: Option<MenuItemRow> = sqlx::query_as(&format!(
            r#"
            UPDATE menuitems
            SET
                parent_id = $2,
                module_name = $3,
                is_root = $4,
                position = $5,
                "primary" = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(item.parent_id)
        .bind(&item.module_name)
        .bind(item.is_root)
        .bind(item.position)
        .bind(item.primary)
        .bind(item.updated_at.unwrap_or_else(Utc::now))
        .fetch_optional(&mut *tx)
        .await
        .map_err(&on_write)?;

        let row = row.ok_or(DomainError::MenuItemNotFound(item.id))?;

        let locales: Vec<String> = item.translations.iter().map(|t| t.locale.clone()).collect();
        sqlx::query(
            "DELETE FROM menuitem_translations WHERE menuitem_id = $1 AND NOT (locale = ANY($2))"
        )
        .bind(item.id)
        .bind(&locales)
        .execute(&mut *tx)
        .await
        .map_err(&on_write)?;

        upsert_translations(&mut tx, item.id, &item.translations)
            .await
            .map_err(&on_write)?;
        tx.commit().await.map_err(&on_write)?;

        Ok(row.into_item(item.translations.clone()))
    }

    async fn delete(&self, id: MenuItemId) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("beginning transaction"))?;

        let parent: Option<Option<MenuItemId>> =
            sqlx::query_scalar("SELECT parent_id FROM menuitems WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("locking menu item"))?;

        let Some(parent_id) = parent else {
            return Err(DomainError::MenuItemNotFound(id));
        };

        let moved = sqlx::query(
            "UPDATE menuitems SET parent_id = $2, updated_at = NOW() WHERE parent_id = $1"
        )
        .bind(id)
        .bind(parent_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("re-parenting children"))?
        .rows_affected();

        sqlx::query("DELETE FROM menuitems WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("deleting menu item"))?;

        tx.commit().await.map_err(db_error("committing delete"))?;

        info!("Menu item {} deleted, {} children moved up", id, moved);
        Ok(())
    }

    async fn route_entries(&self) -> Result<Vec<RouteEntry>, DomainError> {
        let rows: Vec<RouteEntryRow> = sqlx::query_as(
            r#"
            SELECT
                mi.id AS menuitem_id,
                mi.module_name,
                t.locale,
                t.uri
            FROM menus m
            JOIN menuitems mi ON m.id = mi.menu_id
            JOIN menuitem_translations t ON mi.id = t.menuitem_id
            WHERE t.uri <> ''
              AND mi.module_name <> ''
              AND t.status = 1
              AND mi."primary" = TRUE
            ORDER BY mi.module_name, mi.id, t.locale
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading route entries"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("pinging database"))?;
        Ok(())
    }
}
