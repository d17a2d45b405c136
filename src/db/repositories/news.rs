//! News repository
//!
//! Database operations for news items.
//!
//! This module provides:
//! - `NewsRepository` trait defining the interface for news data access
//! - `SqlxNewsRepository` implementing the trait for SQLite and MySQL
//!
//! Public listings push the visibility predicate into the query: only
//! published rows whose membership requirement is inside the requester's
//! cumulative tier allow-list are matched. A row with an unrecognized
//! requirement value matches no allow-list and is therefore hidden from
//! every requester.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{CreateNewsInput, MembershipTier, News, NewsStatus, UpdateNewsInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const NEWS_COLUMNS: &str = "id, title, description, content, category, kind, featured_image, membership_requirement, status, is_featured, published_date, view_count, created_by, updated_by, created_at, updated_at";

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Create a new news item
    async fn create(&self, input: &CreateNewsInput) -> Result<News>;

    /// Get news item by ID (any status)
    async fn get_by_id(&self, id: i64) -> Result<Option<News>>;

    /// List news items with pagination (all statuses, back-office view)
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<News>>;

    /// Count total news items (all statuses)
    async fn count(&self) -> Result<i64>;

    /// Update a news item
    async fn update(&self, id: i64, input: &UpdateNewsInput) -> Result<News>;

    /// Delete a news item
    async fn delete(&self, id: i64) -> Result<()>;

    /// List published news visible to the given tier, with optional
    /// category equality and featured-only predicates. Ordered by
    /// publication date, newest first.
    async fn list_visible(
        &self,
        tier: MembershipTier,
        category: Option<&str>,
        featured_only: bool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<News>>;

    /// Count rows matched by the same predicates as `list_visible`
    async fn count_visible(
        &self,
        tier: MembershipTier,
        category: Option<&str>,
        featured_only: bool,
    ) -> Result<i64>;

    /// Increment the view counter by one
    async fn increment_view_count(&self, id: i64) -> Result<()>;

    /// Explicitly reset the view counter to zero
    async fn reset_view_count(&self, id: i64) -> Result<()>;
}

/// SQLx-based news repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxNewsRepository {
    pool: DynDatabasePool,
}

impl SqlxNewsRepository {
    /// Create a new SQLx news repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NewsRepository for SqlxNewsRepository {
    async fn create(&self, input: &CreateNewsInput) -> Result<News> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_news_sqlite(self.pool.as_sqlite().unwrap(), input).await,
            DatabaseDriver::Mysql => create_news_mysql(self.pool.as_mysql().unwrap(), input).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<News>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_news_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_news_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<News>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_news_sqlite(self.pool.as_sqlite().unwrap(), offset, limit).await,
            DatabaseDriver::Mysql => list_news_mysql(self.pool.as_mysql().unwrap(), offset, limit).await,
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => count_news_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => count_news_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn update(&self, id: i64, input: &UpdateNewsInput) -> Result<News> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => update_news_sqlite(self.pool.as_sqlite().unwrap(), id, input).await,
            DatabaseDriver::Mysql => update_news_mysql(self.pool.as_mysql().unwrap(), id, input).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_news_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => delete_news_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn list_visible(
        &self,
        tier: MembershipTier,
        category: Option<&str>,
        featured_only: bool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<News>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_visible_sqlite(self.pool.as_sqlite().unwrap(), tier, category, featured_only, offset, limit).await
            }
            DatabaseDriver::Mysql => {
                list_visible_mysql(self.pool.as_mysql().unwrap(), tier, category, featured_only, offset, limit).await
            }
        }
    }

    async fn count_visible(
        &self,
        tier: MembershipTier,
        category: Option<&str>,
        featured_only: bool,
    ) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                count_visible_sqlite(self.pool.as_sqlite().unwrap(), tier, category, featured_only).await
            }
            DatabaseDriver::Mysql => {
                count_visible_mysql(self.pool.as_mysql().unwrap(), tier, category, featured_only).await
            }
        }
    }

    async fn increment_view_count(&self, id: i64) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => increment_view_count_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => increment_view_count_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn reset_view_count(&self, id: i64) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => reset_view_count_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => reset_view_count_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }
}

/// Build the WHERE clause shared by `list_visible` and `count_visible`.
///
/// The membership IN-list carries one placeholder per allowed tier; the
/// caller binds `tier.cumulative()` in order, then the optional category.
fn visible_where_clause(tier: MembershipTier, category: Option<&str>, featured_only: bool) -> String {
    let placeholders = vec!["?"; tier.cumulative().len()].join(", ");
    let mut clause = format!(
        "status = 'published' AND membership_requirement IN ({})",
        placeholders
    );
    if category.is_some() {
        clause.push_str(" AND category = ?");
    }
    if featured_only {
        clause.push_str(" AND is_featured = ?");
    }
    clause
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_news_sqlite(pool: &SqlitePool, input: &CreateNewsInput) -> Result<News> {
    let now = Utc::now();
    let status = input.status.unwrap_or_default();
    let tier = input.membership_requirement.unwrap_or_default();
    let is_featured = input.is_featured.unwrap_or(false);

    let result = sqlx::query(
        r#"
        INSERT INTO news (title, description, content, category, kind, featured_image, membership_requirement, status, is_featured, published_date, view_count, created_by, updated_by, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.content)
    .bind(&input.category)
    .bind(&input.kind)
    .bind(&input.featured_image)
    .bind(tier.as_str())
    .bind(status.as_str())
    .bind(is_featured)
    .bind(input.published_date)
    .bind(0_i64)
    .bind(input.created_by)
    .bind(input.created_by)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create news item")?;

    let id = result.last_insert_rowid();

    Ok(News {
        id,
        title: input.title.clone(),
        description: input.description.clone(),
        content: input.content.clone(),
        category: input.category.clone(),
        kind: input.kind.clone(),
        featured_image: input.featured_image.clone(),
        membership_requirement: tier,
        status,
        is_featured,
        published_date: input.published_date,
        view_count: 0,
        created_by: input.created_by,
        updated_by: input.created_by,
        created_at: now,
        updated_at: now,
    })
}

async fn get_news_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<News>> {
    let row = sqlx::query(&format!("SELECT {} FROM news WHERE id = ?", NEWS_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get news by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_news_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn list_news_sqlite(pool: &SqlitePool, offset: i64, limit: i64) -> Result<Vec<News>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM news ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        NEWS_COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list news")?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row_to_news_sqlite(&row)?);
    }

    Ok(items)
}

async fn count_news_sqlite(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM news")
        .fetch_one(pool)
        .await
        .context("Failed to count news")?;

    Ok(row.get("count"))
}

async fn update_news_sqlite(pool: &SqlitePool, id: i64, input: &UpdateNewsInput) -> Result<News> {
    let existing = get_news_by_id_sqlite(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("News item not found"))?;

    let now = Utc::now();
    let new_title = input.title.as_ref().unwrap_or(&existing.title);
    let new_description = input.description.as_ref().unwrap_or(&existing.description);
    let new_content = input.content.as_ref().unwrap_or(&existing.content);
    let new_category = input.category.as_ref().unwrap_or(&existing.category);
    let new_kind = input.kind.as_ref().unwrap_or(&existing.kind);
    let new_featured_image = input.featured_image.clone().or(existing.featured_image.clone());
    let new_tier = input.membership_requirement.unwrap_or(existing.membership_requirement);
    let new_status = input.status.unwrap_or(existing.status);
    let new_is_featured = input.is_featured.unwrap_or(existing.is_featured);
    let new_published_date = input.published_date.or(existing.published_date);
    let new_updated_by = input.updated_by.or(existing.updated_by);

    sqlx::query(
        r#"
        UPDATE news
        SET title = ?, description = ?, content = ?, category = ?, kind = ?, featured_image = ?, membership_requirement = ?, status = ?, is_featured = ?, published_date = ?, updated_by = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(new_title)
    .bind(new_description)
    .bind(new_content)
    .bind(new_category)
    .bind(new_kind)
    .bind(&new_featured_image)
    .bind(new_tier.as_str())
    .bind(new_status.as_str())
    .bind(new_is_featured)
    .bind(new_published_date)
    .bind(new_updated_by)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to update news item")?;

    Ok(News {
        id,
        title: new_title.clone(),
        description: new_description.clone(),
        content: new_content.clone(),
        category: new_category.clone(),
        kind: new_kind.clone(),
        featured_image: new_featured_image,
        membership_requirement: new_tier,
        status: new_status,
        is_featured: new_is_featured,
        published_date: new_published_date,
        view_count: existing.view_count,
        created_by: existing.created_by,
        updated_by: new_updated_by,
        created_at: existing.created_at,
        updated_at: now,
    })
}

async fn delete_news_sqlite(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM news WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete news item")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("News item not found");
    }

    Ok(())
}

async fn list_visible_sqlite(
    pool: &SqlitePool,
    tier: MembershipTier,
    category: Option<&str>,
    featured_only: bool,
    offset: i64,
    limit: i64,
) -> Result<Vec<News>> {
    let sql = format!(
        "SELECT {} FROM news WHERE {} ORDER BY published_date DESC, id DESC LIMIT ? OFFSET ?",
        NEWS_COLUMNS,
        visible_where_clause(tier, category, featured_only)
    );

    let mut query = sqlx::query(&sql);
    for allowed in tier.cumulative() {
        query = query.bind(allowed.as_str());
    }
    if let Some(category) = category {
        query = query.bind(category);
    }
    if featured_only {
        query = query.bind(true);
    }
    let rows = query
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to list visible news")?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row_to_news_sqlite(&row)?);
    }

    Ok(items)
}

async fn count_visible_sqlite(
    pool: &SqlitePool,
    tier: MembershipTier,
    category: Option<&str>,
    featured_only: bool,
) -> Result<i64> {
    let sql = format!(
        "SELECT COUNT(*) as count FROM news WHERE {}",
        visible_where_clause(tier, category, featured_only)
    );

    let mut query = sqlx::query(&sql);
    for allowed in tier.cumulative() {
        query = query.bind(allowed.as_str());
    }
    if let Some(category) = category {
        query = query.bind(category);
    }
    if featured_only {
        query = query.bind(true);
    }
    let row = query
        .fetch_one(pool)
        .await
        .context("Failed to count visible news")?;

    Ok(row.get("count"))
}

async fn increment_view_count_sqlite(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("UPDATE news SET view_count = view_count + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to increment view count")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("News item not found");
    }

    Ok(())
}

async fn reset_view_count_sqlite(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("UPDATE news SET view_count = 0 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to reset view count")?;

    Ok(())
}

fn row_to_news_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<News> {
    let status_str: String = row.get("status");
    let status = NewsStatus::from_str(&status_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid news status: {}", status_str))?;

    // An unrecognized requirement never reaches public listings (the
    // IN-list excludes it); surfacing it here as an error keeps back-office
    // reads from silently widening access.
    let tier_str: String = row.get("membership_requirement");
    let membership_requirement = MembershipTier::from_str(&tier_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid membership requirement: {}", tier_str))?;

    Ok(News {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        content: row.get("content"),
        category: row.get("category"),
        kind: row.get("kind"),
        featured_image: row.try_get("featured_image").ok(),
        membership_requirement,
        status,
        is_featured: row.try_get("is_featured").unwrap_or(false),
        published_date: row.try_get("published_date").ok(),
        view_count: row.try_get("view_count").unwrap_or(0),
        created_by: row.try_get("created_by").ok(),
        updated_by: row.try_get("updated_by").ok(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_news_mysql(pool: &MySqlPool, input: &CreateNewsInput) -> Result<News> {
    let now = Utc::now();
    let status = input.status.unwrap_or_default();
    let tier = input.membership_requirement.unwrap_or_default();
    let is_featured = input.is_featured.unwrap_or(false);

    let result = sqlx::query(
        r#"
        INSERT INTO news (title, description, content, category, kind, featured_image, membership_requirement, status, is_featured, published_date, view_count, created_by, updated_by, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.content)
    .bind(&input.category)
    .bind(&input.kind)
    .bind(&input.featured_image)
    .bind(tier.as_str())
    .bind(status.as_str())
    .bind(is_featured)
    .bind(input.published_date)
    .bind(0_i64)
    .bind(input.created_by)
    .bind(input.created_by)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create news item")?;

    let id = result.last_insert_id() as i64;

    Ok(News {
        id,
        title: input.title.clone(),
        description: input.description.clone(),
        content: input.content.clone(),
        category: input.category.clone(),
        kind: input.kind.clone(),
        featured_image: input.featured_image.clone(),
        membership_requirement: tier,
        status,
        is_featured,
        published_date: input.published_date,
        view_count: 0,
        created_by: input.created_by,
        updated_by: input.created_by,
        created_at: now,
        updated_at: now,
    })
}

async fn get_news_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<News>> {
    let row = sqlx::query(&format!("SELECT {} FROM news WHERE id = ?", NEWS_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get news by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_news_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn list_news_mysql(pool: &MySqlPool, offset: i64, limit: i64) -> Result<Vec<News>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM news ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        NEWS_COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list news")?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row_to_news_mysql(&row)?);
    }

    Ok(items)
}

async fn count_news_mysql(pool: &MySqlPool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM news")
        .fetch_one(pool)
        .await
        .context("Failed to count news")?;

    Ok(row.get("count"))
}

async fn update_news_mysql(pool: &MySqlPool, id: i64, input: &UpdateNewsInput) -> Result<News> {
    let existing = get_news_by_id_mysql(pool, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("News item not found"))?;

    let now = Utc::now();
    let new_title = input.title.as_ref().unwrap_or(&existing.title);
    let new_description = input.description.as_ref().unwrap_or(&existing.description);
    let new_content = input.content.as_ref().unwrap_or(&existing.content);
    let new_category = input.category.as_ref().unwrap_or(&existing.category);
    let new_kind = input.kind.as_ref().unwrap_or(&existing.kind);
    let new_featured_image = input.featured_image.clone().or(existing.featured_image.clone());
    let new_tier = input.membership_requirement.unwrap_or(existing.membership_requirement);
    let new_status = input.status.unwrap_or(existing.status);
    let new_is_featured = input.is_featured.unwrap_or(existing.is_featured);
    let new_published_date = input.published_date.or(existing.published_date);
    let new_updated_by = input.updated_by.or(existing.updated_by);

    sqlx::query(
        r#"
        UPDATE news
        SET title = ?, description = ?, content = ?, category = ?, kind = ?, featured_image = ?, membership_requirement = ?, status = ?, is_featured = ?, published_date = ?, updated_by = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(new_title)
    .bind(new_description)
    .bind(new_content)
    .bind(new_category)
    .bind(new_kind)
    .bind(&new_featured_image)
    .bind(new_tier.as_str())
    .bind(new_status.as_str())
    .bind(new_is_featured)
    .bind(new_published_date)
    .bind(new_updated_by)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to update news item")?;

    Ok(News {
        id,
        title: new_title.clone(),
        description: new_description.clone(),
        content: new_content.clone(),
        category: new_category.clone(),
        kind: new_kind.clone(),
        featured_image: new_featured_image,
        membership_requirement: new_tier,
        status: new_status,
        is_featured: new_is_featured,
        published_date: new_published_date,
        view_count: existing.view_count,
        created_by: existing.created_by,
        updated_by: new_updated_by,
        created_at: existing.created_at,
        updated_at: now,
    })
}

async fn delete_news_mysql(pool: &MySqlPool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM news WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete news item")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("News item not found");
    }

    Ok(())
}

async fn list_visible_mysql(
    pool: &MySqlPool,
    tier: MembershipTier,
    category: Option<&str>,
    featured_only: bool,
    offset: i64,
    limit: i64,
) -> Result<Vec<News>> {
    let sql = format!(
        "SELECT {} FROM news WHERE {} ORDER BY published_date DESC, id DESC LIMIT ? OFFSET ?",
        NEWS_COLUMNS,
        visible_where_clause(tier, category, featured_only)
    );

    let mut query = sqlx::query(&sql);
    for allowed in tier.cumulative() {
        query = query.bind(allowed.as_str());
    }
    if let Some(category) = category {
        query = query.bind(category);
    }
    if featured_only {
        query = query.bind(true);
    }
    let rows = query
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to list visible news")?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row_to_news_mysql(&row)?);
    }

    Ok(items)
}

async fn count_visible_mysql(
    pool: &MySqlPool,
    tier: MembershipTier,
    category: Option<&str>,
    featured_only: bool,
) -> Result<i64> {
    let sql = format!(
        "SELECT COUNT(*) as count FROM news WHERE {}",
        visible_where_clause(tier, category, featured_only)
    );

    let mut query = sqlx::query(&sql);
    for allowed in tier.cumulative() {
        query = query.bind(allowed.as_str());
    }
    if let Some(category) = category {
        query = query.bind(category);
    }
    if featured_only {
        query = query.bind(true);
    }
    let row = query
        .fetch_one(pool)
        .await
        .context("Failed to count visible news")?;

    Ok(row.get("count"))
}

async fn increment_view_count_mysql(pool: &MySqlPool, id: i64) -> Result<()> {
    let result = sqlx::query("UPDATE news SET view_count = view_count + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to increment view count")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("News item not found");
    }

    Ok(())
}

async fn reset_view_count_mysql(pool: &MySqlPool, id: i64) -> Result<()> {
    sqlx::query("UPDATE news SET view_count = 0 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to reset view count")?;

    Ok(())
}

fn row_to_news_mysql(row: &sqlx::mysql::MySqlRow) -> Result<News> {
    let status_str: String = row.get("status");
    let status = NewsStatus::from_str(&status_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid news status: {}", status_str))?;

    let tier_str: String = row.get("membership_requirement");
    let membership_requirement = MembershipTier::from_str(&tier_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid membership requirement: {}", tier_str))?;

    Ok(News {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        content: row.get("content"),
        category: row.get("category"),
        kind: row.get("kind"),
        featured_image: row.try_get("featured_image").ok(),
        membership_requirement,
        status,
        is_featured: row.try_get("is_featured").unwrap_or(false),
        published_date: row.try_get("published_date").ok(),
        view_count: row.try_get("view_count").unwrap_or(0),
        created_by: row.try_get("created_by").ok(),
        updated_by: row.try_get("updated_by").ok(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
