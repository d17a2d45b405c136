//! Service item repository

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{NewServiceItem, ServiceItem};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const SERVICE_COLUMNS: &str =
    "id, title, description, sort_order, is_active, created_at, updated_at";

/// Service item repository trait
#[async_trait]
pub trait ServiceItemRepository: Send + Sync {
    /// Insert a service item
    async fn insert(&self, item: &NewServiceItem) -> Result<ServiceItem>;

    /// List active services in display order
    async fn list_active(&self) -> Result<Vec<ServiceItem>>;

    /// Count service items
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based service item repository implementation
pub struct SqlxServiceItemRepository {
    pool: DynDatabasePool,
}

impl SqlxServiceItemRepository {
    /// Create a new SQLx service item repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ServiceItemRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ServiceItemRepository for SqlxServiceItemRepository {
    async fn insert(&self, item: &NewServiceItem) -> Result<ServiceItem> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => insert_service_sqlite(self.pool.as_sqlite().unwrap(), item).await,
            DatabaseDriver::Mysql => insert_service_mysql(self.pool.as_mysql().unwrap(), item).await,
        }
    }

    async fn list_active(&self) -> Result<Vec<ServiceItem>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_active_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_active_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM services")
                    .fetch_one(self.pool.as_sqlite().unwrap())
                    .await
                    .context("Failed to count services")?;
                Ok(row.get("count"))
            }
            DatabaseDriver::Mysql => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM services")
                    .fetch_one(self.pool.as_mysql().unwrap())
                    .await
                    .context("Failed to count services")?;
                Ok(row.get("count"))
            }
        }
    }
}

async fn insert_service_sqlite(pool: &SqlitePool, item: &NewServiceItem) -> Result<ServiceItem> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO services (title, description, sort_order, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&item.title)
    .bind(&item.description)
    .bind(item.sort_order)
    .bind(true)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert service")?;

    Ok(ServiceItem {
        id: result.last_insert_rowid(),
        title: item.title.clone(),
        description: item.description.clone(),
        sort_order: item.sort_order,
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

async fn list_active_sqlite(pool: &SqlitePool) -> Result<Vec<ServiceItem>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM services WHERE is_active = 1 ORDER BY sort_order ASC, id ASC",
        SERVICE_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list services")?;

    Ok(rows.iter().map(row_to_service_sqlite).collect())
}

fn row_to_service_sqlite(row: &sqlx::sqlite::SqliteRow) -> ServiceItem {
    ServiceItem {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        sort_order: row.try_get("sort_order").unwrap_or(0),
        is_active: row.try_get("is_active").unwrap_or(true),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

async fn insert_service_mysql(pool: &MySqlPool, item: &NewServiceItem) -> Result<ServiceItem> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO services (title, description, sort_order, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&item.title)
    .bind(&item.description)
    .bind(item.sort_order)
    .bind(true)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert service")?;

    Ok(ServiceItem {
        id: result.last_insert_id() as i64,
        title: item.title.clone(),
        description: item.description.clone(),
        sort_order: item.sort_order,
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

async fn list_active_mysql(pool: &MySqlPool) -> Result<Vec<ServiceItem>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM services WHERE is_active = TRUE ORDER BY sort_order ASC, id ASC",
        SERVICE_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list services")?;

    Ok(rows.iter().map(row_to_service_mysql).collect())
}

fn row_to_service_mysql(row: &sqlx::mysql::MySqlRow) -> ServiceItem {
    ServiceItem {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        sort_order: row.try_get("sort_order").unwrap_or(0),
        is_active: row.try_get("is_active").unwrap_or(true),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxServiceItemRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxServiceItemRepository::new(pool)
    }

    #[tokio::test]
    async fn test_insert_and_list_in_display_order() {
        let repo = setup_test_repo().await;
        for (title, order) in [("Second", 2), ("First", 1)] {
            repo.insert(&NewServiceItem {
                title: title.to_string(),
                description: String::new(),
                sort_order: order,
            })
            .await
            .unwrap();
        }

        let listed = repo.list_active().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "First");
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
