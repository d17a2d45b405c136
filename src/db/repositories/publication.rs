//! Publication repository
//!
//! Database operations for publications. Seeding inserts rows only when no
//! publication with the same title exists yet.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{NewPublication, Publication};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const PUBLICATION_COLUMNS: &str = "id, title, category, published_date, url, created_at, updated_at";

/// Publication repository trait
#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// Insert a publication
    async fn insert(&self, publication: &NewPublication) -> Result<Publication>;

    /// Check if a publication with the given title exists
    async fn exists_by_title(&self, title: &str) -> Result<bool>;

    /// List publications, newest publication date first
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Publication>>;

    /// Count publications
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based publication repository implementation
pub struct SqlxPublicationRepository {
    pool: DynDatabasePool,
}

impl SqlxPublicationRepository {
    /// Create a new SQLx publication repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn PublicationRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PublicationRepository for SqlxPublicationRepository {
    async fn insert(&self, publication: &NewPublication) -> Result<Publication> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                insert_publication_sqlite(self.pool.as_sqlite().unwrap(), publication).await
            }
            DatabaseDriver::Mysql => {
                insert_publication_mysql(self.pool.as_mysql().unwrap(), publication).await
            }
        }
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM publications WHERE title = ?")
                    .bind(title)
                    .fetch_one(self.pool.as_sqlite().unwrap())
                    .await
                    .context("Failed to check publication title")?;
                let count: i64 = row.get("count");
                Ok(count > 0)
            }
            DatabaseDriver::Mysql => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM publications WHERE title = ?")
                    .bind(title)
                    .fetch_one(self.pool.as_mysql().unwrap())
                    .await
                    .context("Failed to check publication title")?;
                let count: i64 = row.get("count");
                Ok(count > 0)
            }
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Publication>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_publications_sqlite(self.pool.as_sqlite().unwrap(), offset, limit).await
            }
            DatabaseDriver::Mysql => {
                list_publications_mysql(self.pool.as_mysql().unwrap(), offset, limit).await
            }
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM publications")
                    .fetch_one(self.pool.as_sqlite().unwrap())
                    .await
                    .context("Failed to count publications")?;
                Ok(row.get("count"))
            }
            DatabaseDriver::Mysql => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM publications")
                    .fetch_one(self.pool.as_mysql().unwrap())
                    .await
                    .context("Failed to count publications")?;
                Ok(row.get("count"))
            }
        }
    }
}

async fn insert_publication_sqlite(
    pool: &SqlitePool,
    publication: &NewPublication,
) -> Result<Publication> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO publications (title, category, published_date, url, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&publication.title)
    .bind(&publication.category)
    .bind(publication.published_date)
    .bind(&publication.url)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert publication")?;

    Ok(Publication {
        id: result.last_insert_rowid(),
        title: publication.title.clone(),
        category: publication.category.clone(),
        published_date: publication.published_date,
        url: publication.url.clone(),
        created_at: now,
        updated_at: now,
    })
}

async fn list_publications_sqlite(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<Publication>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM publications ORDER BY published_date DESC, id DESC LIMIT ? OFFSET ?",
        PUBLICATION_COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list publications")?;

    Ok(rows.iter().map(row_to_publication_sqlite).collect())
}

fn row_to_publication_sqlite(row: &sqlx::sqlite::SqliteRow) -> Publication {
    Publication {
        id: row.get("id"),
        title: row.get("title"),
        category: row.get("category"),
        published_date: row.try_get("published_date").ok(),
        url: row.try_get("url").ok(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

async fn insert_publication_mysql(
    pool: &MySqlPool,
    publication: &NewPublication,
) -> Result<Publication> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO publications (title, category, published_date, url, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&publication.title)
    .bind(&publication.category)
    .bind(publication.published_date)
    .bind(&publication.url)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert publication")?;

    Ok(Publication {
        id: result.last_insert_id() as i64,
        title: publication.title.clone(),
        category: publication.category.clone(),
        published_date: publication.published_date,
        url: publication.url.clone(),
        created_at: now,
        updated_at: now,
    })
}

async fn list_publications_mysql(
    pool: &MySqlPool,
    offset: i64,
    limit: i64,
) -> Result<Vec<Publication>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM publications ORDER BY published_date DESC, id DESC LIMIT ? OFFSET ?",
        PUBLICATION_COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list publications")?;

    Ok(rows.iter().map(row_to_publication_mysql).collect())
}

fn row_to_publication_mysql(row: &sqlx::mysql::MySqlRow) -> Publication {
    Publication {
        id: row.get("id"),
        title: row.get("title"),
        category: row.get("category"),
        published_date: row.try_get("published_date").ok(),
        url: row.try_get("url").ok(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use chrono::NaiveDate;

    async fn setup_test_repo() -> SqlxPublicationRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxPublicationRepository::new(pool)
    }

    #[tokio::test]
    async fn test_insert_and_exists() {
        let repo = setup_test_repo().await;
        assert!(!repo.exists_by_title("Annual report").await.unwrap());

        repo.insert(&NewPublication {
            title: "Annual report".to_string(),
            category: "report".to_string(),
            published_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            url: None,
        })
        .await
        .unwrap();

        assert!(repo.exists_by_title("Annual report").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let repo = setup_test_repo().await;
        for (title, year) in [("Old", 2022), ("New", 2024)] {
            repo.insert(&NewPublication {
                title: title.to_string(),
                category: String::new(),
                published_date: NaiveDate::from_ymd_opt(year, 6, 1),
                url: None,
            })
            .await
            .unwrap();
        }

        let listed = repo.list(0, 10).await.unwrap();
        assert_eq!(listed[0].title, "New");
        assert_eq!(listed[1].title, "Old");
    }
}
