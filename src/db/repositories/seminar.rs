//! Seminar repository

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{NewSeminar, Seminar, SeminarStatus};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const SEMINAR_COLUMNS: &str =
    "id, title, description, event_date, location, status, created_by, created_at, updated_at";

/// Seminar repository trait
#[async_trait]
pub trait SeminarRepository: Send + Sync {
    /// Insert a seminar, attributed to the given admin
    async fn insert(&self, seminar: &NewSeminar, created_by: Option<i64>) -> Result<Seminar>;

    /// List seminars, soonest event first
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Seminar>>;

    /// Count seminars
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based seminar repository implementation
pub struct SqlxSeminarRepository {
    pool: DynDatabasePool,
}

impl SqlxSeminarRepository {
    /// Create a new SQLx seminar repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn SeminarRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl SeminarRepository for SqlxSeminarRepository {
    async fn insert(&self, seminar: &NewSeminar, created_by: Option<i64>) -> Result<Seminar> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                insert_seminar_sqlite(self.pool.as_sqlite().unwrap(), seminar, created_by).await
            }
            DatabaseDriver::Mysql => {
                insert_seminar_mysql(self.pool.as_mysql().unwrap(), seminar, created_by).await
            }
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Seminar>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_seminars_sqlite(self.pool.as_sqlite().unwrap(), offset, limit).await
            }
            DatabaseDriver::Mysql => {
                list_seminars_mysql(self.pool.as_mysql().unwrap(), offset, limit).await
            }
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM seminars")
                    .fetch_one(self.pool.as_sqlite().unwrap())
                    .await
                    .context("Failed to count seminars")?;
                Ok(row.get("count"))
            }
            DatabaseDriver::Mysql => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM seminars")
                    .fetch_one(self.pool.as_mysql().unwrap())
                    .await
                    .context("Failed to count seminars")?;
                Ok(row.get("count"))
            }
        }
    }
}

async fn insert_seminar_sqlite(
    pool: &SqlitePool,
    seminar: &NewSeminar,
    created_by: Option<i64>,
) -> Result<Seminar> {
    let now = Utc::now();
    let status = SeminarStatus::default();
    let result = sqlx::query(
        r#"
        INSERT INTO seminars (title, description, event_date, location, status, created_by, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&seminar.title)
    .bind(&seminar.description)
    .bind(seminar.event_date)
    .bind(&seminar.location)
    .bind(status.as_str())
    .bind(created_by)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert seminar")?;

    Ok(Seminar {
        id: result.last_insert_rowid(),
        title: seminar.title.clone(),
        description: seminar.description.clone(),
        event_date: seminar.event_date,
        location: seminar.location.clone(),
        status,
        created_by,
        created_at: now,
        updated_at: now,
    })
}

async fn list_seminars_sqlite(pool: &SqlitePool, offset: i64, limit: i64) -> Result<Vec<Seminar>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM seminars ORDER BY event_date ASC, id ASC LIMIT ? OFFSET ?",
        SEMINAR_COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list seminars")?;

    let mut seminars = Vec::new();
    for row in rows {
        seminars.push(row_to_seminar_sqlite(&row)?);
    }

    Ok(seminars)
}

fn row_to_seminar_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Seminar> {
    let status_str: String = row.get("status");
    let status = SeminarStatus::from_str(&status_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid seminar status: {}", status_str))?;

    Ok(Seminar {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        event_date: row.try_get("event_date").ok(),
        location: row.get("location"),
        status,
        created_by: row.try_get("created_by").ok(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

async fn insert_seminar_mysql(
    pool: &MySqlPool,
    seminar: &NewSeminar,
    created_by: Option<i64>,
) -> Result<Seminar> {
    let now = Utc::now();
    let status = SeminarStatus::default();
    let result = sqlx::query(
        r#"
        INSERT INTO seminars (title, description, event_date, location, status, created_by, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&seminar.title)
    .bind(&seminar.description)
    .bind(seminar.event_date)
    .bind(&seminar.location)
    .bind(status.as_str())
    .bind(created_by)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert seminar")?;

    Ok(Seminar {
        id: result.last_insert_id() as i64,
        title: seminar.title.clone(),
        description: seminar.description.clone(),
        event_date: seminar.event_date,
        location: seminar.location.clone(),
        status,
        created_by,
        created_at: now,
        updated_at: now,
    })
}

async fn list_seminars_mysql(pool: &MySqlPool, offset: i64, limit: i64) -> Result<Vec<Seminar>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM seminars ORDER BY event_date ASC, id ASC LIMIT ? OFFSET ?",
        SEMINAR_COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list seminars")?;

    let mut seminars = Vec::new();
    for row in rows {
        seminars.push(row_to_seminar_mysql(&row)?);
    }

    Ok(seminars)
}

fn row_to_seminar_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Seminar> {
    let status_str: String = row.get("status");
    let status = SeminarStatus::from_str(&status_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid seminar status: {}", status_str))?;

    Ok(Seminar {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        event_date: row.try_get("event_date").ok(),
        location: row.get("location"),
        status,
        created_by: row.try_get("created_by").ok(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use crate::db::repositories::{AdminRepository, SqlxAdminRepository};
    use crate::models::{Admin, AdminRole};
    use chrono::NaiveDate;

    async fn setup() -> (SqlxSeminarRepository, SqlxAdminRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        (
            SqlxSeminarRepository::new(pool.clone()),
            SqlxAdminRepository::new(pool),
        )
    }

    #[tokio::test]
    async fn test_insert_attributes_creator() {
        let (seminars, admins) = setup().await;
        let admin = admins
            .create(&Admin::new(
                "admin".to_string(),
                "admin@example.com".to_string(),
                "$argon2id$stub".to_string(),
                "Admin".to_string(),
                AdminRole::SuperAdmin,
            ))
            .await
            .unwrap();

        let seminar = seminars
            .insert(
                &NewSeminar {
                    title: "Intro session".to_string(),
                    description: String::new(),
                    event_date: NaiveDate::from_ymd_opt(2026, 9, 1),
                    location: "Online".to_string(),
                },
                Some(admin.id),
            )
            .await
            .unwrap();

        assert_eq!(seminar.created_by, Some(admin.id));
        assert_eq!(seminar.status, SeminarStatus::Scheduled);
        assert_eq!(seminars.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_orders_by_event_date() {
        let (seminars, _admins) = setup().await;
        for (title, month) in [("Later", 10), ("Sooner", 3)] {
            seminars
                .insert(
                    &NewSeminar {
                        title: title.to_string(),
                        description: String::new(),
                        event_date: NaiveDate::from_ymd_opt(2026, month, 1),
                        location: String::new(),
                    },
                    None,
                )
                .await
                .unwrap();
        }

        let listed = seminars.list(0, 10).await.unwrap();
        assert_eq!(listed[0].title, "Sooner");
    }
}
