//! Admin repository
//!
//! Database operations for back-office accounts.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Admin, AdminRole};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

const ADMIN_COLUMNS: &str =
    "id, username, email, password_hash, full_name, role, is_active, created_at, updated_at";

/// Admin repository trait
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Create a new admin account
    async fn create(&self, admin: &Admin) -> Result<Admin>;

    /// Get admin by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Admin>>;

    /// Get admin by email
    async fn get_by_email(&self, email: &str) -> Result<Option<Admin>>;

    /// Get admin by username
    async fn get_by_username(&self, username: &str) -> Result<Option<Admin>>;

    /// Get the earliest-created admin, if any.
    ///
    /// Seed data is attributed to this account.
    async fn first(&self) -> Result<Option<Admin>>;

    /// Update an existing admin account
    async fn update(&self, admin: &Admin) -> Result<()>;

    /// Count admin accounts
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based admin repository implementation
pub struct SqlxAdminRepository {
    pool: DynDatabasePool,
}

impl SqlxAdminRepository {
    /// Create a new SQLx admin repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn AdminRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl AdminRepository for SqlxAdminRepository {
    async fn create(&self, admin: &Admin) -> Result<Admin> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_admin_sqlite(self.pool.as_sqlite().unwrap(), admin).await,
            DatabaseDriver::Mysql => create_admin_mysql(self.pool.as_mysql().unwrap(), admin).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Admin>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_admin_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_admin_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Admin>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_admin_by_email_sqlite(self.pool.as_sqlite().unwrap(), email).await,
            DatabaseDriver::Mysql => get_admin_by_email_mysql(self.pool.as_mysql().unwrap(), email).await,
        }
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Admin>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_admin_by_username_sqlite(self.pool.as_sqlite().unwrap(), username).await
            }
            DatabaseDriver::Mysql => {
                get_admin_by_username_mysql(self.pool.as_mysql().unwrap(), username).await
            }
        }
    }

    async fn first(&self) -> Result<Option<Admin>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => first_admin_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => first_admin_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn update(&self, admin: &Admin) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => update_admin_sqlite(self.pool.as_sqlite().unwrap(), admin).await,
            DatabaseDriver::Mysql => update_admin_mysql(self.pool.as_mysql().unwrap(), admin).await,
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => count_admins_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => count_admins_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_admin_sqlite(pool: &SqlitePool, admin: &Admin) -> Result<Admin> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO admins (username, email, password_hash, full_name, role, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&admin.username)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(&admin.full_name)
    .bind(admin.role.as_str())
    .bind(admin.is_active)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create admin")?;

    Ok(Admin {
        id: result.last_insert_rowid(),
        created_at: now,
        updated_at: now,
        ..admin.clone()
    })
}

async fn get_admin_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Admin>> {
    let row = sqlx::query(&format!("SELECT {} FROM admins WHERE id = ?", ADMIN_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get admin by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_admin_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn get_admin_by_email_sqlite(pool: &SqlitePool, email: &str) -> Result<Option<Admin>> {
    let row = sqlx::query(&format!("SELECT {} FROM admins WHERE email = ?", ADMIN_COLUMNS))
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("Failed to get admin by email")?;

    match row {
        Some(row) => Ok(Some(row_to_admin_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn get_admin_by_username_sqlite(pool: &SqlitePool, username: &str) -> Result<Option<Admin>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM admins WHERE username = ?",
        ADMIN_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to get admin by username")?;

    match row {
        Some(row) => Ok(Some(row_to_admin_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn first_admin_sqlite(pool: &SqlitePool) -> Result<Option<Admin>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM admins ORDER BY id ASC LIMIT 1",
        ADMIN_COLUMNS
    ))
    .fetch_optional(pool)
    .await
    .context("Failed to get first admin")?;

    match row {
        Some(row) => Ok(Some(row_to_admin_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn update_admin_sqlite(pool: &SqlitePool, admin: &Admin) -> Result<()> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        UPDATE admins
        SET username = ?, email = ?, password_hash = ?, full_name = ?, role = ?, is_active = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&admin.username)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(&admin.full_name)
    .bind(admin.role.as_str())
    .bind(admin.is_active)
    .bind(now)
    .bind(admin.id)
    .execute(pool)
    .await
    .context("Failed to update admin")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("Admin not found");
    }

    Ok(())
}

async fn count_admins_sqlite(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM admins")
        .fetch_one(pool)
        .await
        .context("Failed to count admins")?;

    Ok(row.get("count"))
}

fn row_to_admin_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Admin> {
    let role_str: String = row.get("role");
    let role = AdminRole::from_str(&role_str)?;

    Ok(Admin {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        full_name: row.get("full_name"),
        role,
        is_active: row.try_get("is_active").unwrap_or(true),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_admin_mysql(pool: &MySqlPool, admin: &Admin) -> Result<Admin> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO admins (username, email, password_hash, full_name, role, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&admin.username)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(&admin.full_name)
    .bind(admin.role.as_str())
    .bind(admin.is_active)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create admin")?;

    Ok(Admin {
        id: result.last_insert_id() as i64,
        created_at: now,
        updated_at: now,
        ..admin.clone()
    })
}

async fn get_admin_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Admin>> {
    let row = sqlx::query(&format!("SELECT {} FROM admins WHERE id = ?", ADMIN_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get admin by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_admin_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn get_admin_by_email_mysql(pool: &MySqlPool, email: &str) -> Result<Option<Admin>> {
    let row = sqlx::query(&format!("SELECT {} FROM admins WHERE email = ?", ADMIN_COLUMNS))
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("Failed to get admin by email")?;

    match row {
        Some(row) => Ok(Some(row_to_admin_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn get_admin_by_username_mysql(pool: &MySqlPool, username: &str) -> Result<Option<Admin>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM admins WHERE username = ?",
        ADMIN_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to get admin by username")?;

    match row {
        Some(row) => Ok(Some(row_to_admin_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn first_admin_mysql(pool: &MySqlPool) -> Result<Option<Admin>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM admins ORDER BY id ASC LIMIT 1",
        ADMIN_COLUMNS
    ))
    .fetch_optional(pool)
    .await
    .context("Failed to get first admin")?;

    match row {
        Some(row) => Ok(Some(row_to_admin_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn update_admin_mysql(pool: &MySqlPool, admin: &Admin) -> Result<()> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        UPDATE admins
        SET username = ?, email = ?, password_hash = ?, full_name = ?, role = ?, is_active = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&admin.username)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(&admin.full_name)
    .bind(admin.role.as_str())
    .bind(admin.is_active)
    .bind(now)
    .bind(admin.id)
    .execute(pool)
    .await
    .context("Failed to update admin")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("Admin not found");
    }

    Ok(())
}

async fn count_admins_mysql(pool: &MySqlPool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM admins")
        .fetch_one(pool)
        .await
        .context("Failed to count admins")?;

    Ok(row.get("count"))
}

fn row_to_admin_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Admin> {
    let role_str: String = row.get("role");
    let role = AdminRole::from_str(&role_str)?;

    Ok(Admin {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        full_name: row.get("full_name"),
        role,
        is_active: row.try_get("is_active").unwrap_or(true),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
