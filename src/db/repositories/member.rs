//! Member repository
//!
//! Database operations for membership holders. The feature list is stored
//! as a JSON array in a text column.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Member, MembershipTier};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const MEMBER_COLUMNS: &str = "id, name, email, password_hash, membership_type, membership_expires_at, membership_features, is_active, is_admin, email_verified_at, created_at, updated_at";

/// Member repository trait
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Create a new member
    async fn create(&self, member: &Member) -> Result<Member>;

    /// Get member by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Member>>;

    /// Get member by email
    async fn get_by_email(&self, email: &str) -> Result<Option<Member>>;

    /// Update an existing member
    async fn update(&self, member: &Member) -> Result<()>;

    /// Count members
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based member repository implementation
pub struct SqlxMemberRepository {
    pool: DynDatabasePool,
}

impl SqlxMemberRepository {
    /// Create a new SQLx member repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn MemberRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl MemberRepository for SqlxMemberRepository {
    async fn create(&self, member: &Member) -> Result<Member> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_member_sqlite(self.pool.as_sqlite().unwrap(), member).await,
            DatabaseDriver::Mysql => create_member_mysql(self.pool.as_mysql().unwrap(), member).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Member>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_member_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_member_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Member>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_member_by_email_sqlite(self.pool.as_sqlite().unwrap(), email).await
            }
            DatabaseDriver::Mysql => {
                get_member_by_email_mysql(self.pool.as_mysql().unwrap(), email).await
            }
        }
    }

    async fn update(&self, member: &Member) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => update_member_sqlite(self.pool.as_sqlite().unwrap(), member).await,
            DatabaseDriver::Mysql => update_member_mysql(self.pool.as_mysql().unwrap(), member).await,
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM members")
                    .fetch_one(self.pool.as_sqlite().unwrap())
                    .await
                    .context("Failed to count members")?;
                Ok(row.get("count"))
            }
            DatabaseDriver::Mysql => {
                let row = sqlx::query("SELECT COUNT(*) as count FROM members")
                    .fetch_one(self.pool.as_mysql().unwrap())
                    .await
                    .context("Failed to count members")?;
                Ok(row.get("count"))
            }
        }
    }
}

fn features_to_json(features: &[String]) -> Result<String> {
    serde_json::to_string(features).context("Failed to serialize membership features")
}

fn features_from_json(json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_default()
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_member_sqlite(pool: &SqlitePool, member: &Member) -> Result<Member> {
    let now = Utc::now();
    let features = features_to_json(&member.membership_features)?;
    let result = sqlx::query(
        r#"
        INSERT INTO members (name, email, password_hash, membership_type, membership_expires_at, membership_features, is_active, is_admin, email_verified_at, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&member.name)
    .bind(&member.email)
    .bind(&member.password_hash)
    .bind(member.membership_type.as_str())
    .bind(member.membership_expires_at)
    .bind(&features)
    .bind(member.is_active)
    .bind(member.is_admin)
    .bind(member.email_verified_at)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create member")?;

    Ok(Member {
        id: result.last_insert_rowid(),
        created_at: now,
        updated_at: now,
        ..member.clone()
    })
}

async fn get_member_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Member>> {
    let row = sqlx::query(&format!("SELECT {} FROM members WHERE id = ?", MEMBER_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get member by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_member_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn get_member_by_email_sqlite(pool: &SqlitePool, email: &str) -> Result<Option<Member>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM members WHERE email = ?",
        MEMBER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .context("Failed to get member by email")?;

    match row {
        Some(row) => Ok(Some(row_to_member_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn update_member_sqlite(pool: &SqlitePool, member: &Member) -> Result<()> {
    let now = Utc::now();
    let features = features_to_json(&member.membership_features)?;
    let result = sqlx::query(
        r#"
        UPDATE members
        SET name = ?, email = ?, password_hash = ?, membership_type = ?, membership_expires_at = ?, membership_features = ?, is_active = ?, is_admin = ?, email_verified_at = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&member.name)
    .bind(&member.email)
    .bind(&member.password_hash)
    .bind(member.membership_type.as_str())
    .bind(member.membership_expires_at)
    .bind(&features)
    .bind(member.is_active)
    .bind(member.is_admin)
    .bind(member.email_verified_at)
    .bind(now)
    .bind(member.id)
    .execute(pool)
    .await
    .context("Failed to update member")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("Member not found");
    }

    Ok(())
}

fn row_to_member_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Member> {
    let tier_str: String = row.get("membership_type");
    // A stored tier outside the known set must never widen access
    let membership_type = MembershipTier::parse_or_none(&tier_str);

    let features_json: String = row.get("membership_features");

    Ok(Member {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        membership_type,
        membership_expires_at: row.try_get("membership_expires_at").ok(),
        membership_features: features_from_json(&features_json),
        is_active: row.try_get("is_active").unwrap_or(true),
        is_admin: row.try_get("is_admin").unwrap_or(false),
        email_verified_at: row.try_get("email_verified_at").ok(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_member_mysql(pool: &MySqlPool, member: &Member) -> Result<Member> {
    let now = Utc::now();
    let features = features_to_json(&member.membership_features)?;
    let result = sqlx::query(
        r#"
        INSERT INTO members (name, email, password_hash, membership_type, membership_expires_at, membership_features, is_active, is_admin, email_verified_at, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&member.name)
    .bind(&member.email)
    .bind(&member.password_hash)
    .bind(member.membership_type.as_str())
    .bind(member.membership_expires_at)
    .bind(&features)
    .bind(member.is_active)
    .bind(member.is_admin)
    .bind(member.email_verified_at)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create member")?;

    Ok(Member {
        id: result.last_insert_id() as i64,
        created_at: now,
        updated_at: now,
        ..member.clone()
    })
}

async fn get_member_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Member>> {
    let row = sqlx::query(&format!("SELECT {} FROM members WHERE id = ?", MEMBER_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get member by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_member_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn get_member_by_email_mysql(pool: &MySqlPool, email: &str) -> Result<Option<Member>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM members WHERE email = ?",
        MEMBER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .context("Failed to get member by email")?;

    match row {
        Some(row) => Ok(Some(row_to_member_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn update_member_mysql(pool: &MySqlPool, member: &Member) -> Result<()> {
    let now = Utc::now();
    let features = features_to_json(&member.membership_features)?;
    let result = sqlx::query(
        r#"
        UPDATE members
        SET name = ?, email = ?, password_hash = ?, membership_type = ?, membership_expires_at = ?, membership_features = ?, is_active = ?, is_admin = ?, email_verified_at = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&member.name)
    .bind(&member.email)
    .bind(&member.password_hash)
    .bind(member.membership_type.as_str())
    .bind(member.membership_expires_at)
    .bind(&features)
    .bind(member.is_active)
    .bind(member.is_admin)
    .bind(member.email_verified_at)
    .bind(now)
    .bind(member.id)
    .execute(pool)
    .await
    .context("Failed to update member")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("Member not found");
    }

    Ok(())
}

fn row_to_member_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Member> {
    let tier_str: String = row.get("membership_type");
    let membership_type = MembershipTier::parse_or_none(&tier_str);

    let features_json: String = row.get("membership_features");

    Ok(Member {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        membership_type,
        membership_expires_at: row.try_get("membership_expires_at").ok(),
        membership_features: features_from_json(&features_json),
        is_active: row.try_get("is_active").unwrap_or(true),
        is_admin: row.try_get("is_admin").unwrap_or(false),
        email_verified_at: row.try_get("email_verified_at").ok(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use chrono::Duration;

    async fn setup_test_repo() -> (DynDatabasePool, SqlxMemberRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let repo = SqlxMemberRepository::new(pool.clone());
        (pool, repo)
    }

    #[tokio::test]
    async fn test_create_round_trips_features() {
        let (_pool, repo) = setup_test_repo().await;
        let mut member = Member::new(
            "Hana".to_string(),
            "hana@example.com".to_string(),
            "$argon2id$stub".to_string(),
        );
        member.membership_type = MembershipTier::Premium;
        member.membership_expires_at = Some(Utc::now() + Duration::days(365));
        member.membership_features = vec!["unlimited_access".to_string(), "priority_support".to_string()];

        let created = repo.create(&member).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_email("hana@example.com").await.unwrap().unwrap();
        assert_eq!(fetched.membership_type, MembershipTier::Premium);
        assert_eq!(fetched.membership_features.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_stored_tier_reads_as_none() {
        let (pool, repo) = setup_test_repo().await;
        sqlx::query(
            "INSERT INTO members (name, email, password_hash, membership_type, membership_features) VALUES ('X', 'x@example.com', 'h', 'gold', '[]')",
        )
        .execute(pool.as_sqlite().unwrap())
        .await
        .unwrap();

        let fetched = repo.get_by_email("x@example.com").await.unwrap().unwrap();
        assert_eq!(fetched.membership_type, MembershipTier::None);
    }

    #[tokio::test]
    async fn test_update() {
        let (_pool, repo) = setup_test_repo().await;
        let mut member = repo
            .create(&Member::new(
                "Ken".to_string(),
                "ken@example.com".to_string(),
                "$argon2id$stub".to_string(),
            ))
            .await
            .unwrap();

        member.membership_type = MembershipTier::Standard;
        member.is_admin = true;
        repo.update(&member).await.unwrap();

        let fetched = repo.get_by_id(member.id).await.unwrap().unwrap();
        assert_eq!(fetched.membership_type, MembershipTier::Standard);
        assert!(fetched.is_admin);
    }
}
