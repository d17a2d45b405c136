//! Administrator bootstrap service
//!
//! Creates (or refreshes) the administrator account pair in an empty
//! deployment: a premium member row for site access and an admins row for
//! back-office attribution. The operation is an upsert keyed on email, so
//! running it repeatedly is safe.

use crate::db::repositories::{AdminRepository, MemberRepository};
use crate::models::{Admin, AdminRole, Member, MembershipTier};
use crate::services::password::hash_password;
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Feature labels granted to the bootstrap administrator's membership
const ADMIN_MEMBER_FEATURES: [&str; 3] =
    ["unlimited_access", "priority_support", "advanced_features"];

/// How long the bootstrap membership runs before lapsing
const ADMIN_MEMBERSHIP_DAYS: i64 = 365;

/// Error types for administrator bootstrap
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Input for the administrator bootstrap
#[derive(Debug, Clone)]
pub struct BootstrapInput {
    /// Email address shared by the member and admin rows (upsert key)
    pub email: String,
    /// Plaintext password; hashed before storage
    pub password: String,
    /// Display name
    pub name: String,
    /// Back-office username
    pub username: String,
}

/// What the bootstrap did
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// The member row's email
    pub email: String,
    /// The admin row's username
    pub username: String,
    /// Whether the member row was newly created (false: refreshed)
    pub member_created: bool,
    /// Whether the admin row was newly created (false: refreshed)
    pub admin_created: bool,
}

/// Administrator bootstrap service
pub struct AdminService {
    members: Arc<dyn MemberRepository>,
    admins: Arc<dyn AdminRepository>,
}

impl AdminService {
    /// Create a new admin service
    pub fn new(members: Arc<dyn MemberRepository>, admins: Arc<dyn AdminRepository>) -> Self {
        Self { members, admins }
    }

    /// Create or refresh the administrator account pair.
    ///
    /// The member row gets a premium membership running one year out with
    /// the full feature set; the admin row gets the super-admin role. Both
    /// are matched by email, so an existing pair is updated in place.
    pub async fn bootstrap(&self, input: BootstrapInput) -> Result<BootstrapReport, AdminServiceError> {
        self.validate(&input)?;

        let password_hash = hash_password(&input.password)?;
        let now = Utc::now();

        let member_created = match self.members.get_by_email(&input.email).await? {
            Some(mut member) => {
                member.name = input.name.clone();
                member.password_hash = password_hash.clone();
                member.membership_type = MembershipTier::Premium;
                member.membership_expires_at = Some(now + Duration::days(ADMIN_MEMBERSHIP_DAYS));
                member.membership_features =
                    ADMIN_MEMBER_FEATURES.iter().map(|s| s.to_string()).collect();
                member.is_active = true;
                member.is_admin = true;
                member.email_verified_at = Some(now);
                self.members.update(&member).await?;
                tracing::info!(email = %input.email, "Refreshed administrator member");
                false
            }
            None => {
                let mut member = Member::new(
                    input.name.clone(),
                    input.email.clone(),
                    password_hash.clone(),
                );
                member.membership_type = MembershipTier::Premium;
                member.membership_expires_at = Some(now + Duration::days(ADMIN_MEMBERSHIP_DAYS));
                member.membership_features =
                    ADMIN_MEMBER_FEATURES.iter().map(|s| s.to_string()).collect();
                member.is_admin = true;
                member.email_verified_at = Some(now);
                self.members.create(&member).await?;
                tracing::info!(email = %input.email, "Created administrator member");
                true
            }
        };

        let admin_created = match self.admins.get_by_email(&input.email).await? {
            Some(mut admin) => {
                admin.username = input.username.clone();
                admin.password_hash = password_hash;
                admin.full_name = input.name.clone();
                admin.role = AdminRole::SuperAdmin;
                admin.is_active = true;
                self.admins.update(&admin).await?;
                tracing::info!(username = %input.username, "Refreshed administrator account");
                false
            }
            None => {
                let admin = Admin::new(
                    input.username.clone(),
                    input.email.clone(),
                    password_hash,
                    input.name.clone(),
                    AdminRole::SuperAdmin,
                );
                self.admins.create(&admin).await?;
                tracing::info!(username = %input.username, "Created administrator account");
                true
            }
        };

        Ok(BootstrapReport {
            email: input.email,
            username: input.username,
            member_created,
            admin_created,
        })
    }

    fn validate(&self, input: &BootstrapInput) -> Result<(), AdminServiceError> {
        if input.email.trim().is_empty() || !input.email.contains('@') {
            return Err(AdminServiceError::ValidationError(
                "A valid email address is required".to_string(),
            ));
        }
        if input.password.chars().count() < 8 {
            return Err(AdminServiceError::ValidationError(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        if input.username.trim().is_empty() {
            return Err(AdminServiceError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxAdminRepository, SqlxMemberRepository};
    use crate::db::{create_test_pool, migrations, DynDatabasePool};
    use crate::services::password::verify_password;

    async fn setup() -> (DynDatabasePool, AdminService) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let service = AdminService::new(
            SqlxMemberRepository::boxed(pool.clone()),
            SqlxAdminRepository::boxed(pool.clone()),
        );
        (pool, service)
    }

    fn input() -> BootstrapInput {
        BootstrapInput {
            email: "admin@yourdomain.com".to_string(),
            password: "correct horse".to_string(),
            name: "System Administrator".to_string(),
            username: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn test_bootstrap_creates_member_and_admin() {
        let (pool, service) = setup().await;
        let report = service.bootstrap(input()).await.unwrap();

        assert!(report.member_created);
        assert!(report.admin_created);

        let members = SqlxMemberRepository::new(pool.clone());
        let member = members
            .get_by_email("admin@yourdomain.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(member.membership_type, MembershipTier::Premium);
        assert!(member.is_admin);
        assert!(member.membership_expires_at.unwrap() > Utc::now());
        assert_eq!(member.membership_features.len(), 3);
        assert!(verify_password("correct horse", &member.password_hash).unwrap());

        let admins = SqlxAdminRepository::new(pool);
        let admin = admins.get_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, AdminRole::SuperAdmin);
        assert!(admin.is_active);
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let (pool, service) = setup().await;
        service.bootstrap(input()).await.unwrap();

        let mut second = input();
        second.name = "Renamed Administrator".to_string();
        let report = service.bootstrap(second).await.unwrap();

        assert!(!report.member_created);
        assert!(!report.admin_created);

        let members = SqlxMemberRepository::new(pool.clone());
        let member = members
            .get_by_email("admin@yourdomain.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(member.name, "Renamed Administrator");
        assert_eq!(members.count().await.unwrap(), 1);

        let admins = SqlxAdminRepository::new(pool);
        assert_eq!(admins.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_short_password() {
        let (_pool, service) = setup().await;
        let mut bad = input();
        bad.password = "short".to_string();
        let err = service.bootstrap(bad).await.unwrap_err();
        assert!(matches!(err, AdminServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_invalid_email() {
        let (_pool, service) = setup().await;
        let mut bad = input();
        bad.email = "not-an-email".to_string();
        let err = service.bootstrap(bad).await.unwrap_err();
        assert!(matches!(err, AdminServiceError::ValidationError(_)));
    }
}
