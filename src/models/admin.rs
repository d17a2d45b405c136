//! Admin model
//!
//! Back-office accounts that create and maintain content. Authentication of
//! admins is handled by an external collaborator; this crate only stores and
//! references them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Admin entity representing a back-office account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name
    pub full_name: String,
    /// Admin role
    pub role: AdminRole,
    /// Whether the account is active
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Create a new Admin with the given parameters.
    ///
    /// Note: The password should already be hashed before calling this
    /// function. Use `services::password::hash_password()`.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        full_name: String,
        role: AdminRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            username,
            email,
            password_hash,
            full_name,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account holds the super-admin role
    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }
}

/// Admin role for back-office authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access, including account management
    SuperAdmin,
    /// Content management access
    Editor,
}

impl Default for AdminRole {
    fn default() -> Self {
        Self::Editor
    }
}

impl AdminRole {
    /// Convert role to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Editor => "editor",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_admin" => Ok(AdminRole::SuperAdmin),
            "editor" => Ok(AdminRole::Editor),
            _ => Err(anyhow::anyhow!("Invalid admin role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("super_admin".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
        assert_eq!("editor".parse::<AdminRole>().unwrap(), AdminRole::Editor);
        assert!("owner".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_new_admin_is_active() {
        let admin = Admin::new(
            "admin".to_string(),
            "admin@example.com".to_string(),
            "$argon2id$stub".to_string(),
            "Administrator".to_string(),
            AdminRole::SuperAdmin,
        );
        assert!(admin.is_active);
        assert!(admin.is_super_admin());
    }
}
