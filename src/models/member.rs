//! Member model
//!
//! Site users holding a membership. The membership tier recorded here is
//! what an external session collaborator passes to the visibility filter;
//! this crate never resolves it from ambient state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::membership::MembershipTier;

/// Member entity representing a registered site user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Membership tier held by this member
    pub membership_type: MembershipTier,
    /// When the membership lapses; `None` means no active membership term
    pub membership_expires_at: Option<DateTime<Utc>>,
    /// Feature labels granted by the membership (JSON array in storage)
    #[serde(default)]
    pub membership_features: Vec<String>,
    /// Whether the account is active
    pub is_active: bool,
    /// Whether the member also holds back-office access
    pub is_admin: bool,
    /// When the email address was verified
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new Member with the given parameters.
    ///
    /// The password should already be hashed.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            name,
            email,
            password_hash,
            membership_type: MembershipTier::None,
            membership_expires_at: None,
            membership_features: Vec::new(),
            is_active: true,
            is_admin: false,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the membership term is still current at `now`.
    pub fn membership_current(&self, now: DateTime<Utc>) -> bool {
        match self.membership_expires_at {
            Some(expires) => expires > now,
            None => false,
        }
    }

    /// The tier this member is entitled to request content with.
    ///
    /// A lapsed or inactive account falls back to the floor tier.
    pub fn effective_tier(&self, now: DateTime<Utc>) -> MembershipTier {
        if self.is_active && self.membership_current(now) {
            self.membership_type
        } else {
            MembershipTier::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn member_with_tier(tier: MembershipTier, expires_in_days: i64) -> Member {
        let mut m = Member::new(
            "Taro".to_string(),
            "taro@example.com".to_string(),
            "$argon2id$stub".to_string(),
        );
        m.membership_type = tier;
        m.membership_expires_at = Some(Utc::now() + Duration::days(expires_in_days));
        m
    }

    #[test]
    fn test_effective_tier_current_membership() {
        let m = member_with_tier(MembershipTier::Standard, 30);
        assert_eq!(m.effective_tier(Utc::now()), MembershipTier::Standard);
    }

    #[test]
    fn test_effective_tier_lapsed_falls_to_none() {
        let m = member_with_tier(MembershipTier::Premium, -1);
        assert_eq!(m.effective_tier(Utc::now()), MembershipTier::None);
    }

    #[test]
    fn test_effective_tier_inactive_falls_to_none() {
        let mut m = member_with_tier(MembershipTier::Premium, 30);
        m.is_active = false;
        assert_eq!(m.effective_tier(Utc::now()), MembershipTier::None);
    }

    #[test]
    fn test_no_expiry_means_no_membership() {
        let mut m = member_with_tier(MembershipTier::Basic, 30);
        m.membership_expires_at = None;
        assert_eq!(m.effective_tier(Utc::now()), MembershipTier::None);
    }
}
