//! Membership tiers
//!
//! This module defines the ordered membership tier set that gates access to
//! news content. Tiers carry a numeric rank and compare numerically, so an
//! invalid tier is unrepresentable once parsed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership tier, ordered by increasing access privilege.
///
/// Access is cumulative: a requester at a given tier can see everything
/// required at or below that tier. `None` is the floor and sees only
/// content that requires no membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    /// No membership required (floor)
    #[default]
    None,
    /// Basic membership
    Basic,
    /// Standard membership
    Standard,
    /// Premium membership (ceiling)
    Premium,
}

/// All tiers, lowest privilege first.
pub static ALL_TIERS: [MembershipTier; 4] = [
    MembershipTier::None,
    MembershipTier::Basic,
    MembershipTier::Standard,
    MembershipTier::Premium,
];

impl MembershipTier {
    /// Numeric rank of the tier; higher rank grants more access.
    pub fn rank(&self) -> u8 {
        match self {
            MembershipTier::None => 0,
            MembershipTier::Basic => 1,
            MembershipTier::Standard => 2,
            MembershipTier::Premium => 3,
        }
    }

    /// Convert tier to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::None => "none",
            MembershipTier::Basic => "basic",
            MembershipTier::Standard => "standard",
            MembershipTier::Premium => "premium",
        }
    }

    /// Parse tier from database string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(MembershipTier::None),
            "basic" => Some(MembershipTier::Basic),
            "standard" => Some(MembershipTier::Standard),
            "premium" => Some(MembershipTier::Premium),
            _ => None,
        }
    }

    /// Parse a requested tier, coercing anything unknown to `None`.
    ///
    /// A malformed or future tier value must never grant more access than
    /// no membership at all.
    pub fn parse_or_none(s: &str) -> Self {
        Self::from_str(s).unwrap_or(MembershipTier::None)
    }

    /// Whether a requester at this tier can see content requiring `required`.
    pub fn allows(&self, required: MembershipTier) -> bool {
        required.rank() <= self.rank()
    }

    /// The tiers at or below this one, lowest first.
    ///
    /// This is the allow-list pushed into storage queries: a stored
    /// requirement outside this list (including an invalid value) matches
    /// nothing.
    pub fn cumulative(&self) -> &'static [MembershipTier] {
        let end = self.rank() as usize + 1;
        &ALL_TIERS[..end]
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering_matches_rank() {
        assert!(MembershipTier::None < MembershipTier::Basic);
        assert!(MembershipTier::Basic < MembershipTier::Standard);
        assert!(MembershipTier::Standard < MembershipTier::Premium);
        for (i, tier) in ALL_TIERS.iter().enumerate() {
            assert_eq!(tier.rank() as usize, i);
        }
    }

    #[test]
    fn test_allows_is_cumulative() {
        assert!(MembershipTier::Premium.allows(MembershipTier::None));
        assert!(MembershipTier::Premium.allows(MembershipTier::Premium));
        assert!(MembershipTier::Basic.allows(MembershipTier::None));
        assert!(!MembershipTier::Basic.allows(MembershipTier::Standard));
        assert!(!MembershipTier::None.allows(MembershipTier::Basic));
    }

    #[test]
    fn test_none_floor_sees_only_none() {
        assert_eq!(MembershipTier::None.cumulative(), &[MembershipTier::None]);
    }

    #[test]
    fn test_premium_cumulative_is_all_tiers() {
        assert_eq!(MembershipTier::Premium.cumulative(), &ALL_TIERS[..]);
    }

    #[test]
    fn test_parse_round_trip() {
        for tier in ALL_TIERS {
            assert_eq!(MembershipTier::from_str(tier.as_str()), Some(tier));
        }
        assert_eq!(MembershipTier::from_str("Premium"), Some(MembershipTier::Premium));
        assert_eq!(MembershipTier::from_str("gold"), None);
    }

    #[test]
    fn test_unknown_requested_tier_falls_to_none() {
        assert_eq!(MembershipTier::parse_or_none("platinum"), MembershipTier::None);
        assert_eq!(MembershipTier::parse_or_none(""), MembershipTier::None);
        assert_eq!(MembershipTier::parse_or_none("standard"), MembershipTier::Standard);
    }
}
