//! Content visibility filter
//!
//! Decides which news items a requester of a given membership tier may see.
//! The filter is a pure, synchronous predicate over an in-memory sequence:
//! no storage access, no session state, no side effects. The same rule is
//! pushed into storage queries by `NewsRepository::list_visible`; this module
//! is the canonical statement of the semantics.
//!
//! Access is cumulative: a tier sees everything required at or below it.
//! Anything that cannot be resolved to a known tier resolves to the most
//! restrictive outcome, never the widest.

use serde::{Deserialize, Serialize};

use crate::models::{MembershipTier, News, NewsStatus};

/// The predicate set applied to public news listings.
///
/// All predicates are conjunctive: published status and the tier rule always
/// apply; category equality and featured-only apply when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityQuery {
    /// The requester's membership tier
    pub tier: MembershipTier,
    /// Restrict to a single category
    pub category: Option<String>,
    /// Restrict to featured items
    pub featured_only: bool,
}

impl VisibilityQuery {
    /// Query for a requester at the given tier, with no optional predicates
    pub fn for_tier(tier: MembershipTier) -> Self {
        Self {
            tier,
            category: None,
            featured_only: false,
        }
    }

    /// Restrict results to a category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict results to featured items
    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// Whether a single item passes every predicate.
    pub fn matches(&self, item: &News) -> bool {
        if item.status != NewsStatus::Published {
            return false;
        }
        if !self.tier.allows(item.membership_requirement) {
            return false;
        }
        if let Some(category) = &self.category {
            if item.category != *category {
                return false;
            }
        }
        if self.featured_only && !item.is_featured {
            return false;
        }
        true
    }
}

/// Filter a sequence of news items down to those visible under `query`.
///
/// Surviving items keep their relative input order; this is a filter, not
/// a sort.
pub fn visible_items(items: &[News], query: &VisibilityQuery) -> Vec<News> {
    items
        .iter()
        .filter(|item| query.matches(item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ALL_TIERS;
    use chrono::Utc;

    fn item(tier: MembershipTier, status: NewsStatus) -> News {
        let now = Utc::now();
        News {
            id: 0,
            title: "item".to_string(),
            description: String::new(),
            content: "content".to_string(),
            category: "general".to_string(),
            kind: String::new(),
            featured_image: None,
            membership_requirement: tier,
            status,
            is_featured: false,
            published_date: None,
            view_count: 0,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_none_tier_sees_only_none_items() {
        let items = vec![
            item(MembershipTier::None, NewsStatus::Published),
            item(MembershipTier::Basic, NewsStatus::Published),
            item(MembershipTier::Premium, NewsStatus::Published),
        ];
        let visible = visible_items(&items, &VisibilityQuery::for_tier(MembershipTier::None));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].membership_requirement, MembershipTier::None);
    }

    #[test]
    fn test_premium_sees_all_published() {
        let items: Vec<News> = ALL_TIERS
            .iter()
            .map(|&t| item(t, NewsStatus::Published))
            .collect();
        let visible = visible_items(&items, &VisibilityQuery::for_tier(MembershipTier::Premium));
        assert_eq!(visible.len(), items.len());
    }

    #[test]
    fn test_drafts_hidden_from_everyone() {
        let items = vec![item(MembershipTier::None, NewsStatus::Draft)];
        for &tier in &ALL_TIERS {
            assert!(visible_items(&items, &VisibilityQuery::for_tier(tier)).is_empty());
        }
    }

    #[test]
    fn test_archived_hidden_from_everyone() {
        let items = vec![item(MembershipTier::None, NewsStatus::Archived)];
        assert!(visible_items(&items, &VisibilityQuery::for_tier(MembershipTier::Premium)).is_empty());
    }

    #[test]
    fn test_category_and_featured_predicates_conjoin() {
        let mut a = item(MembershipTier::None, NewsStatus::Published);
        a.category = "seminar".to_string();
        a.is_featured = true;
        let mut b = item(MembershipTier::None, NewsStatus::Published);
        b.category = "seminar".to_string();
        let c = item(MembershipTier::None, NewsStatus::Published);

        let items = vec![a, b, c];

        let by_category = visible_items(
            &items,
            &VisibilityQuery::for_tier(MembershipTier::None).with_category("seminar"),
        );
        assert_eq!(by_category.len(), 2);

        let featured = visible_items(
            &items,
            &VisibilityQuery::for_tier(MembershipTier::None)
                .with_category("seminar")
                .featured(),
        );
        assert_eq!(featured.len(), 1);
        assert!(featured[0].is_featured);
    }

    #[test]
    fn test_mixed_scenario_basic_requester() {
        // One open published item, one premium published item, one basic
        // draft. A basic requester sees only the first.
        let items = vec![
            item(MembershipTier::None, NewsStatus::Published),
            item(MembershipTier::Premium, NewsStatus::Published),
            item(MembershipTier::Basic, NewsStatus::Draft),
        ];
        let visible = visible_items(&items, &VisibilityQuery::for_tier(MembershipTier::Basic));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].membership_requirement, MembershipTier::None);
        assert_eq!(visible[0].status, NewsStatus::Published);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_tier() -> impl Strategy<Value = MembershipTier> {
            prop_oneof![
                Just(MembershipTier::None),
                Just(MembershipTier::Basic),
                Just(MembershipTier::Standard),
                Just(MembershipTier::Premium),
            ]
        }

        fn arb_status() -> impl Strategy<Value = NewsStatus> {
            prop_oneof![
                Just(NewsStatus::Draft),
                Just(NewsStatus::Published),
                Just(NewsStatus::Archived),
            ]
        }

        fn arb_item() -> impl Strategy<Value = News> {
            (arb_tier(), arb_status()).prop_map(|(tier, status)| item(tier, status))
        }

        /// Item vectors with unique, position-derived ids
        fn arb_items() -> impl Strategy<Value = Vec<News>> {
            prop::collection::vec(arb_item(), 0..40).prop_map(|mut items| {
                for (i, n) in items.iter_mut().enumerate() {
                    n.id = i as i64;
                }
                items
            })
        }

        proptest! {
            /// A higher tier's visible set is a superset of a lower tier's,
            /// for identical input.
            #[test]
            fn higher_tier_sees_superset(items in arb_items()) {
                for (i, &low) in ALL_TIERS.iter().enumerate() {
                    for &high in &ALL_TIERS[i..] {
                        let low_visible = visible_items(&items, &VisibilityQuery::for_tier(low));
                        let high_visible = visible_items(&items, &VisibilityQuery::for_tier(high));
                        let high_ids: Vec<i64> = high_visible.iter().map(|n| n.id).collect();
                        for n in &low_visible {
                            prop_assert!(high_ids.contains(&n.id));
                        }
                    }
                }
            }

            /// Filtering twice yields the same result as filtering once.
            #[test]
            fn filter_is_idempotent(
                items in arb_items(),
                tier in arb_tier(),
            ) {
                let query = VisibilityQuery::for_tier(tier);
                let once = visible_items(&items, &query);
                let twice = visible_items(&once, &query);
                let once_ids: Vec<i64> = once.iter().map(|n| n.id).collect();
                let twice_ids: Vec<i64> = twice.iter().map(|n| n.id).collect();
                prop_assert_eq!(once_ids, twice_ids);
            }

            /// Surviving items keep their relative input order.
            #[test]
            fn filter_preserves_order(
                items in arb_items(),
                tier in arb_tier(),
            ) {
                let visible = visible_items(&items, &VisibilityQuery::for_tier(tier));
                let positions: Vec<usize> = visible
                    .iter()
                    .map(|v| items.iter().position(|i| i.id == v.id).unwrap())
                    .collect();
                let mut sorted = positions.clone();
                sorted.sort_unstable();
                prop_assert_eq!(positions, sorted);
            }

            /// Every visible item individually satisfies the predicate set.
            #[test]
            fn visible_items_all_match(
                items in arb_items(),
                tier in arb_tier(),
            ) {
                let query = VisibilityQuery::for_tier(tier);
                for n in visible_items(&items, &query) {
                    prop_assert!(query.matches(&n));
                    prop_assert_eq!(n.status, NewsStatus::Published);
                    prop_assert!(n.membership_requirement.rank() <= tier.rank());
                }
            }
        }
    }
}
