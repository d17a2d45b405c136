//! News model
//!
//! This module provides:
//! - `News` entity representing a news article
//! - `NewsStatus` enum for publication states
//! - Input types for creating and updating news items
//! - Pagination types for list queries
//! - Read-time derived fields (`excerpt`, `formatted_date`) and the
//!   `NewsPreview` listing shape built from them

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::membership::MembershipTier;

/// Maximum number of characters of body content shown in an excerpt.
const EXCERPT_CHARS: usize = 100;

/// News entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    /// Unique identifier
    pub id: i64,
    /// Headline
    pub title: String,
    /// Short summary; may be empty
    #[serde(default)]
    pub description: String,
    /// Full body content
    pub content: String,
    /// Free-form grouping label
    pub category: String,
    /// Free-form content kind label
    #[serde(default)]
    pub kind: String,
    /// Featured image URL
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Minimum membership tier required to view this item
    #[serde(default)]
    pub membership_requirement: MembershipTier,
    /// Publication status
    pub status: NewsStatus,
    /// Whether the item is featured
    #[serde(default)]
    pub is_featured: bool,
    /// Calendar date of publication
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    /// View counter; never decreases except by explicit reset
    #[serde(default)]
    pub view_count: i64,
    /// Admin who created the item
    #[serde(default)]
    pub created_by: Option<i64>,
    /// Admin who last updated the item
    #[serde(default)]
    pub updated_by: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl News {
    /// Publication date rendered as `YYYY.MM.DD`, or empty when unset.
    pub fn formatted_date(&self) -> String {
        match self.published_date {
            Some(date) => date.format("%Y.%m.%d").to_string(),
            None => String::new(),
        }
    }

    /// Short-form preview of the item.
    ///
    /// Uses `description` when present; otherwise the first 100 characters
    /// of `content`, with a trailing ellipsis when the content is longer.
    /// Truncation counts characters, not bytes, and may cut mid-word.
    pub fn excerpt(&self) -> String {
        if !self.description.is_empty() {
            return self.description.clone();
        }
        if self.content.chars().count() > EXCERPT_CHARS {
            let head: String = self.content.chars().take(EXCERPT_CHARS).collect();
            format!("{}...", head)
        } else {
            self.content.clone()
        }
    }
}

/// News publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsStatus {
    /// Draft - not visible to public
    Draft,
    /// Published - visible to public
    Published,
    /// Archived - hidden but not deleted
    Archived,
}

impl Default for NewsStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl NewsStatus {
    /// Convert status to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsStatus::Draft => "draft",
            NewsStatus::Published => "published",
            NewsStatus::Archived => "archived",
        }
    }

    /// Parse status from database string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(NewsStatus::Draft),
            "published" => Some(NewsStatus::Published),
            "archived" => Some(NewsStatus::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for NewsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Listing shape returned to callers: stored fields plus the read-time
/// derived `excerpt` and `formatted_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPreview {
    /// Unique identifier
    pub id: i64,
    /// Headline
    pub title: String,
    /// Grouping label
    pub category: String,
    /// Content kind label
    pub kind: String,
    /// Featured image URL
    pub featured_image: Option<String>,
    /// Minimum membership tier required
    pub membership_requirement: MembershipTier,
    /// Whether the item is featured
    pub is_featured: bool,
    /// Derived short-form preview
    pub excerpt: String,
    /// Derived `YYYY.MM.DD` date, empty when unset
    pub formatted_date: String,
    /// View counter
    pub view_count: i64,
}

impl From<&News> for NewsPreview {
    fn from(news: &News) -> Self {
        Self {
            id: news.id,
            title: news.title.clone(),
            category: news.category.clone(),
            kind: news.kind.clone(),
            featured_image: news.featured_image.clone(),
            membership_requirement: news.membership_requirement,
            is_featured: news.is_featured,
            excerpt: news.excerpt(),
            formatted_date: news.formatted_date(),
            view_count: news.view_count,
        }
    }
}

/// Input for creating a news item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNewsInput {
    /// Headline
    pub title: String,
    /// Short summary (optional)
    #[serde(default)]
    pub description: String,
    /// Full body content
    pub content: String,
    /// Grouping label
    pub category: String,
    /// Content kind label (optional)
    #[serde(default)]
    pub kind: String,
    /// Featured image URL (optional)
    pub featured_image: Option<String>,
    /// Required membership tier (defaults to none)
    pub membership_requirement: Option<MembershipTier>,
    /// Publication status (defaults to draft)
    pub status: Option<NewsStatus>,
    /// Featured flag (defaults to false)
    pub is_featured: Option<bool>,
    /// Publication date (optional)
    pub published_date: Option<NaiveDate>,
    /// Creating admin
    pub created_by: Option<i64>,
}

impl CreateNewsInput {
    /// Create a new CreateNewsInput with the required fields
    pub fn new(title: String, content: String, category: String) -> Self {
        Self {
            title,
            description: String::new(),
            content,
            category,
            kind: String::new(),
            featured_image: None,
            membership_requirement: None,
            status: None,
            is_featured: None,
            published_date: None,
            created_by: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// Set the required membership tier
    pub fn with_membership_requirement(mut self, tier: MembershipTier) -> Self {
        self.membership_requirement = Some(tier);
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: NewsStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the featured flag
    pub fn with_featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }

    /// Set the publication date
    pub fn with_published_date(mut self, date: NaiveDate) -> Self {
        self.published_date = Some(date);
        self
    }

    /// Set the creating admin
    pub fn with_created_by(mut self, admin_id: i64) -> Self {
        self.created_by = Some(admin_id);
        self
    }
}

/// Input for updating an existing news item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNewsInput {
    /// New headline (optional)
    pub title: Option<String>,
    /// New summary (optional)
    pub description: Option<String>,
    /// New body content (optional)
    pub content: Option<String>,
    /// New grouping label (optional)
    pub category: Option<String>,
    /// New kind label (optional)
    pub kind: Option<String>,
    /// New featured image URL (optional)
    pub featured_image: Option<String>,
    /// New required tier (optional)
    pub membership_requirement: Option<MembershipTier>,
    /// New status (optional)
    pub status: Option<NewsStatus>,
    /// New featured flag (optional)
    pub is_featured: Option<bool>,
    /// New publication date (optional)
    pub published_date: Option<NaiveDate>,
    /// Updating admin
    pub updated_by: Option<i64>,
}

impl UpdateNewsInput {
    /// Create a new empty UpdateNewsInput
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the headline
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the body content
    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: NewsStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the required membership tier
    pub fn with_membership_requirement(mut self, tier: MembershipTier) -> Self {
        self.membership_requirement = Some(tier);
        self
    }

    /// Set the updating admin
    pub fn with_updated_by(mut self, admin_id: i64) -> Self {
        self.updated_by = Some(admin_id);
        self
    }

    /// Check if any field is set
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.content.is_some()
            || self.category.is_some()
            || self.kind.is_some()
            || self.featured_image.is_some()
            || self.membership_requirement.is_some()
            || self.status.is_some()
            || self.is_featured.is_some()
            || self.published_date.is_some()
    }
}

/// Pagination parameters for list queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

impl ListParams {
    /// Create new pagination parameters
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> i64 {
        ((self.page.saturating_sub(1)) * self.per_page) as i64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// Paginated result container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl<T> PagedResult<T> {
    /// Create a new paginated result
    pub fn new(items: Vec<T>, total: i64, params: &ListParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            per_page: params.per_page,
        }
    }

    /// Calculate the total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        ((self.total as u32) + self.per_page - 1) / self.per_page
    }

    /// Check if there is a next page
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there is a previous page
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Check if the result is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of items in the current page
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            per_page: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_news(description: &str, content: &str) -> News {
        let now = Utc::now();
        News {
            id: 1,
            title: "Quarterly update".to_string(),
            description: description.to_string(),
            content: content.to_string(),
            category: "general".to_string(),
            kind: String::new(),
            featured_image: None,
            membership_requirement: MembershipTier::None,
            status: NewsStatus::Published,
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
    fn test_excerpt_prefers_description() {
        let news = sample_news("A short summary", &"x".repeat(500));
        assert_eq!(news.excerpt(), "A short summary");
    }

    #[test]
    fn test_excerpt_truncates_long_content() {
        let content = "a".repeat(150);
        let news = sample_news("", &content);
        assert_eq!(news.excerpt(), format!("{}...", "a".repeat(100)));
    }

    #[test]
    fn test_excerpt_keeps_short_content() {
        let content = "b".repeat(50);
        let news = sample_news("", &content);
        assert_eq!(news.excerpt(), content);
    }

    #[test]
    fn test_excerpt_exact_boundary_is_unchanged() {
        let content = "c".repeat(100);
        let news = sample_news("", &content);
        assert_eq!(news.excerpt(), content);
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let content = "あ".repeat(150);
        let news = sample_news("", &content);
        assert_eq!(news.excerpt(), format!("{}...", "あ".repeat(100)));
    }

    #[test]
    fn test_formatted_date() {
        let mut news = sample_news("", "body");
        news.published_date = NaiveDate::from_ymd_opt(2024, 3, 7);
        assert_eq!(news.formatted_date(), "2024.03.07");
    }

    #[test]
    fn test_formatted_date_absent_is_empty() {
        let news = sample_news("", "body");
        assert_eq!(news.formatted_date(), "");
    }

    #[test]
    fn test_list_params_clamping() {
        let params = ListParams::new(0, 500);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 100);
        assert_eq!(params.offset(), 0);

        let params = ListParams::new(3, 20);
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_paged_result_math() {
        let params = ListParams::new(2, 10);
        let result = PagedResult::new(vec![1, 2, 3], 23, &params);
        assert_eq!(result.total_pages(), 3);
        assert!(result.has_next());
        assert!(result.has_prev());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_update_input_has_changes() {
        assert!(!UpdateNewsInput::new().has_changes());
        assert!(UpdateNewsInput::new().with_title("t".to_string()).has_changes());
    }
}
