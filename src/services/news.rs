//! News service
//!
//! Implements business logic for news management:
//! - Create, read, update, delete news items
//! - Membership-gated public listings with derived preview fields
//! - View counting
//! - Validation
//! - Cache invalidation

use crate::cache::{Cache, CacheLayer};
use crate::db::repositories::NewsRepository;
use crate::models::{
    CreateNewsInput, ListParams, MembershipTier, News, NewsPreview, PagedResult, UpdateNewsInput,
};
use crate::services::visibility::VisibilityQuery;
use std::sync::Arc;
use std::time::Duration;

/// Default cache TTL for single news items (1 hour)
const NEWS_CACHE_TTL_SECS: u64 = 3600;

/// Cache TTL for news listings (10 minutes, listings should refresh faster)
const NEWS_LIST_CACHE_TTL_SECS: u64 = 600;

/// Cache key prefixes
const CACHE_KEY_NEWS_BY_ID: &str = "news:id:";
const CACHE_KEY_NEWS_VISIBLE: &str = "news:visible:";

/// Maximum accepted title length in characters
const MAX_TITLE_CHARS: usize = 255;

/// Error types for news service operations
#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    /// News item not found (or not visible to the requester)
    #[error("News item not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// News service for managing membership-gated news content
pub struct NewsService {
    repo: Arc<dyn NewsRepository>,
    cache: Arc<Cache>,
    cache_ttl: Duration,
    list_cache_ttl: Duration,
}

impl NewsService {
    /// Create a new news service
    pub fn new(repo: Arc<dyn NewsRepository>, cache: Arc<Cache>) -> Self {
        Self {
            repo,
            cache,
            cache_ttl: Duration::from_secs(NEWS_CACHE_TTL_SECS),
            list_cache_ttl: Duration::from_secs(NEWS_LIST_CACHE_TTL_SECS),
        }
    }

    /// Create a new news service with custom cache TTLs
    pub fn with_cache_ttl(
        repo: Arc<dyn NewsRepository>,
        cache: Arc<Cache>,
        cache_ttl: Duration,
        list_cache_ttl: Duration,
    ) -> Self {
        Self {
            repo,
            cache,
            cache_ttl,
            list_cache_ttl,
        }
    }

    /// Create a news item
    ///
    /// # Errors
    /// - `ValidationError` if title or content is empty or the title is too long
    pub async fn create(&self, input: CreateNewsInput) -> Result<News, NewsServiceError> {
        self.validate_create_input(&input)?;

        let created = self.repo.create(&input).await?;
        self.invalidate_list_caches().await;

        tracing::info!(id = created.id, title = %created.title, "Created news item");
        Ok(created)
    }

    /// Get a news item by ID, regardless of status (back-office view)
    pub async fn get(&self, id: i64) -> Result<News, NewsServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| NewsServiceError::NotFound(id.to_string()))
    }

    /// Get a published news item for a requester at the given tier.
    ///
    /// Drafts, archived items, and items requiring a higher tier all read
    /// as not-found; a requester is never told a hidden item exists.
    pub async fn get_published(
        &self,
        id: i64,
        tier: MembershipTier,
    ) -> Result<News, NewsServiceError> {
        let cache_key = format!("{}{}", CACHE_KEY_NEWS_BY_ID, id);

        let news = match self.cache.get::<News>(&cache_key).await {
            Ok(Some(cached)) => cached,
            _ => {
                let fetched = self
                    .repo
                    .get_by_id(id)
                    .await?
                    .ok_or_else(|| NewsServiceError::NotFound(id.to_string()))?;
                if let Err(e) = self.cache.set(&cache_key, &fetched, self.cache_ttl).await {
                    tracing::warn!("Failed to cache news item {}: {}", id, e);
                }
                fetched
            }
        };

        let query = VisibilityQuery::for_tier(tier);
        if !query.matches(&news) {
            return Err(NewsServiceError::NotFound(id.to_string()));
        }

        Ok(news)
    }

    /// List published news visible to the given tier.
    ///
    /// Optional predicates narrow by category equality and featured flag;
    /// all predicates are conjunctive. Results carry the derived excerpt
    /// and formatted date.
    pub async fn list_visible(
        &self,
        tier: MembershipTier,
        category: Option<&str>,
        featured_only: bool,
        params: &ListParams,
    ) -> Result<PagedResult<NewsPreview>, NewsServiceError> {
        let cache_key = format!(
            "{}{}:{}:{}:{}:{}",
            CACHE_KEY_NEWS_VISIBLE,
            tier,
            category.unwrap_or("-"),
            featured_only,
            params.page,
            params.per_page
        );

        if let Ok(Some(cached)) = self.cache.get::<PagedResult<NewsPreview>>(&cache_key).await {
            return Ok(cached);
        }

        let items = self
            .repo
            .list_visible(tier, category, featured_only, params.offset(), params.limit())
            .await?;
        let total = self.repo.count_visible(tier, category, featured_only).await?;

        let previews: Vec<NewsPreview> = items.iter().map(NewsPreview::from).collect();
        let result = PagedResult::new(previews, total, params);

        if let Err(e) = self.cache.set(&cache_key, &result, self.list_cache_ttl).await {
            tracing::warn!("Failed to cache news listing: {}", e);
        }

        Ok(result)
    }

    /// List news items for the back office, all statuses included
    pub async fn list_all(&self, params: &ListParams) -> Result<PagedResult<News>, NewsServiceError> {
        let items = self.repo.list(params.offset(), params.limit()).await?;
        let total = self.repo.count().await?;
        Ok(PagedResult::new(items, total, params))
    }

    /// Update a news item
    pub async fn update(&self, id: i64, input: UpdateNewsInput) -> Result<News, NewsServiceError> {
        if !input.has_changes() && input.updated_by.is_none() {
            return Err(NewsServiceError::ValidationError(
                "No fields to update".to_string(),
            ));
        }
        self.validate_update_input(&input)?;

        if self.repo.get_by_id(id).await?.is_none() {
            return Err(NewsServiceError::NotFound(id.to_string()));
        }

        let updated = self.repo.update(id, &input).await?;
        self.invalidate_item_caches(id).await;

        tracing::info!(id, "Updated news item");
        Ok(updated)
    }

    /// Delete a news item
    pub async fn delete(&self, id: i64) -> Result<(), NewsServiceError> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Err(NewsServiceError::NotFound(id.to_string()));
        }

        self.repo.delete(id).await?;
        self.invalidate_item_caches(id).await;

        tracing::info!(id, "Deleted news item");
        Ok(())
    }

    /// Record one view of a news item.
    ///
    /// The counter only moves up; the sole way down is `reset_views`.
    pub async fn record_view(&self, id: i64) -> Result<(), NewsServiceError> {
        self.repo.increment_view_count(id).await?;
        let cache_key = format!("{}{}", CACHE_KEY_NEWS_BY_ID, id);
        let _ = self.cache.delete(&cache_key).await;
        Ok(())
    }

    /// Explicitly reset a news item's view counter to zero
    pub async fn reset_views(&self, id: i64) -> Result<(), NewsServiceError> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Err(NewsServiceError::NotFound(id.to_string()));
        }
        self.repo.reset_view_count(id).await?;
        self.invalidate_item_caches(id).await;
        Ok(())
    }

    fn validate_create_input(&self, input: &CreateNewsInput) -> Result<(), NewsServiceError> {
        if input.title.trim().is_empty() {
            return Err(NewsServiceError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }
        if input.title.chars().count() > MAX_TITLE_CHARS {
            return Err(NewsServiceError::ValidationError(format!(
                "Title cannot exceed {} characters",
                MAX_TITLE_CHARS
            )));
        }
        if input.content.trim().is_empty() {
            return Err(NewsServiceError::ValidationError(
                "Content cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_update_input(&self, input: &UpdateNewsInput) -> Result<(), NewsServiceError> {
        if let Some(title) = &input.title {
            if title.trim().is_empty() {
                return Err(NewsServiceError::ValidationError(
                    "Title cannot be empty".to_string(),
                ));
            }
            if title.chars().count() > MAX_TITLE_CHARS {
                return Err(NewsServiceError::ValidationError(format!(
                    "Title cannot exceed {} characters",
                    MAX_TITLE_CHARS
                )));
            }
        }
        if let Some(content) = &input.content {
            if content.trim().is_empty() {
                return Err(NewsServiceError::ValidationError(
                    "Content cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    async fn invalidate_item_caches(&self, id: i64) {
        let cache_key = format!("{}{}", CACHE_KEY_NEWS_BY_ID, id);
        if let Err(e) = self.cache.delete(&cache_key).await {
            tracing::warn!("Failed to invalidate news cache: {}", e);
        }
        self.invalidate_list_caches().await;
    }

    async fn invalidate_list_caches(&self) {
        if let Err(e) = self
            .cache
            .delete_pattern(&format!("{}*", CACHE_KEY_NEWS_VISIBLE))
            .await
        {
            tracing::warn!("Failed to invalidate news listing caches: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::create_cache;
    use crate::config::CacheConfig;
    use crate::db::repositories::SqlxNewsRepository;
    use crate::db::{create_test_pool, migrations};
    use crate::models::NewsStatus;
    use chrono::NaiveDate;

    async fn setup_service() -> NewsService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let repo = SqlxNewsRepository::boxed(pool);
        let cache = create_cache(&CacheConfig::default());
        NewsService::new(repo, cache)
    }

    fn published_input(title: &str, tier: MembershipTier) -> CreateNewsInput {
        CreateNewsInput::new(
            title.to_string(),
            format!("Body of {}", title),
            "general".to_string(),
        )
        .with_membership_requirement(tier)
        .with_status(NewsStatus::Published)
        .with_published_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
    }

    #[tokio::test]
    async fn test_create_validates_empty_title() {
        let service = setup_service().await;
        let input = CreateNewsInput::new("  ".to_string(), "body".to_string(), "general".to_string());
        let err = service.create(input).await.unwrap_err();
        assert!(matches!(err, NewsServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_validates_empty_content() {
        let service = setup_service().await;
        let input = CreateNewsInput::new("Title".to_string(), "".to_string(), "general".to_string());
        let err = service.create(input).await.unwrap_err();
        assert!(matches!(err, NewsServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_validates_title_length() {
        let service = setup_service().await;
        let input =
            CreateNewsInput::new("t".repeat(256), "body".to_string(), "general".to_string());
        let err = service.create(input).await.unwrap_err();
        assert!(matches!(err, NewsServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_list_visible_respects_tier() {
        let service = setup_service().await;
        service.create(published_input("Open", MembershipTier::None)).await.unwrap();
        service.create(published_input("Paid", MembershipTier::Standard)).await.unwrap();

        let for_basic = service
            .list_visible(MembershipTier::Basic, None, false, &ListParams::default())
            .await
            .unwrap();
        assert_eq!(for_basic.total, 1);
        assert_eq!(for_basic.items[0].title, "Open");

        let for_standard = service
            .list_visible(MembershipTier::Standard, None, false, &ListParams::default())
            .await
            .unwrap();
        assert_eq!(for_standard.total, 2);
    }

    #[tokio::test]
    async fn test_list_visible_carries_derived_fields() {
        let service = setup_service().await;
        let mut input = published_input("Derived", MembershipTier::None);
        input.description = String::new();
        input.content = "x".repeat(150);
        service.create(input).await.unwrap();

        let listed = service
            .list_visible(MembershipTier::None, None, false, &ListParams::default())
            .await
            .unwrap();
        let preview = &listed.items[0];
        assert_eq!(preview.excerpt, format!("{}...", "x".repeat(100)));
        assert_eq!(preview.formatted_date, "2024.03.07");
    }

    #[tokio::test]
    async fn test_get_published_fails_closed() {
        let service = setup_service().await;
        let draft = service
            .create(CreateNewsInput::new(
                "Draft".to_string(),
                "body".to_string(),
                "general".to_string(),
            ))
            .await
            .unwrap();
        let gated = service
            .create(published_input("Gated", MembershipTier::Premium))
            .await
            .unwrap();

        // Draft invisible even to premium
        let err = service.get_published(draft.id, MembershipTier::Premium).await.unwrap_err();
        assert!(matches!(err, NewsServiceError::NotFound(_)));

        // Premium item invisible below premium
        let err = service.get_published(gated.id, MembershipTier::Standard).await.unwrap_err();
        assert!(matches!(err, NewsServiceError::NotFound(_)));

        // Visible at the right tier
        let ok = service.get_published(gated.id, MembershipTier::Premium).await.unwrap();
        assert_eq!(ok.title, "Gated");
    }

    #[tokio::test]
    async fn test_update_invalidates_listing_cache() {
        let service = setup_service().await;
        let created = service
            .create(published_input("Before", MembershipTier::None))
            .await
            .unwrap();

        // Prime the listing cache
        let first = service
            .list_visible(MembershipTier::None, None, false, &ListParams::default())
            .await
            .unwrap();
        assert_eq!(first.items[0].title, "Before");

        service
            .update(created.id, UpdateNewsInput::new().with_title("After".to_string()))
            .await
            .unwrap();

        let second = service
            .list_visible(MembershipTier::None, None, false, &ListParams::default())
            .await
            .unwrap();
        assert_eq!(second.items[0].title, "After");
    }

    #[tokio::test]
    async fn test_update_missing_item() {
        let service = setup_service().await;
        let err = service
            .update(404, UpdateNewsInput::new().with_title("x".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_record_view_and_reset() {
        let service = setup_service().await;
        let created = service
            .create(published_input("Counted", MembershipTier::None))
            .await
            .unwrap();

        service.record_view(created.id).await.unwrap();
        service.record_view(created.id).await.unwrap();
        let after = service.get(created.id).await.unwrap();
        assert_eq!(after.view_count, 2);

        service.reset_views(created.id).await.unwrap();
        let reset = service.get(created.id).await.unwrap();
        assert_eq!(reset.view_count, 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let service = setup_service().await;
        let created = service
            .create(published_input("Doomed", MembershipTier::None))
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();
        let err = service.get(created.id).await.unwrap_err();
        assert!(matches!(err, NewsServiceError::NotFound(_)));
    }
}
