//! Service item model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ServiceItem entity: an offered service listed on the site.
///
/// Named `ServiceItem` rather than `Service` to keep it distinct from the
/// `services` module of this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    /// Unique identifier
    pub id: i64,
    /// Service title
    pub title: String,
    /// Description of the service
    #[serde(default)]
    pub description: String,
    /// Display ordering (lower first)
    #[serde(default)]
    pub sort_order: i32,
    /// Whether the service is currently offered
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input row for seeding a service item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewServiceItem {
    /// Service title
    pub title: String,
    /// Description of the service
    #[serde(default)]
    pub description: String,
    /// Display ordering (lower first)
    #[serde(default)]
    pub sort_order: i32,
}
