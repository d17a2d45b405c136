//! Publication model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Publication entity: a report or paper listed on the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    /// Unique identifier
    pub id: i64,
    /// Publication title (deduplication key for seeding)
    pub title: String,
    /// Grouping label
    #[serde(default)]
    pub category: String,
    /// Date of publication
    pub published_date: Option<NaiveDate>,
    /// Link to the published document
    pub url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input row for seeding a publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPublication {
    /// Publication title
    pub title: String,
    /// Grouping label
    #[serde(default)]
    pub category: String,
    /// Date of publication
    pub published_date: Option<NaiveDate>,
    /// Link to the published document
    pub url: Option<String>,
}
