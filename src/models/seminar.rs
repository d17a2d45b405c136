//! Seminar model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seminar entity: a scheduled event announced on the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seminar {
    /// Unique identifier
    pub id: i64,
    /// Seminar title
    pub title: String,
    /// Description of the event
    #[serde(default)]
    pub description: String,
    /// Date the seminar takes place
    pub event_date: Option<NaiveDate>,
    /// Venue or online location
    #[serde(default)]
    pub location: String,
    /// Scheduling status
    pub status: SeminarStatus,
    /// Admin who registered the seminar
    pub created_by: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Seminar scheduling status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeminarStatus {
    /// Scheduled and open
    #[default]
    Scheduled,
    /// Cancelled before taking place
    Cancelled,
    /// Already held
    Completed,
}

impl SeminarStatus {
    /// Convert status to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SeminarStatus::Scheduled => "scheduled",
            SeminarStatus::Cancelled => "cancelled",
            SeminarStatus::Completed => "completed",
        }
    }

    /// Parse status from database string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scheduled" => Some(SeminarStatus::Scheduled),
            "cancelled" => Some(SeminarStatus::Cancelled),
            "completed" => Some(SeminarStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for SeminarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input row for seeding a seminar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSeminar {
    /// Seminar title
    pub title: String,
    /// Description of the event
    #[serde(default)]
    pub description: String,
    /// Date the seminar takes place
    pub event_date: Option<NaiveDate>,
    /// Venue or online location
    #[serde(default)]
    pub location: String,
}
