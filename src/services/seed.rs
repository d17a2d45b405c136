//! Seed runner
//!
//! Inserts the default data sets from `db::seeds` into an initialized
//! database. Publications deduplicate by title so re-running the seeder
//! never produces duplicates; seminars are attributed to the earliest
//! admin account.

use crate::db::repositories::{
    AdminRepository, PublicationRepository, SeminarRepository, ServiceItemRepository,
};
use crate::db::seeds;
use crate::models::{NewPublication, NewSeminar, NewServiceItem};
use anyhow::Result;
use std::sync::Arc;

/// Outcome of one seeder
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedReport {
    /// Rows inserted
    pub inserted: usize,
    /// Rows skipped (already present)
    pub skipped: usize,
}

/// Outcome of a full seeding run
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSummary {
    /// Publications seeder outcome
    pub publications: SeedReport,
    /// Seminars seeder outcome
    pub seminars: SeedReport,
    /// Services seeder outcome
    pub services: SeedReport,
}

/// Runs the seeders against an initialized database
pub struct SeedRunner {
    publications: Arc<dyn PublicationRepository>,
    seminars: Arc<dyn SeminarRepository>,
    services: Arc<dyn ServiceItemRepository>,
    admins: Arc<dyn AdminRepository>,
}

impl SeedRunner {
    /// Create a new seed runner
    pub fn new(
        publications: Arc<dyn PublicationRepository>,
        seminars: Arc<dyn SeminarRepository>,
        services: Arc<dyn ServiceItemRepository>,
        admins: Arc<dyn AdminRepository>,
    ) -> Self {
        Self {
            publications,
            seminars,
            services,
            admins,
        }
    }

    /// Run every seeder with the default data sets
    pub async fn run_all(&self) -> Result<SeedSummary> {
        let publications = self.seed_publications(&seeds::default_publications()).await?;
        let seminars = self.seed_seminars(&seeds::default_seminars()).await?;
        let services = self.seed_services(&seeds::default_services()).await?;

        Ok(SeedSummary {
            publications,
            seminars,
            services,
        })
    }

    /// Seed publications, skipping titles that already exist
    pub async fn seed_publications(&self, rows: &[NewPublication]) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        for row in rows {
            if self.publications.exists_by_title(&row.title).await? {
                tracing::debug!(title = %row.title, "Publication already present, skipping");
                report.skipped += 1;
                continue;
            }
            self.publications.insert(row).await?;
            report.inserted += 1;
        }
        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "Seeded publications"
        );
        Ok(report)
    }

    /// Seed seminars, attributed to the earliest-created admin
    pub async fn seed_seminars(&self, rows: &[NewSeminar]) -> Result<SeedReport> {
        let admin = self.admins.first().await?;
        let created_by = admin.map(|a| a.id);
        if created_by.is_none() && !rows.is_empty() {
            tracing::warn!("Seeding seminars without an admin to attribute them to");
        }

        let mut report = SeedReport::default();
        for row in rows {
            self.seminars.insert(row, created_by).await?;
            report.inserted += 1;
        }
        tracing::info!(inserted = report.inserted, "Seeded seminars");
        Ok(report)
    }

    /// Seed services
    pub async fn seed_services(&self, rows: &[NewServiceItem]) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        for row in rows {
            self.services.insert(row).await?;
            report.inserted += 1;
        }
        tracing::info!(inserted = report.inserted, "Seeded services");
        Ok(report)
    }
}
