//! Seeding binary
//!
//! Applies migrations and inserts the default seed data sets for
//! publications, seminars, and services. Safe to re-run: publications
//! deduplicate by title.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk::{
    config::Config,
    db::{
        self,
        repositories::{
            SqlxAdminRepository, SqlxPublicationRepository, SqlxSeminarRepository,
            SqlxServiceItemRepository,
        },
    },
    services::SeedRunner,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Seeding database...");

    let config = Config::load_with_env(Path::new("config.yml"))?;

    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    db::migrations::run_migrations(&pool).await?;

    let runner = SeedRunner::new(
        SqlxPublicationRepository::boxed(pool.clone()),
        SqlxSeminarRepository::boxed(pool.clone()),
        SqlxServiceItemRepository::boxed(pool.clone()),
        SqlxAdminRepository::boxed(pool.clone()),
    );

    let summary = runner.run_all().await?;

    tracing::info!(
        publications_inserted = summary.publications.inserted,
        publications_skipped = summary.publications.skipped,
        seminars_inserted = summary.seminars.inserted,
        services_inserted = summary.services.inserted,
        "Seeding complete"
    );

    pool.close().await;
    Ok(())
}
