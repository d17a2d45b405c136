//! Administrator bootstrap binary
//!
//! Creates (or refreshes) the administrator account pair in the configured
//! database. Intended as a one-off step when standing up an empty
//! deployment.
//!
//! Defaults come from config.yml and can be overridden with:
//! - NEWSDESK_ADMIN_EMAIL
//! - NEWSDESK_ADMIN_PASSWORD
//! - NEWSDESK_ADMIN_USERNAME
//! - NEWSDESK_ADMIN_NAME

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk::{
    config::Config,
    db::{
        self,
        repositories::{SqlxAdminRepository, SqlxMemberRepository},
    },
    services::{AdminService, BootstrapInput},
};

/// Fallback password matching the historical bootstrap script; deployments
/// are expected to override it and rotate after first login.
const DEFAULT_ADMIN_PASSWORD: &str = "password";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Creating administrator account...");

    let config = Config::load_with_env(Path::new("config.yml"))?;

    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    db::migrations::run_migrations(&pool).await?;

    let service = AdminService::new(
        SqlxMemberRepository::boxed(pool.clone()),
        SqlxAdminRepository::boxed(pool.clone()),
    );

    let password = std::env::var("NEWSDESK_ADMIN_PASSWORD")
        .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());

    let input = BootstrapInput {
        email: config.bootstrap.admin_email.clone(),
        password,
        name: config.bootstrap.admin_name.clone(),
        username: config.bootstrap.admin_username.clone(),
    };

    let report = service.bootstrap(input).await?;

    tracing::info!(
        email = %report.email,
        username = %report.username,
        member_created = report.member_created,
        admin_created = report.admin_created,
        "Administrator account ready"
    );
    if std::env::var("NEWSDESK_ADMIN_PASSWORD").is_err() {
        tracing::warn!("Using the default password; change it after first login");
    }

    pool.close().await;
    Ok(())
}
