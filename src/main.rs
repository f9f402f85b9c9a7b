//! Binary entry point: initializes the database, seeds the registry from
//! `config.toml`, and reports the configured users.

use coopstock::{config, core::farm, errors::Result};
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Initialize database
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 4. Seed farms and warehouses from config.toml, if present
    match config::seed::load_default_config() {
        Ok(seed_config) => {
            farm::seed_farms(&db, &seed_config.farms).await?;
            info!(farms = seed_config.farms.len(), "Seed data applied.");
        }
        Err(e) => {
            warn!("No seed configuration applied: {e}");
        }
    }

    // 5. Load user roles for the authorization layer
    let authorizer = config::users::load_authorizer()?;
    info!(users = authorizer.len(), "Authorization table loaded.");

    info!("CoopStock ready.");
    Ok(())
}
