//! Bootstrap binary: prepares the storefront database and seeds the catalog.

use dotenvy::dotenv;
use greengrocer::{config, errors::Result, seed};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Connect and ensure the schema exists
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!(url = %config::database::get_database_url(), "database initialized");

    // 4. Seed the catalog from catalog.toml when present, else the built-in fixture
    let catalog = if Path::new("catalog.toml").exists() {
        config::catalog::load_default_config()?
    } else {
        seed::default_catalog()
    };
    seed::seed_catalog(&db, &catalog).await?;
    info!("storefront ready");

    Ok(())
}
