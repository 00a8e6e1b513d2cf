//! Init-db command - creates the PostgreSQL schema and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Connect to PostgreSQL and create the users table if missing
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    crate::create_postgres_repository(&config).await?;

    info!("Users table ready");

    Ok(())
}
