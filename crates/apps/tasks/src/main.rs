use crate::bootstrap::prepare_storage;
use app_state::load_app_settings;
use color_eyre::Result;
use sharing_services::database::{get_db_pool, run_migrations};
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod bootstrap;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = load_app_settings()?;

    let level = Level::from_str(&settings.logging.level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let pool = get_db_pool(&settings.database).await?;
    run_migrations(&pool).await?;
    prepare_storage(&pool, &settings).await?;

    info!("Sharing database and photo storage are ready.");
    Ok(())
}
