use app_state::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Open a connection pool for the configured database.
/// # Errors
///
/// * `SqliteConnectOptions::from_str` can return an error if the url is malformed.
/// * `SqlitePoolOptions::connect_with` can return an error if the database cannot be opened.
pub async fn get_db_pool(db_settings: &DatabaseSettings) -> color_eyre::Result<SqlitePool> {
    info!("Connecting to database.");
    let options = SqliteConnectOptions::from_str(&db_settings.url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(db_settings.max_connections)
        .min_connections(db_settings.min_connections)
        .idle_timeout(Duration::from_secs(db_settings.idle_timeout))
        .acquire_timeout(Duration::from_secs(db_settings.acquire_timeout))
        .test_before_acquire(true)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Apply the embedded migrations to the given pool.
pub async fn run_migrations(pool: &SqlitePool) -> color_eyre::Result<()> {
    sqlx::migrate!("../../../migrations").run(pool).await?;
    info!("Database migrations applied.");
    Ok(())
}
