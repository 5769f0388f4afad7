use app_state::AppSettings;
use color_eyre::Result;
use sqlx::SqlitePool;
use tokio::fs;
use tracing::{info, warn};

/// Makes sure the photo folder exists and reports photos that never got a
/// stored file.
pub async fn prepare_storage(pool: &SqlitePool, settings: &AppSettings) -> Result<()> {
    let photo_folder = &settings.storage.photo_folder;
    fs::create_dir_all(photo_folder).await?;
    info!("Photo folder: {}", photo_folder.display());

    let orphaned: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM photo WHERE storage_path IS NULL")
            .fetch_one(pool)
            .await?;
    if orphaned > 0 {
        warn!("{} photos have no stored file.", orphaned);
    }
    Ok(())
}
