#![allow(dead_code)]

use app_state::{
    AppConstants, AppSettings, DatabaseSettings, LoggingSettings, StorageSettings,
};
use color_eyre::Result;
use sharing_services::api::friendship::service::{confirm_friendship, request_friendship};
use sharing_services::api::profile::service::create_profile;
use sharing_services::blob_store::FsBlobStore;
use sharing_services::database::run_migrations;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tempfile::TempDir;

/// A fresh in-memory database and photo folder per test.
pub struct TestContext {
    pub pool: SqlitePool,
    pub settings: AppSettings,
    pub blob_store: FsBlobStore,
    _photo_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        // One connection that never gets recycled, otherwise the in-memory
        // database disappears between queries.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        run_migrations(&pool).await?;

        let photo_dir = TempDir::new()?;
        let settings = AppSettings {
            database: DatabaseSettings {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
                acquire_timeout: 5,
                idle_timeout: 300,
            },
            storage: StorageSettings {
                photo_folder: photo_dir.path().to_path_buf(),
                chunk_size: 7,
            },
            logging: LoggingSettings {
                level: "debug".to_string(),
            },
            constants: AppConstants {
                album_id_length: 10,
            },
        };
        let blob_store = FsBlobStore::from_settings(&settings.storage);

        Ok(Self {
            pool,
            settings,
            blob_store,
            _photo_dir: photo_dir,
        })
    }

    pub async fn profile(&self, name: &str) -> Result<i64> {
        Ok(create_profile(&self.pool, name).await?.id)
    }

    /// Sends a request from `a` to `b` and has `b` accept it.
    pub async fn befriend(&self, a: i64, b: i64) -> Result<()> {
        request_friendship(&self.pool, a, b).await?;
        confirm_friendship(&self.pool, b, a).await?;
        Ok(())
    }
}
