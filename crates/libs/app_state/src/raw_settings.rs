use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub database: DatabaseSettings,
    pub storage: RawStorageSettings,
    pub logging: LoggingSettings,
    pub constants: RawConstants,
}

/// Database connection and pool configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// `SQLite` connection string, e.g. `sqlite://sharing.db`.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a free connection.
    pub acquire_timeout: u64,
    /// Seconds before an idle connection is closed.
    pub idle_timeout: u64,
}

/// Where uploaded photo files are written, as read from the settings file.
#[derive(Debug, Deserialize, Clone)]
pub struct RawStorageSettings {
    pub photo_folder: PathBuf,
    /// Size in bytes of each read/write while streaming an upload to disk.
    pub chunk_size: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConstants {
    /// Length of generated `id` to use for albums in database.
    pub album_id_length: usize,
}
