use crate::{AppConstants, DatabaseSettings, LoggingSettings, RawSettings};
use color_eyre::Result;
use serde::Deserialize;
use std::path::{PathBuf, absolute};

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub constants: AppConstants,
}

/// Resolved blob storage settings, `photo_folder` is always absolute.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub photo_folder: PathBuf,
    pub chunk_size: usize,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = color_eyre::Report;

    fn try_from(raw: RawSettings) -> Result<Self> {
        let photo_folder = absolute(&raw.storage.photo_folder)?;
        let storage = StorageSettings {
            photo_folder,
            chunk_size: raw.storage.chunk_size.max(1),
        };

        Ok(Self {
            database: raw.database,
            storage,
            logging: raw.logging,
            constants: raw.constants.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RawConstants, RawStorageSettings};

    fn raw_settings(photo_folder: &str, chunk_size: usize) -> RawSettings {
        RawSettings {
            database: DatabaseSettings {
                url: "sqlite::memory:".to_owned(),
                max_connections: 1,
                min_connections: 1,
                acquire_timeout: 5,
                idle_timeout: 60,
            },
            storage: RawStorageSettings {
                photo_folder: PathBuf::from(photo_folder),
                chunk_size,
            },
            logging: LoggingSettings {
                level: "info".to_owned(),
            },
            constants: RawConstants { album_id_length: 2 },
        }
    }

    #[test]
    fn photo_folder_is_made_absolute() {
        let settings = AppSettings::try_from(raw_settings("userphotos", 430)).unwrap();
        assert!(settings.storage.photo_folder.is_absolute());
        assert!(settings.storage.photo_folder.ends_with("userphotos"));
        assert_eq!(settings.storage.chunk_size, 430);
    }

    #[test]
    fn degenerate_values_are_clamped() {
        let settings = AppSettings::try_from(raw_settings("userphotos", 0)).unwrap();
        assert_eq!(settings.storage.chunk_size, 1);
        assert_eq!(settings.constants.album_id_length, 6);
    }
}
