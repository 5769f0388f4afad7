//! Storage for uploaded photo files.
//!
//! Files are addressed by a [`BlobKey`] derived from the album owner, the album
//! and the photo, and written in fixed-size chunks so memory use does not grow
//! with the upload.

use app_state::{StorageSettings, to_posix_string};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Blob not found: {0}")]
    NotFound(String),
}

/// Identifies where a photo's file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobKey {
    pub owner_id: i64,
    pub album_id: String,
    pub photo_id: i64,
}

impl BlobKey {
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        Path::new(&self.owner_id.to_string())
            .join(&self.album_id)
            .join(self.photo_id.to_string())
    }
}

pub trait BlobStore: Send + Sync {
    type Reader: AsyncRead + Unpin + Send;

    /// Streams `reader` to the location for `key` and returns the storage path
    /// to record on the photo.
    fn write<R>(
        &self,
        key: &BlobKey,
        reader: R,
    ) -> impl Future<Output = Result<String, StorageError>> + Send
    where
        R: AsyncRead + Unpin + Send;

    /// Opens a previously written blob by the storage path `write` returned.
    fn open(
        &self,
        storage_path: &str,
    ) -> impl Future<Output = Result<Self::Reader, StorageError>> + Send;
}

/// Blob store rooted at a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    chunk_size: usize,
}

impl FsBlobStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, chunk_size: usize) -> Self {
        Self {
            root: root.into(),
            chunk_size: chunk_size.max(1),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.photo_folder, settings.chunk_size)
    }
}

impl BlobStore for FsBlobStore {
    type Reader = fs::File;

    async fn write<R>(&self, key: &BlobKey, mut reader: R) -> Result<String, StorageError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let relative_path = key.relative_path();
        let destination = self.root.join(&relative_path);
        let Some(parent) = destination.parent() else {
            return Err(StorageError::InvalidPath(to_posix_string(&relative_path)));
        };
        fs::create_dir_all(parent).await?;

        // --- temp file ---
        // Removed on drop, so an aborted upload leaves nothing behind.
        let temp_path = NamedTempFile::new_in(parent)?.into_temp_path();
        let mut temp_file = fs::File::create(&temp_path).await?;
        let mut chunk = vec![0_u8; self.chunk_size];
        let mut written = 0_usize;
        loop {
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            temp_file.write_all(&chunk[..n]).await?;
            written += n;
        }
        temp_file.flush().await?;
        temp_file.sync_all().await?;
        drop(temp_file);

        // --- move temp → destination ---
        temp_path
            .persist(&destination)
            .map_err(|e| StorageError::Io(e.error))?;

        debug!("Wrote {} bytes to {}", written, destination.display());
        Ok(to_posix_string(&relative_path))
    }

    async fn open(&self, storage_path: &str) -> Result<fs::File, StorageError> {
        let root_canon = fs::canonicalize(&self.root).await?;
        let file_path = self.root.join(storage_path);
        let file_canon = match fs::canonicalize(&file_path).await {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Blob not found at path: {}", file_path.display());
                return Err(StorageError::NotFound(storage_path.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };

        if !file_canon.starts_with(&root_canon) {
            warn!("Blocked directory traversal attempt for: {}", storage_path);
            return Err(StorageError::InvalidPath(storage_path.to_owned()));
        }

        Ok(fs::File::open(&file_canon).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key() -> BlobKey {
        BlobKey {
            owner_id: 4,
            album_id: "trip".to_owned(),
            photo_id: 11,
        }
    }

    #[test]
    fn relative_path_is_owner_album_photo() {
        assert_eq!(to_posix_string(&key().relative_path()), "4/trip/11");
    }

    #[tokio::test]
    async fn writes_in_chunks_smaller_than_the_file() {
        let dir = TempDir::new().unwrap();
        let store = FsBlobStore::new(dir.path(), 3);
        let content = b"not really a jpeg, but long enough to need many chunks".to_vec();

        let storage_path = store.write(&key(), content.as_slice()).await.unwrap();
        assert_eq!(storage_path, "4/trip/11");

        let mut stored = Vec::new();
        store
            .open(&storage_path)
            .await
            .unwrap()
            .read_to_end(&mut stored)
            .await
            .unwrap();
        assert_eq!(stored, content);

        // Only the final file remains, no temp files.
        let entries = std::fs::read_dir(dir.path().join("4/trip")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn open_missing_blob_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FsBlobStore::new(dir.path(), 430);

        let result = store.open("4/trip/99").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn open_outside_root_is_rejected() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("photos");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(outer.path().join("secret.txt"), b"secret").unwrap();
        let store = FsBlobStore::new(&root, 430);

        let result = store.open("../secret.txt").await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }
}
