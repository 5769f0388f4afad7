use crate::api::access::service::{can_view, can_write, find_album};
use crate::api::error::SharingError;
use crate::blob_store::{BlobKey, BlobStore};
use crate::database::album::album::{AccessType, Album};
use crate::database::album::photo::Photo;
use crate::database::album_store::AlbumStore;
use crate::database::photo_store::PhotoStore;
use crate::utils::nice_id;
use app_state::AppSettings;
use sqlx::{Executor, Sqlite, SqlitePool};
use tokio::io::AsyncRead;
use tracing::{info, instrument, warn};

/// Creates an album owned by `owner_id`, visible to all friends by default.
///
/// Album names are unique per owner; the store's unique constraint reports a
/// duplicate as `AlreadyExists`.
#[instrument(skip(pool, settings))]
pub async fn create_album(
    pool: &SqlitePool,
    settings: &AppSettings,
    owner_id: i64,
    name: &str,
    description: Option<String>,
) -> Result<Album, SharingError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SharingError::BadRequest(
            "Album name cannot be empty.".to_string(),
        ));
    }

    let album_id = nice_id(settings.constants.album_id_length);
    let album = AlbumStore::create(
        pool,
        &album_id,
        owner_id,
        name,
        description,
        AccessType::default(),
    )
    .await
    .map_err(|e| SharingError::conflict(e, format!("Album {name} already exists.")))?;

    info!("Created album {} for profile {}.", album.id, owner_id);
    Ok(album)
}

/// Fetches an album the viewer is allowed to see.
#[instrument(skip(pool))]
pub async fn get_album(
    pool: &SqlitePool,
    viewer_id: Option<i64>,
    album_id: &str,
) -> Result<Album, SharingError> {
    let album = find_album(pool, album_id).await?;
    if !can_view(pool, viewer_id, &album).await? {
        return Err(SharingError::PermissionDenied(format!(
            "Not allowed to view album {album_id}."
        )));
    }
    Ok(album)
}

/// Lists the albums of `owner_id` that `viewer_id` is allowed to see.
#[instrument(skip(pool))]
pub async fn list_albums(
    pool: &SqlitePool,
    viewer_id: Option<i64>,
    owner_id: i64,
) -> Result<Vec<Album>, SharingError> {
    let mut visible = Vec::new();
    for album in AlbumStore::list_by_owner(pool, owner_id).await? {
        if can_view(pool, viewer_id, &album).await? {
            visible.push(album);
        }
    }
    Ok(visible)
}

/// Uploads a photo into an album. The actor must be the owner or a contributor.
///
/// The photo row is inserted first so its ID can be used in the blob key, then
/// the file is streamed to the blob store and the storage path recorded. All
/// of this happens in one transaction, so a failed upload leaves no photo row.
#[instrument(skip(pool, blob_store, reader))]
pub async fn add_photo<B, R>(
    pool: &SqlitePool,
    blob_store: &B,
    actor_id: i64,
    album_id: &str,
    description: Option<String>,
    reader: R,
) -> Result<Photo, SharingError>
where
    B: BlobStore,
    R: AsyncRead + Unpin + Send,
{
    let album = find_album(pool, album_id).await?;
    if !can_write(pool, actor_id, &album).await? {
        warn!("Profile {} may not upload to album {}.", actor_id, album_id);
        return Err(SharingError::PermissionDenied(
            "User is not album owner or contributor.".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    let photo = PhotoStore::create(&mut *tx, &album.id, actor_id, description).await?;

    let key = BlobKey {
        owner_id: album.owner_id,
        album_id: album.id.clone(),
        photo_id: photo.id,
    };
    let storage_path = blob_store.write(&key, reader).await?;
    let photo = PhotoStore::set_storage_path(&mut *tx, photo.id, &storage_path).await?;

    tx.commit().await?;
    info!("Stored photo {} at {}.", photo.id, storage_path);
    Ok(photo)
}

/// Fetches a photo if the viewer may see the album it belongs to.
#[instrument(skip(pool))]
pub async fn get_photo(
    pool: &SqlitePool,
    viewer_id: Option<i64>,
    photo_id: i64,
) -> Result<Photo, SharingError> {
    let photo = PhotoStore::find_by_id(pool, photo_id)
        .await?
        .ok_or_else(|| SharingError::NotFound(format!("Photo {photo_id}")))?;
    let album = find_album(pool, &photo.album_id).await?;

    if !can_view(pool, viewer_id, &album).await? {
        return Err(SharingError::PermissionDenied(format!(
            "Not allowed to view photo {photo_id}."
        )));
    }
    Ok(photo)
}

/// Opens the stored file of a photo the viewer may see.
#[instrument(skip(pool, blob_store))]
pub async fn open_photo<B>(
    pool: &SqlitePool,
    blob_store: &B,
    viewer_id: Option<i64>,
    photo_id: i64,
) -> Result<(Photo, B::Reader), SharingError>
where
    B: BlobStore,
{
    let photo = get_photo(pool, viewer_id, photo_id).await?;
    let Some(storage_path) = photo.storage_path.as_deref() else {
        return Err(SharingError::NotFound(format!(
            "Photo {photo_id} has no stored file."
        )));
    };
    let reader = blob_store.open(storage_path).await?;
    Ok((photo, reader))
}

/// Photos in an album. Callers must already have authorized the album.
#[instrument(skip(executor))]
pub async fn list_photos(
    executor: impl Executor<'_, Database = Sqlite>,
    album_id: &str,
) -> Result<Vec<Photo>, SharingError> {
    Ok(PhotoStore::list_by_album(executor, album_id).await?)
}

/// Changes a photo's description. The actor must be able to write to its album.
#[instrument(skip(pool))]
pub async fn update_photo_description(
    pool: &SqlitePool,
    actor_id: i64,
    photo_id: i64,
    description: Option<String>,
) -> Result<Photo, SharingError> {
    let photo = PhotoStore::find_by_id(pool, photo_id)
        .await?
        .ok_or_else(|| SharingError::NotFound(format!("Photo {photo_id}")))?;
    let album = find_album(pool, &photo.album_id).await?;

    if !can_write(pool, actor_id, &album).await? {
        return Err(SharingError::PermissionDenied(
            "User is not album owner or contributor.".to_string(),
        ));
    }

    Ok(PhotoStore::update_description(pool, photo_id, description).await?)
}
