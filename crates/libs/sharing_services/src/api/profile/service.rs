use crate::api::error::SharingError;
use crate::database::profile::Profile;
use crate::database::profile_store::ProfileStore;
use sqlx::SqlitePool;
use tracing::instrument;

/// Registers a profile in the sharing graph. Names are unique.
#[instrument(skip(pool))]
pub async fn create_profile(pool: &SqlitePool, name: &str) -> Result<Profile, SharingError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SharingError::BadRequest(
            "Profile name cannot be empty.".to_string(),
        ));
    }

    ProfileStore::create(pool, name)
        .await
        .map_err(|e| SharingError::conflict(e, format!("Profile name {name} is already taken.")))
}

#[instrument(skip(pool))]
pub async fn get_profile(pool: &SqlitePool, profile_id: i64) -> Result<Profile, SharingError> {
    ProfileStore::find_by_id(pool, profile_id)
        .await?
        .ok_or_else(|| SharingError::NotFound(format!("Profile {profile_id}")))
}

#[instrument(skip(pool))]
pub async fn find_profile_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Profile>, SharingError> {
    Ok(ProfileStore::find_by_name(pool, name).await?)
}
