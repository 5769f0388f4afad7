use crate::api::error::SharingError;
use crate::api::friendship::service::have_friendship;
use crate::database::friend_group::FriendGroup;
use crate::database::friend_group_store::FriendGroupStore;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{instrument, warn};

/// Creates a friend group for `owner_id`. Names are unique per owner.
#[instrument(skip(pool))]
pub async fn create_group(
    pool: &SqlitePool,
    owner_id: i64,
    name: &str,
) -> Result<FriendGroup, SharingError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SharingError::BadRequest(
            "Group name cannot be empty.".to_string(),
        ));
    }

    FriendGroupStore::create(pool, owner_id, name)
        .await
        .map_err(|e| SharingError::conflict(e, format!("Group {name} already exists.")))
}

/// Adds `profile_id` to one of `owner_id`'s groups.
///
/// The profile must have a friendship with the owner, pending requests count.
/// A group that does not exist and a group owned by someone else are both
/// reported as `NotFound`.
#[instrument(skip(pool))]
pub async fn add_member(
    pool: &SqlitePool,
    owner_id: i64,
    group_id: i64,
    profile_id: i64,
) -> Result<(), SharingError> {
    if !have_friendship(pool, profile_id, owner_id).await? {
        warn!(
            "Refusing to add {} to group {}: not a friend of {}.",
            profile_id, group_id, owner_id
        );
        return Err(SharingError::PermissionDenied(format!(
            "Profile {profile_id} is not a friend of the group owner."
        )));
    }

    let Some(group) = FriendGroupStore::find_owned(pool, owner_id, group_id).await? else {
        return Err(SharingError::NotFound(
            "Group not found or permission denied.".to_string(),
        ));
    };

    let result = FriendGroupStore::add_member(pool, group.id, profile_id).await?;
    if result.rows_affected() == 0 {
        return Err(SharingError::AlreadyExists(format!(
            "Profile {profile_id} is already in group {}.",
            group.name
        )));
    }

    Ok(())
}

/// Removes `profile_id` from one of `owner_id`'s groups.
#[instrument(skip(pool))]
pub async fn remove_member(
    pool: &SqlitePool,
    owner_id: i64,
    group_id: i64,
    profile_id: i64,
) -> Result<(), SharingError> {
    let Some(group) = FriendGroupStore::find_owned(pool, owner_id, group_id).await? else {
        return Err(SharingError::NotFound(
            "Group not found or permission denied.".to_string(),
        ));
    };

    let result = FriendGroupStore::remove_member(pool, group.id, profile_id).await?;
    if result.rows_affected() == 0 {
        return Err(SharingError::NotFound(format!(
            "Profile {profile_id} is not in group {}.",
            group.name
        )));
    }

    Ok(())
}

#[instrument(skip(executor))]
pub async fn is_member(
    executor: impl Executor<'_, Database = Sqlite>,
    group_id: i64,
    profile_id: i64,
) -> Result<bool, SharingError> {
    Ok(FriendGroupStore::is_member(executor, group_id, profile_id).await?)
}

#[instrument(skip(pool))]
pub async fn get_group(pool: &SqlitePool, group_id: i64) -> Result<FriendGroup, SharingError> {
    FriendGroupStore::find_by_id(pool, group_id)
        .await?
        .ok_or_else(|| SharingError::NotFound(format!("Group {group_id}")))
}

/// Groups owned by `owner_id`.
#[instrument(skip(pool))]
pub async fn list_groups(
    pool: &SqlitePool,
    owner_id: i64,
) -> Result<Vec<FriendGroup>, SharingError> {
    Ok(FriendGroupStore::list_by_owner(pool, owner_id).await?)
}

#[instrument(skip(pool))]
pub async fn list_member_ids(
    pool: &SqlitePool,
    group_id: i64,
) -> Result<Vec<i64>, SharingError> {
    Ok(FriendGroupStore::list_member_ids(pool, group_id).await?)
}
