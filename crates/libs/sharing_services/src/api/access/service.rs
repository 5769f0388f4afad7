//! Album visibility rules and the mutations that feed them.
//!
//! Every check reads contributors, friendships and group memberships fresh
//! from the store; nothing is cached between calls.

use crate::api::error::SharingError;
use crate::api::friendship::service::are_friends;
use crate::api::group::service::is_member;
use crate::database::album::album::{AccessType, Album};
use crate::database::album_store::AlbumStore;
use crate::database::friend_group::FriendGroup;
use crate::database::friend_group_store::FriendGroupStore;
use crate::database::profile::Profile;
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

/// Fetches an album without any permission check.
pub(crate) async fn find_album(pool: &SqlitePool, album_id: &str) -> Result<Album, SharingError> {
    AlbumStore::find_by_id(pool, album_id)
        .await?
        .ok_or_else(|| SharingError::NotFound(format!("Album {album_id}")))
}

/// Parses a raw access type as sent by a client.
pub fn parse_access_type(raw: i64) -> Result<AccessType, SharingError> {
    AccessType::try_from(raw)
        .map_err(|value| SharingError::BadRequest(format!("Invalid access type: {value}")))
}

/// Owner first, then contributors in the order they were added.
async fn owner_and_contributors(
    pool: &SqlitePool,
    album: &Album,
) -> Result<Vec<i64>, SharingError> {
    let mut ids = vec![album.owner_id];
    ids.extend(
        AlbumStore::list_contributors(pool, &album.id)
            .await?
            .into_iter()
            .map(|profile| profile.id),
    );
    Ok(ids)
}

/// Decides whether `viewer_id` may see `album` and its photos.
///
/// Rules are evaluated in order and the first match wins:
/// 1. public albums are visible to everyone, anonymous viewers included;
/// 2. the owner and contributors always see the album;
/// 3. `AllFriends` albums are visible to confirmed friends of the owner or of
///    any contributor;
/// 4. `Groups` albums are visible to members of any attached group.
///
/// Tiers do not fall through: a `Groups` album is not visible to friends who
/// are outside its groups.
#[instrument(skip(pool, album), fields(album_id = %album.id, access_type = %album.access_type))]
pub async fn can_view(
    pool: &SqlitePool,
    viewer_id: Option<i64>,
    album: &Album,
) -> Result<bool, SharingError> {
    if album.access_type == AccessType::Public {
        return Ok(true);
    }
    let Some(viewer_id) = viewer_id else {
        return Ok(false);
    };

    if can_write(pool, viewer_id, album).await? {
        return Ok(true);
    }

    match album.access_type {
        AccessType::AllFriends => {
            for profile_id in owner_and_contributors(pool, album).await? {
                if are_friends(pool, viewer_id, profile_id, true).await? {
                    debug!("Viewer is a friend of {}.", profile_id);
                    return Ok(true);
                }
            }
        }
        AccessType::Groups => {
            for group_id in AlbumStore::list_group_ids(pool, &album.id).await? {
                if is_member(pool, group_id, viewer_id).await? {
                    debug!("Viewer is in group {}.", group_id);
                    return Ok(true);
                }
            }
        }
        AccessType::Public | AccessType::Private => {}
    }

    Ok(false)
}

/// Whether `actor_id` may add to or edit the album: its owner or a contributor.
#[instrument(skip(pool, album), fields(album_id = %album.id))]
pub async fn can_write(
    pool: &SqlitePool,
    actor_id: i64,
    album: &Album,
) -> Result<bool, SharingError> {
    if actor_id == album.owner_id {
        return Ok(true);
    }
    Ok(AlbumStore::is_contributor(pool, &album.id, actor_id).await?)
}

/// Changes the visibility tier. Only the owner can do this.
#[instrument(skip(pool))]
pub async fn set_access_type(
    pool: &SqlitePool,
    caller_id: i64,
    album_id: &str,
    access_type: AccessType,
) -> Result<Album, SharingError> {
    let album = find_album(pool, album_id).await?;
    if album.owner_id != caller_id {
        warn!("Profile {} tried to change access of album {}.", caller_id, album_id);
        return Err(SharingError::PermissionDenied(
            "Only the album owner can change its access type.".to_string(),
        ));
    }

    Ok(AlbumStore::update_access_type(pool, album_id, access_type).await?)
}

/// Makes `contributor_id` a contributor of the album.
///
/// The caller must be the album owner, and the contributor must be a
/// confirmed friend of the owner.
#[instrument(skip(pool))]
pub async fn add_contributor(
    pool: &SqlitePool,
    caller_id: i64,
    album_id: &str,
    contributor_id: i64,
) -> Result<(), SharingError> {
    let album = find_album(pool, album_id).await?;
    if album.owner_id != caller_id {
        return Err(SharingError::PermissionDenied(
            "Only the album owner can add contributors.".to_string(),
        ));
    }

    if !are_friends(pool, album.owner_id, contributor_id, true).await? {
        warn!(
            "Refusing contributor {} on album {}: not a confirmed friend of the owner.",
            contributor_id, album_id
        );
        return Err(SharingError::PermissionDenied(format!(
            "Profile {contributor_id} is not a confirmed friend of the album owner."
        )));
    }

    AlbumStore::add_contributor(pool, album_id, contributor_id).await?;
    Ok(())
}

#[instrument(skip(pool))]
pub async fn remove_contributor(
    pool: &SqlitePool,
    caller_id: i64,
    album_id: &str,
    contributor_id: i64,
) -> Result<(), SharingError> {
    let album = find_album(pool, album_id).await?;
    if album.owner_id != caller_id {
        return Err(SharingError::PermissionDenied(
            "Only the album owner can remove contributors.".to_string(),
        ));
    }

    let result = AlbumStore::remove_contributor(pool, album_id, contributor_id).await?;
    if result.rows_affected() == 0 {
        return Err(SharingError::NotFound(format!(
            "Profile {contributor_id} is not a contributor of album {album_id}."
        )));
    }

    Ok(())
}

/// Checks that `caller_id` owns the group and can write to the album.
async fn authorize_group_change(
    pool: &SqlitePool,
    caller_id: i64,
    album: &Album,
    group_id: i64,
) -> Result<FriendGroup, SharingError> {
    let group = FriendGroupStore::find_by_id(pool, group_id)
        .await?
        .ok_or_else(|| SharingError::NotFound(format!("Group {group_id}")))?;

    if group.owner_id != caller_id {
        return Err(SharingError::PermissionDenied(
            "Only the group owner can attach it to an album.".to_string(),
        ));
    }
    if !can_write(pool, caller_id, album).await? {
        return Err(SharingError::PermissionDenied(
            "Only the album owner or a contributor can manage its groups.".to_string(),
        ));
    }

    Ok(group)
}

/// Grants a group access to the album.
///
/// The caller must own the group and be the album owner or a contributor.
#[instrument(skip(pool))]
pub async fn add_group(
    pool: &SqlitePool,
    caller_id: i64,
    album_id: &str,
    group_id: i64,
) -> Result<(), SharingError> {
    let album = find_album(pool, album_id).await?;
    let group = authorize_group_change(pool, caller_id, &album, group_id).await?;

    AlbumStore::add_group(pool, &album.id, group.id).await?;
    Ok(())
}

#[instrument(skip(pool))]
pub async fn remove_group(
    pool: &SqlitePool,
    caller_id: i64,
    album_id: &str,
    group_id: i64,
) -> Result<(), SharingError> {
    let album = find_album(pool, album_id).await?;
    let group = authorize_group_change(pool, caller_id, &album, group_id).await?;

    let result = AlbumStore::remove_group(pool, &album.id, group.id).await?;
    if result.rows_affected() == 0 {
        return Err(SharingError::NotFound(format!(
            "Group {} is not attached to album {album_id}.",
            group.name
        )));
    }

    Ok(())
}

#[instrument(skip(pool))]
pub async fn list_contributors(
    pool: &SqlitePool,
    album_id: &str,
) -> Result<Vec<Profile>, SharingError> {
    Ok(AlbumStore::list_contributors(pool, album_id).await?)
}

#[instrument(skip(pool))]
pub async fn list_album_groups(
    pool: &SqlitePool,
    album_id: &str,
) -> Result<Vec<FriendGroup>, SharingError> {
    Ok(AlbumStore::list_groups(pool, album_id).await?)
}
