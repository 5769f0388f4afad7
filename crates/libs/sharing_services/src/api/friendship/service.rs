use crate::api::error::SharingError;
use crate::database::friendship::Friendship;
use crate::database::friendship_store::FriendshipStore;
use crate::database::profile::Profile;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, instrument, warn};

/// Sends a friend request from `requester_id` to `requestee_id`.
///
/// The new friendship starts unconfirmed. Fails with `AlreadyExists` if the two
/// profiles already have a friendship record in either direction, confirmed or
/// not. The store's pair index is what detects this.
#[instrument(skip(pool))]
pub async fn request_friendship(
    pool: &SqlitePool,
    requester_id: i64,
    requestee_id: i64,
) -> Result<Friendship, SharingError> {
    if requester_id == requestee_id {
        return Err(SharingError::BadRequest(
            "A profile cannot befriend itself.".to_string(),
        ));
    }

    let friendship = FriendshipStore::create(pool, requester_id, requestee_id)
        .await
        .map_err(|e| {
            SharingError::conflict(
                e,
                format!("Friendship between {requester_id} and {requestee_id} already exists."),
            )
        })?;

    debug!("Friend request {} created.", friendship.id);
    Ok(friendship)
}

/// Accepts the pending request that `requester_id` sent to `profile_id`.
///
/// Only the requestee can confirm, so the lookup is keyed on `profile_id` being
/// the requestee. Returns `NotFound` when there is no such unconfirmed request,
/// which includes confirming an already confirmed friendship a second time.
#[instrument(skip(pool))]
pub async fn confirm_friendship(
    pool: &SqlitePool,
    profile_id: i64,
    requester_id: i64,
) -> Result<Friendship, SharingError> {
    let Some(pending) = FriendshipStore::find_pending(pool, requester_id, profile_id).await? else {
        warn!(
            "No pending friend request from {} to {}.",
            requester_id, profile_id
        );
        return Err(SharingError::NotFound(format!(
            "Pending friend request from {requester_id}"
        )));
    };

    FriendshipStore::confirm(pool, pending.id)
        .await?
        .ok_or_else(|| {
            SharingError::NotFound(format!("Pending friend request from {requester_id}"))
        })
}

/// Whether a friendship in the given state exists between two profiles.
#[instrument(skip(executor))]
pub async fn are_friends(
    executor: impl Executor<'_, Database = Sqlite>,
    profile_a: i64,
    profile_b: i64,
    confirmed: bool,
) -> Result<bool, SharingError> {
    Ok(FriendshipStore::exists_between(executor, profile_a, profile_b, confirmed).await?)
}

/// Whether the two profiles have any friendship record, confirmed or pending.
#[instrument(skip(pool))]
pub async fn have_friendship(
    pool: &SqlitePool,
    profile_a: i64,
    profile_b: i64,
) -> Result<bool, SharingError> {
    Ok(FriendshipStore::find_between(pool, profile_a, profile_b)
        .await?
        .is_some())
}

/// All profiles connected to `profile_id` by a confirmed friendship.
#[instrument(skip(pool))]
pub async fn list_friends(
    pool: &SqlitePool,
    profile_id: i64,
) -> Result<Vec<Profile>, SharingError> {
    Ok(FriendshipStore::list_friends(pool, profile_id).await?)
}

/// Unconfirmed requests waiting for `profile_id` to accept.
#[instrument(skip(pool))]
pub async fn list_pending_requests(
    pool: &SqlitePool,
    profile_id: i64,
) -> Result<Vec<Friendship>, SharingError> {
    Ok(FriendshipStore::list_pending_for(pool, profile_id).await?)
}
