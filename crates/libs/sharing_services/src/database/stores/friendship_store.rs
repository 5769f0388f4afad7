use crate::database::friendship::Friendship;
use crate::database::profile::Profile;
use crate::database::DbError;
use chrono::Utc;
use sqlx::{Executor, Sqlite};

pub struct FriendshipStore;

impl FriendshipStore {
    /// Creates an unconfirmed friendship. The pair index rejects a second
    /// record for the same two profiles in either direction.
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        requester_id: i64,
        requestee_id: i64,
    ) -> Result<Friendship, DbError> {
        Ok(sqlx::query_as::<_, Friendship>(
            r"
            INSERT INTO friendship (requester_id, requestee_id, confirmed, created_at)
            VALUES ($1, $2, FALSE, $3)
            RETURNING *
            ",
        )
        .bind(requester_id)
        .bind(requestee_id)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?)
    }

    /// Finds the friendship between two profiles, whichever of them sent the request.
    pub async fn find_between(
        executor: impl Executor<'_, Database = Sqlite>,
        profile_a: i64,
        profile_b: i64,
    ) -> Result<Option<Friendship>, DbError> {
        Ok(sqlx::query_as::<_, Friendship>(
            r"
            SELECT * FROM friendship
            WHERE (requester_id = $1 AND requestee_id = $2)
               OR (requester_id = $2 AND requestee_id = $1)
            ",
        )
        .bind(profile_a)
        .bind(profile_b)
        .fetch_optional(executor)
        .await?)
    }

    /// Finds an unconfirmed request sent by `requester_id` to `requestee_id`.
    pub async fn find_pending(
        executor: impl Executor<'_, Database = Sqlite>,
        requester_id: i64,
        requestee_id: i64,
    ) -> Result<Option<Friendship>, DbError> {
        Ok(sqlx::query_as::<_, Friendship>(
            r"
            SELECT * FROM friendship
            WHERE requester_id = $1 AND requestee_id = $2 AND confirmed = FALSE
            ",
        )
        .bind(requester_id)
        .bind(requestee_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Marks a pending friendship as confirmed. Returns `None` if it was
    /// confirmed in the meantime.
    pub async fn confirm(
        executor: impl Executor<'_, Database = Sqlite>,
        friendship_id: i64,
    ) -> Result<Option<Friendship>, DbError> {
        Ok(sqlx::query_as::<_, Friendship>(
            r"
            UPDATE friendship
            SET confirmed = TRUE, confirmed_at = $1
            WHERE id = $2 AND confirmed = FALSE
            RETURNING *
            ",
        )
        .bind(Utc::now())
        .bind(friendship_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Whether a friendship in the given state exists between two profiles.
    pub async fn exists_between(
        executor: impl Executor<'_, Database = Sqlite>,
        profile_a: i64,
        profile_b: i64,
        confirmed: bool,
    ) -> Result<bool, DbError> {
        Ok(sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM friendship
                WHERE ((requester_id = $1 AND requestee_id = $2)
                    OR (requester_id = $2 AND requestee_id = $1))
                  AND confirmed = $3
            )
            ",
        )
        .bind(profile_a)
        .bind(profile_b)
        .bind(confirmed)
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves every profile connected to `profile_id` by a confirmed friendship.
    pub async fn list_friends(
        executor: impl Executor<'_, Database = Sqlite>,
        profile_id: i64,
    ) -> Result<Vec<Profile>, DbError> {
        Ok(sqlx::query_as::<_, Profile>(
            r"
            SELECT p.*
            FROM friendship f
            JOIN profile p
              ON (f.requester_id = $1 AND p.id = f.requestee_id)
              OR (f.requestee_id = $1 AND p.id = f.requester_id)
            WHERE f.confirmed = TRUE
            ORDER BY p.name, p.id
            ",
        )
        .bind(profile_id)
        .fetch_all(executor)
        .await?)
    }

    /// Retrieves unconfirmed requests waiting for `requestee_id` to answer.
    pub async fn list_pending_for(
        executor: impl Executor<'_, Database = Sqlite>,
        requestee_id: i64,
    ) -> Result<Vec<Friendship>, DbError> {
        Ok(sqlx::query_as::<_, Friendship>(
            r"
            SELECT * FROM friendship
            WHERE requestee_id = $1 AND confirmed = FALSE
            ORDER BY created_at, id
            ",
        )
        .bind(requestee_id)
        .fetch_all(executor)
        .await?)
    }
}
