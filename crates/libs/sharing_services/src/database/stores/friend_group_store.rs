use crate::database::friend_group::FriendGroup;
use crate::database::DbError;
use chrono::Utc;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Executor, Sqlite};

pub struct FriendGroupStore;

impl FriendGroupStore {
    //================================================================================
    // Core Group Management
    //================================================================================

    /// Creates a new group. Group names are unique per owner.
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: i64,
        name: &str,
    ) -> Result<FriendGroup, DbError> {
        Ok(sqlx::query_as::<_, FriendGroup>(
            r"
            INSERT INTO friend_group (owner_id, name, created_at)
            VALUES ($1, $2, $3)
            RETURNING *
            ",
        )
        .bind(owner_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        group_id: i64,
    ) -> Result<Option<FriendGroup>, DbError> {
        Ok(
            sqlx::query_as::<_, FriendGroup>("SELECT * FROM friend_group WHERE id = $1")
                .bind(group_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Retrieves a group only if it is owned by `owner_id`.
    pub async fn find_owned(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: i64,
        group_id: i64,
    ) -> Result<Option<FriendGroup>, DbError> {
        Ok(sqlx::query_as::<_, FriendGroup>(
            "SELECT * FROM friend_group WHERE id = $1 AND owner_id = $2",
        )
        .bind(group_id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn list_by_owner(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: i64,
    ) -> Result<Vec<FriendGroup>, DbError> {
        Ok(sqlx::query_as::<_, FriendGroup>(
            r"
            SELECT * FROM friend_group
            WHERE owner_id = $1
            ORDER BY name, id
            ",
        )
        .bind(owner_id)
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Group Membership
    //================================================================================

    /// Adds a member. `rows_affected() == 0` means they were already in the group.
    pub async fn add_member(
        executor: impl Executor<'_, Database = Sqlite>,
        group_id: i64,
        profile_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query(
            r"
            INSERT INTO friend_group_member (group_id, profile_id, added_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (group_id, profile_id) DO NOTHING
            ",
        )
        .bind(group_id)
        .bind(profile_id)
        .bind(Utc::now())
        .execute(executor)
        .await?)
    }

    pub async fn remove_member(
        executor: impl Executor<'_, Database = Sqlite>,
        group_id: i64,
        profile_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM friend_group_member WHERE group_id = $1 AND profile_id = $2")
                .bind(group_id)
                .bind(profile_id)
                .execute(executor)
                .await?,
        )
    }

    pub async fn is_member(
        executor: impl Executor<'_, Database = Sqlite>,
        group_id: i64,
        profile_id: i64,
    ) -> Result<bool, DbError> {
        Ok(sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM friend_group_member
                WHERE group_id = $1 AND profile_id = $2
            )
            ",
        )
        .bind(group_id)
        .bind(profile_id)
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves the profile IDs of all members of a group.
    pub async fn list_member_ids(
        executor: impl Executor<'_, Database = Sqlite>,
        group_id: i64,
    ) -> Result<Vec<i64>, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            r"
            SELECT profile_id FROM friend_group_member
            WHERE group_id = $1
            ORDER BY added_at, profile_id
            ",
        )
        .bind(group_id)
        .fetch_all(executor)
        .await?)
    }
}
