use crate::database::album::album::{AccessType, Album};
use crate::database::friend_group::FriendGroup;
use crate::database::profile::Profile;
use crate::database::DbError;
use chrono::Utc;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Executor, Sqlite};

pub struct AlbumStore;

impl AlbumStore {
    //================================================================================
    // Core Album Management
    //================================================================================

    /// Creates a new album. Fails with a unique violation if the owner already
    /// has an album with this name.
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        owner_id: i64,
        name: &str,
        description: Option<String>,
        access_type: AccessType,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            INSERT INTO album (id, owner_id, name, description, access_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(album_id)
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(access_type)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves a single album by its ID.
    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<Option<Album>, DbError> {
        Ok(
            sqlx::query_as::<_, Album>("SELECT * FROM album WHERE id = $1")
                .bind(album_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Retrieves all albums owned by a profile, oldest first.
    pub async fn list_by_owner(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: i64,
    ) -> Result<Vec<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            SELECT * FROM album
            WHERE owner_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(owner_id)
        .fetch_all(executor)
        .await?)
    }

    pub async fn update_access_type(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        access_type: AccessType,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            UPDATE album
            SET access_type = $1
            WHERE id = $2
            RETURNING *
            ",
        )
        .bind(access_type)
        .bind(album_id)
        .fetch_one(executor)
        .await?)
    }

    //================================================================================
    // Album Contributor Management
    //================================================================================

    /// Adds a contributor. Re-adding an existing contributor is a no-op.
    pub async fn add_contributor(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        profile_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query(
            r"
            INSERT INTO album_contributor (album_id, profile_id, added_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (album_id, profile_id) DO NOTHING
            ",
        )
        .bind(album_id)
        .bind(profile_id)
        .bind(Utc::now())
        .execute(executor)
        .await?)
    }

    pub async fn remove_contributor(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        profile_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM album_contributor WHERE album_id = $1 AND profile_id = $2")
                .bind(album_id)
                .bind(profile_id)
                .execute(executor)
                .await?,
        )
    }

    pub async fn is_contributor(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        profile_id: i64,
    ) -> Result<bool, DbError> {
        Ok(sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM album_contributor
                WHERE album_id = $1 AND profile_id = $2
            )
            ",
        )
        .bind(album_id)
        .bind(profile_id)
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves the contributor profiles of an album, in the order they were added.
    pub async fn list_contributors(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<Vec<Profile>, DbError> {
        Ok(sqlx::query_as::<_, Profile>(
            r"
            SELECT p.*
            FROM album_contributor ac
            JOIN profile p ON ac.profile_id = p.id
            WHERE ac.album_id = $1
            ORDER BY ac.added_at, p.id
            ",
        )
        .bind(album_id)
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Album Group Management
    //================================================================================

    /// Attaches a friend group to an album. Re-attaching is a no-op.
    pub async fn add_group(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        group_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query(
            r"
            INSERT INTO album_group (album_id, group_id, added_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (album_id, group_id) DO NOTHING
            ",
        )
        .bind(album_id)
        .bind(group_id)
        .bind(Utc::now())
        .execute(executor)
        .await?)
    }

    pub async fn remove_group(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        group_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM album_group WHERE album_id = $1 AND group_id = $2")
                .bind(album_id)
                .bind(group_id)
                .execute(executor)
                .await?,
        )
    }

    /// Retrieves the IDs of all groups attached to an album.
    pub async fn list_group_ids(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<Vec<i64>, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            r"
            SELECT group_id FROM album_group
            WHERE album_id = $1
            ORDER BY added_at, group_id
            ",
        )
        .bind(album_id)
        .fetch_all(executor)
        .await?)
    }

    /// Retrieves the groups attached to an album.
    pub async fn list_groups(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<Vec<FriendGroup>, DbError> {
        Ok(sqlx::query_as::<_, FriendGroup>(
            r"
            SELECT fg.*
            FROM album_group ag
            JOIN friend_group fg ON ag.group_id = fg.id
            WHERE ag.album_id = $1
            ORDER BY ag.added_at, fg.id
            ",
        )
        .bind(album_id)
        .fetch_all(executor)
        .await?)
    }
}
