use crate::database::album::photo::Photo;
use crate::database::DbError;
use chrono::Utc;
use sqlx::{Executor, Sqlite};

pub struct PhotoStore;

impl PhotoStore {
    /// Inserts a photo record without a storage path. The path can only be
    /// computed once the store has assigned the photo its ID.
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
        uploaded_by: i64,
        description: Option<String>,
    ) -> Result<Photo, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            INSERT INTO photo (album_id, uploaded_by, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(album_id)
        .bind(uploaded_by)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?)
    }

    pub async fn set_storage_path(
        executor: impl Executor<'_, Database = Sqlite>,
        photo_id: i64,
        storage_path: &str,
    ) -> Result<Photo, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            UPDATE photo
            SET storage_path = $1
            WHERE id = $2
            RETURNING *
            ",
        )
        .bind(storage_path)
        .bind(photo_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn update_description(
        executor: impl Executor<'_, Database = Sqlite>,
        photo_id: i64,
        description: Option<String>,
    ) -> Result<Photo, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            UPDATE photo
            SET description = $1
            WHERE id = $2
            RETURNING *
            ",
        )
        .bind(description)
        .bind(photo_id)
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves a single photo by its ID.
    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        photo_id: i64,
    ) -> Result<Option<Photo>, DbError> {
        Ok(
            sqlx::query_as::<_, Photo>("SELECT * FROM photo WHERE id = $1")
                .bind(photo_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Retrieves all photos in an album, in upload order.
    pub async fn list_by_album(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: &str,
    ) -> Result<Vec<Photo>, DbError> {
        Ok(sqlx::query_as::<_, Photo>(
            r"
            SELECT * FROM photo
            WHERE album_id = $1
            ORDER BY id
            ",
        )
        .bind(album_id)
        .fetch_all(executor)
        .await?)
    }
}
