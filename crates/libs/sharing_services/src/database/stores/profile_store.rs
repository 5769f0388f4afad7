use crate::database::profile::Profile;
use crate::database::DbError;
use chrono::Utc;
use sqlx::{Executor, Sqlite};

pub struct ProfileStore;

impl ProfileStore {
    /// Creates a new profile with a unique name.
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        name: &str,
    ) -> Result<Profile, DbError> {
        Ok(sqlx::query_as::<_, Profile>(
            r"
            INSERT INTO profile (name, created_at)
            VALUES ($1, $2)
            RETURNING *
            ",
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves a single profile by its ID.
    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        profile_id: i64,
    ) -> Result<Option<Profile>, DbError> {
        Ok(
            sqlx::query_as::<_, Profile>("SELECT * FROM profile WHERE id = $1")
                .bind(profile_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn find_by_name(
        executor: impl Executor<'_, Database = Sqlite>,
        name: &str,
    ) -> Result<Option<Profile>, DbError> {
        Ok(
            sqlx::query_as::<_, Profile>("SELECT * FROM profile WHERE name = $1")
                .bind(name)
                .fetch_optional(executor)
                .await?,
        )
    }
}
