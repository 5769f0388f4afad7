use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(sqlx::Error),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(sqlx::Error),

    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let (unique, foreign_key) = match &err {
            sqlx::Error::Database(db_err) => {
                (db_err.is_unique_violation(), db_err.is_foreign_key_violation())
            }
            _ => (false, false),
        };

        if unique {
            Self::UniqueViolation(err)
        } else if foreign_key {
            Self::ForeignKeyViolation(err)
        } else {
            Self::Sqlx(err)
        }
    }
}
