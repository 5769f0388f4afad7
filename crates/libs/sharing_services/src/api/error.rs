use crate::blob_store::StorageError;
use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Result type shared by every sharing operation.
#[derive(Debug, Error)]
pub enum SharingError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

impl SharingError {
    /// Maps a store error, reporting a unique violation as `AlreadyExists(message)`.
    pub fn conflict(err: DbError, message: impl Into<String>) -> Self {
        match err {
            DbError::UniqueViolation(_) => Self::AlreadyExists(message.into()),
            other => other.into(),
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn log_error(error: &SharingError) {
    match error {
        SharingError::Database(e) => warn!("Database query failed: {}", e),
        SharingError::Storage(e) => warn!("Blob storage failed: {}", e),
        SharingError::Internal(e) => warn!("Internal error: {:?}", e),
        SharingError::NotFound(message) => warn!("Not found: {}", message),
        SharingError::AlreadyExists(message) => warn!("Conflict: {}", message),
        SharingError::PermissionDenied(message) => warn!("Forbidden: {}", message),
        SharingError::BadRequest(message) => warn!("Bad Request: {}", message),
    }
}

impl IntoResponse for SharingError {
    fn into_response(self) -> Response {
        log_error(&self);

        let status = self.status_code();
        let error_message = match self {
            Self::Database(_) => "A database error occurred.".to_string(),
            Self::Storage(StorageError::NotFound(_)) => "Photo file not found.".to_string(),
            Self::Storage(_) | Self::Internal(_) => {
                "An unexpected internal error occurred.".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for SharingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) => Self::AlreadyExists(sql_err.to_string()),
            DbError::ForeignKeyViolation(_) => {
                Self::NotFound("referenced profile, album or group".into())
            }
            DbError::Sqlx(sql_err) => {
                if matches!(sql_err, sqlx::Error::RowNotFound) {
                    Self::NotFound("row not found".into())
                } else {
                    Self::Database(sql_err)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        let cases = [
            (SharingError::NotFound("album".into()), StatusCode::NOT_FOUND),
            (
                SharingError::AlreadyExists("album".into()),
                StatusCode::CONFLICT,
            ),
            (
                SharingError::PermissionDenied("album".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                SharingError::BadRequest("album".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                SharingError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn missing_rows_become_not_found() {
        let error = SharingError::from(DbError::Sqlx(sqlx::Error::RowNotFound));
        assert!(matches!(error, SharingError::NotFound(_)));
    }

    #[test]
    fn non_unique_errors_pass_through_conflict() {
        let error = SharingError::conflict(DbError::Sqlx(sqlx::Error::PoolTimedOut), "taken");
        assert!(matches!(error, SharingError::Database(_)));
    }
}
