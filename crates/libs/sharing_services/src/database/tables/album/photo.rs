use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A photo inside an album. Visibility is always that of the album.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub album_id: String,
    pub uploaded_by: i64,
    pub description: Option<String>,
    /// Set once the file has been written, which needs `id` to exist first.
    pub storage_path: Option<String>,
    pub created_at: DateTime<Utc>,
}
