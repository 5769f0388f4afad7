use crate::RawConstants;
use serde::Deserialize;

const MIN_ALBUM_ID_LENGTH: usize = 6;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConstants {
    pub album_id_length: usize,
}

impl From<RawConstants> for AppConstants {
    fn from(raw: RawConstants) -> Self {
        Self {
            album_id_length: raw.album_id_length.max(MIN_ALBUM_ID_LENGTH),
        }
    }
}
