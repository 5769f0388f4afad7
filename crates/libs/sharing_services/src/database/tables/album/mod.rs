pub mod album;
pub mod photo;
