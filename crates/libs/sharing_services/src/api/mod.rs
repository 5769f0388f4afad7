pub mod access;
pub mod album;
pub mod error;
pub mod friendship;
pub mod group;
pub mod profile;
