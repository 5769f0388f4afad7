pub mod album;
pub mod friend_group;
pub mod friendship;
pub mod profile;
