pub mod album_store;
pub mod friend_group_store;
pub mod friendship_store;
pub mod photo_store;
pub mod profile_store;
