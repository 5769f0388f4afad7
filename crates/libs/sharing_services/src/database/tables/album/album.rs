use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::fmt::Display;

/// Visibility tier of an album, ordered from widest to narrowest audience.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    sqlx::Type,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[repr(i32)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    Public = 1,
    #[default]
    AllFriends = 2,
    Groups = 3,
    Private = 4,
}

impl AccessType {
    pub const ALL: [Self; 4] = [Self::Public, Self::AllFriends, Self::Groups, Self::Private];
}

impl TryFrom<i64> for AccessType {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Public),
            2 => Ok(Self::AllFriends),
            3 => Ok(Self::Groups),
            4 => Ok(Self::Private),
            other => Err(other),
        }
    }
}

impl Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::AllFriends => "all_friends",
            Self::Groups => "groups",
            Self::Private => "private",
        };
        f.write_str(s)
    }
}

/// Represents a single album in the database.
///
/// Contributors and attached groups live in their own tables and are read
/// fresh whenever access is evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub access_type: AccessType,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::AccessType;

    #[test]
    fn access_types_are_totally_ordered() {
        assert!(AccessType::Public < AccessType::AllFriends);
        assert!(AccessType::AllFriends < AccessType::Groups);
        assert!(AccessType::Groups < AccessType::Private);
    }

    #[test]
    fn default_is_all_friends() {
        assert_eq!(AccessType::default(), AccessType::AllFriends);
    }

    #[test]
    fn raw_values_outside_range_are_rejected() {
        for access_type in AccessType::ALL {
            assert_eq!(AccessType::try_from(access_type as i64), Ok(access_type));
        }
        assert_eq!(AccessType::try_from(0), Err(0));
        assert_eq!(AccessType::try_from(5), Err(5));
    }
}
