use std::fmt::Display;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// User IDs are opaque strings.
pub type UserId = String;

/// ID of the single synthetic admin identity.
pub const ADMIN_USER_ID: &str = "admin1";
/// Username of the single synthetic admin identity.
pub const ADMIN_USERNAME: &str = "Administrator";

/// Privilege levels. Serialized as a single digit inside session tokens.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Role {
    User = 0,
    Admin = 1,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

/// An identity established at login. Lives only as long as the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub phone: String,
    #[serde(with = "role_name")]
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl User {
    /// A citizen identity with a freshly generated ID.
    pub fn citizen(username: String, phone: String) -> Self {
        Self {
            id: generate_user_id(),
            username,
            phone,
            role: Role::User,
            points: Some(0),
        }
    }

    /// The fixed admin identity.
    pub fn admin() -> Self {
        Self {
            id: ADMIN_USER_ID.to_string(),
            username: ADMIN_USERNAME.to_string(),
            phone: String::new(),
            role: Role::Admin,
            points: None,
        }
    }
}

#[cfg(test)]
impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Generate a random user ID: 16 lowercase hex digits.
fn generate_user_id() -> UserId {
    let id: u64 = rand::thread_rng().gen();
    format!("{id:016x}")
}

/// Roles are numeric inside tokens but named in API responses.
pub mod role_name {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::Role;

    pub fn serialize<S: Serializer>(role: &Role, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(role.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Role, D::Error> {
        match String::deserialize(deserializer)?.as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(D::Error::unknown_variant(other, &["user", "admin"])),
        }
    }
}
