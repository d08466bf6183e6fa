use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    auth::{Credentials, Session},
    common::{Role, User},
};

/// Admin sign-in form.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLogin {
    pub admin_id: String,
    pub password: String,
}

impl From<AdminLogin> for Credentials {
    fn from(login: AdminLogin) -> Self {
        Credentials::Admin {
            admin_id: login.admin_id,
            password: login.password,
        }
    }
}

/// Citizen sign-in (or sign-up, which is the same thing) form.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub username: String,
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

impl UserLogin {
    /// Turn the form into credentials, rejecting blank required fields.
    pub fn validate(self) -> Result<Credentials> {
        if self.username.trim().is_empty() {
            return Err(Error::BadRequest("Username must not be empty".to_string()));
        }
        if self.phone.trim().is_empty() {
            return Err(Error::BadRequest("Phone must not be empty".to_string()));
        }
        Ok(Credentials::User {
            username: self.username.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password,
        })
    }
}

/// The current session, as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    #[serde(with = "optional_role_name")]
    pub role: Option<Role>,
}

impl From<Session> for SessionState {
    fn from(session: Session) -> Self {
        let role = session.role();
        match session {
            Session::Authenticated(user) => Self {
                is_authenticated: true,
                user: Some(user),
                role,
            },
            Session::Anonymous => Self {
                is_authenticated: false,
                user: None,
                role: None,
            },
        }
    }
}

mod optional_role_name {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::model::common::{user::role_name, Role};

    #[derive(Serialize, Deserialize)]
    struct Named(#[serde(with = "role_name")] Role);

    pub fn serialize<S: Serializer>(role: &Option<Role>, serializer: S) -> Result<S::Ok, S::Error> {
        role.map(Named).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Role>, D::Error> {
        Ok(Option::<Named>::deserialize(deserializer)?.map(|named| named.0))
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl AdminLogin {
        pub fn example() -> Self {
            Self {
                admin_id: "admin123".into(),
                password: "admin123".into(),
            }
        }

        pub fn empty() -> Self {
            Self {
                admin_id: "".into(),
                password: "".into(),
            }
        }
    }

    impl UserLogin {
        pub fn example() -> Self {
            Self {
                username: "alice".into(),
                phone: "555-0100".into(),
                password: "secret".into(),
            }
        }

        pub fn example2() -> Self {
            Self {
                username: "bob".into(),
                phone: "555-0111".into(),
                password: "".into(),
            }
        }
    }
}
