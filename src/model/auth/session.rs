use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::common::{Role, User};

/// The single admin credential pair. Kept out of the report domain and
/// compared as-is; there is no account database behind it.
#[derive(Clone)]
pub struct AdminAccount {
    id: String,
    password: String,
}

impl AdminAccount {
    pub fn new(id: &str, password: &str) -> Self {
        Self {
            id: id.to_string(),
            password: password.to_string(),
        }
    }

    pub fn verify(&self, id: &str, password: &str) -> bool {
        self.id == id && self.password == password
    }
}

/// What a caller presents to log in.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Credentials {
    #[serde(rename_all = "camelCase")]
    Admin { admin_id: String, password: String },
    User {
        username: String,
        phone: String,
        /// Accepted but never checked.
        #[serde(default)]
        password: String,
    },
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid admin credentials")]
    InvalidAdminCredentials,
}

/// Establish an identity from credentials. Only the admin path can fail.
pub fn authenticate(credentials: Credentials, admin: &AdminAccount) -> Result<User, AuthError> {
    match credentials {
        Credentials::Admin { admin_id, password } => {
            if admin.verify(&admin_id, &password) {
                Ok(User::admin())
            } else {
                warn!("Rejected admin login for id {admin_id:?}");
                Err(AuthError::InvalidAdminCredentials)
            }
        }
        Credentials::User {
            username, phone, ..
        } => Ok(User::citizen(username, phone)),
    }
}

/// Who the current caller is. Sessions move from `Anonymous` to
/// `Authenticated` on login and back on logout; there is nothing in between.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Session {
    /// Log in, replacing any current identity. A failed login leaves the
    /// session as it was.
    pub fn login(
        &mut self,
        credentials: Credentials,
        admin: &AdminAccount,
    ) -> Result<User, AuthError> {
        let user = authenticate(credentials, admin)?;
        *self = Self::Authenticated(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        *self = Self::Anonymous;
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|user| user.role)
    }
}


#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json::{self, json};

    use super::*;

    #[test]
    fn admin_login() {
        let mut session = Session::default();
        let user = session
            .login(Credentials::example_admin(), &AdminAccount::example())
            .unwrap();
        assert_eq!(user, User::admin());
        assert_eq!(session.role(), Some(Role::Admin));
    }

    #[test]
    fn wrong_admin_pairs_fail() {
        for (admin_id, password) in [("admin123", "wrong"), ("wrong", "admin123"), ("", "")] {
            let mut session = Session::default();
            let result = session.login(
                Credentials::Admin {
                    admin_id: admin_id.to_string(),
                    password: password.to_string(),
                },
                &AdminAccount::example(),
            );
            assert_eq!(result, Err(AuthError::InvalidAdminCredentials));
            assert_eq!(session, Session::Anonymous);
        }
    }

    #[test]
    fn failed_login_keeps_existing_session() {
        let mut session = Session::default();
        session
            .login(Credentials::example_user(), &AdminAccount::example())
            .unwrap();
        let before = session.clone();
        let bad = Credentials::Admin {
            admin_id: "admin123".to_string(),
            password: "nope".to_string(),
        };
        assert!(session.login(bad, &AdminAccount::example()).is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn user_login_is_unconditional() {
        let mut session = Session::default();
        let user = session
            .login(Credentials::example_user(), &AdminAccount::example())
            .unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.username, "alice");
        assert_eq!(user.phone, "555-0100");
        assert_eq!(user.points, Some(0));

        // Same username again is simply another identity.
        let again = authenticate(Credentials::example_user(), &AdminAccount::example()).unwrap();
        assert_ne!(again.id, user.id);
    }

    #[test]
    fn logout_returns_to_anonymous() {
        let mut session = Session::default();
        session
            .login(Credentials::example_admin(), &AdminAccount::example())
            .unwrap();
        assert!(session.is_authenticated());
        session.logout();
        assert_eq!(session, Session::Anonymous);
        assert_eq!(session.role(), None);
    }

    #[test]
    fn credentials_from_json() {
        let credentials: Credentials = serde_json::from_value(json!({
            "role": "admin",
            "adminId": "admin123",
            "password": "admin123",
        }))
        .unwrap();
        assert!(matches!(credentials, Credentials::Admin { .. }));

        let credentials: Credentials = serde_json::from_value(json!({
            "role": "user",
            "username": "bob",
            "phone": "1",
        }))
        .unwrap();
        assert!(matches!(credentials, Credentials::User { .. }));
    }
}
