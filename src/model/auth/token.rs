use std::marker::PhantomData;

use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use rocket::{
    http::{Cookie, SameSite, Status},
    request::{FromRequest, Outcome},
    time::Duration,
    Request, State,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::model::common::{Role, User, UserId};

use super::{audience::Audience, session::Session};

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// An authentication token for a user belonging to audience `A`.
pub struct AuthToken<A> {
    user: User,
    phantom: PhantomData<A>,
}

impl<A> AuthToken<A> {
    /// The identity this token was issued to.
    pub fn user(&self) -> &User {
        &self.user
    }
}

impl<A> AuthToken<A>
where
    A: Audience,
{
    /// Create a new [`AuthToken`], if the user belongs to the audience.
    pub fn new(user: User) -> Option<Self> {
        A::admits(user.role).then(|| Self {
            user,
            phantom: PhantomData,
        })
    }
}

/// Serialize an identity into a signed session cookie.
pub fn session_cookie(user: &User, config: &Config) -> Cookie<'static> {
    let claims = Claims {
        id: user.id.clone(),
        username: user.username.clone(),
        phone: user.phone.clone(),
        role: user.role,
        expire_at: Utc::now() + config.auth_ttl(),
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret()),
    )
    .expect("JWT encoding is infallible with default settings");

    Cookie::build(AUTH_TOKEN_COOKIE, token)
        .max_age(Duration::seconds(config.auth_ttl().num_seconds()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .finish()
}

/// Deserialize an identity from a session cookie.
pub fn user_from_cookie(cookie: &Cookie<'_>, config: &Config) -> Result<User, Error> {
    let claims = jsonwebtoken::decode(
        cookie.value(),
        &DecodingKey::from_secret(config.jwt_secret()),
        &Validation::default(),
    )
    .map(|data: TokenData<Claims>| data.claims)?;
    Ok(User {
        id: claims.id,
        username: claims.username,
        phone: claims.phone,
        points: match claims.role {
            Role::User => Some(0),
            Role::Admin => None,
        },
        role: claims.role,
    })
}

/// Cookie claims: the identity plus an expiry datetime.
#[derive(Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "sub")]
    id: UserId,
    #[serde(rename = "usr")]
    username: String,
    #[serde(rename = "phn")]
    phone: String,
    #[serde(rename = "rgt")]
    role: Role,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

async fn session_for(req: &Request<'_>) -> Session {
    // Unwrap is safe as `Config` is always managed.
    let config = req.guard::<&State<Config>>().await.unwrap();

    req.cookies()
        .get(AUTH_TOKEN_COOKIE)
        .and_then(|cookie| user_from_cookie(cookie, config).ok())
        .map_or(Session::Anonymous, Session::Authenticated)
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = std::convert::Infallible;

    /// Decode the session cookie. Missing, expired or tampered cookies all
    /// mean an anonymous session.
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(session_for(req).await)
    }
}

#[rocket::async_trait]
impl<'r, A> FromRequest<'r> for AuthToken<A>
where
    A: Audience + Send,
{
    type Error = Error;

    /// Get an [`AuthToken`] from the session cookie and verify that its user
    /// belongs to the audience.
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user = match session_for(req).await {
            Session::Authenticated(user) => user,
            Session::Anonymous => {
                let err = Error::Unauthorized("No valid session".to_string());
                err.cache_message(req);
                return Outcome::Failure((Status::Unauthorized, err));
            }
        };

        let role = user.role;
        match Self::new(user) {
            Some(token) => Outcome::Success(token),
            None => {
                let err = Error::Forbidden(format!("Not available to the {role} role"));
                err.cache_message(req);
                Outcome::Failure((Status::Forbidden, err))
            }
        }
    }
}
