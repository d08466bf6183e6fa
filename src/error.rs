use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use log::warn;
use rocket::{http::Status, response::Responder, Request};
use thiserror::Error;

use crate::model::auth::AuthError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{1}")]
    Status(Status, String),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> Status {
        match self {
            Self::BadRequest(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
            Self::Unauthorized(_) | Self::Auth(_) => Status::Unauthorized,
            Self::Forbidden(_) => Status::Forbidden,
            Self::Jwt(err) => match err.kind() {
                JwtErrorKind::ExpiredSignature | JwtErrorKind::ImmatureSignature => {
                    Status::Unauthorized
                }
                _ => Status::BadRequest,
            },
            Self::Status(status, _) => *status,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        warn!("{self}");
        self.cache_message(req);
        Err(self.status())
    }
}

/// The message of the error that failed a request, for catchers to report.
pub struct ErrorMessage(pub Option<String>);

impl Error {
    /// Remember this error's message for the request's catcher.
    pub fn cache_message(&self, req: &Request<'_>) {
        req.local_cache(|| ErrorMessage(Some(self.to_string())));
    }
}
