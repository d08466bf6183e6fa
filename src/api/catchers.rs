use rocket::{http::Status, serde::json::Json, Catcher, Request};
use serde::Serialize;

use crate::error::ErrorMessage;

/// Body of every error response.
#[derive(Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

fn body(status: Status, req: &Request<'_>, fallback: &str) -> Json<ErrorBody> {
    let message = req
        .local_cache(|| ErrorMessage(None))
        .0
        .clone()
        .unwrap_or_else(|| fallback.to_string());
    Json(ErrorBody {
        status: status.code,
        message,
    })
}

#[catch(401)]
fn unauthorized(req: &Request) -> Json<ErrorBody> {
    body(Status::Unauthorized, req, "Please log in")
}

#[catch(403)]
fn forbidden(req: &Request) -> Json<ErrorBody> {
    body(Status::Forbidden, req, "Not available to your role")
}

#[catch(404)]
fn not_found(req: &Request) -> Json<ErrorBody> {
    body(Status::NotFound, req, "Not found")
}

#[catch(default)]
fn default(status: Status, req: &Request) -> Json<ErrorBody> {
    body(status, req, status.reason().unwrap_or("Unknown error"))
}

pub fn all_catchers() -> Vec<Catcher> {
    catchers![unauthorized, forbidden, not_found, default]
}
