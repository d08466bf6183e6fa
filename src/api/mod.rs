use rocket::{Catcher, Route};

mod admin;
mod auth;
mod catchers;
mod community;
mod reports;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(admin::routes());
    routes.extend(auth::routes());
    routes.extend(community::routes());
    routes.extend(reports::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    catchers::all_catchers()
}
