#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

use crate::config::{ConfigFairing, StoreFairing};
use crate::logging::LoggerFairing;
use crate::model::store::Store;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;

/// Assemble the server: routes, catchers, logging, config, and a store
/// created according to the config.
pub fn build() -> Rocket<Build> {
    assemble(rocket::build()).attach(StoreFairing)
}

/// Assemble the server around an existing store.
pub fn rocket_for_store(store: Store) -> Rocket<Build> {
    #[cfg(not(test))]
    let rocket = rocket::build();
    // Tests must not depend on a local `Rocket.toml`.
    #[cfg(test)]
    let rocket = rocket::custom(
        rocket::Config::figment()
            .merge(("jwt_secret", "test secret, not for production"))
            .merge(("admin_id", "admin123"))
            .merge(("admin_password", "admin123"))
            .merge(("submission_delay_ms", 0)),
    );

    assemble(rocket).manage(store)
}

fn assemble(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", api::routes())
        .register("/", api::catchers())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
}
