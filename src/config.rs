use chrono::Duration;
use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::{auth::AdminAccount, store::Store};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    #[serde(default = "defaults::auth_ttl")]
    auth_ttl: u32,
    #[serde(default = "defaults::admin_id")]
    admin_id: String,
    #[serde(default)]
    submission_delay_ms: u64,
    // secrets
    jwt_secret: String,
    #[serde(default = "defaults::admin_password")]
    admin_password: String,
}

mod defaults {
    pub fn auth_ttl() -> u32 {
        24 * 60 * 60
    }

    pub fn admin_id() -> String {
        "admin123".to_string()
    }

    pub fn admin_password() -> String {
        "admin123".to_string()
    }

    pub fn seed() -> bool {
        true
    }
}

impl Config {
    /// Valid lifetime of session cookies.
    pub fn auth_ttl(&self) -> Duration {
        Duration::seconds(self.auth_ttl.into())
    }

    /// Secret key used to sign session JWTs.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// The one admin credential pair that grants admin sessions.
    pub fn admin_account(&self) -> AdminAccount {
        AdminAccount::new(&self.admin_id, &self.admin_password)
    }

    /// Artificial latency before a report submission is stored.
    /// Zero disables it.
    pub fn submission_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.submission_delay_ms)
    }
}

/// A fairing that loads the application config and puts it in managed state.
/// This could easily be achieved using `AdHoc::config`, but is written out
/// explicitly for symmetry with the store fairing and control over error
/// messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Configuration for the store.
#[derive(Deserialize)]
struct StoreConfig {
    #[serde(default = "defaults::seed")]
    seed: bool,
}

/// A fairing that creates the report store, optionally loading the demo
/// data, and places it into managed state. Skipped if a store is already
/// managed.
pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Report store",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        if rocket.state::<Store>().is_some() {
            return Ok(rocket);
        }

        let config = match rocket.figment().extract::<StoreConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load store config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        let store = if config.seed {
            info!("Loading demo reports into the store");
            Store::seeded()
        } else {
            info!("Starting with an empty store");
            Store::empty()
        };

        // Manage the state.
        rocket = rocket.manage(store);
        Ok(rocket)
    }
}

#[cfg(test)]
mod tests {
    use rocket::figment::Figment;

    use super::*;

    #[test]
    fn defaults_apply() {
        let config: Config = Figment::new()
            .merge(("jwt_secret", "shh"))
            .extract()
            .unwrap();
        assert_eq!(config.auth_ttl(), Duration::days(1));
        assert_eq!(config.jwt_secret(), b"shh");
        assert!(config.admin_account().verify("admin123", "admin123"));
        assert!(config.submission_delay().is_zero());
    }

    #[test]
    fn jwt_secret_is_required() {
        assert!(Figment::new().extract::<Config>().is_err());
    }

    #[test]
    fn admin_pair_is_configurable() {
        let config: Config = Figment::new()
            .merge(("jwt_secret", "shh"))
            .merge(("admin_id", "root"))
            .merge(("admin_password", "hunter2"))
            .merge(("submission_delay_ms", 1500))
            .extract()
            .unwrap();
        assert!(config.admin_account().verify("root", "hunter2"));
        assert!(!config.admin_account().verify("admin123", "admin123"));
        assert_eq!(config.submission_delay().as_millis(), 1500);
    }
}
