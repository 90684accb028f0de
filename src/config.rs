use crate::cli::{validate_address, DEFAULT_ADDRESS};
use crate::dashboard::{DeleteReconcile, SyncPolicy, UpdateGuard};
use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Environment variable holding the `<host>:<port>` of the server
pub const ADDRESS_VAR: &str = "FOOD_DASHBOARD_ADDRESS";
/// Environment variable selecting the update guard (`intended` or `legacy`)
pub const UPDATE_GUARD_VAR: &str = "FOOD_DASHBOARD_UPDATE_GUARD";
/// Environment variable selecting the delete policy (`confirmed` or `optimistic`)
pub const DELETE_VAR: &str = "FOOD_DASHBOARD_DELETE";
/// Environment variable with the SQLite file used by the server
pub const DB_VAR: &str = "FOOD_DASHBOARD_DB";

/// Settings shared by the client and the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub address: String,
    pub policy: SyncPolicy,
    /// In-memory database when unset
    pub database: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: DEFAULT_ADDRESS.to_string(),
            policy: SyncPolicy::default(),
            database: None,
        }
    }
}

impl Config {
    /// Load `.env` if there is one, then read the process environment
    pub fn from_env() -> Result<Config> {
        Self::from_env_with_target(None)
    }

    /// Same as `from_env`, but an address given on the command line replaces
    /// `FOOD_DASHBOARD_ADDRESS`, which is then neither read nor validated
    pub fn from_env_with_target(target: Option<String>) -> Result<Config> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => {}
            Err(err) => tracing::warn!(error = %err, "failed to load .env"),
        }
        Self::from_lookup_with_target(|key| std::env::var(key).ok(), target)
    }

    /// Build the configuration from any key lookup. Unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_target(lookup, None)
    }

    pub fn from_lookup_with_target<F>(lookup: F, target: Option<String>) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        match target {
            Some(target) => config.address = target,
            None => {
                if let Some(address) = lookup(ADDRESS_VAR) {
                    config.address = validate_address(address.trim())
                        .map_err(|err| Error::Config(format!("{}: {}", ADDRESS_VAR, err)))?
                        .to_string();
                }
            }
        }
        if let Some(guard) = lookup(UPDATE_GUARD_VAR) {
            config.policy.update_guard = guard.parse::<UpdateGuard>()?;
        }
        if let Some(delete) = lookup(DELETE_VAR) {
            config.policy.delete_reconcile = delete.parse::<DeleteReconcile>()?;
        }
        config.database = lookup(DB_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}
