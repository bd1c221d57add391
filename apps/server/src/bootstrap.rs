use std::env;
use std::path::PathBuf;
use std::time::Duration;

use apprelay_core::{AppError, AppResult};

const CONFIG_PATH_ENV: &str = "APPROVAL_RELAY_CONFIG";
const RELOAD_SECONDS_ENV: &str = "APPROVAL_RELAY_CONFIG_RELOAD_SECONDS";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
const DEFAULT_RELOAD_SECONDS: u64 = 60;

/// Process-level settings read from the environment before the deployment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayBootstrap {
    pub config_path: PathBuf,
    pub reload_interval: Duration,
}

impl RelayBootstrap {
    pub fn from_env() -> AppResult<Self> {
        Self::from_values(
            env::var(CONFIG_PATH_ENV).ok(),
            env::var(RELOAD_SECONDS_ENV).ok(),
        )
    }

    fn from_values(config_path: Option<String>, reload_seconds: Option<String>) -> AppResult<Self> {
        let config_path = config_path
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());

        let reload_seconds = match reload_seconds.filter(|value| !value.trim().is_empty()) {
            Some(value) => value.trim().parse::<u64>().map_err(|error| {
                AppError::Validation(format!("{RELOAD_SECONDS_ENV} must be a number: {error}"))
            })?,
            None => DEFAULT_RELOAD_SECONDS,
        };
        if reload_seconds == 0 {
            return Err(AppError::Validation(format!(
                "{RELOAD_SECONDS_ENV} must be greater than zero"
            )));
        }

        Ok(Self {
            config_path: PathBuf::from(config_path),
            reload_interval: Duration::from_secs(reload_seconds),
        })
    }
}
