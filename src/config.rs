//! Runtime settings read from the environment (and `.env`).

use std::error::Error;
use std::path::PathBuf;

/// Subnets materialised per result unless configured otherwise.
pub const DEFAULT_MAX_LISTED: usize = 256;
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

pub const ENV_MAX_LISTED: &str = "SUBNET_CALC_MAX_LISTED";
pub const ENV_LOG_CONFIG: &str = "SUBNET_CALC_LOG_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Upper bound on listed subnets; totals are reported regardless.
    pub max_listed: usize,
    /// log4rs YAML file used by the binary.
    pub log_config: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_listed: DEFAULT_MAX_LISTED,
            log_config: PathBuf::from(DEFAULT_LOG_CONFIG),
        }
    }
}

impl Config {
    /// Load from process environment after applying any `.env` file.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup(ENV_MAX_LISTED) {
            config.max_listed = value
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_MAX_LISTED}={value:?} is not a count: {e}"))?;
        }
        if let Some(value) = lookup(ENV_LOG_CONFIG).filter(|v| !v.trim().is_empty()) {
            config.log_config = PathBuf::from(value.trim());
        }

        log::debug!("Loaded {config:?}");
        Ok(config)
    }
}
