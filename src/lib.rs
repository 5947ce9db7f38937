//! IPv4 subnet calculator.
//!
//! Parses address/mask input into canonical networks, splits networks into
//! subnets by prefix, host count or subnet count, and summarises address
//! ranges into minimal CIDR blocks. Everything is a pure computation over
//! 32-bit values.
//!
//! ```
//! use subnet_calc::Calculator;
//!
//! let result = Calculator::default()
//!     .compute_network("192.168.1.10", Some("24"))
//!     .unwrap();
//! assert_eq!(result.network.to_string(), "192.168.1.0/24");
//! assert_eq!(result.usable_hosts, 254);
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;

pub use calculator::{
    Calculator, NetworkInput, NetworkResult, SubnetMode, SubnetResult, SubnettingExample,
    SupernetResult,
};
pub use config::Config;
pub use error::{CalcError, Result};

/// Initialise log4rs from `config.log_config`.
///
/// Without that file, warnings and errors go to stderr so a missing log
/// config never stops a calculation.
pub fn init_logging(config: &Config) -> std::result::Result<(), Box<dyn Error>> {
    if config.log_config.exists() {
        log4rs::init_file(&config.log_config, Default::default()).map_err(|e| {
            format!(
                "Error initializing log4rs from {}: {e}",
                config.log_config.display()
            )
        })?;
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(log_config)?;
    log::debug!(
        "{} not found, logging warnings to stderr",
        config.log_config.display()
    );
    Ok(())
}
