// config.rs

use crate::cli::Args;
use log::{debug, LevelFilter};
use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Endpoint name the Launchpad Pro exposes for standalone mode.
pub const DEFAULT_DEVICE_NAME: &str = "Standalone Port";
pub const DEFAULT_CLIENT_NAME: &str = "Launchpad Pro Simulator";
pub const DEFAULT_TICK_INTERVAL_US: u64 = 1000;

#[derive(Debug)]
pub enum SettingsError {
    /// The settings could not be assembled
    Source(::config::ConfigError),
    /// A value was present but unusable
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Source(e) => write!(f, "settings error: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid setting: {}", msg),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SettingsError::Source(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<::config::ConfigError> for SettingsError {
    fn from(e: ::config::ConfigError) -> Self {
        SettingsError::Source(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub device_name: String,
    pub client_name: String,
    pub tick_interval: Duration,
    pub log_level: LevelFilter,
}

impl Settings {
    /// Built-in defaults overridden by whatever was given on the command line.
    pub fn from_args(args: &Args) -> Result<Self, SettingsError> {
        let tick_override = args
            .tick_interval_us
            .map(|us| {
                i64::try_from(us)
                    .map_err(|_| SettingsError::Invalid(format!("tick interval {}us", us)))
            })
            .transpose()?;

        let cfg = ::config::Config::builder()
            .set_default("device_name", DEFAULT_DEVICE_NAME)?
            .set_default("client_name", DEFAULT_CLIENT_NAME)?
            .set_default("tick_interval_us", DEFAULT_TICK_INTERVAL_US as i64)?
            .set_default("verbosity", 0i64)?
            .set_override_option("device_name", args.device.clone())?
            .set_override_option("client_name", args.client_name.clone())?
            .set_override_option("tick_interval_us", tick_override)?
            .set_override("verbosity", i64::from(args.verbose))?
            .build()?;

        let device_name = cfg.get_string("device_name")?;
        if device_name.trim().is_empty() {
            return Err(SettingsError::Invalid("device name is empty".into()));
        }

        let tick_us = cfg.get_int("tick_interval_us")?;
        if tick_us <= 0 {
            return Err(SettingsError::Invalid(format!(
                "tick interval must be positive, got {}us",
                tick_us
            )));
        }

        let settings = Settings {
            device_name,
            client_name: cfg.get_string("client_name")?,
            tick_interval: Duration::from_micros(tick_us as u64),
            log_level: level_for_verbosity(cfg.get_int("verbosity")?),
        };
        debug!("Settings: {:?}", settings);
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            tick_interval: Duration::from_micros(DEFAULT_TICK_INTERVAL_US),
            log_level: LevelFilter::Warn,
        }
    }
}

fn level_for_verbosity(verbosity: i64) -> LevelFilter {
    match verbosity {
        i64::MIN..=0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
