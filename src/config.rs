//! Dispatch timing and search parameters.
//!
//! Production values are fixed constants. Tests shrink them through the
//! `with_*` builders; deployments may override them through `DISPATCH_*`
//! environment variables (see [`DispatchConfig::from_env`]).

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// How long a driver has to answer an offer.
pub const OFFER_TIMEOUT: Duration = Duration::from_secs(30);
/// How long a food-place has to confirm or reject an order.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);
/// Pause between assignment attempts that found or convinced no driver.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(15);
pub const MAX_ATTEMPTS: u32 = 3;
/// Radius of the nearby-driver query around the food-place.
pub const SEARCH_RADIUS_METERS: f64 = 5000.0;
/// Mailbox size of each record actor.
pub const CHANNEL_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    pub offer_timeout: Duration,
    pub confirmation_timeout: Duration,
    pub retry_interval: Duration,
    pub max_attempts: u32,
    pub search_radius_meters: f64,
    pub channel_buffer: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            offer_timeout: OFFER_TIMEOUT,
            confirmation_timeout: CONFIRMATION_TIMEOUT,
            retry_interval: RETRY_INTERVAL,
            max_attempts: MAX_ATTEMPTS,
            search_radius_meters: SEARCH_RADIUS_METERS,
            channel_buffer: CHANNEL_BUFFER,
        }
    }
}

impl DispatchConfig {
    pub fn with_offer_timeout(mut self, timeout: Duration) -> Self {
        self.offer_timeout = timeout;
        self
    }

    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_search_radius_meters(mut self, meters: f64) -> Self {
        self.search_radius_meters = meters;
        self
    }

    pub fn with_channel_buffer(mut self, buffer: usize) -> Self {
        self.channel_buffer = buffer;
        self
    }

    /// Defaults overlaid with `DISPATCH_*` environment variables, e.g.
    /// `DISPATCH_OFFER_TIMEOUT_SECS=10` or `DISPATCH_MAX_ATTEMPTS=5`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(::config::Environment::with_prefix("DISPATCH").try_parsing(true))
    }

    fn load(source: ::config::Environment) -> Result<Self, ConfigError> {
        let settings: DispatchSettings = ::config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        let config = Self::try_from(settings)?;
        tracing::debug!(?config, "Dispatch configuration loaded");
        Ok(config)
    }
}

/// Flat, serde-friendly mirror of [`DispatchConfig`].
#[derive(Debug, Deserialize)]
#[serde(default)]
struct DispatchSettings {
    offer_timeout_secs: u64,
    confirmation_timeout_secs: u64,
    retry_interval_secs: u64,
    max_attempts: u32,
    search_radius_meters: f64,
    channel_buffer: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            offer_timeout_secs: OFFER_TIMEOUT.as_secs(),
            confirmation_timeout_secs: CONFIRMATION_TIMEOUT.as_secs(),
            retry_interval_secs: RETRY_INTERVAL.as_secs(),
            max_attempts: MAX_ATTEMPTS,
            search_radius_meters: SEARCH_RADIUS_METERS,
            channel_buffer: CHANNEL_BUFFER,
        }
    }
}

impl TryFrom<DispatchSettings> for DispatchConfig {
    type Error = ConfigError;

    fn try_from(s: DispatchSettings) -> Result<Self, ConfigError> {
        if s.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        if s.channel_buffer == 0 {
            return Err(ConfigError::Invalid("channel_buffer must be at least 1".into()));
        }
        if s.search_radius_meters.is_nan() || s.search_radius_meters <= 0.0 {
            return Err(ConfigError::Invalid(
                "search_radius_meters must be positive".into(),
            ));
        }
        Ok(Self {
            offer_timeout: Duration::from_secs(s.offer_timeout_secs),
            confirmation_timeout: Duration::from_secs(s.confirmation_timeout_secs),
            retry_interval: Duration::from_secs(s.retry_interval_secs),
            max_attempts: s.max_attempts,
            search_radius_meters: s.search_radius_meters,
            channel_buffer: s.channel_buffer,
        })
    }
}
