//! Custom error types for the indexer monitor
//!
//! Per-reading failures never surface here: they are folded into `unknown`
//! records. Only configuration and publish failures reach the invoker.

use std::fmt;

/// Main error type returned to the invoker of a run
#[derive(Debug)]
pub enum MonitorError {
    /// Configuration is empty or malformed; nothing was fetched
    Config(ConfigError),

    /// Snapshot could not be fully published
    Publish(PublishError),

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to read configuration file
    LoadFailed { path: String, reason: String },

    /// Configuration parsing error
    ParseError { reason: String },

    /// No targets configured
    NoTargets,

    /// Same coin/network listed twice
    DuplicateTarget { target: String },

    /// Target coin has no chain head provider
    MissingProvider { coin: String },

    /// Provider has no URL for the requested network
    MissingProviderUrl { coin: String, network: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

/// Publish error variants
#[derive(Debug, Clone, PartialEq)]
pub enum PublishError {
    /// Snapshot could not be encoded; nothing was written
    SerializationFailed { reason: String },

    /// History entry could not be written; latest pointer untouched
    HistoryWriteFailed { key: String, reason: String },

    /// History entry is durable but the latest pointer is stale
    PointerUpdateFailed {
        history_key: String,
        latest_key: String,
        reason: String,
    },
}

impl MonitorError {
    /// True when some data was durably written but the run still failed
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            MonitorError::Publish(PublishError::PointerUpdateFailed { .. })
        )
    }
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Config(e) => write!(f, "Configuration error: {}", e),
            MonitorError::Publish(e) => write!(f, "Publish error: {}", e),
            MonitorError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
            ConfigError::NoTargets => write!(f, "No coin/network targets configured"),
            ConfigError::DuplicateTarget { target } => {
                write!(f, "Target '{}' is configured more than once", target)
            }
            ConfigError::MissingProvider { coin } => {
                write!(f, "No chain head provider configured for coin '{}'", coin)
            }
            ConfigError::MissingProviderUrl { coin, network } => {
                write!(
                    f,
                    "Chain head provider for '{}' has no URL for network '{}'",
                    coin, network
                )
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::SerializationFailed { reason } => {
                write!(f, "Failed to serialize snapshot: {}", reason)
            }
            PublishError::HistoryWriteFailed { key, reason } => {
                write!(f, "Failed to write history entry '{}': {}", key, reason)
            }
            PublishError::PointerUpdateFailed {
                history_key,
                latest_key,
                reason,
            } => {
                write!(
                    f,
                    "History '{}' written but '{}' was not updated: {}",
                    history_key, latest_key, reason
                )
            }
        }
    }
}

impl std::error::Error for MonitorError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for PublishError {}

// Conversions from anyhow::Error for gradual migration
impl From<anyhow::Error> for MonitorError {
    fn from(err: anyhow::Error) -> Self {
        MonitorError::Other(err.to_string())
    }
}

impl From<ConfigError> for MonitorError {
    fn from(err: ConfigError) -> Self {
        MonitorError::Config(err)
    }
}

impl From<PublishError> for MonitorError {
    fn from(err: PublishError) -> Self {
        MonitorError::Publish(err)
    }
}
