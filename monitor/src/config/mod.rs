// File: monitor/src/config/mod.rs
pub mod manager;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::constants::{defaults, storage};
use crate::errors::ConfigError;
use crate::health::types::{CoinNetwork, Network};

pub use manager::ConfigManager;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_healthy_lag_threshold")]
    pub healthy_lag_threshold: u64,
    #[serde(default = "default_max_concurrent_pairs")]
    pub max_concurrent_pairs: usize,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_run_timeout")]
    pub run_timeout_seconds: u64,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    // Static coin -> chain head provider mapping
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    // Order here is the order of records in every snapshot
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

fn default_healthy_lag_threshold() -> u64 {
    defaults::HEALTHY_LAG_THRESHOLD
}

fn default_max_concurrent_pairs() -> usize {
    defaults::MAX_CONCURRENT_PAIRS
}

fn default_request_timeout() -> u64 {
    defaults::REQUEST_TIMEOUT_SECONDS
}

fn default_run_timeout() -> u64 {
    defaults::RUN_TIMEOUT_SECONDS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::RETRY_MAX_ATTEMPTS,
            base_delay_ms: defaults::RETRY_BASE_DELAY_MS,
            max_delay_ms: defaults::RETRY_MAX_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Local directory acting as the bucket
    pub root: String,
    /// Optional namespace prepended to every key
    pub prefix: String,
    pub latest_key: String,
    pub history_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: defaults::STORAGE_ROOT.to_string(),
            prefix: String::new(),
            latest_key: storage::LATEST_KEY.to_string(),
            history_prefix: storage::HISTORY_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Sochain,
    Esplora,
    Cosmos,
    Solana,
    Ethereum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Base URL per network tag ("mainnet", "testnet")
    pub urls: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn url_for(&self, network: Network) -> Option<&str> {
        self.urls.get(network.as_str()).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub coin: String,
    pub network: Network,
    pub indexer_url: String,
    /// Use the indexer's own height when it reports being at chain head
    #[serde(default)]
    pub trust_indexer_chain_head: bool,
}

impl TargetConfig {
    pub fn coin_network(&self) -> CoinNetwork {
        CoinNetwork::new(self.coin.clone(), self.network)
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })
    }

    /// Configured pairs in snapshot order
    pub fn coin_networks(&self) -> Vec<CoinNetwork> {
        self.targets.iter().map(TargetConfig::coin_network).collect()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_seconds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        if self.max_concurrent_pairs == 0 {
            return Err(invalid("max_concurrent_pairs", "must be at least 1"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(invalid("request_timeout_seconds", "must be at least 1"));
        }
        if self.run_timeout_seconds == 0 {
            return Err(invalid("run_timeout_seconds", "must be at least 1"));
        }
        if self.retry.max_attempts == 0 {
            return Err(invalid("retry.max_attempts", "must be at least 1"));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(invalid(
                "retry.base_delay_ms",
                "must not exceed retry.max_delay_ms",
            ));
        }
        self.storage.validate()?;

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.coin.trim().is_empty() {
                return Err(invalid("targets.coin", "must not be empty"));
            }

            let pair = target.coin_network();
            if !seen.insert(pair.clone()) {
                return Err(ConfigError::DuplicateTarget {
                    target: pair.to_string(),
                });
            }

            reqwest::Url::parse(&target.indexer_url).map_err(|e| {
                invalid(
                    &format!("targets.{}.indexer_url", pair),
                    &format!("'{}': {}", target.indexer_url, e),
                )
            })?;

            let provider =
                self.providers
                    .get(&target.coin)
                    .ok_or_else(|| ConfigError::MissingProvider {
                        coin: target.coin.clone(),
                    })?;

            let url = provider
                .url_for(target.network)
                .ok_or_else(|| ConfigError::MissingProviderUrl {
                    coin: target.coin.clone(),
                    network: target.network.to_string(),
                })?;

            reqwest::Url::parse(url).map_err(|e| {
                invalid(
                    &format!("providers.{}.urls.{}", target.coin, target.network),
                    &format!("'{}': {}", url, e),
                )
            })?;
        }

        Ok(())
    }
}

impl StorageConfig {
    /// Keys must resolve to plain relative paths, and the canonical key must
    /// not overlap the history namespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        key_segments("storage.prefix", &self.prefix, true)?;
        let latest = key_segments("storage.latest_key", &self.latest_key, false)?;
        let history = key_segments("storage.history_prefix", &self.history_prefix, false)?;

        let shared = latest.len().min(history.len());
        if latest[..shared] == history[..shared] {
            return Err(invalid(
                "storage.latest_key",
                &format!(
                    "'{}' overlaps history prefix '{}'",
                    self.latest_key, self.history_prefix
                ),
            ));
        }

        Ok(())
    }
}

/// Path segments of a storage key, outer slashes ignored
fn key_segments<'a>(
    field: &str,
    value: &'a str,
    allow_empty: bool,
) -> Result<Vec<&'a str>, ConfigError> {
    let trimmed = value.trim_matches('/');
    if trimmed.is_empty() {
        return if allow_empty {
            Ok(Vec::new())
        } else {
            Err(invalid(field, "must not be empty"))
        };
    }

    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments
        .iter()
        .any(|segment| segment.trim().is_empty() || *segment == "." || *segment == "..")
    {
        return Err(invalid(
            field,
            &format!("'{}' contains an empty, '.' or '..' segment", value),
        ));
    }

    Ok(segments)
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
