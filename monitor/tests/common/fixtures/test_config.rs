//! Test configuration builder for creating configs programmatically

use monitor::config::{
    Config, ProviderConfig, ProviderKind, RetryConfig, StorageConfig, TargetConfig,
};
use monitor::health::Network;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Builder for in-memory test configurations with fast retries
pub struct TestConfigBuilder {
    config: Config,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config {
                healthy_lag_threshold: 5,
                max_concurrent_pairs: 4,
                request_timeout_seconds: 2,
                run_timeout_seconds: 30,
                retry: RetryConfig {
                    max_attempts: 3,
                    base_delay_ms: 1,
                    max_delay_ms: 5,
                },
                storage: StorageConfig::default(),
                providers: HashMap::new(),
                targets: Vec::new(),
            },
        }
    }

    pub fn threshold(mut self, blocks: u64) -> Self {
        self.config.healthy_lag_threshold = blocks;
        self
    }

    pub fn pool_size(mut self, pairs: usize) -> Self {
        self.config.max_concurrent_pairs = pairs;
        self
    }

    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.config.retry.max_attempts = attempts;
        self
    }

    pub fn run_timeout(mut self, seconds: u64) -> Self {
        self.config.run_timeout_seconds = seconds;
        self
    }

    pub fn storage_root(mut self, root: &Path) -> Self {
        self.config.storage.root = root.to_string_lossy().to_string();
        self
    }

    /// Add a monitored pair
    pub fn target(mut self, coin: &str, network: Network, indexer_url: &str) -> Self {
        self.config.targets.push(TargetConfig {
            coin: coin.to_string(),
            network,
            indexer_url: indexer_url.to_string(),
            trust_indexer_chain_head: false,
        });
        self
    }

    /// Add a pair whose indexer chain head report is trusted
    pub fn trusted_target(mut self, coin: &str, network: Network, indexer_url: &str) -> Self {
        self = self.target(coin, network, indexer_url);
        if let Some(target) = self.config.targets.last_mut() {
            target.trust_indexer_chain_head = true;
        }
        self
    }

    /// Register a provider URL for `coin` on `network`
    pub fn provider(mut self, coin: &str, kind: ProviderKind, network: Network, url: &str) -> Self {
        let entry = self
            .config
            .providers
            .entry(coin.to_string())
            .or_insert_with(|| ProviderConfig {
                kind,
                urls: HashMap::new(),
            });
        entry.kind = kind;
        entry.urls.insert(network.as_str().to_string(), url.to_string());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `content` as a config file inside `dir` and return its path
pub fn write_config_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("monitor.toml");
    fs::write(&path, content).expect("Failed to write config file");
    path
}

/// Complete configuration in the documented format
pub const SAMPLE_CONFIG_TOML: &str = r#"
healthy_lag_threshold = 3
max_concurrent_pairs = 2
request_timeout_seconds = 7
run_timeout_seconds = 60

[retry]
max_attempts = 4
base_delay_ms = 250
max_delay_ms = 2000

[storage]
root = "/var/lib/indexer-status"
prefix = "prod"
latest_key = "latest.json"
history_prefix = "history"

[providers.BTC]
kind = "sochain"
[providers.BTC.urls]
mainnet = "https://sochain.com/api/v2/get_info/BTC"
testnet = "https://sochain.com/api/v2/get_info/BTCTEST"

[providers.ETH]
kind = "ethereum"
[providers.ETH.urls]
mainnet = "https://eth.example.org"

[[targets]]
coin = "BTC"
network = "mainnet"
indexer_url = "https://www.bitgo.com/api/v2/btc/public/block/latest"

[[targets]]
coin = "BTC"
network = "testnet"
indexer_url = "https://test.bitgo.com/api/v2/tbtc/public/block/latest"
trust_indexer_chain_head = true

[[targets]]
coin = "ETH"
network = "mainnet"
indexer_url = "https://www.bitgo.com/api/v2/eth/public/block/latest"
"#;
