//! In-process chain head providers for driving the aggregator

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use monitor::health::{ChainHeadProvider, CoinNetwork};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Always reports the same height
pub struct StaticProvider {
    pub height: u64,
}

#[async_trait]
impl ChainHeadProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_chain_head(&self, _target: &CoinNetwork) -> Result<u64> {
        Ok(self.height)
    }
}

/// Height per coin/network pair
pub struct MappedProvider {
    pub heights: HashMap<CoinNetwork, u64>,
}

#[async_trait]
impl ChainHeadProvider for MappedProvider {
    fn name(&self) -> &str {
        "mapped"
    }

    async fn fetch_chain_head(&self, target: &CoinNetwork) -> Result<u64> {
        self.heights
            .get(target)
            .copied()
            .ok_or_else(|| anyhow!("no height for {}", target))
    }
}

/// Always fails, counting calls
#[derive(Default)]
pub struct FailingProvider {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ChainHeadProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch_chain_head(&self, _target: &CoinNetwork) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("explorer unreachable"))
    }
}

/// Tracks how many fetches run at once
pub struct CountingProvider {
    pub height: u64,
    pub delay: Duration,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(height: u64, delay: Duration) -> Self {
        Self {
            height,
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChainHeadProvider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    async fn fetch_chain_head(&self, _target: &CoinNetwork) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.height)
    }
}

/// Never answers within any reasonable deadline
pub struct HangingProvider;

#[async_trait]
impl ChainHeadProvider for HangingProvider {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn fetch_chain_head(&self, _target: &CoinNetwork) -> Result<u64> {
        sleep(Duration::from_secs(3600)).await;
        Ok(0)
    }
}

/// Wrap a provider for the aggregator's coin map
pub fn shared<P: ChainHeadProvider + 'static>(provider: P) -> Arc<dyn ChainHeadProvider> {
    Arc::new(provider)
}

/// Aggregator over `config` with injected providers and a plain HTTP indexer client
pub fn build_aggregator(
    config: monitor::Config,
    providers: Vec<(&str, Arc<dyn ChainHeadProvider>)>,
) -> monitor::StatusAggregator {
    use monitor::health::{ChainHeadClient, IndexerClient};
    use monitor::retry::RetryPolicy;

    let retry = RetryPolicy::from_config(&config.retry);
    let indexer = IndexerClient::new(
        reqwest::Client::new(),
        config.request_timeout(),
        retry.clone(),
    );
    let chain_heads = providers
        .into_iter()
        .map(|(coin, provider)| (coin.to_string(), ChainHeadClient::new(provider, retry.clone())))
        .collect();

    monitor::StatusAggregator::new(Arc::new(config), indexer, chain_heads)
}
