//! Fan-out across all configured pairs and snapshot assembly
//!
//! Each pair runs as its own task. A semaphore with `max_concurrent_pairs`
//! permits acts as the worker pool, results come back over an mpsc channel
//! tagged with the pair's configuration index, and the snapshot is assembled
//! from index-addressed slots so completion order never leaks into record
//! order. The whole collection is bounded by the run deadline.

use futures::future::join;
use reqwest::Client as HttpClient;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::chain_head::ChainHeadClient;
use super::indexer::IndexerClient;
use super::providers::build_provider;
use super::types::{
    ChainHeadReading, CoinNetwork, HealthRecord, HealthState, IndexerReading, StatusSnapshot,
};
use crate::config::Config;
use crate::constants::{http, reasons};
use crate::errors::{ConfigError, MonitorError};
use crate::retry::RetryPolicy;

/// Source recorded when the indexer's own chain head report is trusted
pub const INDEXER_SELF_REPORT_SOURCE: &str = "indexer";

pub struct StatusAggregator {
    config: Arc<Config>,
    indexer: Arc<IndexerClient>,
    chain_heads: HashMap<String, ChainHeadClient>,
}

/// Everything one task needs to check one pair
struct PairJob {
    index: usize,
    target: CoinNetwork,
    indexer_url: String,
    trust_indexer_chain_head: bool,
    chain_head: ChainHeadClient,
}

impl StatusAggregator {
    pub fn new(
        config: Arc<Config>,
        indexer: IndexerClient,
        chain_heads: HashMap<String, ChainHeadClient>,
    ) -> Self {
        Self {
            config,
            indexer: Arc::new(indexer),
            chain_heads,
        }
    }

    /// Validate the configuration and build clients for every provider in it
    pub fn from_config(config: Arc<Config>) -> Result<Self, MonitorError> {
        config.validate()?;

        let client = build_http_client(&config)?;
        let retry = RetryPolicy::from_config(&config.retry);

        let chain_heads = config
            .providers
            .iter()
            .map(|(coin, provider_config)| {
                let provider = build_provider(&client, provider_config, config.request_timeout());
                (coin.clone(), ChainHeadClient::new(provider, retry.clone()))
            })
            .collect();

        let indexer = IndexerClient::new(client, config.request_timeout(), retry);

        Ok(Self::new(config, indexer, chain_heads))
    }

    /// Check every configured pair once and assemble the ordered snapshot
    pub async fn build_snapshot(&self) -> Result<StatusSnapshot, ConfigError> {
        let jobs = self.plan_jobs()?;
        let total = jobs.len();
        let threshold = self.config.healthy_lag_threshold;

        info!(
            "Checking {} pairs with up to {} in flight",
            total, self.config.max_concurrent_pairs
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_pairs));
        let (tx, mut rx) = mpsc::channel::<(usize, HealthRecord)>(total);
        let mut handles = Vec::with_capacity(total);

        for job in jobs {
            let semaphore = semaphore.clone();
            let indexer = self.indexer.clone();
            let tx = tx.clone();

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };
                let record = job.check(&indexer, threshold).await;
                if tx.send((job.index, record)).await.is_err() {
                    debug!("Result for {} arrived after collection ended", job.target);
                }
            }));
        }
        drop(tx);

        let mut slots: Vec<Option<HealthRecord>> = vec![None; total];
        let mut timed_out = false;
        let deadline = sleep(self.config.run_timeout());
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                message = rx.recv() => match message {
                    Some((index, record)) => slots[index] = Some(record),
                    None => break,
                },
                _ = &mut deadline => {
                    timed_out = true;
                    break;
                }
            }
        }

        for handle in &handles {
            handle.abort();
        }

        let missing_reason = if timed_out {
            reasons::DEADLINE_EXCEEDED
        } else {
            reasons::TASK_FAILED
        };

        let records: Vec<HealthRecord> = slots
            .into_iter()
            .zip(&self.config.targets)
            .map(|(slot, target)| {
                slot.unwrap_or_else(|| {
                    let pair = target.coin_network();
                    if timed_out {
                        warn!("No readings for {} before the run deadline", pair);
                    } else {
                        error!("Check task for {} ended without a result", pair);
                    }
                    HealthRecord::unavailable(&pair, missing_reason)
                })
            })
            .collect();

        let snapshot = StatusSnapshot::new(records, threshold);
        info!(
            "Snapshot ready: {} healthy, {} lagging, {} unknown",
            snapshot.summary.healthy, snapshot.summary.lagging, snapshot.summary.unknown
        );

        Ok(snapshot)
    }

    fn plan_jobs(&self) -> Result<Vec<PairJob>, ConfigError> {
        if self.config.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        // Pool needs at least one permit
        if self.config.max_concurrent_pairs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrent_pairs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        self.config
            .targets
            .iter()
            .enumerate()
            .map(|(index, target)| {
                let chain_head = self.chain_heads.get(&target.coin).cloned().ok_or_else(|| {
                    ConfigError::MissingProvider {
                        coin: target.coin.clone(),
                    }
                })?;

                Ok(PairJob {
                    index,
                    target: target.coin_network(),
                    indexer_url: target.indexer_url.clone(),
                    trust_indexer_chain_head: target.trust_indexer_chain_head,
                    chain_head,
                })
            })
            .collect()
    }
}

impl PairJob {
    async fn check(&self, indexer: &IndexerClient, threshold: u64) -> HealthRecord {
        let (indexer_reading, chain_head_reading) = join(
            indexer.fetch_reading(&self.target, &self.indexer_url),
            self.chain_head.fetch_reading(&self.target),
        )
        .await;

        let chain_head_reading = if self.trust_indexer_chain_head {
            trusted_chain_head(&indexer_reading).unwrap_or(chain_head_reading)
        } else {
            chain_head_reading
        };

        fold_readings(&self.target, &indexer_reading, &chain_head_reading, threshold)
    }
}

/// Chain head taken from the indexer's own report, if it made one
fn trusted_chain_head(indexer: &IndexerReading) -> Option<ChainHeadReading> {
    match indexer.height {
        Some(height) if indexer.is_success() && indexer.at_chain_head => Some(
            ChainHeadReading::success(height, INDEXER_SELF_REPORT_SOURCE, 0),
        ),
        _ => None,
    }
}

/// Lag and state for a pair of readings
///
/// Lag is only computed when both readings succeeded. It may be negative when
/// the explorer trails the indexer; such readings are healthy as long as the
/// magnitude is within the threshold.
pub fn classify(
    indexer: &IndexerReading,
    chain_head: &ChainHeadReading,
    threshold: u64,
) -> (Option<i64>, HealthState) {
    if !indexer.is_success() || !chain_head.is_success() {
        return (None, HealthState::Unknown);
    }

    match (indexer.height, chain_head.height) {
        (Some(indexer_height), Some(head_height)) => {
            let lag = (head_height as i128 - indexer_height as i128)
                .clamp(i64::MIN as i128, i64::MAX as i128) as i64;

            let state = if lag.unsigned_abs() <= threshold {
                HealthState::Healthy
            } else {
                HealthState::Lagging
            };
            (Some(lag), state)
        }
        _ => (None, HealthState::Unknown),
    }
}

pub fn fold_readings(
    target: &CoinNetwork,
    indexer: &IndexerReading,
    chain_head: &ChainHeadReading,
    threshold: u64,
) -> HealthRecord {
    let (lag, state) = classify(indexer, chain_head, threshold);

    match (state, lag) {
        (HealthState::Lagging, Some(lag)) => {
            warn!("{} is lagging by {} blocks (threshold {})", target, lag, threshold)
        }
        (HealthState::Unknown, _) => debug!("{} health unknown", target),
        _ => debug!("{} healthy (lag {:?})", target, lag),
    }

    HealthRecord {
        coin: target.coin.clone(),
        network: target.network,
        indexer_height: indexer.height,
        chain_head_height: chain_head.height,
        lag,
        state,
        indexer_error: indexer.error.clone(),
        chain_head_error: chain_head.error.clone(),
        chain_head_source: Some(chain_head.source.clone()),
        checked_at: indexer.checked_at.max(chain_head.checked_at),
    }
}

/// Shared HTTP client for indexers and providers
pub fn build_http_client(config: &Config) -> anyhow::Result<HttpClient> {
    HttpClient::builder()
        .timeout(config.request_timeout())
        .connect_timeout(http::CONNECT_TIMEOUT)
        .user_agent(http::USER_AGENT)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))
}
