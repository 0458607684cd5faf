//! Internal indexer status checking

use super::types::{parse_height, CoinNetwork, IndexerReading, IndexerStatusResponse};
use crate::retry::RetryPolicy;
use anyhow::{anyhow, Result};
use reqwest::Client as HttpClient;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Latest processed height as reported by an indexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexerStatus {
    pub height: u64,
    pub at_chain_head: bool,
}

pub struct IndexerClient {
    client: HttpClient,
    request_timeout: Duration,
    retry: RetryPolicy,
}

impl IndexerClient {
    pub fn new(client: HttpClient, request_timeout: Duration, retry: RetryPolicy) -> Self {
        Self {
            client,
            request_timeout,
            retry,
        }
    }

    /// Query the indexer for `target`. Failures come back inside the reading.
    pub async fn fetch_reading(&self, target: &CoinNetwork, endpoint: &str) -> IndexerReading {
        let label = format!("Indexer check for {}", target);
        let outcome = self
            .retry
            .run(&label, || {
                fetch_indexer_status(&self.client, endpoint, self.request_timeout)
            })
            .await;

        match outcome.result {
            Ok(status) => {
                debug!(
                    "Indexer {} at height {} (chain head reported: {})",
                    target, status.height, status.at_chain_head
                );
                IndexerReading::success(status.height, status.at_chain_head, outcome.attempts)
            }
            Err(e) => {
                warn!("Indexer {} unavailable: {}", target, e);
                IndexerReading::failure(e.to_string(), outcome.attempts)
            }
        }
    }
}

/// Fetch the indexer's latest block via its status endpoint
pub async fn fetch_indexer_status(
    client: &HttpClient,
    endpoint: &str,
    request_timeout: Duration,
) -> Result<IndexerStatus> {
    let response = timeout(request_timeout, client.get(endpoint).send())
        .await
        .map_err(|_| anyhow!("Indexer request timeout"))?
        .map_err(|e| anyhow!("Indexer HTTP request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "HTTP error {}: {}",
            response.status(),
            response.text().await.unwrap_or_default()
        ));
    }

    let body: IndexerStatusResponse = response
        .json()
        .await
        .map_err(|e| anyhow!("Failed to parse indexer response: {}", e))?;

    let height = parse_height(&body.height)
        .ok_or_else(|| anyhow!("Invalid indexer block height: {}", body.height))?;

    Ok(IndexerStatus {
        height,
        at_chain_head: body.chain_head,
    })
}
