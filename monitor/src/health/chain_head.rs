//! Chain head readings from public providers

use super::providers::ChainHeadProvider;
use super::types::{ChainHeadReading, CoinNetwork};
use crate::retry::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, warn};

/// Wraps one provider with the retry policy and turns errors into readings
#[derive(Clone)]
pub struct ChainHeadClient {
    provider: Arc<dyn ChainHeadProvider>,
    retry: RetryPolicy,
}

impl ChainHeadClient {
    pub fn new(provider: Arc<dyn ChainHeadProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    pub fn source(&self) -> &str {
        self.provider.name()
    }

    pub async fn fetch_reading(&self, target: &CoinNetwork) -> ChainHeadReading {
        let label = format!("Chain head check for {} via {}", target, self.source());
        let outcome = self
            .retry
            .run(&label, || self.provider.fetch_chain_head(target))
            .await;

        match outcome.result {
            Ok(height) => {
                debug!("Chain head for {} is {} ({})", target, height, self.source());
                ChainHeadReading::success(height, self.source(), outcome.attempts)
            }
            Err(e) => {
                warn!(
                    "Chain head for {} unavailable from {}: {}",
                    target,
                    self.source(),
                    e
                );
                ChainHeadReading::failure(self.source(), e.to_string(), outcome.attempts)
            }
        }
    }
}
