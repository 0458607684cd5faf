//! Esplora REST API (Blockstream, mempool.space)

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;

use super::{get_text, ChainHeadProvider, NetworkUrls};
use crate::health::types::CoinNetwork;

pub struct EsploraProvider {
    client: HttpClient,
    urls: NetworkUrls,
    request_timeout: Duration,
}

impl EsploraProvider {
    pub fn new(client: HttpClient, urls: NetworkUrls, request_timeout: Duration) -> Self {
        Self {
            client,
            urls,
            request_timeout,
        }
    }
}

#[async_trait]
impl ChainHeadProvider for EsploraProvider {
    fn name(&self) -> &str {
        "esplora"
    }

    async fn fetch_chain_head(&self, target: &CoinNetwork) -> Result<u64> {
        let url = format!("{}/blocks/tip/height", self.urls.get(target)?);
        let body = get_text(&self.client, &url, self.request_timeout).await?;

        body.trim()
            .parse::<u64>()
            .map_err(|e| anyhow!("Invalid tip height '{}': {}", body.trim(), e))
    }
}
