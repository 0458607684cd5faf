//! SoChain explorer (`/api/v2/get_info/{NETWORK}`)

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;

use super::{get_text, ChainHeadProvider, NetworkUrls};
use crate::health::types::{CoinNetwork, SochainResponse};

pub struct SochainProvider {
    client: HttpClient,
    urls: NetworkUrls,
    request_timeout: Duration,
}

impl SochainProvider {
    pub fn new(client: HttpClient, urls: NetworkUrls, request_timeout: Duration) -> Self {
        Self {
            client,
            urls,
            request_timeout,
        }
    }
}

#[async_trait]
impl ChainHeadProvider for SochainProvider {
    fn name(&self) -> &str {
        "sochain"
    }

    async fn fetch_chain_head(&self, target: &CoinNetwork) -> Result<u64> {
        let url = self.urls.get(target)?;
        let body = get_text(&self.client, url, self.request_timeout).await?;

        let response: SochainResponse = serde_json::from_str(&body)
            .map_err(|e| anyhow!("Failed to parse SoChain response: {}", e))?;

        if response.status != "success" {
            return Err(anyhow!("SoChain returned status '{}'", response.status));
        }

        response
            .data
            .map(|info| info.blocks)
            .ok_or_else(|| anyhow!("SoChain response carried no data"))
    }
}
