//! Tendermint / CometBFT RPC `/status`

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::time::Duration;

use super::{get_text, ChainHeadProvider, NetworkUrls};
use crate::health::types::CoinNetwork;

pub struct CosmosRpcProvider {
    client: HttpClient,
    urls: NetworkUrls,
    request_timeout: Duration,
}

impl CosmosRpcProvider {
    pub fn new(client: HttpClient, urls: NetworkUrls, request_timeout: Duration) -> Self {
        Self {
            client,
            urls,
            request_timeout,
        }
    }
}

#[async_trait]
impl ChainHeadProvider for CosmosRpcProvider {
    fn name(&self) -> &str {
        "cosmos-rpc"
    }

    async fn fetch_chain_head(&self, target: &CoinNetwork) -> Result<u64> {
        let status_url = format!("{}/status", self.urls.get(target)?);
        let body = get_text(&self.client, &status_url, self.request_timeout).await?;

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| anyhow!("Failed to parse RPC status response: {}", e))?;

        // result.sync_info.latest_block_height
        let height_str = json["result"]["sync_info"]["latest_block_height"]
            .as_str()
            .ok_or_else(|| anyhow!("Block height not found in RPC response"))?;

        height_str
            .parse::<u64>()
            .map_err(|e| anyhow!("Invalid block height '{}': {}", height_str, e))
    }
}
