//! Solana JSON-RPC `getBlockHeight`

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;

use super::{json_rpc_call, ChainHeadProvider, NetworkUrls};
use crate::health::types::CoinNetwork;

pub struct SolanaRpcProvider {
    client: HttpClient,
    urls: NetworkUrls,
    request_timeout: Duration,
}

impl SolanaRpcProvider {
    pub fn new(client: HttpClient, urls: NetworkUrls, request_timeout: Duration) -> Self {
        Self {
            client,
            urls,
            request_timeout,
        }
    }
}

#[async_trait]
impl ChainHeadProvider for SolanaRpcProvider {
    fn name(&self) -> &str {
        "solana-rpc"
    }

    async fn fetch_chain_head(&self, target: &CoinNetwork) -> Result<u64> {
        let url = self.urls.get(target)?;
        let result =
            json_rpc_call(&self.client, url, "getBlockHeight", self.request_timeout).await?;

        result
            .as_u64()
            .ok_or_else(|| anyhow!("Unexpected Solana block height format: {}", result))
    }
}
