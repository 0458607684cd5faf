//! Ethereum-compatible JSON-RPC `eth_blockNumber`

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;

use super::{json_rpc_call, ChainHeadProvider, NetworkUrls};
use crate::health::types::CoinNetwork;

pub struct EthereumRpcProvider {
    client: HttpClient,
    urls: NetworkUrls,
    request_timeout: Duration,
}

impl EthereumRpcProvider {
    pub fn new(client: HttpClient, urls: NetworkUrls, request_timeout: Duration) -> Self {
        Self {
            client,
            urls,
            request_timeout,
        }
    }
}

#[async_trait]
impl ChainHeadProvider for EthereumRpcProvider {
    fn name(&self) -> &str {
        "ethereum-rpc"
    }

    async fn fetch_chain_head(&self, target: &CoinNetwork) -> Result<u64> {
        let url = self.urls.get(target)?;
        let result =
            json_rpc_call(&self.client, url, "eth_blockNumber", self.request_timeout).await?;

        let quantity = result
            .as_str()
            .ok_or_else(|| anyhow!("Unexpected eth_blockNumber format: {}", result))?;

        parse_hex_quantity(quantity)
    }
}

/// Parse a JSON-RPC hex quantity such as `0x1b4`
fn parse_hex_quantity(quantity: &str) -> Result<u64> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| anyhow!("Quantity '{}' is missing the 0x prefix", quantity))?;

    u64::from_str_radix(digits, 16)
        .map_err(|e| anyhow!("Invalid hex quantity '{}': {}", quantity, e))
}
