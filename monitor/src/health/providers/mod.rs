//! Public chain head providers
//!
//! Every explorer or public node API is wrapped in a [`ChainHeadProvider`].
//! Which provider serves a coin is decided once, from the `[providers]` table
//! of the configuration, by [`build_provider`].

mod cosmos;
mod esplora;
mod ethereum;
mod sochain;
mod solana;

pub use cosmos::CosmosRpcProvider;
pub use esplora::EsploraProvider;
pub use ethereum::EthereumRpcProvider;
pub use sochain::SochainProvider;
pub use solana::SolanaRpcProvider;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use super::types::{CoinNetwork, JsonRpcResponse, Network};
use crate::config::{ProviderConfig, ProviderKind};

/// Capability: fetch the current canonical block height for a coin/network
#[async_trait]
pub trait ChainHeadProvider: Send + Sync {
    /// Identifier written into readings as their source
    fn name(&self) -> &str;

    async fn fetch_chain_head(&self, target: &CoinNetwork) -> Result<u64>;
}

/// Base URL of a provider per network
#[derive(Debug, Clone)]
pub struct NetworkUrls {
    mainnet: Option<String>,
    testnet: Option<String>,
}

impl NetworkUrls {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            mainnet: config.url_for(Network::Mainnet).map(trim_url),
            testnet: config.url_for(Network::Testnet).map(trim_url),
        }
    }

    pub fn get(&self, target: &CoinNetwork) -> Result<&str> {
        let url = match target.network {
            Network::Mainnet => self.mainnet.as_deref(),
            Network::Testnet => self.testnet.as_deref(),
        };
        url.ok_or_else(|| anyhow!("No provider URL configured for {}", target))
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Build the provider for one coin from its static configuration
pub fn build_provider(
    client: &HttpClient,
    config: &ProviderConfig,
    request_timeout: Duration,
) -> Arc<dyn ChainHeadProvider> {
    let urls = NetworkUrls::from_config(config);
    let client = client.clone();

    match config.kind {
        ProviderKind::Sochain => Arc::new(SochainProvider::new(client, urls, request_timeout)),
        ProviderKind::Esplora => Arc::new(EsploraProvider::new(client, urls, request_timeout)),
        ProviderKind::Cosmos => Arc::new(CosmosRpcProvider::new(client, urls, request_timeout)),
        ProviderKind::Solana => Arc::new(SolanaRpcProvider::new(client, urls, request_timeout)),
        ProviderKind::Ethereum => {
            Arc::new(EthereumRpcProvider::new(client, urls, request_timeout))
        }
    }
}

/// GET `url` and return the response body, failing on non-2xx
async fn get_text(client: &HttpClient, url: &str, request_timeout: Duration) -> Result<String> {
    let response = timeout(request_timeout, client.get(url).send())
        .await
        .map_err(|_| anyhow!("Request to {} timed out", url))?
        .map_err(|e| anyhow!("HTTP request to {} failed: {}", url, e))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "HTTP error {}: {}",
            response.status(),
            response.text().await.unwrap_or_default()
        ));
    }

    response
        .text()
        .await
        .map_err(|e| anyhow!("Failed to read response from {}: {}", url, e))
}

/// Issue a JSON-RPC 2.0 call and return its `result`
async fn json_rpc_call(
    client: &HttpClient,
    url: &str,
    method: &str,
    request_timeout: Duration,
) -> Result<Value> {
    let request_body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": []
    });

    let response = timeout(request_timeout, client.post(url).json(&request_body).send())
        .await
        .map_err(|_| anyhow!("{} request timeout", method))?
        .map_err(|e| anyhow!("{} HTTP request failed: {}", method, e))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "HTTP error {}: {}",
            response.status(),
            response.text().await.unwrap_or_default()
        ));
    }

    let rpc_response: JsonRpcResponse = response
        .json()
        .await
        .map_err(|e| anyhow!("Failed to parse {} JSON response: {}", method, e))?;

    if let Some(error) = rpc_response.error {
        return Err(anyhow!("RPC Error {}: {}", error.code, error.message));
    }

    rpc_response
        .result
        .ok_or_else(|| anyhow!("{} response carried no result", method))
}
