//! Mock public chain head sources, one helper per wire format

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub struct MockExplorerServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockExplorerServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    /// SoChain `get_info` at `route`
    pub async fn mock_sochain(&self, route: &str, blocks: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": {
                    "name": "Bitcoin",
                    "acronym": "BTC",
                    "network": "BTC",
                    "blocks": blocks,
                }
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_sochain_fail_status(&self, route: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "fail",
                "data": null
            })))
            .mount(&self.server)
            .await;
    }

    /// Esplora `/blocks/tip/height` (plain text)
    pub async fn mock_esplora_tip(&self, height: u64) {
        Mock::given(method("GET"))
            .and(path("/blocks/tip/height"))
            .respond_with(ResponseTemplate::new(200).set_body_string(height.to_string()))
            .mount(&self.server)
            .await;
    }

    /// Tendermint `/status`
    pub async fn mock_cosmos_status(&self, network: &str, height: u64) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": -1,
                "result": {
                    "node_info": { "network": network, "moniker": "public-rpc" },
                    "sync_info": {
                        "latest_block_height": height.to_string(),
                        "catching_up": false
                    }
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Solana `getBlockHeight`
    pub async fn mock_solana_block_height(&self, height: u64) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "getBlockHeight" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": height
            })))
            .mount(&self.server)
            .await;
    }

    /// Ethereum `eth_blockNumber`
    pub async fn mock_eth_block_number(&self, hex_quantity: &str) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_blockNumber" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": hex_quantity
            })))
            .mount(&self.server)
            .await;
    }

    /// JSON-RPC error envelope for any POST
    pub async fn mock_rpc_error(&self, code: i64, message: &str) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": code, "message": message }
            })))
            .mount(&self.server)
            .await;
    }

    /// Every request fails with `status`
    pub async fn mock_unavailable(&self, status: u16) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}
