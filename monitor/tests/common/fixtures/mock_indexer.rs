//! Mock indexer status endpoint
//!
//! Simulates `GET /api/v2/{coin}/public/block/latest` without a real indexer.

use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub struct MockIndexerServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockIndexerServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    pub fn path_for(coin: &str) -> String {
        format!("/api/v2/{}/public/block/latest", coin.to_lowercase())
    }

    /// Full endpoint URL for a coin
    pub fn url_for(&self, coin: &str) -> String {
        format!("{}{}", self.base_url, Self::path_for(coin))
    }

    /// Indexer at `height`
    pub async fn mock_height(&self, coin: &str, height: u64) {
        Mock::given(method("GET"))
            .and(path(Self::path_for(coin)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "height": height,
                "id": "0000000000000000000a1b2c",
            })))
            .mount(&self.server)
            .await;
    }

    /// Indexer reporting the height as a decimal string and its chain head flag
    pub async fn mock_height_with_chain_head(&self, coin: &str, height: u64, chain_head: bool) {
        Mock::given(method("GET"))
            .and(path(Self::path_for(coin)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "height": height.to_string(),
                "chainHead": chain_head,
            })))
            .mount(&self.server)
            .await;
    }

    /// Indexer failing with `status` on every call, expecting exactly `calls` calls
    pub async fn mock_failure(&self, coin: &str, status: u16, calls: u64) {
        Mock::given(method("GET"))
            .and(path(Self::path_for(coin)))
            .respond_with(ResponseTemplate::new(status).set_body_string("indexer unavailable"))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// First call fails with 503, later calls return `height`
    pub async fn mock_flaky_then_height(&self, coin: &str, height: u64) {
        Mock::given(method("GET"))
            .and(path(Self::path_for(coin)))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path(Self::path_for(coin)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "height": height })))
            .with_priority(2)
            .mount(&self.server)
            .await;
    }

    /// Indexer answering with a body that has no usable height
    pub async fn mock_malformed(&self, coin: &str) {
        Mock::given(method("GET"))
            .and(path(Self::path_for(coin)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "height": "tip" })))
            .mount(&self.server)
            .await;
    }

    /// Indexer that answers only after `delay`
    pub async fn mock_slow(&self, coin: &str, height: u64, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(Self::path_for(coin)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "height": height }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }
}
