//! Health monitoring types and snapshot structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network tag of a monitored coin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One monitoring unit: a coin on a network
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinNetwork {
    pub coin: String,
    pub network: Network,
}

impl CoinNetwork {
    pub fn new(coin: impl Into<String>, network: Network) -> Self {
        Self {
            coin: coin.into(),
            network,
        }
    }
}

impl fmt::Display for CoinNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.coin, self.network)
    }
}

/// Result of querying the internal indexer for one pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerReading {
    pub height: Option<u64>,
    /// Indexer reported it is at chain head
    pub at_chain_head: bool,
    pub checked_at: DateTime<Utc>,
    pub error: Option<String>,
    pub attempts: u32,
}

impl IndexerReading {
    pub fn success(height: u64, at_chain_head: bool, attempts: u32) -> Self {
        Self {
            height: Some(height),
            at_chain_head,
            checked_at: Utc::now(),
            error: None,
            attempts,
        }
    }

    pub fn failure(reason: impl Into<String>, attempts: u32) -> Self {
        Self {
            height: None,
            at_chain_head: false,
            checked_at: Utc::now(),
            error: Some(reason.into()),
            attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.height.is_some()
    }
}

/// Result of querying a public chain head source for one pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainHeadReading {
    pub height: Option<u64>,
    pub source: String,
    pub checked_at: DateTime<Utc>,
    pub error: Option<String>,
    pub attempts: u32,
}

impl ChainHeadReading {
    pub fn success(height: u64, source: impl Into<String>, attempts: u32) -> Self {
        Self {
            height: Some(height),
            source: source.into(),
            checked_at: Utc::now(),
            error: None,
            attempts,
        }
    }

    pub fn failure(source: impl Into<String>, reason: impl Into<String>, attempts: u32) -> Self {
        Self {
            height: None,
            source: source.into(),
            checked_at: Utc::now(),
            error: Some(reason.into()),
            attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.height.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Lagging,
    Unknown,
}

/// Health of one pair, as persisted in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub coin: String,
    pub network: Network,
    pub indexer_height: Option<u64>,
    pub chain_head_height: Option<u64>,
    /// chain head - indexer height; positive means the indexer is behind
    pub lag: Option<i64>,
    pub state: HealthState,
    pub indexer_error: Option<String>,
    pub chain_head_error: Option<String>,
    pub chain_head_source: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthRecord {
    /// Record for a pair whose readings never arrived
    pub fn unavailable(target: &CoinNetwork, reason: &str) -> Self {
        Self {
            coin: target.coin.clone(),
            network: target.network,
            indexer_height: None,
            chain_head_height: None,
            lag: None,
            state: HealthState::Unknown,
            indexer_error: Some(reason.to_string()),
            chain_head_error: Some(reason.to_string()),
            chain_head_source: None,
            checked_at: Utc::now(),
        }
    }
}

/// Run metadata carried alongside the records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub total: usize,
    /// Records whose lag could be computed
    pub succeeded: usize,
    /// Records left in `unknown`
    pub failed: usize,
    pub healthy: usize,
    pub lagging: usize,
    pub unknown: usize,
}

impl SnapshotSummary {
    pub fn from_records(records: &[HealthRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.state {
                HealthState::Healthy => summary.healthy += 1,
                HealthState::Lagging => summary.lagging += 1,
                HealthState::Unknown => summary.unknown += 1,
            }
        }
        summary.failed = summary.unknown;
        summary.succeeded = summary.total - summary.failed;
        summary
    }
}

/// One complete, ordered set of health records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub generated_at: DateTime<Utc>,
    pub healthy_lag_threshold: u64,
    pub summary: SnapshotSummary,
    pub records: Vec<HealthRecord>,
}

impl StatusSnapshot {
    pub fn new(records: Vec<HealthRecord>, healthy_lag_threshold: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            healthy_lag_threshold,
            summary: SnapshotSummary::from_records(&records),
            records,
        }
    }

    pub fn record(&self, target: &CoinNetwork) -> Option<&HealthRecord> {
        self.records
            .iter()
            .find(|r| r.coin == target.coin && r.network == target.network)
    }
}

/// Indexer status endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct IndexerStatusResponse {
    pub height: serde_json::Value,
    #[serde(rename = "chainHead", default)]
    pub chain_head: bool,
}

/// JSON-RPC response envelope (Solana, Ethereum)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: serde_json::Value, // Can be string or number
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// SoChain `get_info` response
#[derive(Debug, Clone, Deserialize)]
pub struct SochainResponse {
    pub status: String,
    pub data: Option<SochainInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SochainInfo {
    pub blocks: u64,
}

/// Parse a block height given as a JSON number or decimal string
pub fn parse_height(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
