//! Indexer health checking
//!
//! Readings from the internal indexer and from a public chain head provider
//! are folded into one [`HealthRecord`](types::HealthRecord) per configured
//! coin/network, and assembled into a [`StatusSnapshot`](types::StatusSnapshot).

pub mod aggregator;
mod chain_head;
mod indexer;
pub mod providers;
pub mod types;

pub use aggregator::{classify, fold_readings, StatusAggregator};
pub use chain_head::ChainHeadClient;
pub use indexer::{fetch_indexer_status, IndexerClient, IndexerStatus};
pub use providers::ChainHeadProvider;
pub use types::{
    ChainHeadReading, CoinNetwork, HealthRecord, HealthState, IndexerReading, Network,
    StatusSnapshot,
};
