// File: monitor/src/services/status_service.rs
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::constants::exit_codes;
use crate::errors::MonitorError;
use crate::health::types::SnapshotSummary;
use crate::health::StatusAggregator;
use crate::storage::{FsObjectStore, PublishReceipt, StatusStore};

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub summary: SnapshotSummary,
    pub receipt: PublishReceipt,
}

/// One invocation: aggregate, then publish
pub struct StatusService {
    aggregator: StatusAggregator,
    store: StatusStore,
}

impl StatusService {
    pub fn new(aggregator: StatusAggregator, store: StatusStore) -> Self {
        Self { aggregator, store }
    }

    /// Wire the HTTP clients and the local bucket described by `config`
    pub fn from_config(config: Arc<Config>) -> Result<Self, MonitorError> {
        let aggregator = StatusAggregator::from_config(config.clone())?;
        let object_store = Arc::new(FsObjectStore::new(&config.storage.root));
        let store = StatusStore::new(object_store, &config.storage);

        info!(
            "Publishing to {} (latest: {}, history: {}/)",
            config.storage.root,
            store.latest_key(),
            store.history_prefix()
        );

        Ok(Self::new(aggregator, store))
    }

    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    pub async fn run_once(&self) -> Result<RunReport, MonitorError> {
        let snapshot = self.aggregator.build_snapshot().await?;
        let generated_at = snapshot.generated_at;
        let summary = snapshot.summary.clone();

        let receipt = self.store.publish(snapshot).await?;

        Ok(RunReport {
            generated_at,
            summary,
            receipt,
        })
    }
}

/// Exit code reported to the host trigger for a run outcome
pub fn exit_code(outcome: &Result<RunReport, MonitorError>) -> i32 {
    match outcome {
        Ok(report) => {
            info!(
                "Run complete: {}/{} pairs resolved, published {}",
                report.summary.succeeded, report.summary.total, report.receipt.history_key
            );
            exit_codes::SUCCESS
        }
        Err(MonitorError::Config(e)) => {
            error!("Run aborted before fetching: {}", e);
            exit_codes::CONFIG
        }
        Err(e) if e.is_partial() => {
            warn!("Run partially failed: {}", e);
            exit_codes::PARTIAL
        }
        Err(e) => {
            error!("Run failed: {}", e);
            exit_codes::FATAL
        }
    }
}
