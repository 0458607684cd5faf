//! Two-phase snapshot publishing
//!
//! 1. The serialized snapshot is written under a fresh, timestamped history key.
//! 2. Only then is the canonical `latest.json` overwritten with the same bytes.
//!
//! A failed history write leaves the canonical pointer untouched. A failed
//! pointer update after a durable history write is reported separately so the
//! invoker can tell "nothing published" from "latest is stale". History is
//! never deleted.

use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::ObjectStore;
use crate::config::StorageConfig;
use crate::constants::storage;
use crate::errors::PublishError;
use crate::health::types::StatusSnapshot;

/// Keys written by a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub history_key: String,
    pub latest_key: String,
    pub bytes: usize,
}

pub struct StatusStore {
    store: Arc<dyn ObjectStore>,
    latest_key: String,
    history_prefix: String,
}

impl StatusStore {
    pub fn new(store: Arc<dyn ObjectStore>, config: &StorageConfig) -> Self {
        Self {
            store,
            latest_key: join_key(&config.prefix, &config.latest_key),
            history_prefix: join_key(&config.prefix, &config.history_prefix),
        }
    }

    pub fn latest_key(&self) -> &str {
        &self.latest_key
    }

    pub fn history_prefix(&self) -> &str {
        &self.history_prefix
    }

    /// Unique history key; the timestamp keeps keys in generation order
    pub fn history_key_for(&self, snapshot: &StatusSnapshot) -> String {
        let timestamp = snapshot
            .generated_at
            .format(storage::HISTORY_TIMESTAMP_FORMAT);
        let suffix = Uuid::new_v4().simple().to_string();

        format!(
            "{}/{}_{}.json",
            self.history_prefix,
            timestamp,
            &suffix[..storage::HISTORY_SUFFIX_LEN]
        )
    }

    pub async fn publish(&self, snapshot: StatusSnapshot) -> Result<PublishReceipt, PublishError> {
        let body = serde_json::to_vec_pretty(&snapshot).map_err(|e| {
            PublishError::SerializationFailed {
                reason: e.to_string(),
            }
        })?;
        let history_key = self.history_key_for(&snapshot);

        // Phase 1: immutable history entry
        if let Err(e) = self.store.put(&history_key, &body).await {
            error!("History write to {} failed: {}", history_key, e);
            return Err(PublishError::HistoryWriteFailed {
                key: history_key,
                reason: e.to_string(),
            });
        }
        debug!("History entry {} written ({} bytes)", history_key, body.len());

        // Phase 2: canonical pointer
        if let Err(e) = self.store.put(&self.latest_key, &body).await {
            error!(
                "History {} is durable but {} was not updated: {}",
                history_key, self.latest_key, e
            );
            return Err(PublishError::PointerUpdateFailed {
                history_key,
                latest_key: self.latest_key.clone(),
                reason: e.to_string(),
            });
        }

        info!(
            "Published snapshot to {} and {}",
            history_key, self.latest_key
        );

        Ok(PublishReceipt {
            history_key,
            latest_key: self.latest_key.clone(),
            bytes: body.len(),
        })
    }

    /// Snapshot currently behind the canonical pointer
    pub async fn latest(&self) -> Result<Option<StatusSnapshot>> {
        match self.store.get(&self.latest_key).await? {
            Some(body) => {
                let snapshot = serde_json::from_slice(&body)
                    .map_err(|e| anyhow!("Failed to decode {}: {}", self.latest_key, e))?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    /// All history keys, oldest first
    pub async fn history_keys(&self) -> Result<Vec<String>> {
        self.store
            .list(&format!("{}/", self.history_prefix))
            .await
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let key = key.trim_matches('/');
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", prefix, key)
    }
}
