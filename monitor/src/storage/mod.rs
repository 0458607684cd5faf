//! Durable snapshot storage
//!
//! The backing service is treated as an opaque blob store offering only
//! single-key atomic overwrite. [`StatusStore`] layers the two-phase publish
//! (immutable history entry first, canonical pointer second) on top of any
//! [`ObjectStore`].

mod fs;
mod memory;
pub mod status_store;

pub use fs::FsObjectStore;
pub use memory::MemoryObjectStore;
pub use status_store::{PublishReceipt, StatusStore};

use anyhow::Result;
use async_trait::async_trait;

/// Key/value blob store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read the object at `key`, `None` if it does not exist
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically create or overwrite the object at `key`
    async fn put(&self, key: &str, body: &[u8]) -> Result<()>;

    /// Keys starting with `prefix`, sorted
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}
