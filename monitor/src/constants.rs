//! Central repository for defaults, storage key names, and limits
//!
//! Constants are grouped by concern so that config defaults, client
//! behaviour and the persisted layout all read from one place.

use std::time::Duration;

/// HTTP client constants
pub mod http {
    use super::Duration;

    /// Timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// User agent sent to indexers and public explorers
    pub const USER_AGENT: &str = concat!("indexer-monitor/", env!("CARGO_PKG_VERSION"));
}

/// Default configuration values
pub mod defaults {
    /// Maximum |lag| in blocks still classified as healthy
    pub const HEALTHY_LAG_THRESHOLD: u64 = 5;

    /// Number of pairs fetched concurrently
    pub const MAX_CONCURRENT_PAIRS: usize = 4;

    /// Per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

    /// Deadline for the whole run in seconds
    pub const RUN_TIMEOUT_SECONDS: u64 = 120;

    /// Attempts per reading, first try included
    pub const RETRY_MAX_ATTEMPTS: u32 = 3;

    /// Delay before the first retry
    pub const RETRY_BASE_DELAY_MS: u64 = 500;

    /// Upper bound for a single backoff delay
    pub const RETRY_MAX_DELAY_MS: u64 = 5_000;

    /// Local directory used as the bucket
    pub const STORAGE_ROOT: &str = "data/status";

    /// Default config file location for the binary
    pub const CONFIG_PATH: &str = "config/monitor.toml";
}

/// Persisted layout
pub mod storage {
    /// Canonical key consumers read
    pub const LATEST_KEY: &str = "latest.json";

    /// Prefix under which immutable history entries are written
    pub const HISTORY_PREFIX: &str = "history";

    /// Timestamp format used in history keys (sorts lexicographically)
    pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3fZ";

    /// Length of the random suffix that keeps history keys distinct
    pub const HISTORY_SUFFIX_LEN: usize = 8;
}

/// Reason strings written into records
pub mod reasons {
    pub const DEADLINE_EXCEEDED: &str = "run deadline exceeded before readings completed";

    pub const TASK_FAILED: &str = "fetch task terminated unexpectedly";
}

/// Process exit codes reported to the host trigger
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FATAL: i32 = 1;
    pub const PARTIAL: i32 = 2;
    pub const CONFIG: i32 = 3;
}
