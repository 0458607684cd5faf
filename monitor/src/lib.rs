pub mod config;
pub mod constants;
pub mod errors;
pub mod health;
pub mod retry;
pub mod services;
pub mod storage;

// Re-export commonly used types
pub use config::{Config, ConfigManager, TargetConfig};
pub use errors::{ConfigError, MonitorError, PublishError};
pub use health::{HealthRecord, HealthState, StatusAggregator, StatusSnapshot};
pub use services::StatusService;
pub use storage::{ObjectStore, StatusStore};
