//! This module provides reusable test utilities:
//! - Mock HTTP servers (indexer, public explorers)
//! - Test configuration builders
//! - In-process chain head providers
//! - Object stores with injectable failures

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_explorer;
pub mod mock_indexer;
pub mod test_config;
pub mod test_providers;

// Re-export commonly used items
pub use mock_explorer::MockExplorerServer;
pub use mock_indexer::MockIndexerServer;
pub use test_config::TestConfigBuilder;
pub use test_providers::*;
pub use test_stores::FailingObjectStore;
