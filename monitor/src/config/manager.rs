use super::Config;
use crate::errors::ConfigError;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    /// Load and validate the configuration file at `config_path`
    pub async fn new(config_path: &str) -> Result<Self, ConfigError> {
        let config = Self::load_configuration(config_path).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_path: &str) -> Result<Config, ConfigError> {
        debug!("Loading monitor config: {}", config_path);

        let content =
            fs::read_to_string(config_path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: config_path.to_string(),
                    reason: e.to_string(),
                })?;

        let config = Config::from_toml_str(&content)?;
        config.validate()?;

        info!(
            "Loaded {} targets across {} chain head providers (threshold {} blocks, pool size {})",
            config.targets.len(),
            config.providers.len(),
            config.healthy_lag_threshold,
            config.max_concurrent_pairs
        );

        Ok(config)
    }
}
