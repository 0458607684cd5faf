// File: monitor/src/main.rs
use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use monitor::constants::{defaults, exit_codes};
use monitor::services::exit_code;
use monitor::{ConfigManager, MonitorError, StatusService};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("monitor=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    // CLI argument wins over MONITOR_CONFIG
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MONITOR_CONFIG").ok())
        .unwrap_or_else(|| defaults::CONFIG_PATH.to_string());

    info!("Starting indexer status run with config {}", config_path);

    let config_manager = match ConfigManager::new(&config_path).await {
        Ok(manager) => manager,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(exit_codes::CONFIG);
        }
    };
    let config = config_manager.get_current_config();

    let outcome = match StatusService::from_config(config) {
        Ok(service) => service.run_once().await,
        Err(e) => Err::<_, MonitorError>(e),
    };

    std::process::exit(exit_code(&outcome));
}
