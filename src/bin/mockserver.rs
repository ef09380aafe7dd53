//! Serve the worklist's product service from local mock data
//!
//! Usage: `worklist-mockserver [config.yaml]`

use tracing_subscriber::EnvFilter;
use worklist::config::MockServerConfig;
use worklist::server::MockServerBuilder;

const DEFAULT_CONFIG: &str = "config/mockserver.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = MockServerConfig::load_or_default(&config_path)?;
    tracing::debug!(?config, "configuration loaded");

    MockServerBuilder::new(config).serve().await
}
