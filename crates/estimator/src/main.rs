//! HDB Resale Price Estimator - Main Entry Point

use estimator::{init_logging, run_server, Estimator, EstimatorConfig};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os("HDB_ESTIMATOR_CONFIG")
        .map(PathBuf::from)
        .or_else(|| {
            let local = PathBuf::from("estimator.toml");
            local.exists().then_some(local)
        });

    let config = EstimatorConfig::load(config_path.as_deref())?;
    init_logging(&config.log_level)?;

    info!("=== HDB Resale Estimator v{} ===", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        info!("Configuration loaded from {}", path.display());
    }

    // Schema or model problems stop the process here, before serving
    let estimator = Estimator::from_config(&config)?;

    run_server(&config.bind_addr, estimator).await
}
