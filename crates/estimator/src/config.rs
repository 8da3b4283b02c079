//! Estimator Configuration

use config::{Config, ConfigError, Environment, File};
use price_model::ModelFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `HDB_ESTIMATOR_MODEL_PATH`
pub const ENV_PREFIX: &str = "HDB_ESTIMATOR";

/// Estimator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Listen address for the HTTP API
    pub bind_addr: String,
    /// Trained model artifact
    pub model_path: PathBuf,
    /// Artifact format, inferred from the extension when unset
    #[serde(default)]
    pub model_format: Option<ModelFormat>,
    /// JSON schema definition, built-in HDB schema when unset
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
    /// Currency prefix for formatted prices
    pub currency: String,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            model_path: PathBuf::from("models/hdb_resale_linear.json"),
            model_format: None,
            schema_path: None,
            currency: "S$".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl EstimatorConfig {
    /// Layer defaults, an optional file, then `HDB_ESTIMATOR_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("model_path", defaults.model_path.display().to_string())?
            .set_default("currency", defaults.currency)?
            .set_default("log_level", defaults.log_level)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        builder.build()?.try_deserialize()
    }
}
