//! Model Handle and Artifact Loading

use crate::linear::LinearModel;
use crate::onnx::OnnxModel;
use crate::result::PredictionResult;
use crate::PredictionError;
use feature_encoder::EncodedVector;
use schema_registry::Schema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A loaded regression model
pub trait PricePredictor: Send + Sync {
    /// Short description for logs and health output
    fn name(&self) -> &str;

    /// Check the artifact against the schema's column layout
    fn check_layout(&self, schema: &Schema) -> Result<(), PredictionError>;

    /// Raw model output for one encoded vector
    fn predict(&self, features: &EncodedVector) -> Result<f64, PredictionError>;
}

/// On-disk artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// JSON linear model with its column list
    Linear,
    /// ONNX graph run with tract
    Onnx,
}

impl ModelFormat {
    /// Infer from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ModelFormat::Linear),
            "onnx" => Some(ModelFormat::Onnx),
            _ => None,
        }
    }
}

/// Process-wide, read-only handle to the loaded model.
///
/// Cloning shares the same model.
#[derive(Clone)]
pub struct ModelHandle {
    model: Arc<dyn PricePredictor>,
    currency: String,
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("model", &self.model.name())
            .field("currency", &self.currency)
            .finish()
    }
}

impl ModelHandle {
    /// Wrap a model after checking it against the schema
    pub fn new(
        model: Arc<dyn PricePredictor>,
        schema: &Schema,
        currency: impl Into<String>,
    ) -> Result<Self, PredictionError> {
        model.check_layout(schema)?;
        info!(
            "Model {} accepted for schema {} ({} columns)",
            model.name(),
            schema.version(),
            schema.column_count()
        );
        Ok(Self {
            model,
            currency: currency.into(),
        })
    }

    pub fn name(&self) -> &str {
        self.model.name()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Predict a price. Non-finite output is an error, negative output is
    /// clamped to zero.
    pub fn predict(&self, features: &EncodedVector) -> Result<PredictionResult, PredictionError> {
        let start = std::time::Instant::now();
        let raw = self.model.predict(features)?;

        if !raw.is_finite() {
            return Err(PredictionError::InvalidOutput(raw));
        }

        let price = if raw < 0.0 {
            warn!("Model {} produced negative price {}, clamping to 0", self.name(), raw);
            0.0
        } else {
            raw
        };

        debug!("Prediction completed in {}us", start.elapsed().as_micros());

        Ok(PredictionResult {
            price,
            currency: self.currency.clone(),
        })
    }
}

/// Load an artifact from disk and bind it to the schema
pub fn load_model(
    path: impl AsRef<Path>,
    format: Option<ModelFormat>,
    schema: &Schema,
    currency: &str,
) -> Result<ModelHandle, PredictionError> {
    let path = path.as_ref();
    let format = match format.or_else(|| ModelFormat::from_path(path)) {
        Some(format) => format,
        None => {
            return Err(PredictionError::ModelLoad(format!(
                "cannot infer model format of {}",
                path.display()
            )))
        }
    };

    info!("Loading {:?} model from {}", format, path.display());

    let model: Arc<dyn PricePredictor> = match format {
        ModelFormat::Linear => Arc::new(LinearModel::from_path(path)?),
        ModelFormat::Onnx => Arc::new(OnnxModel::load(path, schema.column_count())?),
    };

    ModelHandle::new(model, schema, currency)
}
