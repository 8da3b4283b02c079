//! Linear Model Artifact

use crate::handle::PricePredictor;
use crate::PredictionError;
use feature_encoder::EncodedVector;
use schema_registry::Schema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Linear regression exported as JSON together with the column layout it
/// was fitted on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Schema version the model was trained against
    pub schema_version: String,
    /// Training-time column order
    pub columns: Vec<String>,
    pub intercept: f64,
    /// One weight per column, same order
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    /// Parse a JSON artifact
    pub fn from_json(json: &str) -> Result<Self, PredictionError> {
        let model: Self =
            serde_json::from_str(json).map_err(|e| PredictionError::ModelLoad(e.to_string()))?;

        if model.columns.len() != model.coefficients.len() {
            return Err(PredictionError::ModelLoad(format!(
                "{} columns but {} coefficients",
                model.columns.len(),
                model.coefficients.len()
            )));
        }

        Ok(model)
    }

    /// Read and parse a JSON artifact file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PredictionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PredictionError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        let model = Self::from_json(&json)?;
        info!(
            "Linear model loaded from {}: {} coefficients",
            path.display(),
            model.coefficients.len()
        );
        Ok(model)
    }
}

impl PricePredictor for LinearModel {
    fn name(&self) -> &str {
        "linear"
    }

    fn check_layout(&self, schema: &Schema) -> Result<(), PredictionError> {
        if self.schema_version != schema.version() {
            return Err(PredictionError::LayoutMismatch(format!(
                "artifact trained on schema {}, registry is {}",
                self.schema_version,
                schema.version()
            )));
        }

        let expected = schema.expected_columns();
        if self.columns.len() != expected.len() {
            return Err(PredictionError::LayoutMismatch(format!(
                "artifact has {} columns, schema has {}",
                self.columns.len(),
                expected.len()
            )));
        }

        if let Some((idx, (got, want))) = self
            .columns
            .iter()
            .zip(expected.iter())
            .enumerate()
            .find(|(_, (got, want))| got != want)
        {
            return Err(PredictionError::LayoutMismatch(format!(
                "column {} is `{}`, schema expects `{}`",
                idx, got, want
            )));
        }

        Ok(())
    }

    fn predict(&self, features: &EncodedVector) -> Result<f64, PredictionError> {
        if features.len() != self.coefficients.len() {
            return Err(PredictionError::InputWidth {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        Ok(self.intercept
            + features
                .values()
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>())
    }
}
