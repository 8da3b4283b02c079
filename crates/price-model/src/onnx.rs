//! ONNX Model Runtime

use crate::handle::PricePredictor;
use crate::PredictionError;
use feature_encoder::EncodedVector;
use schema_registry::Schema;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Regression graph exported to ONNX, taking `f32[1, width]`
pub struct OnnxModel {
    name: String,
    width: usize,
    plan: OnnxPlan,
}

impl OnnxModel {
    /// Load and optimize the graph for a fixed input width
    pub fn load(path: impl AsRef<Path>, width: usize) -> Result<Self, PredictionError> {
        let path = path.as_ref();
        info!("Loading ONNX model from {} (width {})", path.display(), width);

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, width]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| PredictionError::ModelLoad(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            name: format!("onnx:{}", path.display()),
            width,
            plan,
        })
    }
}

impl PricePredictor for OnnxModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn check_layout(&self, schema: &Schema) -> Result<(), PredictionError> {
        // The graph carries no column names; width is all that can be checked
        if self.width != schema.column_count() {
            return Err(PredictionError::LayoutMismatch(format!(
                "graph takes {} inputs, schema has {} columns",
                self.width,
                schema.column_count()
            )));
        }
        Ok(())
    }

    fn predict(&self, features: &EncodedVector) -> Result<f64, PredictionError> {
        if features.len() != self.width {
            return Err(PredictionError::InputWidth {
                expected: self.width,
                actual: features.len(),
            });
        }

        let input = Tensor::from_shape(&[1, self.width], &features.as_f32())
            .map_err(|e| PredictionError::InferenceFailed(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| PredictionError::InferenceFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| PredictionError::InferenceFailed("model returned no outputs".into()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| PredictionError::InferenceFailed(e.to_string()))?;
        let price = view
            .iter()
            .next()
            .copied()
            .ok_or_else(|| PredictionError::InferenceFailed("empty output tensor".into()))?;

        debug!("ONNX output {}", price);
        Ok(f64::from(price))
    }
}
