//! Resale Price Model
//!
//! Loads the trained model artifact once and exposes its single
//! capability: predict a price from an encoded feature vector.

mod handle;
mod linear;
mod onnx;
mod result;

pub use handle::{load_model, ModelFormat, ModelHandle, PricePredictor};
pub use linear::LinearModel;
pub use onnx::OnnxModel;
pub use result::{format_price, PredictionResult};

use thiserror::Error;

/// Errors from loading or running the price model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    #[error("Model layout does not match schema: {0}")]
    LayoutMismatch(String),
    #[error("Invalid input width: expected {expected}, got {actual}")]
    InputWidth { expected: usize, actual: usize },
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Model produced an invalid price: {0}")]
    InvalidOutput(f64),
}
