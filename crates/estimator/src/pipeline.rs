//! Request Pipeline
//!
//! `Received -> Validated -> Encoded -> Predicted -> Displayed`, with
//! `Rejected` for invalid input and `Failed` when the model errors.

use crate::config::EstimatorConfig;
use feature_encoder::{DisplayRow, FeatureEncoder};
use price_model::{load_model, ModelHandle, PredictionError, PredictionResult};
use schema_registry::{hdb, RawInput, Schema, SchemaDefinition, SchemaError, ValidationError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Per-request lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Received,
    Validated,
    Encoded,
    Predicted,
    Displayed,
    /// Input failed validation
    Rejected,
    /// Model could not produce a price
    Failed,
}

/// Request failures reported to the caller
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl EstimateError {
    /// Terminal state the request ended in
    pub fn state(&self) -> RequestState {
        match self {
            EstimateError::Validation(_) => RequestState::Rejected,
            EstimateError::Prediction(_) => RequestState::Failed,
        }
    }
}

/// Misconfiguration that must stop the process before serving
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("model error: {0}")]
    Model(#[from] PredictionError),
}

/// Outcome of one successful request
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// Raw input as shown back to the user
    pub inputs: Vec<DisplayRow>,
    #[serde(flatten)]
    pub result: PredictionResult,
    /// Price ready for display
    pub formatted: String,
    pub state: RequestState,
}

/// Validate, encode, predict, and format one raw input at a time
#[derive(Debug, Clone)]
pub struct Estimator {
    encoder: FeatureEncoder,
    model: ModelHandle,
}

impl Estimator {
    pub fn new(schema: Arc<Schema>, model: ModelHandle) -> Self {
        Self {
            encoder: FeatureEncoder::new(schema),
            model,
        }
    }

    /// Build the schema and load the model named by the configuration
    pub fn from_config(config: &EstimatorConfig) -> Result<Self, StartupError> {
        let schema = match &config.schema_path {
            Some(path) => SchemaDefinition::from_path(path)?.into_schema()?,
            None => hdb::resale_schema()?,
        };
        let schema = Arc::new(schema);

        let model = load_model(
            &config.model_path,
            config.model_format,
            &schema,
            &config.currency,
        )?;

        info!(
            "Estimator ready: schema {}, model {}",
            schema.version(),
            model.name()
        );
        Ok(Self::new(schema, model))
    }

    pub fn schema(&self) -> &Schema {
        self.encoder.schema()
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Run one request to completion
    pub fn estimate(&self, input: &RawInput) -> Result<Estimate, EstimateError> {
        let mut state = RequestState::Received;
        debug!("Request {:?}: {} fields", state, input.len());

        let vector = match self.encoder.encode(input) {
            Ok(vector) => vector,
            Err(e) => {
                let err = EstimateError::from(e);
                advance(&mut state, err.state());
                debug!("Rejected input: {}", err);
                return Err(err);
            }
        };
        advance(&mut state, RequestState::Validated);
        advance(&mut state, RequestState::Encoded);

        let result = match self.model.predict(&vector) {
            Ok(result) => result,
            Err(e) => {
                let err = EstimateError::from(e);
                advance(&mut state, err.state());
                return Err(err);
            }
        };
        advance(&mut state, RequestState::Predicted);

        let formatted = result.format();
        let inputs = self.encoder.decode_for_display(input);
        advance(&mut state, RequestState::Displayed);

        Ok(Estimate {
            inputs,
            result,
            formatted,
            state,
        })
    }
}

fn advance(state: &mut RequestState, next: RequestState) {
    debug!("Request {:?} -> {:?}", state, next);
    *state = next;
}
