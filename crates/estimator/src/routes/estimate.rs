//! Estimate Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schema_registry::{RawInput, Schema, ValidationReason};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::pipeline::{Estimate, EstimateError, RequestState};
use crate::AppState;

/// Error body for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    /// Terminal request state, `rejected` or `failed`
    pub state: RequestState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ValidationReason>,
}

impl IntoResponse for EstimateError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let state = self.state();
        let (status, body) = match self {
            EstimateError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "validation",
                    message,
                    state,
                    field: Some(e.field),
                    reason: Some(e.reason),
                },
            ),
            EstimateError::Prediction(e) => {
                warn!("Prediction failed: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "prediction",
                        message,
                        state,
                        field: None,
                        reason: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Body that never became a `RawInput`, e.g. `"floor_area_sqm": null`
fn rejection_response(rejection: JsonRejection, schema: &Schema) -> Response {
    let message = rejection.body_text();
    debug!("Rejected request body: {}", message);

    let body = ErrorResponse {
        error: "validation",
        field: rejected_field(&message, schema),
        message,
        state: RequestState::Rejected,
        reason: None,
    };
    (rejection.status(), Json(body)).into_response()
}

/// Field path from a deserialization message of the form
/// `...target type: <field>: <detail>`
fn rejected_field(message: &str, schema: &Schema) -> Option<String> {
    let detail = message.split_once("target type: ")?.1;
    let (path, _) = detail.split_once(": ")?;
    if schema.field(path).is_some() || (!path.is_empty() && !path.contains(char::is_whitespace)) {
        Some(path.to_string())
    } else {
        None
    }
}

/// Estimate the resale price of one unit
pub async fn post_estimate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawInput>, JsonRejection>,
) -> Result<Json<Estimate>, Response> {
    let Json(input) = payload.map_err(|r| rejection_response(r, state.estimator.schema()))?;
    state
        .estimator
        .estimate(&input)
        .map(Json)
        .map_err(IntoResponse::into_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_registry::hdb;

    #[test]
    fn test_field_taken_from_deserialization_message() {
        let schema = hdb::resale_schema().unwrap();
        let message = "Failed to deserialize the JSON body into the target type: \
                       floor_area_sqm: data did not match any variant of untagged enum FieldValue";
        assert_eq!(
            rejected_field(message, &schema),
            Some("floor_area_sqm".to_string())
        );
    }

    #[test]
    fn test_no_field_for_top_level_errors() {
        let schema = hdb::resale_schema().unwrap();
        let message = "Failed to deserialize the JSON body into the target type: \
                       invalid type: sequence, expected a map at line 1 column 1";
        assert_eq!(rejected_field(message, &schema), None);
        assert_eq!(rejected_field("Expected request with `Content-Type`", &schema), None);
    }
}
