//! Schema Routes

use axum::{extract::State, Json};
use schema_registry::FieldSpec;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Response for schema endpoint
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub version: String,
    pub fields: Vec<FieldSpec>,
    pub columns: Vec<String>,
}

/// Describe the accepted fields and the model's column layout
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let schema = state.estimator.schema();
    Json(SchemaResponse {
        version: schema.version().to_string(),
        fields: schema.fields().to_vec(),
        columns: schema.expected_columns().to_vec(),
    })
}
