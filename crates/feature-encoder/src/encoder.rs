//! One-Hot Feature Encoding

use crate::vector::EncodedVector;
use schema_registry::{Constraint, FieldValue, RawInput, Schema, ValidationError};
use std::sync::Arc;
use tracing::debug;

/// Turns raw inputs into the model's fixed-width feature vector
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: Arc<Schema>,
}

impl FeatureEncoder {
    /// Create an encoder over a frozen schema
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate and encode a raw input.
    ///
    /// Numeric fields are copied unchanged; each categorical field writes
    /// 1 to the indicator of its value and 0 to every other label. Nothing is
    /// returned when validation fails.
    pub fn encode(&self, input: &RawInput) -> Result<EncodedVector, ValidationError> {
        self.schema.validate(input)?;

        let mut values = Vec::with_capacity(self.schema.column_count());

        for spec in self.schema.fields() {
            // Presence and type were established by validate()
            let value = input.get(&spec.name);
            match (&spec.constraint, value) {
                (Constraint::Range { .. }, Some(FieldValue::Number(n))) => values.push(*n),
                (Constraint::Domain { domain }, Some(FieldValue::Label(label))) => {
                    values.extend(
                        domain
                            .iter()
                            .map(|d| if d == label { 1.0 } else { 0.0 }),
                    );
                }
                _ => unreachable!("validated input matches field `{}`", spec.name),
            }
        }

        debug!("Encoded input into {} columns", values.len());
        Ok(EncodedVector::new(self.schema.expected_columns(), values))
    }
}
