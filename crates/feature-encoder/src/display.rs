//! Input Rendering for Display

use crate::encoder::FeatureEncoder;
use schema_registry::{FieldValue, RawInput};
use serde::Serialize;

/// One `(label, value)` line shown back to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
}

impl FeatureEncoder {
    /// Render the raw input for display without validating it.
    ///
    /// Registered fields come first in registration order under their
    /// captions, then any other input keys by name.
    pub fn decode_for_display(&self, input: &RawInput) -> Vec<DisplayRow> {
        let schema = self.schema();
        let mut rows = Vec::with_capacity(input.len());

        for spec in schema.fields() {
            if let Some(value) = input.get(&spec.name) {
                rows.push(DisplayRow {
                    label: spec.label.clone(),
                    value: render_value(value),
                });
            }
        }

        for (name, value) in input.iter() {
            if schema.field(name).is_none() {
                rows.push(DisplayRow {
                    label: name.to_string(),
                    value: render_value(value),
                });
            }
        }

        rows
    }
}

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{:.0}", n),
        other => other.to_string(),
    }
}
