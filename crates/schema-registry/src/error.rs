//! Schema and Validation Error Types

use crate::field::FieldKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Registry misconfiguration. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Field name registered twice
    #[error("field `{0}` is already registered")]
    DuplicateField(String),

    /// Numeric bounds are inverted or not finite
    #[error("field `{field}` has invalid bounds [{min}, {max}]")]
    InvalidBounds { field: String, min: f64, max: f64 },

    /// Categorical domain repeats a label
    #[error("field `{field}` repeats domain label `{label}`")]
    DuplicateLabel { field: String, label: String },

    /// Categorical domain without labels
    #[error("field `{0}` has an empty domain")]
    EmptyDomain(String),

    /// Two fields derive the same column name
    #[error("column `{0}` is produced by more than one field")]
    DuplicateColumn(String),

    /// Schema without any field
    #[error("schema defines no fields")]
    EmptySchema,

    /// Schema definition file could not be read or parsed
    #[error("invalid schema definition: {0}")]
    Definition(String),
}

/// Why a raw input value was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationReason {
    /// Registered field absent from the input
    Missing,
    /// Numeric value outside `[min, max]` (or NaN)
    OutOfRange { value: f64, min: f64, max: f64 },
    /// Label not in the field's domain
    UnknownCategory { value: String },
    /// Number given for a categorical field or vice versa
    WrongType { expected: FieldKind },
    /// Input names a field the schema does not register
    UnknownField,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::Missing => write!(f, "value is missing"),
            ValidationReason::OutOfRange { value, min, max } => {
                write!(f, "value {} is out of range [{}, {}]", value, min, max)
            }
            ValidationReason::UnknownCategory { value } => {
                write!(f, "unrecognized category `{}`", value)
            }
            ValidationReason::WrongType { expected } => {
                write!(f, "expected a {} value", expected)
            }
            ValidationReason::UnknownField => write!(f, "field is not part of the schema"),
        }
    }
}

/// Raw input rejected by the schema. Recovered per request.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("invalid `{field}`: {reason}")]
pub struct ValidationError {
    /// Offending field name
    pub field: String,
    /// What was wrong with it
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field_and_reason() {
        let err = ValidationError::new(
            "town",
            ValidationReason::UnknownCategory {
                value: "ATLANTIS".to_string(),
            },
        );
        assert_eq!(err.to_string(), "invalid `town`: unrecognized category `ATLANTIS`");

        let err = ValidationError::new(
            "floor_area_sqm",
            ValidationReason::OutOfRange {
                value: 201.0,
                min: 30.0,
                max: 200.0,
            },
        );
        assert_eq!(
            err.to_string(),
            "invalid `floor_area_sqm`: value 201 is out of range [30, 200]"
        );
    }
}
