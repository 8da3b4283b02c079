//! Schema Registry

use crate::error::{SchemaError, ValidationError, ValidationReason};
use crate::field::{Constraint, FieldKind, FieldSpec};
use crate::input::{FieldValue, RawInput};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Collects field registrations before freezing them into a [`Schema`]
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    version: String,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Start an empty registry for the given schema version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            fields: Vec::new(),
        }
    }

    /// Register a field whose display label is its name
    pub fn define_field(
        &mut self,
        name: &str,
        constraint: Constraint,
    ) -> Result<&mut Self, SchemaError> {
        self.define_labelled_field(name, name, constraint)
    }

    /// Register a field with a human-readable display label
    pub fn define_labelled_field(
        &mut self,
        name: &str,
        label: &str,
        constraint: Constraint,
    ) -> Result<&mut Self, SchemaError> {
        if self.fields.iter().any(|f| f.name == name) {
            return Err(SchemaError::DuplicateField(name.to_string()));
        }

        match &constraint {
            Constraint::Range { min, max } => {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(SchemaError::InvalidBounds {
                        field: name.to_string(),
                        min: *min,
                        max: *max,
                    });
                }
            }
            Constraint::Domain { domain } => {
                if domain.is_empty() {
                    return Err(SchemaError::EmptyDomain(name.to_string()));
                }
                let mut seen = HashSet::with_capacity(domain.len());
                for label in domain {
                    if !seen.insert(label.as_str()) {
                        return Err(SchemaError::DuplicateLabel {
                            field: name.to_string(),
                            label: label.clone(),
                        });
                    }
                }
            }
        }

        self.fields.push(FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            constraint,
        });
        Ok(self)
    }

    /// Freeze the registry and derive the column order
    pub fn build(self) -> Result<Schema, SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        let columns: Vec<String> = self.fields.iter().flat_map(FieldSpec::columns).collect();

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
        }

        info!(
            "Schema {} built: {} fields, {} columns",
            self.version,
            self.fields.len(),
            columns.len()
        );

        Ok(Schema {
            version: self.version,
            fields: self.fields,
            columns: columns.into(),
        })
    }
}

/// Immutable field registry and its canonical column order.
///
/// Share it behind an `Arc`; nothing mutates it after [`SchemaBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    version: String,
    fields: Vec<FieldSpec>,
    columns: Arc<[String]>,
}

impl Schema {
    pub fn builder(version: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(version)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Fields in registration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Column layout the model was trained against.
    ///
    /// Numeric fields contribute their own name, categorical fields one
    /// `<field>_<label>` column per label in domain order, concatenated in
    /// registration order.
    pub fn expected_columns(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check a raw input against every registered field.
    ///
    /// Reports the first offending field in registration order; unknown
    /// input fields are reported afterwards in name order.
    pub fn validate(&self, input: &RawInput) -> Result<(), ValidationError> {
        for spec in &self.fields {
            let value = input
                .get(&spec.name)
                .ok_or_else(|| ValidationError::new(&spec.name, ValidationReason::Missing))?;
            Self::validate_value(spec, value)?;
        }

        if let Some(unknown) = input.fields().find(|name| self.field(name).is_none()) {
            debug!("Rejecting unknown input field {}", unknown);
            return Err(ValidationError::new(unknown, ValidationReason::UnknownField));
        }

        Ok(())
    }

    fn validate_value(spec: &FieldSpec, value: &FieldValue) -> Result<(), ValidationError> {
        match (&spec.constraint, value) {
            (Constraint::Range { min, max }, FieldValue::Number(n)) => {
                if (*min..=*max).contains(n) {
                    Ok(())
                } else {
                    Err(ValidationError::new(
                        &spec.name,
                        ValidationReason::OutOfRange {
                            value: *n,
                            min: *min,
                            max: *max,
                        },
                    ))
                }
            }
            (Constraint::Domain { domain }, FieldValue::Label(label)) => {
                if domain.iter().any(|d| d == label) {
                    Ok(())
                } else {
                    Err(ValidationError::new(
                        &spec.name,
                        ValidationReason::UnknownCategory {
                            value: label.clone(),
                        },
                    ))
                }
            }
            (Constraint::Range { .. }, FieldValue::Label(_)) => Err(ValidationError::new(
                &spec.name,
                ValidationReason::WrongType {
                    expected: FieldKind::Numeric,
                },
            )),
            (Constraint::Domain { .. }, FieldValue::Number(_)) => Err(ValidationError::new(
                &spec.name,
                ValidationReason::WrongType {
                    expected: FieldKind::Categorical,
                },
            )),
        }
    }
}
