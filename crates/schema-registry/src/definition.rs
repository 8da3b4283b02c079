//! Schema Definitions Loaded From Data

use crate::error::SchemaError;
use crate::field::Constraint;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One field entry in a schema definition file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    /// Display caption, defaults to the name
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub constraint: Constraint,
}

/// Serialized form of a schema registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub version: String,
    pub fields: Vec<FieldDefinition>,
}

impl SchemaDefinition {
    /// Parse a JSON definition
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::Definition(e.to_string()))
    }

    /// Read and parse a JSON definition file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SchemaError::Definition(format!("{}: {}", path.display(), e)))?;
        info!("Loaded schema definition from {}", path.display());
        Self::from_json(&json)
    }

    /// Register every field through the builder checks
    pub fn into_schema(self) -> Result<Schema, SchemaError> {
        let mut builder = Schema::builder(self.version);
        for field in self.fields {
            let label = field.label.as_deref().unwrap_or(&field.name);
            builder.define_labelled_field(&field.name, label, field.constraint)?;
        }
        builder.build()
    }
}

impl From<&Schema> for SchemaDefinition {
    fn from(schema: &Schema) -> Self {
        Self {
            version: schema.version().to_string(),
            fields: schema
                .fields()
                .iter()
                .map(|f| FieldDefinition {
                    name: f.name.clone(),
                    label: Some(f.label.clone()),
                    constraint: f.constraint.clone(),
                })
                .collect(),
        }
    }
}
