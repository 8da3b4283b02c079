//! Schema Registry
//!
//! Authoritative definition of the estimator's input fields, their valid
//! domains, and the column order the price model was trained against.

mod definition;
mod error;
mod field;
pub mod hdb;
mod input;
mod schema;

pub use definition::{FieldDefinition, SchemaDefinition};
pub use error::{SchemaError, ValidationError, ValidationReason};
pub use field::{indicator_column, Constraint, FieldKind, FieldSpec};
pub use input::{FieldValue, RawInput};
pub use schema::{Schema, SchemaBuilder};
