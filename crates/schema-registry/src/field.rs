//! Field Specifications

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Bounded number, passed through unchanged
    Numeric,
    /// One label out of a closed domain, one-hot encoded
    Categorical,
}

impl FieldKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Numeric => "numeric",
            FieldKind::Categorical => "categorical",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Valid values of a field. The field's kind follows from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Constraint {
    /// Inclusive numeric range
    #[serde(rename = "numeric")]
    Range { min: f64, max: f64 },
    /// Ordered set of category labels
    #[serde(rename = "categorical")]
    Domain { domain: Vec<String> },
}

impl Constraint {
    /// Inclusive numeric range `[min, max]`
    pub fn range(min: f64, max: f64) -> Self {
        Constraint::Range { min, max }
    }

    /// Categorical domain in declared order
    pub fn domain<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::Domain {
            domain: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Constraint::Range { .. } => FieldKind::Numeric,
            Constraint::Domain { .. } => FieldKind::Categorical,
        }
    }
}

/// One registered input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Field name, also the column prefix
    pub name: String,
    /// Human-readable caption for display
    pub label: String,
    /// Valid values
    #[serde(flatten)]
    pub constraint: Constraint,
}

impl FieldSpec {
    pub fn kind(&self) -> FieldKind {
        self.constraint.kind()
    }

    /// Column names this field contributes, in order
    pub fn columns(&self) -> Vec<String> {
        match &self.constraint {
            Constraint::Range { .. } => vec![self.name.clone()],
            Constraint::Domain { domain } => domain
                .iter()
                .map(|label| indicator_column(&self.name, label))
                .collect(),
        }
    }
}

/// Indicator column name for one categorical label: `<field>_<label>`
pub fn indicator_column(field: &str, label: &str) -> String {
    format!("{}_{}", field, label)
}
