// Validation errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One failed rule on one field.
///
/// `message` is the complete human-readable violation and always names the
/// field by its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Display name of the field that failed validation
    pub field: String,

    /// Human-readable violation message
    pub message: String,

    /// Rule that failed (`required`, `min`, `max`, `len`, `password`, `email`)
    pub constraint: String,

    /// Value that failed validation, when the rule records it
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            constraint: "custom".to_string(),
            value: None,
        }
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Ordered collection of violations for a whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Violations recorded against one display name, in order.
    pub fn get_field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// The violation messages, in traversal order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.errors.into_iter().map(|e| e.message).collect()
    }

    /// `{"errors": [{"field", "message", "constraint", "value"}, ...]}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({ "errors": [] }))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// A rule specification that strict parsing refuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown rule '{token}' in '{spec}'")]
    UnknownRule { token: String, spec: String },

    #[error("rule '{token}' in '{spec}' needs a non-negative integer bound")]
    InvalidBound { token: String, spec: String },

    /// A strict failure located inside a record, `path` being the dotted
    /// field path from the root.
    #[error("field '{path}': {source}")]
    AtField {
        path: String,
        #[source]
        source: Box<RuleError>,
    },
}

impl RuleError {
    pub(crate) fn at(self, path: &str) -> Self {
        match self {
            Self::AtField { .. } => self,
            other => Self::AtField {
                path: path.to_string(),
                source: Box::new(other),
            },
        }
    }
}

/// Caller contract violations raised while walking a JSON record.
///
/// These are programmer errors, not validation failures: the value handed to
/// the walker does not have the shape its schema describes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("expected a record (JSON object) at '{path}', found {found}")]
    NotARecord { path: String, found: &'static str },

    #[error("expected a string at '{path}', found {found}")]
    NotText { path: String, found: &'static str },

    #[error(transparent)]
    Rule(#[from] RuleError),
}
