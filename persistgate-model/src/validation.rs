use serde::{Deserialize, Serialize};
use std::fmt;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Property path, e.g. `"balance"` or `"address/zip"`.
    pub field: String,
    /// The value that was rejected, as it was at validation time.
    pub rejected_value: serde_json::Value,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Ordered field errors produced by one validation run.
///
/// An empty result means validation passed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field error.
    pub fn reject(
        &mut self,
        field: impl Into<String>,
        rejected_value: impl Into<serde_json::Value>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.errors.push(FieldError {
            field: field.into(),
            rejected_value: rejected_value.into(),
            message: message.into(),
            code: None,
        });
        self
    }

    /// Records a field error carrying a machine-readable code.
    pub fn reject_with_code(
        &mut self,
        field: impl Into<String>,
        rejected_value: impl Into<serde_json::Value>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.errors.push(FieldError {
            field: field.into(),
            rejected_value: rejected_value.into(),
            message: message.into(),
            code: Some(code.into()),
        });
        self
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// All errors recorded against `field`, in recording order.
    pub fn field_errors<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// First error recorded against `field`.
    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl From<Vec<FieldError>> for ValidationResult {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}
