use crate::{Entity, ValidationResult};
use thiserror::Error;

/// Pluggable validation for one or more entity types.
///
/// Report bad data by returning a [`ValidationResult`] with errors in it.
/// Return `Err` only when the validator itself cannot run (a broken
/// dependency, a bug); callers treat that as an operation failure, not as
/// invalid data.
pub trait Validator: Send + Sync {
    fn validate(&self, entity: &Entity) -> Result<ValidationResult, ValidatorFault>;
}

/// The validator could not complete.
#[derive(Debug, Error)]
#[error("validator fault: {message}")]
pub struct ValidatorFault {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ValidatorFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
