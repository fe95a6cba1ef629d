//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by the allocator and its configuration layer.
#[derive(Error, Debug)]
pub enum AllocationError {
    /// Input failed pre-allocation validation.
    #[error("validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The allocator failed unexpectedly.
    #[error("Internal allocation failure: {0}")]
    Internal(String),
}

impl AllocationError {
    /// Messages suitable for `AssignmentResult::errors`.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AllocationError::Validation(errors) => {
                errors.iter().map(|e| e.message.clone()).collect()
            }
            other => vec![other.to_string()],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
