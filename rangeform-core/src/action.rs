//! Action invocation — the host's named-action facility as a trait.

use thiserror::Error;

use crate::binding::ObjectId;

/// Failure reported by the action collaborator. Surfaced as an inline alert
/// on the widget that triggered it, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("An error occurred while executing action {action}: {message}")]
pub struct ActionError {
    pub action: String,
    pub message: String,
}

/// Executes a named action against a single bound object.
pub trait ActionRunner {
    fn invoke(&mut self, action: &str, target: ObjectId) -> Result<(), ActionError>;
}
