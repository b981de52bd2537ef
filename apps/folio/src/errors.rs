use thiserror::Error;

use crate::form::FormError;
use crate::gateway::GatewayError;

/// Operations that hold a request state and disable their control while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Save,
    Download,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Save => write!(f, "save"),
            Operation::Download => write!(f, "download"),
        }
    }
}

/// Editor-level error type. Every variant collapses to a human-readable
/// message for the user; no structured codes are exposed.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("A {0} is already in progress")]
    AlreadyInFlight(Operation),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Could not write document: {0}")]
    Sink(#[from] std::io::Error),
}

impl EditorError {
    /// The message shown when `operation` fails with this error.
    pub fn user_message(&self, operation: Operation) -> String {
        let detail = match self {
            EditorError::Gateway(GatewayError::Status { .. }) => match operation {
                Operation::Save => "Failed to save".to_string(),
                Operation::Download => "Failed to generate download".to_string(),
            },
            other => other.to_string(),
        };
        match operation {
            Operation::Save => format!("Error saving: {detail}"),
            Operation::Download => format!("Error downloading: {detail}"),
        }
    }
}
