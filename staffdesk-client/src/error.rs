//! Client error types

use std::fmt;
use thiserror::Error;

/// The remote operation a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    List,
    Create,
    Update,
    Remove,
}

impl Operation {
    /// Fallback text when the server gave no message
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::List => "Failed to load employees",
            Self::Create => "Failed to add employee",
            Self::Update => "Failed to update employee",
            Self::Remove => "Failed to delete employee",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "login",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Remove => "remove",
        })
    }
}

/// Coarse classification used to decide what the failure means for the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No (usable) response came back; the effect is unknown but assumed not applied
    Unreachable,
    /// The server answered with a non-success status; definitely not applied
    Rejected,
    /// The server answered successfully with a body we could not interpret
    Malformed,
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a response
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success status arrived without a body
    #[error("Empty response for {operation}")]
    EmptyResponse { operation: Operation },

    /// Non-success status
    #[error("{message}")]
    Rejected {
        operation: Operation,
        status: u16,
        message: String,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Base URL cannot address the API
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::EmptyResponse { .. } | Self::InvalidUrl(_) => {
                FailureKind::Unreachable
            }
            Self::Rejected { .. } => FailureKind::Rejected,
            Self::InvalidResponse(_) | Self::Serialization(_) => FailureKind::Malformed,
        }
    }

    /// HTTP status of a rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Single line shown to the user for a failed `operation`.
    ///
    /// Rejections surface the server's text verbatim; anything that never
    /// reached the server reads as a connectivity problem.
    pub fn user_message(&self, operation: Operation) -> String {
        match self.kind() {
            FailureKind::Rejected => self.to_string(),
            FailureKind::Unreachable => format!(
                "{}. Please check your connection and try again.",
                operation.failure_message()
            ),
            FailureKind::Malformed => format!(
                "{}: the server sent an unexpected response.",
                operation.failure_message()
            ),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_is_verbatim() {
        let err = ClientError::Rejected {
            operation: Operation::Update,
            status: 404,
            message: "Employee not found".into(),
        };
        assert_eq!(err.kind(), FailureKind::Rejected);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(Operation::Update), "Employee not found");
    }

    #[test]
    fn test_empty_response_reads_as_unreachable() {
        let err = ClientError::EmptyResponse {
            operation: Operation::List,
        };
        assert_eq!(err.kind(), FailureKind::Unreachable);
        assert_eq!(
            err.user_message(Operation::List),
            "Failed to load employees. Please check your connection and try again."
        );
    }

    #[test]
    fn test_malformed_body() {
        let err = ClientError::InvalidResponse("missing identity".into());
        assert_eq!(err.kind(), FailureKind::Malformed);
        assert!(err.user_message(Operation::Create).starts_with("Failed to add employee"));
    }
}
