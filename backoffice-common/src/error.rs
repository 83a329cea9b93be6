//! Error type for injected collaborators

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error shape every injected service (resource CRUD, upload) rejects
/// with: a single human-readable message. The engine recovers these at the
/// dialog/table boundary and never inspects anything beyond the message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    /// Create a service error from any displayable message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&str> for ServiceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ServiceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServiceError::new("boom");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_round_trip() {
        let err = ServiceError::new("network unreachable");
        let json = serde_json::to_string(&err).unwrap();
        let parsed: ServiceError = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, err);
    }
}
