//! Error types for the CRUD context

use backoffice_common::ServiceError;
use backoffice_forms::FormError;
use thiserror::Error;

/// Result type for CRUD operations
pub type Result<T> = std::result::Result<T, CrudError>;

/// Errors that can occur while driving a resource's CRUD state
#[derive(Debug, Error)]
pub enum CrudError {
    /// The form engine refused the operation (validation, phase, intents)
    #[error(transparent)]
    Form(#[from] FormError),

    /// The injected service rejected the call
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The update dialog has no target resource
    #[error("update dialog has no target")]
    MissingTarget,
}

impl CrudError {
    /// Whether this is a validation failure (messages are on the dialog)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Form(FormError::ValidationFailed { .. }))
    }
}
