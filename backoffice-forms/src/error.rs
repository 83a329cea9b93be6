//! Error types for the form engine

use backoffice_fields::FieldsError;
use thiserror::Error;

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that can occur while driving a form dialog
#[derive(Debug, Error)]
pub enum FormError {
    /// Malformed field/schema declaration
    #[error(transparent)]
    Fields(#[from] FieldsError),

    /// The dialog is already open
    #[error("dialog is already open")]
    AlreadyOpen,

    /// The operation needs an open dialog
    #[error("dialog is not open")]
    NotOpen,

    /// The operation needs the dialog to be editable (not mid-submit)
    #[error("dialog is not editable while submitting")]
    NotEditing,

    /// A submit is already in flight for this dialog
    #[error("a submit is already in flight")]
    SubmitInFlight,

    /// The intent was not declared for this dialog
    #[error("unknown submit intent: {intent}")]
    UnknownIntent { intent: String },

    /// The key does not belong to this dialog's field list
    #[error("unknown field: {key}")]
    UnknownField { key: String },

    /// The field is not an attachments field
    #[error("field '{key}' does not accept file uploads")]
    NotAttachmentField { key: String },

    /// An attachments field was declared but no upload service was supplied
    #[error("field '{key}' requires an upload service")]
    UploaderRequired { key: String },

    /// Validation blocked the submit; messages are on the dialog
    #[error("validation failed for {fields} field(s)")]
    ValidationFailed { fields: usize },
}

impl FormError {
    /// Create an unknown field error
    pub fn unknown_field(key: impl Into<String>) -> Self {
        Self::UnknownField { key: key.into() }
    }
}
