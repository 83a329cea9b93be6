//! Error types for the field registry

use thiserror::Error;

/// Result type for field registry operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur when declaring fields.
///
/// All of these are programming errors in the consumer's field/schema
/// declarations and are raised fail-fast at construction time.
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Two specs in one list share a key
    #[error("duplicate field key: {key}")]
    DuplicateKey { key: String },

    /// A select or chip-select field was declared without options
    #[error("choice field '{key}' has no options")]
    EmptyOptions { key: String },

    /// A visible field has no rule in the associated schema
    #[error("field '{key}' is missing from the schema")]
    MissingFromSchema { key: String },

    /// A hidden field outside the schema must carry a fixed default
    #[error("hidden field '{key}' has no schema rule and no default value")]
    HiddenWithoutDefault { key: String },
}

impl FieldsError {
    /// Create a duplicate key error
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Create an empty options error
    pub fn empty_options(key: impl Into<String>) -> Self {
        Self::EmptyOptions { key: key.into() }
    }
}
