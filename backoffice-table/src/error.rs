//! Error types for table state

use thiserror::Error;

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur in table bookkeeping
#[derive(Debug, Error)]
pub enum TableError {
    /// Page size must be at least one
    #[error("invalid page size: {size}")]
    InvalidPageSize { size: usize },

    /// Requested page is outside the valid range
    #[error("page {page} out of range (total pages: {pages})")]
    PageOutOfRange { page: usize, pages: usize },
}
