//! Upload service seam
//!
//! Attachment fields hand raw files to an injected `UploadService` and keep
//! only the returned reference. The engine never talks to a transport
//! itself.

use async_trait::async_trait;
use backoffice_common::ServiceError;

/// A raw file as received from the user
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// The stored-file reference an upload resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub id: String,
}

/// Injected upload collaborator
#[async_trait]
pub trait UploadService: Send + Sync {
    /// Store the file and return its reference
    async fn upload(&self, file: FileUpload) -> Result<FileRef, ServiceError>;

    /// Resolve a stored file id to a fetchable URL
    fn download_url(&self, file_id: &str) -> String;
}
