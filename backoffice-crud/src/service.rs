//! Injected resource service seam
//!
//! Pages own the transport; the engine only needs these contracts. Every
//! rejection carries a human-readable message and is recovered at the
//! dialog/table boundary.

use async_trait::async_trait;
use backoffice_common::ServiceError;
use serde_json::Value;

/// A resource the CRUD context can manage
pub trait Resource: Send + Sync {
    /// The opaque id used for update and delete calls
    fn id(&self) -> String;
}

/// The `{create, update, delete}` service triple for one resource type
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// Create a resource from a validated payload; returns the created row
    async fn create(&self, payload: Value) -> Result<Value, ServiceError>;

    /// Update the resource with `id`; returns the updated row
    async fn update(&self, id: &str, payload: Value) -> Result<Value, ServiceError>;

    /// Delete the resource with `id`
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
