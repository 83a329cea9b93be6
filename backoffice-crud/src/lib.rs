//! Per-resource CRUD context
//!
//! `backoffice-crud` composes the form engine with a resource's injected
//! `{create, update, delete}` services into one state machine per resource
//! type: dialog visibility, the update target, batch operations, and a
//! version counter that invalidates cached list data after every successful
//! mutation. List effects subscribe to the counter; nothing in the engine
//! calls a loader directly.

pub mod batch;
pub mod context;
pub mod error;
pub mod reload;
pub mod sequence;
pub mod service;

pub use batch::BatchOutcome;
pub use context::CrudContext;
pub use error::{CrudError, Result};
pub use reload::ReloadSignal;
pub use sequence::{LoadSequencer, LoadTicket};
pub use service::{Resource, ResourceService};

// Re-export the seams callers wire up alongside this crate
pub use backoffice_common::{ServiceError, Translate};
pub use backoffice_forms::{FormDialog, Intent, UploadService};
