//! Schema-driven dialog and form engine
//!
//! A `FormDialog` turns a declarative field list plus a validation schema
//! into a working create/edit form: it seeds initial values, tracks edits,
//! blocks submission on validation failure, wires file uploads, and
//! serializes submits so only one can be in flight per dialog.
//!
//! The engine is headless — it owns state and transitions, never rendering.
//! Service calls happen between `begin_submit` (which yields the validated
//! payload) and `finish_submit` (which applies the outcome); the dialog is
//! the single owner of its transient state throughout.

pub mod dialog;
pub mod error;
pub mod intent;
pub mod upload;

pub use dialog::{FormDialog, FormMode, FormPhase, SubmitDisposition, SubmitTicket};
pub use error::{FormError, Result};
pub use intent::Intent;
pub use upload::{FileRef, FileUpload, UploadService};
