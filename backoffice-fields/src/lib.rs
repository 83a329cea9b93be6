//! Field registry and schema validation
//!
//! `backoffice-fields` is a standalone, schema-only crate: it owns the
//! declarative description of form fields (`FieldSpec`, `FieldKind`), the
//! transient values a form holds (`FormValues`, `FieldValue`), and the
//! validator that turns raw values into a coerced payload (`Schema`,
//! `ValueRule`). It knows nothing about dialogs, tables, or any concrete
//! resource — consumers declare their own field lists and schemas.
//!
//! # Architecture
//!
//! - **Closed field kinds**: field types are a tagged union, not strings;
//!   render dispatch downstream is a single match over the tag
//! - **Fail fast**: malformed field lists (duplicate keys, choice fields
//!   without options) are rejected at construction, not at render time
//! - **Pure validation**: `validate` is a pure function of the values and
//!   the schema; every failure becomes a field error, nothing panics

pub mod error;
pub mod list;
pub mod schema;
pub mod types;
pub mod value;

pub use error::{FieldsError, Result};
pub use list::FieldList;
pub use schema::{Schema, SchemaValidate, Validation, ValueRule, ValueShape};
pub use types::{FieldKind, FieldSpec, SelectOption};
pub use value::{AttachmentItem, FieldValue, FormValues};
