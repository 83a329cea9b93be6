//! Shared seams for the backoffice engine
//!
//! `backoffice-common` holds the two contracts every other crate in the
//! workspace leans on: the `ServiceError` shape all injected collaborators
//! reject with, and the `Translate` seam the engine routes its own
//! user-facing strings through. It knows nothing about fields, forms, or
//! tables.

pub mod error;
pub mod i18n;

pub use error::ServiceError;
pub use i18n::{EnglishFallback, Translate};
