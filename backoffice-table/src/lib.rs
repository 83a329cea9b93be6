//! Data-table state
//!
//! `backoffice-table` owns the bookkeeping every admin list view repeats:
//! column definitions with a projection fallback, pagination arithmetic,
//! page-scoped row selection, and loading/empty display logic. It renders
//! nothing and fetches nothing — callers hand it already-paginated rows and
//! read state back out.

pub mod columns;
pub mod error;
pub mod pagination;
pub mod selection;
pub mod state;

pub use columns::ColumnDef;
pub use error::{Result, TableError};
pub use pagination::Pagination;
pub use selection::Selection;
pub use state::{DisplayState, TableState};
