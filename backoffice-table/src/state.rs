//! Table state
//!
//! `TableState` composes columns, rows, pagination, and selection for one
//! list view. Rows arrive already paginated; the state's job is the
//! bookkeeping around them — and the invariant that replacing the data
//! clears the selection, so a batch operation can never target rows the
//! user can no longer see.

use backoffice_common::{EnglishFallback, Translate};
use serde::Serialize;
use tracing::debug;

use crate::columns::{json_text, ColumnDef};
use crate::error::Result;
use crate::pagination::Pagination;
use crate::selection::Selection;

/// What a renderer should show for the table body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// A fetch is in flight; never show the empty message here
    Loading,
    /// No rows and not loading
    Empty(String),
    Rows,
}

/// State for one paginated, selectable list view
pub struct TableState<T> {
    columns: Vec<ColumnDef<T>>,
    rows: Vec<T>,
    pagination: Option<Pagination>,
    selection: Selection,
    loading: bool,
    empty_message: String,
    search: Option<String>,
    selected_row: Option<String>,
    #[allow(clippy::type_complexity)]
    row_id: Box<dyn Fn(&T) -> Option<String> + Send + Sync>,
    #[allow(clippy::type_complexity)]
    row_class: Option<Box<dyn Fn(&T) -> Option<String> + Send + Sync>>,
}

impl<T: Serialize> TableState<T> {
    /// Create a table over the given columns.
    ///
    /// Row identity defaults to the serialized row's `"id"` field.
    pub fn new(columns: Vec<ColumnDef<T>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            pagination: None,
            selection: Selection::new(),
            loading: false,
            empty_message: EnglishFallback.t("table.empty", &[]),
            search: None,
            selected_row: None,
            row_id: Box::new(|row| {
                serde_json::to_value(row)
                    .ok()
                    .as_ref()
                    .and_then(|v| v.get("id"))
                    .filter(|v| !v.is_null())
                    .map(json_text)
            }),
            row_class: None,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Override how a row's id is derived
    pub fn with_row_id(mut self, f: impl Fn(&T) -> Option<String> + Send + Sync + 'static) -> Self {
        self.row_id = Box::new(f);
        self
    }

    /// Supply a per-row class hook for the renderer
    pub fn with_row_class(
        mut self,
        f: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.row_class = Some(Box::new(f));
        self
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replace the rows after a fetch resolves.
    ///
    /// Clears the selection (the old page's ids are no longer visible) and
    /// ends the loading state.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.loading = false;
        if !self.selection.is_empty() {
            debug!(cleared = self.selection.len(), "selection cleared on data change");
            self.selection.clear();
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// The body state a renderer should draw
    pub fn display(&self) -> DisplayState {
        if self.loading {
            DisplayState::Loading
        } else if self.rows.is_empty() {
            DisplayState::Empty(self.empty_message.clone())
        } else {
            DisplayState::Rows
        }
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// The cell texts for one row, in column declaration order
    pub fn cells(&self, row: &T) -> Vec<String> {
        self.columns.iter().map(|c| c.cell(row)).collect()
    }

    // =========================================================================
    // Identity and navigation
    // =========================================================================

    pub fn row_id(&self, row: &T) -> Option<String> {
        (self.row_id)(row)
    }

    /// Ids of the currently rendered page, in row order
    pub fn row_ids(&self) -> Vec<String> {
        self.rows.iter().filter_map(|r| (self.row_id)(r)).collect()
    }

    pub fn row_class(&self, row: &T) -> Option<String> {
        self.row_class.as_ref().and_then(|f| f(row))
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Navigate to a page; the selection is cleared immediately so stale ids
    /// cannot be batch-operated on while the new page loads
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        if let Some(p) = self.pagination.as_mut() {
            p.set_page(page)?;
        }
        self.selection.clear();
        Ok(())
    }

    /// Change the page size; resets to the first page and clears selection
    pub fn set_size(&mut self, size: usize) -> Result<()> {
        if let Some(p) = self.pagination.as_mut() {
            p.set_size(size)?;
        }
        self.selection.clear();
        Ok(())
    }

    /// Record the server-reported total after a fetch
    pub fn set_total_elements(&mut self, total: u64) {
        if let Some(p) = self.pagination.as_mut() {
            p.set_total_elements(total);
        }
    }

    /// The live search query callers pass to their list fetch
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Change the search query: back to the first page, selection cleared
    /// (the matching rows are a different data set)
    pub fn set_search(&mut self, query: Option<String>) {
        self.search = query.filter(|q| !q.is_empty());
        if let Some(p) = self.pagination.as_mut() {
            // A changed filter restarts from the first page.
            let _ = p.set_page(0);
        }
        self.selection.clear();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Flip one row's checkbox
    pub fn toggle_row(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Header checkbox: select exactly the currently rendered page
    pub fn select_page(&mut self) {
        let ids = self.row_ids();
        self.selection.set_page_selected(&ids, true);
    }

    /// Header checkbox off: deselect the currently rendered page
    pub fn deselect_page(&mut self) {
        let ids = self.row_ids();
        self.selection.set_page_selected(&ids, false);
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(&self.row_ids())
    }

    /// Batch actions are enabled only with a non-empty selection
    pub fn batch_enabled(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Clear the selection after a completed batch operation
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The highlighted row (row-click target), distinct from checkboxes
    pub fn set_selected_row(&mut self, id: Option<String>) {
        self.selected_row = id;
    }

    pub fn selected_row(&self) -> Option<&str> {
        self.selected_row.as_deref()
    }

    // =========================================================================
    // Local patches
    // =========================================================================

    /// Apply an optimistic in-place patch to the row with `id`.
    ///
    /// Returns the pre-patch row so a failed service call can roll back via
    /// `restore_row`; the next full reload reconciles either way.
    pub fn apply_patch(&mut self, id: &str, patch: impl FnOnce(&mut T)) -> Option<T>
    where
        T: Clone,
    {
        let row_id = &self.row_id;
        let row = self
            .rows
            .iter_mut()
            .find(|r| row_id(r).as_deref() == Some(id))?;
        let previous = row.clone();
        patch(row);
        Some(previous)
    }

    /// Roll back a failed patch by restoring the saved row
    pub fn restore_row(&mut self, previous: T) -> bool
    where
        T: Clone,
    {
        let Some(id) = (self.row_id)(&previous) else {
            return false;
        };
        let row_id = &self.row_id;
        match self
            .rows
            .iter_mut()
            .find(|r| row_id(r).as_deref() == Some(id.as_str()))
        {
            Some(row) => {
                *row = previous;
                true
            }
            None => false,
        }
    }
}
