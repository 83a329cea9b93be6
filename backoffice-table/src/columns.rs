//! Column definitions
//!
//! Columns render in declaration order; the table never reorders or sorts.
//! A column without a custom renderer projects the row to JSON and shows
//! the value under its key as text.

use serde::Serialize;
use serde_json::Value;

/// Text coercion for projected JSON values
pub(crate) fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// One column of a data table
pub struct ColumnDef<T> {
    pub key: String,
    pub header: String,
    #[allow(clippy::type_complexity)]
    render: Option<Box<dyn Fn(&T) -> String + Send + Sync>>,
}

impl<T: Serialize> ColumnDef<T> {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            render: None,
        }
    }

    /// Supply a custom cell renderer
    pub fn with_render(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// The cell text for `row`: the custom renderer, or `row[key]` as text
    pub fn cell(&self, row: &T) -> String {
        if let Some(render) = &self.render {
            return render(row);
        }
        serde_json::to_value(row)
            .ok()
            .as_ref()
            .and_then(|v| v.get(&self.key))
            .map(json_text)
            .unwrap_or_default()
    }
}

impl<T> std::fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("render", &self.render.is_some())
            .finish()
    }
}
