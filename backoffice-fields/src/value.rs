//! Transient form values
//!
//! Values live only while a dialog is open: seeded on open, mutated through
//! field-level setters, converted to a payload on submit, discarded on
//! close. The engine never owns server-side resource data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One uploaded file held by an attachments field.
///
/// Owned by the form while the dialog is open and handed to the caller's
/// submit payload; the engine does not persist it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentItem {
    pub file_id: String,
    pub order: u32,
    pub is_main: bool,
}

impl AttachmentItem {
    /// Create an attachment for a stored file id
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            order: 0,
            is_main: false,
        }
    }
}

/// The semantic value of a single field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Toggle(bool),
    /// Multi-select values (chip-select)
    Tags(Vec<String>),
    Attachments(Vec<AttachmentItem>),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            Self::Toggle(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&[String]> {
        match self {
            Self::Tags(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_attachments(&self) -> Option<&[AttachmentItem]> {
        match self {
            Self::Attachments(a) => Some(a),
            _ => None,
        }
    }

    /// JSON projection used when building a submit payload
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::json!(n),
            Self::Toggle(b) => Value::Bool(*b),
            Self::Tags(tags) => serde_json::json!(tags),
            Self::Attachments(items) => serde_json::json!(items),
        }
    }
}

/// A mapping from field key to value, in field declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    entries: IndexMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Typed accessor for text fields
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Typed accessor for number fields
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }

    /// Typed accessor for toggle fields
    pub fn toggle(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(FieldValue::as_toggle)
    }

    /// Typed accessor for chip-select fields
    pub fn tags(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FieldValue::as_tags)
    }

    /// Typed accessor for attachment fields
    pub fn attachments(&self, key: &str) -> Option<&[AttachmentItem]> {
        self.get(key).and_then(FieldValue::as_attachments)
    }

    /// Project the values into the JSON object handed to services
    pub fn to_payload(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
