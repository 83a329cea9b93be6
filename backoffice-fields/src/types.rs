//! Field declarations
//!
//! A `FieldSpec` describes one form control: its key, label, kind, and
//! behavior flags. Kinds are a closed tagged union — downstream rendering
//! is a single match over the tag.

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// A single option in a select or chip-select field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The kind of a field — determines the control and the value shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// Multi-line text input
    TextArea,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Toggle,
    Select {
        options: Vec<SelectOption>,
    },
    /// Multi-select rendered as removable chips
    ChipSelect {
        options: Vec<SelectOption>,
    },
    /// Rich-text editor; the value is the editor's serialized content
    RichText,
    /// Rendered nowhere, value passes through to the payload
    Hidden,
    /// Generated unique identifier, never edited
    Id,
    /// Ordered list of uploaded files; requires an upload service
    Attachments,
}

impl FieldKind {
    /// Whether this kind carries a fixed option list
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select { .. } | Self::ChipSelect { .. })
    }

    /// The option list for choice kinds
    pub fn options(&self) -> Option<&[SelectOption]> {
        match self {
            Self::Select { options } | Self::ChipSelect { options } => Some(options),
            _ => None,
        }
    }
}

/// A declarative description of one form field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub optional: bool,
    /// Hidden fields render nowhere but still reach the payload
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldSpec {
    /// Create a field of any kind; `Hidden` and `Id` kinds start hidden
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        let hidden = matches!(kind, FieldKind::Hidden | FieldKind::Id);
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            optional: false,
            hidden,
            default: None,
            placeholder: None,
        }
    }

    /// Single-line text field
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    /// Multi-line text field
    pub fn text_area(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::TextArea)
    }

    /// Numeric field with optional bounds
    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Number { min: None, max: None })
    }

    /// Boolean toggle
    pub fn toggle(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Toggle)
    }

    /// Single select with a fixed option list
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(key, label, FieldKind::Select { options })
    }

    /// Multi select with a fixed option list
    pub fn chip_select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(key, label, FieldKind::ChipSelect { options })
    }

    /// Rich-text editor field
    pub fn rich_text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::RichText)
    }

    /// Generated identifier field (hidden)
    pub fn id(key: impl Into<String>) -> Self {
        Self::new(key, "", FieldKind::Id)
    }

    /// Attachment list field
    pub fn attachments(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Attachments)
    }

    /// Mark the field optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Hide the field from rendering; its value still reaches the payload
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Set the value used when the key is absent from initial values
    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the input placeholder
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_and_id_kinds_start_hidden() {
        assert!(FieldSpec::id("id").hidden);
        assert!(FieldSpec::new("token", "", FieldKind::Hidden).hidden);
        assert!(!FieldSpec::text("title", "Title").hidden);
    }

    #[test]
    fn builder_flags() {
        let field = FieldSpec::text("note", "Note")
            .optional()
            .with_placeholder("Add a note")
            .with_default(FieldValue::text(""));
        assert!(field.optional);
        assert_eq!(field.placeholder.as_deref(), Some("Add a note"));
        assert_eq!(field.default, Some(FieldValue::text("")));
    }

    #[test]
    fn choice_kinds_expose_options() {
        let opts = vec![
            SelectOption::new("draft", "Draft"),
            SelectOption::new("published", "Published"),
        ];
        let field = FieldSpec::select("status", "Status", opts);
        assert!(field.kind.is_choice());
        assert_eq!(field.kind.options().unwrap().len(), 2);
        assert!(FieldSpec::text("t", "T").kind.options().is_none());
    }

    #[test]
    fn field_kind_serializes_with_kind_tag() {
        let kind = FieldKind::Number {
            min: Some(0.0),
            max: None,
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains("\"kind\":\"number\""));
        let parsed: FieldKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, kind);
    }

    #[test]
    fn field_spec_type_renames_in_json() {
        let field = FieldSpec::toggle("active", "Active");
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"type\""));
        assert!(!json.contains("\"kind\":{"));
    }
}
