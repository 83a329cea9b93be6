//! Schema validation
//!
//! A `Schema` maps field keys to value rules. `validate` checks presence,
//! coerces raw input (string→number, string→boolean, text→tags), and
//! enforces bounds. It is a pure function of the values and the schema:
//! every failure becomes a field error keyed by the offending field, and
//! nothing panics.

use backoffice_common::Translate;
use indexmap::IndexMap;

use crate::value::{FieldValue, FormValues};

/// Outcome of validating a set of form values
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// All rules passed; the carried values are coerced
    Valid(FormValues),
    /// One message per failing field, in schema order
    Invalid(IndexMap<String, String>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The field-error map, if validation failed
    pub fn field_errors(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    pub fn into_result(self) -> Result<FormValues, IndexMap<String, String>> {
        match self {
            Self::Valid(values) => Ok(values),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

/// The validation contract the form engine consumes.
///
/// The engine is agnostic to the concrete schema implementation; `Schema`
/// below is the one this crate provides.
pub trait SchemaValidate: Send + Sync {
    fn validate(&self, values: &FormValues, t: &dyn Translate) -> Validation;

    /// Whether the schema's key space contains `key`
    fn has_rule(&self, key: &str) -> bool;
}

/// The expected shape of one field's value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueShape {
    Text {
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Toggle,
    /// Text constrained to a fixed set of option values
    Choice { allowed: Vec<String> },
    Tags { allowed: Option<Vec<String>> },
    Attachments,
}

/// A single field's validation rule
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRule {
    shape: ValueShape,
    required: bool,
    label: Option<String>,
}

impl ValueRule {
    fn new(shape: ValueShape) -> Self {
        Self {
            shape,
            required: true,
            label: None,
        }
    }

    pub fn text() -> Self {
        Self::new(ValueShape::Text {
            min_len: None,
            max_len: None,
        })
    }

    pub fn number() -> Self {
        Self::new(ValueShape::Number {
            min: None,
            max: None,
        })
    }

    pub fn toggle() -> Self {
        Self::new(ValueShape::Toggle)
    }

    pub fn choice(allowed: Vec<String>) -> Self {
        Self::new(ValueShape::Choice { allowed })
    }

    pub fn tags() -> Self {
        Self::new(ValueShape::Tags { allowed: None })
    }

    pub fn attachments() -> Self {
        Self::new(ValueShape::Attachments)
    }

    /// Mark the rule optional; absent values then pass
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Label used in messages instead of the raw key
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn min_len(mut self, n: usize) -> Self {
        if let ValueShape::Text { min_len, .. } = &mut self.shape {
            *min_len = Some(n);
        }
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        if let ValueShape::Text { max_len, .. } = &mut self.shape {
            *max_len = Some(n);
        }
        self
    }

    pub fn min(mut self, bound: f64) -> Self {
        if let ValueShape::Number { min, .. } = &mut self.shape {
            *min = Some(bound);
        }
        self
    }

    pub fn max(mut self, bound: f64) -> Self {
        if let ValueShape::Number { max, .. } = &mut self.shape {
            *max = Some(bound);
        }
        self
    }

    /// Restrict tag values to a fixed set
    pub fn allow(mut self, values: Vec<String>) -> Self {
        if let ValueShape::Tags { allowed } = &mut self.shape {
            *allowed = Some(values);
        }
        self
    }

    fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(key)
    }
}

/// A per-resource validation schema: one rule per field key
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: IndexMap<String, ValueRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for `key`
    pub fn rule(mut self, key: impl Into<String>, rule: ValueRule) -> Self {
        self.rules.insert(key.into(), rule);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ValueRule> {
        self.rules.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl SchemaValidate for Schema {
    fn validate(&self, values: &FormValues, t: &dyn Translate) -> Validation {
        // Keys without a rule (hidden pass-through fields) survive unchanged.
        let mut coerced = values.clone();
        let mut errors: IndexMap<String, String> = IndexMap::new();

        for (key, rule) in &self.rules {
            let field = rule.display_name(key);
            match values.get(key) {
                None => {
                    if rule.required {
                        errors.insert(
                            key.clone(),
                            t.t("validation.required", &[("field", field)]),
                        );
                    }
                }
                Some(value) => match check_value(rule, field, value, t) {
                    Ok(value) => coerced.insert(key, value),
                    Err(message) => {
                        errors.insert(key.clone(), message);
                    }
                },
            }
        }

        if errors.is_empty() {
            Validation::Valid(coerced)
        } else {
            Validation::Invalid(errors)
        }
    }

    fn has_rule(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }
}

/// Coerce one value against one rule, or produce the field's message
fn check_value(
    rule: &ValueRule,
    field: &str,
    value: &FieldValue,
    t: &dyn Translate,
) -> Result<FieldValue, String> {
    match &rule.shape {
        ValueShape::Text { min_len, max_len } => {
            let text = match value {
                FieldValue::Text(s) => s.clone(),
                FieldValue::Number(n) => n.to_string(),
                FieldValue::Toggle(_) | FieldValue::Tags(_) | FieldValue::Attachments(_) => {
                    return Err(t.t("validation.not_text", &[("field", field)]));
                }
            };
            if rule.required && text.trim().is_empty() {
                return Err(t.t("validation.required", &[("field", field)]));
            }
            let chars = text.chars().count();
            if let Some(min) = min_len {
                if chars < *min {
                    return Err(t.t(
                        "validation.too_short",
                        &[("field", field), ("min", &min.to_string())],
                    ));
                }
            }
            if let Some(max) = max_len {
                if chars > *max {
                    return Err(t.t(
                        "validation.too_long",
                        &[("field", field), ("max", &max.to_string())],
                    ));
                }
            }
            Ok(FieldValue::Text(text))
        }
        ValueShape::Number { min, max } => {
            let number = match value {
                FieldValue::Number(n) => *n,
                FieldValue::Text(s) => match s.trim().parse::<f64>() {
                    Ok(n) => n,
                    Err(_) => return Err(t.t("validation.not_a_number", &[("field", field)])),
                },
                _ => return Err(t.t("validation.not_a_number", &[("field", field)])),
            };
            if let Some(min) = min {
                if number < *min {
                    return Err(t.t(
                        "validation.too_small",
                        &[("field", field), ("min", &min.to_string())],
                    ));
                }
            }
            if let Some(max) = max {
                if number > *max {
                    return Err(t.t(
                        "validation.too_large",
                        &[("field", field), ("max", &max.to_string())],
                    ));
                }
            }
            Ok(FieldValue::Number(number))
        }
        ValueShape::Toggle => match value {
            FieldValue::Toggle(b) => Ok(FieldValue::Toggle(*b)),
            FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(FieldValue::Toggle(true)),
                "false" | "0" | "no" | "off" => Ok(FieldValue::Toggle(false)),
                _ => Err(t.t("validation.not_a_boolean", &[("field", field)])),
            },
            _ => Err(t.t("validation.not_a_boolean", &[("field", field)])),
        },
        ValueShape::Choice { allowed } => {
            let text = match value {
                FieldValue::Text(s) => s.clone(),
                FieldValue::Number(n) => n.to_string(),
                _ => return Err(t.t("validation.not_text", &[("field", field)])),
            };
            if rule.required && text.trim().is_empty() {
                return Err(t.t("validation.required", &[("field", field)]));
            }
            if !allowed.iter().any(|a| a == &text) {
                return Err(t.t(
                    "validation.unknown_option",
                    &[("field", field), ("value", &text)],
                ));
            }
            Ok(FieldValue::Text(text))
        }
        ValueShape::Tags { allowed } => {
            let tags = match value {
                FieldValue::Tags(tags) => tags.clone(),
                // A lone text value becomes a single-item list
                FieldValue::Text(s) if s.trim().is_empty() => Vec::new(),
                FieldValue::Text(s) => vec![s.clone()],
                _ => return Err(t.t("validation.not_a_list", &[("field", field)])),
            };
            if rule.required && tags.is_empty() {
                return Err(t.t("validation.required", &[("field", field)]));
            }
            if let Some(allowed) = allowed {
                for tag in &tags {
                    if !allowed.iter().any(|a| a == tag) {
                        return Err(t.t(
                            "validation.unknown_option",
                            &[("field", field), ("value", tag)],
                        ));
                    }
                }
            }
            Ok(FieldValue::Tags(tags))
        }
        ValueShape::Attachments => match value {
            FieldValue::Attachments(items) => {
                if rule.required && items.is_empty() {
                    return Err(t.t("validation.required", &[("field", field)]));
                }
                Ok(FieldValue::Attachments(items.clone()))
            }
            _ => Err(t.t("validation.not_attachments", &[("field", field)])),
        },
    }
}
