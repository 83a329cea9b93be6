//! Validated field lists
//!
//! `FieldList` is the unit a dialog is built from. Construction is where
//! malformed declarations fail: duplicate keys and choice fields without
//! options never reach a running form.

use std::collections::HashSet;

use ulid::Ulid;

use crate::error::{FieldsError, Result};
use crate::schema::SchemaValidate;
use crate::types::{FieldKind, FieldSpec};
use crate::value::{FieldValue, FormValues};

/// An ordered, key-unique list of field specs
#[derive(Debug, Clone)]
pub struct FieldList {
    specs: Vec<FieldSpec>,
}

impl FieldList {
    /// Validate and wrap a list of specs.
    ///
    /// Fails on duplicate keys and on select/chip-select fields declared
    /// without options.
    pub fn new(specs: Vec<FieldSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.key.as_str()) {
                return Err(FieldsError::duplicate_key(&spec.key));
            }
            if spec.kind.is_choice() && spec.kind.options().map_or(true, |o| o.is_empty()) {
                return Err(FieldsError::empty_options(&spec.key));
            }
        }
        Ok(Self { specs })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.specs.iter().find(|s| s.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.iter()
    }

    /// The specs a renderer should draw, in declaration order
    pub fn visible(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.iter().filter(|s| !s.hidden)
    }

    /// Check this list against a schema's key space.
    ///
    /// Every visible field must have a rule; a hidden field without a rule
    /// must carry a fixed default so its payload value is determined.
    pub fn check_against(&self, schema: &dyn SchemaValidate) -> Result<()> {
        for spec in &self.specs {
            if schema.has_rule(&spec.key) {
                continue;
            }
            if !spec.hidden {
                return Err(FieldsError::MissingFromSchema {
                    key: spec.key.clone(),
                });
            }
            if spec.default.is_none() && !matches!(spec.kind, FieldKind::Id) {
                return Err(FieldsError::HiddenWithoutDefault {
                    key: spec.key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Seed the values for a newly opened dialog.
    ///
    /// A key present in `initial` wins; a spec default applies only when the
    /// key is absent. `Id` fields with neither generate a fresh ULID.
    pub fn initial_values(&self, initial: Option<&FormValues>) -> FormValues {
        let mut values = FormValues::new();
        for spec in &self.specs {
            if let Some(value) = initial.and_then(|i| i.get(&spec.key)) {
                values.insert(&spec.key, value.clone());
            } else if let Some(default) = &spec.default {
                values.insert(&spec.key, default.clone());
            } else if matches!(spec.kind, FieldKind::Id) {
                values.insert(&spec.key, FieldValue::Text(Ulid::new().to_string()));
            }
        }
        values
    }
}
