//! Submit intents
//!
//! An intent names one of the alternate outcomes a single form can submit
//! toward (save-as-draft vs. publish). All intents share the same validated
//! payload; only the tag differs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named submit action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent(String);

impl Intent {
    /// The default intent a dialog declares when none are given
    pub const DEFAULT: &'static str = "submit";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Intent {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Intent {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
