//! Attribute storage with explicit / inherited / default resolution
//!
//! An attribute that is not set explicitly falls back to a value pushed down
//! from an ancestor during the inheritance pass, and failing that to the
//! node kind's default. Precedence is always explicit > inherited > default.

use crate::kind::NodeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-node attribute maps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    explicit: BTreeMap<String, String>,
    inherited: BTreeMap<String, String>,
}

impl Attributes {
    /// Create from the raw attribute map of a parsed node
    pub fn from_explicit(explicit: BTreeMap<String, String>) -> Self {
        Self {
            explicit,
            inherited: BTreeMap::new(),
        }
    }

    /// Set an explicit value
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.explicit.insert(name.to_string(), value.into());
    }

    /// Record a value pushed down from an ancestor
    pub fn set_inherited(&mut self, name: &str, value: impl Into<String>) {
        self.inherited.insert(name.to_string(), value.into());
    }

    /// Explicitly set value, if any
    pub fn get_explicit(&self, name: &str) -> Option<&str> {
        self.explicit.get(name).map(String::as_str)
    }

    /// Inherited value, if any
    pub fn get_inherited(&self, name: &str) -> Option<&str> {
        self.inherited.get(name).map(String::as_str)
    }

    /// Resolve a value with full precedence for the given kind
    pub fn resolve(&self, name: &str, kind: NodeKind) -> Option<&str> {
        self.get_explicit(name)
            .or_else(|| self.get_inherited(name))
            .or_else(|| kind.default_attr(name))
    }

    /// Resolve skipping the inherited layer (explicit or kind default only).
    /// Tables use this for their own `displaystyle`, which must ignore the
    /// ambient display context.
    pub fn resolve_no_inherit(&self, name: &str, kind: NodeKind) -> Option<&str> {
        self.get_explicit(name).or_else(|| kind.default_attr(name))
    }

    /// Names of all explicitly set attributes
    pub fn explicit_names(&self) -> impl Iterator<Item = &str> {
        self.explicit.keys().map(String::as_str)
    }
}
