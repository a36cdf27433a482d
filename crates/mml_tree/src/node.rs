//! The typed node tree
//!
//! Nodes are created once by the builder, mutated only during the
//! inheritance and spacing passes, and read-only thereafter. Children are
//! owned by value in the parent's sequence; there are no parent
//! back-pointers (upward lookups happen during construction, where the
//! ancestor context is in hand).

use crate::attributes::Attributes;
use crate::kind::NodeKind;
use crate::spacing::TexClass;
use serde::{Deserialize, Serialize};

/// A typed element of the expression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MmlNode {
    kind: NodeKind,
    attributes: Attributes,
    children: Vec<MmlNode>,
    /// Inline text for token kinds (mi, mn, mo, mtext)
    text: Option<String>,
    /// Derived spacing class; set once by the classification pass
    spacing_class: Option<TexClass>,
}

impl MmlNode {
    /// Create a node with the given kind, attributes, and children
    pub fn new(kind: NodeKind, attributes: Attributes, children: Vec<MmlNode>) -> Self {
        Self {
            kind,
            attributes,
            children,
            text: None,
            spacing_class: None,
        }
    }

    /// Create a token node carrying inline text
    pub fn token(kind: NodeKind, attributes: Attributes, text: impl Into<String>) -> Self {
        Self {
            kind,
            attributes,
            children: Vec::new(),
            text: Some(text.into()),
            spacing_class: None,
        }
    }

    /// Create an inert error marker recording a structural message
    pub fn error(message: impl Into<String>) -> Self {
        let mut attrs = Attributes::default();
        attrs.set("message", message.into());
        Self::new(NodeKind::Merror, attrs, Vec::new())
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }

    /// True for rows synthesized by the tree model
    pub fn is_inferred(&self) -> bool {
        self.kind == NodeKind::InferredMrow
    }

    pub fn children(&self) -> &[MmlNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [MmlNode] {
        &mut self.children
    }

    /// Take ownership of the children (normalization re-parents them)
    pub(crate) fn take_children(&mut self) -> Vec<MmlNode> {
        std::mem::take(&mut self.children)
    }

    pub(crate) fn set_children(&mut self, children: Vec<MmlNode>) {
        self.children = children;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Resolve an attribute with explicit > inherited > default precedence
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.resolve(name, self.kind)
    }

    /// Resolve a boolean attribute ("true"/"false")
    pub fn attr_bool(&self, name: &str) -> bool {
        self.attr(name) == Some("true")
    }

    /// Resolve a numeric attribute
    pub fn attr_f32(&self, name: &str) -> Option<f32> {
        self.attr(name).and_then(|v| v.parse().ok())
    }

    /// The node's derived spacing class.
    ///
    /// Defaults to `Ord` if read on a tree that skipped classification
    /// (hand-built test trees); built trees always have it set.
    pub fn spacing_class(&self) -> TexClass {
        self.spacing_class.unwrap_or(TexClass::Ord)
    }

    pub(crate) fn set_spacing_class(&mut self, class: TexClass) {
        self.spacing_class = Some(class);
    }
}
