//! Parsed-input boundary
//!
//! The shape a source-language parser (TeX, MathML, ...) hands to the tree
//! builder: a string kind tag, raw attribute strings, children of the same
//! shape, optional inline text, and a flag marking rows the parser already
//! treats as implicit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of parser output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedNode {
    /// Kind tag, e.g. "mrow", "mo", "mtable"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<ParsedNode>,
    /// Inline text for token kinds
    #[serde(default)]
    pub text: Option<String>,
    /// True if this row was synthesized by the parser rather than written
    /// in the source; only legal on "mrow"
    #[serde(default)]
    pub inferred: bool,
}

impl ParsedNode {
    /// Create an element node
    pub fn element(kind: impl Into<String>, children: Vec<ParsedNode>) -> Self {
        Self {
            kind: kind.into(),
            children,
            ..Default::default()
        }
    }

    /// Create a token node with inline text
    pub fn token(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set one attribute (builder style)
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Mark this row as parser-inferred
    pub fn with_inferred(mut self) -> Self {
        self.inferred = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let node = ParsedNode::element(
            "mrow",
            vec![
                ParsedNode::token("mi", "x"),
                ParsedNode::token("mo", "+").with_attr("stretchy", "true"),
            ],
        );
        assert_eq!(node.kind, "mrow");
        assert_eq!(node.children.len(), 2);
        assert_eq!(
            node.children[1].attributes.get("stretchy").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "type": "mrow",
            "children": [
                {"type": "mi", "text": "x"},
                {"type": "mo", "text": "=", "attributes": {"form": "infix"}}
            ]
        }"#;
        let node: ParsedNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, "mrow");
        assert_eq!(node.children[1].text.as_deref(), Some("="));
        assert!(!node.inferred);
    }
}
