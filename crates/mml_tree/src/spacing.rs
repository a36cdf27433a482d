//! Spacing-class (TeX-class) computation
//!
//! Every node gets one spacing class in a single pass after attribute
//! inheritance. The class feeds inter-element spacing decisions downstream
//! and is never recomputed once layout has started.
//!
//! Composite containers restart their children with no previous class, so
//! each subtree's internal spacing logic is independent of its surroundings.

use crate::kind::NodeKind;
use crate::node::MmlNode;
use serde::{Deserialize, Serialize};

/// Operator-spacing category of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TexClass {
    /// Ordinary symbol
    Ord,
    /// Large operator (sum, integral, ...)
    Op,
    /// Binary operator
    Bin,
    /// Relation
    Rel,
    /// Opening delimiter
    Open,
    /// Closing delimiter
    Close,
    /// Punctuation
    Punct,
    /// Subformula (explicit row with several children)
    Inner,
    /// Takes part in no spacing decision
    None,
}

/// Operator form as declared or defaulted on an `mo` node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorForm {
    Prefix,
    Infix,
    Postfix,
}

impl OperatorForm {
    pub fn from_attr(value: &str) -> OperatorForm {
        match value {
            "prefix" => OperatorForm::Prefix,
            "postfix" => OperatorForm::Postfix,
            _ => OperatorForm::Infix,
        }
    }
}

/// Classify an operator from its text and form.
///
/// A fixed dictionary keyed by the operator text; the form only matters for
/// characters the dictionary does not know.
pub fn classify_operator(text: &str, form: OperatorForm) -> TexClass {
    match text {
        "+" | "-" | "\u{2212}" | "\u{00B1}" | "\u{00D7}" | "\u{00F7}" | "\u{22C5}" => TexClass::Bin,
        "=" | "<" | ">" | "\u{2260}" | "\u{2264}" | "\u{2265}" | "\u{2248}" | "\u{2261}"
        | "\u{2208}" | "\u{2192}" => TexClass::Rel,
        "(" | "[" | "{" | "\u{27E8}" | "\u{2308}" | "\u{230A}" => TexClass::Open,
        ")" | "]" | "}" | "\u{27E9}" | "\u{2309}" | "\u{230B}" => TexClass::Close,
        "," | ";" => TexClass::Punct,
        "\u{2211}" | "\u{220F}" | "\u{222B}" | "\u{22C2}" | "\u{22C3}" | "lim" => TexClass::Op,
        _ => match form {
            OperatorForm::Prefix | OperatorForm::Postfix => TexClass::Ord,
            OperatorForm::Infix => TexClass::Ord,
        },
    }
}

/// True when a binary operator in this left context has no left operand and
/// must demote to an ordinary symbol (TeX's rule for leading/binary runs).
fn demotes_bin(prev: TexClass) -> bool {
    matches!(
        prev,
        TexClass::None | TexClass::Bin | TexClass::Rel | TexClass::Open | TexClass::Punct
    )
}

/// Assign spacing classes through `node`'s subtree.
///
/// `prev` is the class of the previous sibling (or `None` at the start of a
/// run). Returns the class assigned to `node`, which becomes the next
/// sibling's `prev`.
pub(crate) fn assign_classes(node: &mut MmlNode, prev: TexClass) -> TexClass {
    let class = match node.kind() {
        NodeKind::Mo => {
            let form = OperatorForm::from_attr(node.attr("form").unwrap_or("infix"));
            let mut class = classify_operator(node.text().unwrap_or(""), form);
            if class == TexClass::Bin && demotes_bin(prev) {
                class = TexClass::Ord;
            }
            class
        }
        NodeKind::Mi | NodeKind::Mn | NodeKind::Mtext => TexClass::Ord,
        NodeKind::Mspace => TexClass::None,
        NodeKind::Mrow | NodeKind::InferredMrow => {
            let mut child_prev = TexClass::None;
            for child in node.children_mut() {
                child_prev = assign_classes(child, child_prev);
            }
            match (node.children().len(), node.kind()) {
                (1, _) => node.children()[0].spacing_class(),
                (_, NodeKind::Mrow) => TexClass::Inner,
                _ => TexClass::Ord,
            }
        }
        NodeKind::Mtd => {
            // A cell has exactly one inferred row; delegate to its class.
            let mut class = TexClass::Ord;
            for child in node.children_mut() {
                class = assign_classes(child, TexClass::None);
            }
            class
        }
        _ => {
            // Remaining composites (math, mtable, mtr, mfrac, msqrt, mroot,
            // merror): each child subtree restarts its own spacing run.
            for child in node.children_mut() {
                assign_classes(child, TexClass::None);
            }
            TexClass::Ord
        }
    };
    node.set_spacing_class(class);
    class
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_dictionary() {
        assert_eq!(
            classify_operator("+", OperatorForm::Infix),
            TexClass::Bin
        );
        assert_eq!(classify_operator("=", OperatorForm::Infix), TexClass::Rel);
        assert_eq!(classify_operator("(", OperatorForm::Prefix), TexClass::Open);
        assert_eq!(classify_operator(")", OperatorForm::Postfix), TexClass::Close);
        assert_eq!(classify_operator(",", OperatorForm::Infix), TexClass::Punct);
        assert_eq!(
            classify_operator("\u{2211}", OperatorForm::Prefix),
            TexClass::Op
        );
    }

    #[test]
    fn test_bin_demotion_context() {
        assert!(demotes_bin(TexClass::None));
        assert!(demotes_bin(TexClass::Open));
        assert!(demotes_bin(TexClass::Rel));
        assert!(!demotes_bin(TexClass::Ord));
        assert!(!demotes_bin(TexClass::Close));
    }
}
