//! Node kinds, arity contracts, and kind-level attribute defaults
//!
//! Each renderable kind is one entry in a closed enumeration. Behavior that
//! in MathML terms belongs to the element (how many children it takes, what
//! its attributes default to, which attributes it pushes down to its
//! descendants) is table-driven off this enum rather than spread over a
//! class hierarchy.

use crate::error::{TreeError, TreeResult};
use serde::{Deserialize, Serialize};

/// The closed set of node kinds the engine renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Top-level math container
    Math,
    /// Explicit horizontal row
    Mrow,
    /// Row synthesized by the tree model rather than present in the input
    InferredMrow,
    /// Identifier token (variables, function names)
    Mi,
    /// Number token
    Mn,
    /// Operator token
    Mo,
    /// Plain text token
    Mtext,
    /// Horizontal space
    Mspace,
    /// Square root
    Msqrt,
    /// Nth root (base + index)
    Mroot,
    /// Fraction (numerator + denominator)
    Mfrac,
    /// Table / matrix
    Mtable,
    /// Table row
    Mtr,
    /// Table cell
    Mtd,
    /// Inert marker substituted for a malformed subtree
    Merror,
}

/// Contract on a kind's child count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Exactly this many children
    Exact(usize),
    /// One child; anything else is wrapped in an inferred row
    ImplicitRow,
    /// Any number of children
    Unbounded,
}

impl NodeKind {
    /// Map an input kind tag to a `NodeKind`
    pub fn from_tag(tag: &str) -> TreeResult<NodeKind> {
        Ok(match tag {
            "math" => NodeKind::Math,
            "mrow" => NodeKind::Mrow,
            "inferred-mrow" => NodeKind::InferredMrow,
            "mi" => NodeKind::Mi,
            "mn" => NodeKind::Mn,
            "mo" => NodeKind::Mo,
            "mtext" => NodeKind::Mtext,
            "mspace" => NodeKind::Mspace,
            "msqrt" => NodeKind::Msqrt,
            "mroot" => NodeKind::Mroot,
            "mfrac" => NodeKind::Mfrac,
            "mtable" => NodeKind::Mtable,
            "mtr" => NodeKind::Mtr,
            "mtd" => NodeKind::Mtd,
            "merror" => NodeKind::Merror,
            _ => return Err(TreeError::UnknownKind(tag.to_string())),
        })
    }

    /// The canonical tag for this kind
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Math => "math",
            NodeKind::Mrow => "mrow",
            NodeKind::InferredMrow => "inferred-mrow",
            NodeKind::Mi => "mi",
            NodeKind::Mn => "mn",
            NodeKind::Mo => "mo",
            NodeKind::Mtext => "mtext",
            NodeKind::Mspace => "mspace",
            NodeKind::Msqrt => "msqrt",
            NodeKind::Mroot => "mroot",
            NodeKind::Mfrac => "mfrac",
            NodeKind::Mtable => "mtable",
            NodeKind::Mtr => "mtr",
            NodeKind::Mtd => "mtd",
            NodeKind::Merror => "merror",
        }
    }

    /// Child-count contract for this kind
    pub fn arity(self) -> Arity {
        match self {
            NodeKind::Math | NodeKind::Mtd | NodeKind::Msqrt => Arity::ImplicitRow,
            NodeKind::Mrow
            | NodeKind::InferredMrow
            | NodeKind::Mtable
            | NodeKind::Mtr
            | NodeKind::Merror => Arity::Unbounded,
            NodeKind::Mfrac | NodeKind::Mroot => Arity::Exact(2),
            NodeKind::Mi | NodeKind::Mn | NodeKind::Mo | NodeKind::Mtext | NodeKind::Mspace => {
                Arity::Exact(0)
            }
        }
    }

    /// True for token kinds that carry inline text
    pub fn is_token(self) -> bool {
        matches!(
            self,
            NodeKind::Mi | NodeKind::Mn | NodeKind::Mo | NodeKind::Mtext
        )
    }

    /// Kind-level attribute defaults, consulted after explicit and inherited
    /// values. `mtd` deliberately has no `rowalign`/`columnalign` default:
    /// those resolve from the values the enclosing table pushes down.
    pub fn defaults(self) -> &'static [(&'static str, &'static str)] {
        match self {
            NodeKind::Math => &[
                ("displaystyle", "false"),
                ("scriptlevel", "0"),
                ("mathsize", "1"),
            ],
            NodeKind::Mi => &[("mathvariant", "italic")],
            NodeKind::Mn | NodeKind::Mtext => &[("mathvariant", "normal")],
            NodeKind::Mo => &[
                ("form", "infix"),
                ("stretchy", "false"),
                ("fence", "false"),
                ("separator", "false"),
            ],
            NodeKind::Mspace => &[("width", "0")],
            NodeKind::Mfrac => &[("linethickness", "medium")],
            NodeKind::Mtable => &[
                ("align", "axis"),
                ("rowalign", "baseline"),
                ("columnalign", "center"),
                ("rowspacing", "1ex"),
                ("columnspacing", ".8em"),
                ("frame", "none"),
                ("displaystyle", "false"),
            ],
            NodeKind::Mtd => &[("rowspan", "1"), ("columnspan", "1")],
            _ => &[],
        }
    }

    /// Default value for one attribute name
    pub fn default_attr(self, name: &str) -> Option<&'static str> {
        self.defaults()
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    }
}

/// Attribute names every kind passes down to its descendants
pub const GLOBAL_INHERITED: &[&str] = &["displaystyle", "scriptlevel", "mathsize"];

/// Table-wide formatting attributes a table pushes into its rows and cells
pub const TABLE_INHERITED: &[&str] = &["rowalign", "columnalign"];
