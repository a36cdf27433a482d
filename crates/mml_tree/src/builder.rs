//! Tree construction from parsed input
//!
//! The builder turns parser output into a typed tree in one depth-first
//! sweep per concern: build + normalize + validate, then the inheritance
//! pass, then the spacing-class pass. Structural problems surface as an
//! inert `merror` substitute in lenient mode or abort the subtree in strict
//! mode; they are never silently dropped unless `fix_structure` asks for
//! silent normalization.

use crate::attributes::Attributes;
use crate::error::{TreeError, TreeResult};
use crate::kind::{Arity, NodeKind, GLOBAL_INHERITED, TABLE_INHERITED};
use crate::node::MmlNode;
use crate::parsed::ParsedNode;
use crate::spacing::{assign_classes, TexClass};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Configuration recognized by the tree builder
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilderOptions {
    /// Abort subtree construction on structural errors instead of
    /// substituting error markers
    pub strict: bool,
    /// Silently normalize malformed children (wrap a stray table child in a
    /// synthesized row) instead of reporting a structural error
    pub fix_structure: bool,
}

/// Result of a successful build
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// The typed tree, fully normalized, inherited, and classified
    pub root: MmlNode,
    /// Sorted, distinct attribute names seen anywhere in the input
    pub attribute_keys: Vec<String>,
}

/// Builds typed node trees from parsed input
#[derive(Debug, Default)]
pub struct TreeBuilder {
    options: TreeBuilderOptions,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TreeBuilderOptions) -> Self {
        Self { options }
    }

    /// Build a tree from parsed input.
    ///
    /// Runs the full pipeline: construction with kind-specific child
    /// normalization and arity validation, inherited-attribute propagation,
    /// and spacing-class assignment. The returned tree is immutable from the
    /// caller's point of view; layout only reads it.
    pub fn build(&self, parsed: &ParsedNode) -> TreeResult<BuildOutcome> {
        let mut keys = BTreeSet::new();
        let mut root = self.build_node(parsed, &mut keys)?;
        self.inherit(&mut root, &BTreeMap::new());
        assign_classes(&mut root, TexClass::None);
        Ok(BuildOutcome {
            root,
            attribute_keys: keys.into_iter().collect(),
        })
    }

    fn build_node(
        &self,
        parsed: &ParsedNode,
        keys: &mut BTreeSet<String>,
    ) -> TreeResult<MmlNode> {
        for name in parsed.attributes.keys() {
            keys.insert(name.clone());
        }
        // Unknown kinds are rejected outright in both modes.
        let mut kind = NodeKind::from_tag(&parsed.kind)?;
        if parsed.inferred {
            if kind != NodeKind::Mrow {
                return Err(TreeError::Structure(format!(
                    "only mrow nodes can be inferred, not {}",
                    kind.tag()
                )));
            }
            kind = NodeKind::InferredMrow;
        }
        let attrs = Attributes::from_explicit(parsed.attributes.clone());

        let mut children = Vec::with_capacity(parsed.children.len());
        for parsed_child in &parsed.children {
            match self.build_node(parsed_child, keys) {
                Ok(child) => children.push(child),
                // A malformed child is attached to its own subtree: the
                // sibling subtrees still build.
                Err(err @ TreeError::UnknownKind(_)) => return Err(err),
                Err(err) if self.options.strict => return Err(err),
                Err(err) => {
                    debug!(error = %err, parent = kind.tag(), "substituting error marker");
                    children.push(MmlNode::error(err.to_string()));
                }
            }
        }

        if kind.is_token() && !children.is_empty() {
            return Err(TreeError::WrongArity {
                kind: kind.tag(),
                expected: "0".to_string(),
                found: children.len(),
            });
        }

        let mut node = if kind.is_token() {
            MmlNode::token(kind, attrs, parsed.text.clone().unwrap_or_default())
        } else {
            MmlNode::new(kind, attrs, children)
        };
        self.normalize(&mut node)?;
        check_arity(&node)?;
        Ok(node)
    }

    /// Kind-specific child normalization, run before arity validation
    fn normalize(&self, node: &mut MmlNode) -> TreeResult<()> {
        match node.kind() {
            NodeKind::Mtable => self.normalize_grid(node, NodeKind::Mtr, "mtr")?,
            NodeKind::Mtr => self.normalize_grid(node, NodeKind::Mtd, "mtd")?,
            kind if kind.arity() == Arity::ImplicitRow => {
                // A single child stands alone; zero or several get wrapped
                // in an inferred row so the cell always has one body.
                if node.children().len() != 1 {
                    let wrapped = MmlNode::new(
                        NodeKind::InferredMrow,
                        Attributes::default(),
                        node.take_children(),
                    );
                    node.set_children(vec![wrapped]);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Guarantee that every child of a grid container has the required kind
    fn normalize_grid(
        &self,
        node: &mut MmlNode,
        required: NodeKind,
        required_tag: &'static str,
    ) -> TreeResult<()> {
        let parent_tag = node.kind().tag();
        let mut normalized = Vec::with_capacity(node.children().len());
        for child in node.take_children() {
            if child.is_kind(required) {
                normalized.push(child);
                continue;
            }
            if self.options.fix_structure {
                // Normalize the synthesized wrapper too, so a stray token
                // under mtable ends up as mtr > mtd > token.
                let mut wrapper = MmlNode::new(required, Attributes::default(), vec![child]);
                self.normalize(&mut wrapper)?;
                normalized.push(wrapper);
            } else if self.options.strict {
                return Err(TreeError::Structure(format!(
                    "children of {parent_tag} must be {required_tag}, found {}",
                    child.kind().tag()
                )));
            } else {
                let message = format!(
                    "children of {parent_tag} must be {required_tag}, found {}",
                    child.kind().tag()
                );
                debug!(parent = parent_tag, "substituting error marker: {message}");
                let marker = MmlNode::error(message);
                // Substitute a well-formed stand-in so the grid invariant
                // holds even around the error marker.
                let substitute = if required == NodeKind::Mtr {
                    MmlNode::new(
                        NodeKind::Mtr,
                        Attributes::default(),
                        vec![MmlNode::new(NodeKind::Mtd, Attributes::default(), vec![marker])],
                    )
                } else {
                    MmlNode::new(required, Attributes::default(), vec![marker])
                };
                normalized.push(substitute);
            }
        }
        node.set_children(normalized);
        Ok(())
    }

    /// Pre-order pass pushing inheritable attribute values down the tree
    fn inherit(&self, node: &mut MmlNode, incoming: &BTreeMap<String, String>) {
        for (name, value) in incoming {
            node.attributes_mut().set_inherited(name, value.clone());
        }

        let mut outgoing = incoming.clone();
        match node.kind() {
            NodeKind::Math => {
                for name in GLOBAL_INHERITED {
                    if let Some(value) = node.attr(name) {
                        outgoing.insert(name.to_string(), value.to_string());
                    }
                }
            }
            NodeKind::Mtable => {
                // A table opens a fresh display context: its own
                // explicit-or-default displaystyle wins over the ambient one.
                let display = node
                    .attributes()
                    .resolve_no_inherit("displaystyle", NodeKind::Mtable)
                    .unwrap_or("false")
                    .to_string();
                outgoing.insert("displaystyle".to_string(), display);
                for name in TABLE_INHERITED {
                    if let Some(value) = node.attr(name) {
                        outgoing.insert(name.to_string(), value.to_string());
                    }
                }
            }
            NodeKind::Mfrac => {
                // Numerator and denominator leave display mode; outside
                // display mode they also move one script level deeper.
                let display = node.attr("displaystyle") == Some("true");
                let level = script_level(node);
                let child_level = if display { level } else { level + 1 };
                outgoing.insert("displaystyle".to_string(), "false".to_string());
                outgoing.insert("scriptlevel".to_string(), child_level.to_string());
            }
            _ => {}
        }

        if node.kind() == NodeKind::Mroot {
            // The index renders two script levels up, never in display mode.
            let mut index_outgoing = outgoing.clone();
            index_outgoing.insert("displaystyle".to_string(), "false".to_string());
            index_outgoing.insert(
                "scriptlevel".to_string(),
                (script_level(node) + 2).to_string(),
            );
            let children = node.children_mut();
            if let Some(base) = children.first_mut() {
                self.inherit(base, &outgoing);
            }
            if let Some(index) = children.get_mut(1) {
                self.inherit(index, &index_outgoing);
            }
        } else {
            for child in node.children_mut() {
                self.inherit(child, &outgoing);
            }
        }
    }
}

fn script_level(node: &MmlNode) -> i32 {
    node.attr("scriptlevel")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Arity validation after normalization; violations are permanent structural
/// errors, not transient ones
fn check_arity(node: &MmlNode) -> TreeResult<()> {
    let found = node.children().len();
    match node.kind().arity() {
        Arity::Exact(expected) if found != expected => Err(TreeError::WrongArity {
            kind: node.kind().tag(),
            expected: expected.to_string(),
            found,
        }),
        Arity::ImplicitRow if found != 1 => Err(TreeError::WrongArity {
            kind: node.kind().tag(),
            expected: "1".to_string(),
            found,
        }),
        _ => Ok(()),
    }
}
