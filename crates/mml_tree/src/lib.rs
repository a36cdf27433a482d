//! MathML Node Tree - typed expression tree with attribute inheritance
//!
//! This crate owns the node-tree half of the rendering core:
//! - A closed set of node kinds with table-driven arity contracts and
//!   kind-level attribute defaults
//! - Tree construction from abstract parser output, with kind-specific
//!   child normalization and structural validation (lenient or strict)
//! - A single inheritance pass resolving explicit > inherited > default
//!   attribute precedence
//! - Spacing-class (TeX-class) assignment for downstream spacing rules
//!
//! Layout lives in the sibling `mml_layout` crate and only ever reads the
//! trees built here.

pub mod attributes;
pub mod builder;
pub mod error;
pub mod kind;
pub mod node;
pub mod parsed;
pub mod spacing;

pub use attributes::Attributes;
pub use builder::{BuildOutcome, TreeBuilder, TreeBuilderOptions};
pub use error::{TreeError, TreeResult};
pub use kind::{Arity, NodeKind};
pub use node::MmlNode;
pub use parsed::ParsedNode;
pub use spacing::{classify_operator, OperatorForm, TexClass};
