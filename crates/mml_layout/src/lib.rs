//! Box Layout Engine - wrapper tree, bounding boxes, render sink
//!
//! This crate turns trees built by `mml_tree` into geometry:
//! - `BBox` width/height/depth boxes with script scaling
//! - `FontMetrics` tables supplying every dimension layout reads
//! - A `WrapperFactory` mapping node kinds to wrapper constructors, with a
//!   generic fallback for unregistered kinds
//! - Per-kind box combination: rows with a one-shot stretch pass, stretchy
//!   operators, radicals, fractions, axis-centered tables
//! - A `RenderSink` seam that materializes the computed geometry into
//!   whatever target representation the embedder provides
//!
//! Layout never mutates the node tree; wrappers borrow it and cache their
//! own boxes. Everything is single-threaded, depth-first, and re-entrant
//! from scratch.

pub mod bbox;
pub mod error;
pub mod factory;
pub mod metrics;
pub mod operator;
pub mod sink;
pub mod wrapper;

pub use bbox::BBox;
pub use error::{LayoutError, LayoutResult};
pub use factory::{WrapperCtor, WrapperFactory};
pub use metrics::{Delimiter, FontMetrics, GlyphVariant, SCRIPT_MULTIPLIER};
pub use sink::{BoxGeometry, RecordingSink, RenderOp, RenderSink};
pub use wrapper::{Role, StretchState, Wrapper, WrapperContext};

use mml_tree::MmlNode;

/// Configuration for a layout pass
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    pub metrics: FontMetrics,
}

/// Wrap a tree with the default factory and compute every box.
///
/// Convenience entry point; callers needing a customized factory drive
/// `WrapperFactory` directly.
pub fn layout<'a>(root: &'a MmlNode, options: &LayoutOptions) -> LayoutResult<Wrapper<'a>> {
    let mut wrapper = WrapperFactory::default().wrap(root, WrapperContext::root());
    wrapper.compute_bbox(&options.metrics)?;
    Ok(wrapper)
}
