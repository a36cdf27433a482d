//! Wrapper factory
//!
//! The factory maps node kinds to wrapper constructors and is the seam for
//! adding renderable kinds: register a constructor for a new kind without
//! touching the tree model. Kinds with no entry fall back to a generic
//! row-like wrapper so a tree always renders best-effort.

use crate::wrapper::{Role, Wrapper, WrapperContext};
use mml_tree::{MmlNode, NodeKind};
use std::collections::HashMap;
use tracing::warn;

/// Constructor invoked by the factory for a single node
pub type WrapperCtor = for<'a> fn(&WrapperFactory, &'a MmlNode, WrapperContext) -> Wrapper<'a>;

/// Kind-to-constructor registry with a generic fallback
pub struct WrapperFactory {
    ctors: HashMap<NodeKind, WrapperCtor>,
    fallback: WrapperCtor,
}

fn fallback_ctor<'a>(f: &WrapperFactory, n: &'a MmlNode, c: WrapperContext) -> Wrapper<'a> {
    f.with_role(n, c, Role::Fallback)
}

impl WrapperFactory {
    /// An empty factory that wraps everything with the fallback
    pub fn empty() -> Self {
        Self {
            ctors: HashMap::new(),
            fallback: fallback_ctor,
        }
    }

    /// Register (or override) the constructor for a kind
    pub fn register(&mut self, kind: NodeKind, ctor: WrapperCtor) {
        self.ctors.insert(kind, ctor);
    }

    /// Replace the fallback constructor
    pub fn set_fallback(&mut self, ctor: WrapperCtor) {
        self.fallback = ctor;
    }

    /// Build the wrapper tree for a node
    pub fn wrap<'a>(&self, node: &'a MmlNode, ctx: WrapperContext) -> Wrapper<'a> {
        match self.ctors.get(&node.kind()) {
            Some(ctor) => ctor(self, node, ctx),
            None => {
                warn!(kind = node.kind().tag(), "no wrapper registered, using fallback");
                (self.fallback)(self, node, ctx)
            }
        }
    }

    /// Wrap a node's children in the scale context the node establishes
    fn wrap_children<'a>(&self, node: &'a MmlNode, scale: f32) -> Vec<Wrapper<'a>> {
        let ctx = WrapperContext {
            parent_scale: scale,
        };
        node.children()
            .iter()
            .map(|child| self.wrap(child, ctx))
            .collect()
    }

    fn with_role<'a>(&self, node: &'a MmlNode, ctx: WrapperContext, role: Role) -> Wrapper<'a> {
        // Children see the scale the probe wrapper computes for this node.
        let probe = Wrapper::new(node, ctx, Role::Fallback, Vec::new());
        let children = self.wrap_children(node, probe.scale());
        Wrapper::new(node, ctx, role, children)
    }
}

impl Default for WrapperFactory {
    fn default() -> Self {
        let mut factory = Self::empty();
        factory.register(NodeKind::Math, |f, n, c| f.with_role(n, c, Role::Math));
        for kind in [NodeKind::Mrow, NodeKind::InferredMrow] {
            factory.register(kind, |f, n, c| f.with_role(n, c, Role::Row));
        }
        for kind in [NodeKind::Mi, NodeKind::Mn, NodeKind::Mtext] {
            factory.register(kind, |f, n, c| f.with_role(n, c, Role::Token));
        }
        factory.register(NodeKind::Mo, |f, n, c| f.with_role(n, c, Role::Operator));
        factory.register(NodeKind::Mspace, |f, n, c| f.with_role(n, c, Role::Space));
        factory.register(NodeKind::Mfrac, |f, n, c| {
            f.with_role(n, c, Role::Fraction(None))
        });
        factory.register(NodeKind::Msqrt, |f, n, c| {
            f.with_role(n, c, Role::Radical { with_index: false, geom: None })
        });
        factory.register(NodeKind::Mroot, |f, n, c| {
            f.with_role(n, c, Role::Radical { with_index: true, geom: None })
        });
        factory.register(NodeKind::Mtable, |f, n, c| f.with_role(n, c, Role::Table(None)));
        factory.register(NodeKind::Mtr, |f, n, c| f.with_role(n, c, Role::TableRow));
        factory.register(NodeKind::Mtd, |f, n, c| f.with_role(n, c, Role::TableCell));
        factory.register(NodeKind::Merror, |f, n, c| f.with_role(n, c, Role::Fallback));
        factory
    }
}
