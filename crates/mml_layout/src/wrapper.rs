//! Wrapper tree
//!
//! Wrappers mirror the node tree one-to-one and own the geometry side of
//! rendering: script scaling, the stretch pass, and per-kind bounding-box
//! combination. A wrapper borrows its node; the node tree outlives the
//! wrapper tree and is never mutated by layout. Boxes are computed once,
//! bottom-up, and cached; reading a box before computing it is a
//! programming error and panics.

use crate::bbox::BBox;
use crate::error::{LayoutError, LayoutResult};
use crate::metrics::{FontMetrics, SCRIPT_MULTIPLIER};
use crate::operator::{natural_delimiter_box, stretched_box};
use mml_tree::{MmlNode, NodeKind};
use tracing::trace;

// =============================================================================
// Roles
// =============================================================================

/// Geometry placed while computing a radical's box, kept for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadicalGeom {
    /// Achieved surd box after stretching
    pub surd: BBox,
    /// Horizontal offset of the surd glyph
    pub surd_x: f32,
    /// Baseline offset of the surd glyph
    pub surd_y: f32,
    /// Horizontal offset of the base expression
    pub base_x: f32,
    /// Baseline of the overline rule
    pub rule_y: f32,
    /// Width of the overline rule
    pub rule_w: f32,
    /// Placement of the root index, when present
    pub index_x: f32,
    pub index_y: f32,
}

/// Geometry placed while computing a fraction's box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionGeom {
    pub num_x: f32,
    pub num_y: f32,
    pub den_x: f32,
    pub den_y: f32,
    pub rule_y: f32,
    pub rule_w: f32,
    pub rule_t: f32,
}

/// Grid geometry placed while computing a table's box
#[derive(Debug, Clone, PartialEq)]
pub struct TableGeom {
    /// Per-column widths (maxima over cells)
    pub col_widths: Vec<f32>,
    /// Per-row (height, depth) bands
    pub row_bands: Vec<(f32, f32)>,
    /// Baseline offset of each row within the table
    pub row_y: Vec<f32>,
    /// Leading x offset of each column
    pub col_x: Vec<f32>,
}

/// What a wrapper does during box combination and rendering
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    /// Top-level math container, row-like
    Math,
    /// Horizontal run of children (mrow and inferred rows)
    Row,
    /// Text leaf (mi, mn, mtext)
    Token,
    /// Operator leaf, possibly stretchy
    Operator,
    /// Fixed-width gap
    Space,
    /// Numerator over denominator on the math axis
    Fraction(Option<FractionGeom>),
    /// Square root, with an optional root index
    Radical {
        with_index: bool,
        geom: Option<RadicalGeom>,
    },
    /// Grid of rows and cells
    Table(Option<TableGeom>),
    TableRow,
    TableCell,
    /// Generic row-like treatment for kinds with no registered wrapper
    Fallback,
}

/// Copyable discriminant of `Role`, used to dispatch box computation
/// without borrowing the role's payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleTag {
    RowLike,
    Token,
    Operator,
    Space,
    Fraction,
    Radical,
    Table,
}

/// Stretch status of an operator wrapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StretchState {
    Unset,
    Stretched { h: f32, d: f32 },
}

/// Scale context handed down during wrapper construction
#[derive(Debug, Clone, Copy)]
pub struct WrapperContext {
    pub parent_scale: f32,
}

impl WrapperContext {
    pub fn root() -> Self {
        Self { parent_scale: 1.0 }
    }
}

// =============================================================================
// Wrapper
// =============================================================================

/// Layout-tree counterpart of a node
#[derive(Debug, Clone)]
pub struct Wrapper<'a> {
    node: &'a MmlNode,
    role: Role,
    children: Vec<Wrapper<'a>>,
    scale: f32,
    rscale: f32,
    bbox: Option<BBox>,
    stretch: StretchState,
}

impl<'a> Wrapper<'a> {
    /// Build a wrapper with pre-wrapped children.
    ///
    /// Inferred rows adopt the parent scale verbatim; every other wrapper
    /// derives its scale from `mathsize` and `scriptlevel`.
    pub fn new(
        node: &'a MmlNode,
        ctx: WrapperContext,
        role: Role,
        children: Vec<Wrapper<'a>>,
    ) -> Self {
        let (scale, rscale) = if node.is_inferred() {
            (ctx.parent_scale, 1.0)
        } else {
            let mathsize = node.attr_f32("mathsize").unwrap_or(1.0);
            let level: i32 = node
                .attr("scriptlevel")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            let scale = mathsize * SCRIPT_MULTIPLIER.powi(level);
            (scale, scale / ctx.parent_scale)
        };
        Self {
            node,
            role,
            children,
            scale,
            rscale,
            bbox: None,
            stretch: StretchState::Unset,
        }
    }

    pub fn node(&self) -> &'a MmlNode {
        self.node
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn children(&self) -> &[Wrapper<'a>] {
        &self.children
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rscale(&self) -> f32 {
        self.rscale
    }

    /// The computed bounding box.
    ///
    /// Panics if called before `compute_bbox`; that is a contract violation,
    /// not a recoverable condition.
    pub fn bbox(&self) -> &BBox {
        match &self.bbox {
            Some(bbox) => bbox,
            None => panic!("bounding box read before compute_bbox"),
        }
    }

    pub fn stretch(&self) -> StretchState {
        self.stretch
    }

    // =============================================================================
    // Box computation
    // =============================================================================

    /// Compute and cache this subtree's bounding box, bottom-up.
    ///
    /// Idempotent: a second call returns the cached box unchanged.
    pub fn compute_bbox(&mut self, metrics: &FontMetrics) -> LayoutResult<BBox> {
        if let Some(bbox) = self.bbox {
            return Ok(bbox);
        }
        for child in &mut self.children {
            child.compute_bbox(metrics)?;
        }
        let mut bbox = match self.role_tag() {
            RoleTag::RowLike => self.row_bbox(metrics),
            RoleTag::Token => self.token_bbox(metrics),
            RoleTag::Operator => self.operator_bbox(metrics),
            RoleTag::Space => self.space_bbox(metrics),
            RoleTag::Fraction => self.fraction_bbox(metrics)?,
            RoleTag::Radical => self.radical_bbox(metrics)?,
            RoleTag::Table => self.table_bbox(metrics),
        };
        bbox.scale = self.scale;
        bbox.rscale = self.rscale;
        self.bbox = Some(bbox);
        Ok(bbox)
    }

    fn role_tag(&self) -> RoleTag {
        match self.role {
            Role::Math | Role::Row | Role::TableRow | Role::TableCell | Role::Fallback => {
                RoleTag::RowLike
            }
            Role::Token => RoleTag::Token,
            Role::Operator => RoleTag::Operator,
            Role::Space => RoleTag::Space,
            Role::Fraction(_) => RoleTag::Fraction,
            Role::Radical { .. } => RoleTag::Radical,
            Role::Table(_) => RoleTag::Table,
        }
    }

    /// Whether this wrapper can stretch vertically
    fn can_stretch(&self) -> bool {
        matches!(self.role, Role::Operator)
            && self.node.attr_bool("stretchy")
            && self.single_char().is_some()
    }

    fn single_char(&self) -> Option<char> {
        let text = self.node.text()?;
        let mut chars = text.chars();
        let ch = chars.next()?;
        chars.next().is_none().then_some(ch)
    }

    /// Replace this operator's natural box with one stretched toward the
    /// target extents. Applied at most once; later requests are ignored.
    pub fn stretch_to(&mut self, height: f32, depth: f32, metrics: &FontMetrics) {
        if matches!(self.stretch, StretchState::Stretched { .. }) {
            return;
        }
        let Some(ch) = self.single_char() else {
            return;
        };
        let mut bbox = stretched_box(metrics, ch, height, depth);
        bbox.scale = self.scale;
        bbox.rscale = self.rscale;
        trace!(
            char = %ch,
            target_h = height,
            target_d = depth,
            got_h = bbox.h,
            got_d = bbox.d,
            "stretched operator"
        );
        self.stretch = StretchState::Stretched { h: height, d: depth };
        self.bbox = Some(bbox);
    }

    /// Stretch pass over this wrapper's children.
    ///
    /// When every child is stretchy the target is the max over all natural
    /// boxes; when only some are, the target is the max over the
    /// non-stretchy children. Natural boxes are all read before any child
    /// is mutated.
    fn stretch_children(&mut self, metrics: &FontMetrics) {
        let stretchy: Vec<usize> = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.can_stretch())
            .map(|(i, _)| i)
            .collect();
        if stretchy.is_empty() || self.children.len() <= 1 {
            return;
        }
        let all = stretchy.len() > 1 && stretchy.len() == self.children.len();
        let mut h: f32 = 0.0;
        let mut d: f32 = 0.0;
        for (i, child) in self.children.iter().enumerate() {
            if all || !stretchy.contains(&i) {
                let b = child.bbox();
                h = h.max(b.rscale * b.h);
                d = d.max(b.rscale * b.d);
            }
        }
        for i in stretchy {
            let rscale = self.children[i].rscale;
            self.children[i].stretch_to(h / rscale, d / rscale, metrics);
        }
    }

    fn row_bbox(&mut self, metrics: &FontMetrics) -> BBox {
        self.stretch_children(metrics);
        let mut bbox = BBox::empty();
        for child in &self.children {
            bbox.append(child.bbox());
        }
        bbox.clean();
        bbox
    }

    fn token_bbox(&self, metrics: &FontMetrics) -> BBox {
        let text = self.node.text().unwrap_or("");
        BBox::sized(metrics.text_width(text), metrics.ascent, metrics.descent)
    }

    fn operator_bbox(&self, metrics: &FontMetrics) -> BBox {
        match self.single_char() {
            Some(ch) if self.node.attr_bool("stretchy") => natural_delimiter_box(metrics, ch),
            _ => self.token_bbox(metrics),
        }
    }

    fn space_bbox(&self, metrics: &FontMetrics) -> BBox {
        let width = self
            .node
            .attr("width")
            .map(|v| metrics.parse_length(v, 0.0))
            .unwrap_or(0.0);
        BBox::sized(width, 0.0, 0.0)
    }

    fn fraction_bbox(&mut self, metrics: &FontMetrics) -> LayoutResult<BBox> {
        let num = *self.child_bbox(0)?;
        let den = *self.child_bbox(1)?;
        let t = metrics.rule_thickness;
        let a = metrics.axis_height;
        let w = (num.rscale * num.w).max(den.rscale * den.w);
        let num_x = (w - num.rscale * num.w) / 2.0;
        let den_x = (w - den.rscale * den.w) / 2.0;
        // Clearance of one rule thickness on each side of the bar.
        let num_y = a + 1.5 * t + num.rscale * num.d;
        let den_y = -(den.rscale * den.h + 1.5 * t - a);
        let mut bbox = BBox::empty();
        bbox.combine(&num, num_x, num_y);
        bbox.combine(&den, den_x, den_y);
        bbox.w = w;
        bbox.clean();
        if let Role::Fraction(geom) = &mut self.role {
            *geom = Some(FractionGeom {
                num_x,
                num_y,
                den_x,
                den_y,
                rule_y: a - t / 2.0,
                rule_w: w,
                rule_t: t,
            });
        }
        Ok(bbox)
    }

    /// Radical box combination.
    ///
    /// The surd's stretch target comes from the base's natural box; the
    /// achieved surd box then drives the gap `q` and the overall height.
    fn radical_bbox(&mut self, metrics: &FontMetrics) -> LayoutResult<BBox> {
        let base = *self.child_bbox(0)?;
        let t = metrics.rule_thickness;
        let display = self.node.attr_bool("displaystyle");
        let p = if display { metrics.x_height } else { t };
        let surd_h = base.rscale * (base.h + base.d) + 2.0 * t + p / 4.0;
        let base_d = base.rscale * base.d;
        let surd = stretched_box(metrics, '\u{221a}', surd_h - base_d, base_d);

        let actual = surd.h + surd.d;
        let q = if actual > surd_h {
            (actual - (surd_h - t)) / 2.0
        } else {
            t + p / 4.0
        };
        let h_inner = base.rscale * base.h + q + t;

        // Leading slot for the root index, when there is one.
        let with_index = matches!(self.role, Role::Radical { with_index: true, .. });
        let (x, index_x, index_y) = if with_index {
            let index = *self.child_bbox(1)?;
            let shift = 0.5 * surd.w;
            let x = (index.rscale * index.w - shift).max(0.0);
            let index_x = x + shift - index.rscale * index.w;
            let index_y = 0.55 * (surd.h + surd.d) - surd.d;
            (x, index_x, index_y)
        } else {
            (0.0, 0.0, 0.0)
        };

        let mut bbox = BBox::empty();
        bbox.combine(&surd, x, h_inner - surd.h);
        bbox.combine(&base, x + surd.w, 0.0);
        if with_index {
            let index = *self.child_bbox(1)?;
            bbox.combine(&index, index_x, index_y);
        }
        bbox.h = h_inner + t;
        bbox.clean();

        if let Role::Radical { geom, .. } = &mut self.role {
            *geom = Some(RadicalGeom {
                surd,
                surd_x: x,
                surd_y: h_inner - surd.h,
                base_x: x + surd.w,
                rule_y: h_inner,
                rule_w: base.rscale * base.w,
                index_x,
                index_y,
            });
        }
        Ok(bbox)
    }

    fn table_bbox(&mut self, metrics: &FontMetrics) -> BBox {
        let row_gap = self
            .node
            .attr("rowspacing")
            .map(|v| metrics.parse_length(v, metrics.x_height))
            .unwrap_or(metrics.x_height);
        let col_gap = self
            .node
            .attr("columnspacing")
            .map(|v| metrics.parse_length(v, 0.8))
            .unwrap_or(0.8);

        let cols = self
            .children
            .iter()
            .map(|row| row.children.len())
            .max()
            .unwrap_or(0);
        let mut col_widths = vec![0.0f32; cols];
        let mut row_bands = Vec::with_capacity(self.children.len());
        for row in &self.children {
            let mut h: f32 = 0.0;
            let mut d: f32 = 0.0;
            for (c, cell) in row.children.iter().enumerate() {
                let b = cell.bbox();
                col_widths[c] = col_widths[c].max(b.rscale * b.w);
                h = h.max(b.rscale * b.h);
                d = d.max(b.rscale * b.d);
            }
            row_bands.push((h, d));
        }

        let mut col_x = Vec::with_capacity(cols);
        let mut x = 0.0;
        for (c, w) in col_widths.iter().enumerate() {
            col_x.push(x);
            x += w;
            if c + 1 < cols {
                x += col_gap;
            }
        }
        let total_w = x;

        let total_h: f32 = row_bands.iter().map(|(h, d)| h + d).sum::<f32>()
            + row_gap * row_bands.len().saturating_sub(1) as f32;

        // Baselines measured from the table's own baseline, stacking down
        // from the centered-on-axis top.
        let top = total_h / 2.0 + metrics.axis_height;
        let mut row_y = Vec::with_capacity(row_bands.len());
        let mut y = top;
        for (h, d) in &row_bands {
            y -= h;
            row_y.push(y);
            y -= d + row_gap;
        }

        let bbox = BBox::sized(total_w, top, total_h - top);
        if let Role::Table(geom) = &mut self.role {
            *geom = Some(TableGeom {
                col_widths,
                row_bands,
                row_y,
                col_x,
            });
        }
        bbox
    }

    fn child_bbox(&self, index: usize) -> LayoutResult<&BBox> {
        self.children
            .get(index)
            .map(|c| c.bbox())
            .ok_or(LayoutError::MissingChild {
                kind: self.node.kind().tag(),
                index,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::WrapperFactory;
    use mml_tree::{ParsedNode, TreeBuilder};

    fn build(parsed: &ParsedNode) -> MmlNode {
        TreeBuilder::new().build(parsed).unwrap().root
    }

    fn wrap_and_compute<'a>(node: &'a MmlNode, metrics: &FontMetrics) -> Wrapper<'a> {
        let mut wrapper = WrapperFactory::default().wrap(node, WrapperContext::root());
        wrapper.compute_bbox(metrics).unwrap();
        wrapper
    }

    #[test]
    fn test_token_bbox_uses_metrics() {
        let metrics = FontMetrics::default();
        let node = build(&ParsedNode::token("mi", "x"));
        let wrapper = wrap_and_compute(&node, &metrics);
        let bbox = wrapper.bbox();
        assert_eq!(bbox.w, metrics.char_width('x'));
        assert_eq!((bbox.h, bbox.d), (metrics.ascent, metrics.descent));
    }

    #[test]
    #[should_panic(expected = "bounding box read before compute_bbox")]
    fn test_bbox_before_compute_panics() {
        let node = build(&ParsedNode::token("mi", "x"));
        let wrapper = WrapperFactory::default().wrap(&node, WrapperContext::root());
        let _ = wrapper.bbox();
    }

    #[test]
    fn test_compute_bbox_is_idempotent() {
        let metrics = FontMetrics::default();
        let node = build(&ParsedNode::element(
            "mrow",
            vec![ParsedNode::token("mi", "x"), ParsedNode::token("mi", "y")],
        ));
        let mut wrapper = WrapperFactory::default().wrap(&node, WrapperContext::root());
        let first = wrapper.compute_bbox(&metrics).unwrap();
        let second = wrapper.compute_bbox(&metrics).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_row_accumulates_widths() {
        let metrics = FontMetrics::default();
        let node = build(&ParsedNode::element(
            "mrow",
            vec![ParsedNode::token("mi", "x"), ParsedNode::token("mn", "2")],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        let expected = metrics.char_width('x') + metrics.char_width('2');
        assert_eq!(wrapper.bbox().w, expected);
    }

    #[test]
    fn test_inferred_row_inherits_parent_scale() {
        let metrics = FontMetrics::default();
        let node = build(
            &ParsedNode::element(
                "math",
                vec![ParsedNode::token("mi", "x"), ParsedNode::token("mi", "y")],
            )
            .with_attr("mathsize", "2"),
        );
        let wrapper = wrap_and_compute(&node, &metrics);
        assert_eq!(wrapper.scale(), 2.0);
        let row = &wrapper.children()[0];
        assert!(row.node().is_inferred());
        assert_eq!(row.scale(), 2.0);
        assert_eq!(row.rscale(), 1.0);
    }

    #[test]
    fn test_script_level_drives_scale() {
        let metrics = FontMetrics::default();
        let node = build(&ParsedNode::element(
            "mfrac",
            vec![ParsedNode::token("mn", "1"), ParsedNode::token("mi", "x")],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        let num = &wrapper.children()[0];
        assert!((num.scale() - SCRIPT_MULTIPLIER).abs() < 1e-6);
        assert!((num.rscale() - SCRIPT_MULTIPLIER).abs() < 1e-6);
    }

    #[test]
    fn test_mspace_width() {
        let metrics = FontMetrics::default();
        let node = build(&ParsedNode::element("mspace", vec![]).with_attr("width", "0.5em"));
        let wrapper = wrap_and_compute(&node, &metrics);
        assert_eq!(wrapper.bbox().w, 0.5);
        assert_eq!(wrapper.bbox().h, 0.0);
    }

    // =============================================================================
    // Stretch pass
    // =============================================================================

    fn delim_metrics(variants: &[(char, Vec<(f32, f32, f32)>)]) -> FontMetrics {
        use crate::metrics::{Delimiter, GlyphVariant};
        let mut metrics = FontMetrics::default();
        for (ch, vs) in variants {
            metrics.delimiters.insert(
                *ch,
                Delimiter {
                    variants: vs
                        .iter()
                        .map(|&(h, d, w)| GlyphVariant { h, d, w })
                        .collect(),
                    extensible: true,
                },
            );
        }
        metrics
    }

    #[test]
    fn test_all_stretchy_row_stretches_to_common_max() {
        // Three stretchy delimiters with naturals (10,2), (14,6), (8,1)
        // all end up stretched to (14, 6).
        let metrics = delim_metrics(&[
            ('(', vec![(10.0, 2.0, 0.4)]),
            ('|', vec![(14.0, 6.0, 0.3)]),
            (')', vec![(8.0, 1.0, 0.4)]),
        ]);
        let node = build(&ParsedNode::element(
            "mrow",
            vec![
                ParsedNode::token("mo", "(").with_attr("stretchy", "true"),
                ParsedNode::token("mo", "|").with_attr("stretchy", "true"),
                ParsedNode::token("mo", ")").with_attr("stretchy", "true"),
            ],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        for child in wrapper.children() {
            let b = child.bbox();
            assert_eq!((b.h, b.d), (14.0, 6.0));
            assert_eq!(
                child.stretch(),
                StretchState::Stretched { h: 14.0, d: 6.0 }
            );
        }
    }

    #[test]
    fn test_mixed_row_stretches_to_non_stretchy_max() {
        // The delimiter's own natural size does not matter; the plain
        // sibling's (12, 3) box sets the target.
        let metrics = {
            let mut m = delim_metrics(&[('(', vec![(0.75, 0.25, 0.4)])]);
            m.ascent = 12.0;
            m.descent = 3.0;
            m
        };
        let node = build(&ParsedNode::element(
            "mrow",
            vec![
                ParsedNode::token("mo", "(").with_attr("stretchy", "true"),
                ParsedNode::token("mi", "x"),
            ],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        let delim = &wrapper.children()[0];
        assert_eq!((delim.bbox().h, delim.bbox().d), (12.0, 3.0));
    }

    #[test]
    fn test_lone_stretchy_child_keeps_natural_size() {
        let metrics = delim_metrics(&[('(', vec![(0.75, 0.25, 0.4)])]);
        let node = build(&ParsedNode::element(
            "mrow",
            vec![ParsedNode::token("mo", "(").with_attr("stretchy", "true")],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        assert_eq!(wrapper.children()[0].stretch(), StretchState::Unset);
    }

    #[test]
    fn test_stretch_applies_at_most_once() {
        let metrics = delim_metrics(&[('(', vec![(0.75, 0.25, 0.4)])]);
        let node = build(&ParsedNode::token("mo", "(").with_attr("stretchy", "true"));
        let mut wrapper = WrapperFactory::default().wrap(&node, WrapperContext::root());
        wrapper.compute_bbox(&metrics).unwrap();
        wrapper.stretch_to(5.0, 3.0, &metrics);
        let first = *wrapper.bbox();
        wrapper.stretch_to(9.0, 9.0, &metrics);
        assert_eq!(*wrapper.bbox(), first);
    }

    // =============================================================================
    // Radicals
    // =============================================================================

    /// Metrics pinned so a token base measures exactly (h=10, d=2) and the
    /// rule thickness is 1.
    fn radical_metrics() -> FontMetrics {
        use crate::metrics::{Delimiter, GlyphVariant};
        let mut metrics = FontMetrics::default();
        metrics.ascent = 10.0;
        metrics.descent = 2.0;
        metrics.rule_thickness = 1.0;
        metrics.delimiters.insert(
            '\u{221a}',
            Delimiter {
                variants: vec![GlyphVariant { h: 0.85, d: 0.15, w: 0.56 }],
                extensible: true,
            },
        );
        metrics
    }

    #[test]
    fn test_sqrt_height_arithmetic_is_exact() {
        // Non-display: p = t = 1, surd target = 10+2+2+0.25 = 14.25,
        // extensible assembly hits it exactly, so q = t + p/4 = 1.25,
        // H = 10 + 1.25 + 1 = 12.25, reported height H + t = 13.25.
        let metrics = radical_metrics();
        let node = build(&ParsedNode::element(
            "msqrt",
            vec![ParsedNode::token("mi", "x")],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        let bbox = wrapper.bbox();
        assert_eq!(bbox.h, 13.25);
        assert_eq!(bbox.d, 2.0);
        assert_eq!(bbox.w, 0.56 + metrics.char_width('x'));

        let Role::Radical { geom: Some(geom), .. } = wrapper.role() else {
            panic!("radical geometry not recorded");
        };
        assert_eq!((geom.surd.h, geom.surd.d), (12.25, 2.0));
        // Surd top flush with the inner height: H - surd.h = 0.
        assert_eq!(geom.surd_y, 0.0);
        assert_eq!(geom.base_x, 0.56);
        assert_eq!(geom.rule_y, 12.25);
    }

    #[test]
    fn test_sqrt_oversized_surd_recenters() {
        // Only one fixed variant, not extensible: the achieved surd is
        // taller than requested and q comes from the overshoot.
        use crate::metrics::{Delimiter, GlyphVariant};
        let mut metrics = radical_metrics();
        metrics.delimiters.insert(
            '\u{221a}',
            Delimiter {
                variants: vec![GlyphVariant { h: 14.0, d: 4.0, w: 0.6 }],
                extensible: false,
            },
        );
        let node = build(&ParsedNode::element(
            "msqrt",
            vec![ParsedNode::token("mi", "x")],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        // actual = 18, requested = 14.25, q = (18 - 13.25)/2 = 2.375,
        // H = 10 + 2.375 + 1 = 13.375, reported = 14.375.
        assert_eq!(wrapper.bbox().h, 14.375);
    }

    #[test]
    fn test_mroot_reserves_index_slot() {
        let metrics = radical_metrics();
        let node = build(&ParsedNode::element(
            "mroot",
            vec![ParsedNode::token("mi", "x"), ParsedNode::token("mn", "31")],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        let Role::Radical { with_index, geom: Some(geom) } = wrapper.role() else {
            panic!("radical geometry not recorded");
        };
        assert!(*with_index);
        // Index is wider than the surd hook overlap, so the surd shifts right.
        assert!(geom.surd_x > 0.0);
        assert!(geom.index_y > 0.0);
        assert!(wrapper.bbox().w > 0.56 + metrics.char_width('x'));
    }

    // =============================================================================
    // Fractions and tables
    // =============================================================================

    #[test]
    fn test_fraction_centers_on_axis() {
        let metrics = FontMetrics::default();
        let node = build(&ParsedNode::element(
            "mfrac",
            vec![ParsedNode::token("mn", "1"), ParsedNode::token("mi", "x")],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        let Role::Fraction(Some(geom)) = wrapper.role() else {
            panic!("fraction geometry not recorded");
        };
        assert!(geom.num_y > 0.0);
        assert!(geom.den_y < 0.0);
        assert_eq!(geom.rule_y, metrics.axis_height - metrics.rule_thickness / 2.0);
        assert!(wrapper.bbox().h > metrics.axis_height);
    }

    #[test]
    fn test_table_column_widths_are_maxima() {
        let metrics = FontMetrics::default();
        let cell = |t: &str| ParsedNode::element("mtd", vec![ParsedNode::token("mi", t)]);
        let node = build(&ParsedNode::element(
            "mtable",
            vec![
                ParsedNode::element("mtr", vec![cell("x"), cell("yy")]),
                ParsedNode::element("mtr", vec![cell("zzz"), cell("w")]),
            ],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        let Role::Table(Some(geom)) = wrapper.role() else {
            panic!("table geometry not recorded");
        };
        assert_eq!(geom.col_widths.len(), 2);
        assert_eq!(geom.col_widths[0], metrics.text_width("zzz"));
        assert_eq!(geom.col_widths[1], metrics.text_width("yy"));
        assert_eq!(geom.row_bands.len(), 2);
    }

    #[test]
    fn test_table_centers_on_axis() {
        let metrics = FontMetrics::default();
        let cell = |t: &str| ParsedNode::element("mtd", vec![ParsedNode::token("mi", t)]);
        let node = build(&ParsedNode::element(
            "mtable",
            vec![
                ParsedNode::element("mtr", vec![cell("a")]),
                ParsedNode::element("mtr", vec![cell("b")]),
            ],
        ));
        let wrapper = wrap_and_compute(&node, &metrics);
        let bbox = wrapper.bbox();
        let total = bbox.h + bbox.d;
        assert!((bbox.h - (total / 2.0 + metrics.axis_height)).abs() < 1e-6);
    }
}
