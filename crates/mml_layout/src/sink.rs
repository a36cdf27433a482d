//! Render sink
//!
//! The sink is the seam between geometry and a concrete target
//! representation. Layout walks the wrapper tree and asks the sink to
//! materialize containers, glyph runs, and rules; what those become (a
//! markup tree, a draw list) is the sink's concern. Coordinates handed to
//! the sink are relative to the enclosing container's origin at its
//! baseline, y increasing upward.
//!
//! Two rules live here rather than in box computation: an inferred row
//! emits no container of its own, and an explicit row whose accumulated
//! width is negative clamps its visible width at zero and carries the
//! deficit as a negative right margin.

use crate::bbox::BBox;
use crate::error::LayoutResult;
use crate::wrapper::{Role, Wrapper};
use serde::{Deserialize, Serialize};

/// Geometry for one materialized container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub x: f32,
    pub y: f32,
    pub bbox: BBox,
    /// Set when a negative-width row carries its deficit as margin
    pub margin_right: Option<f32>,
}

/// Target-representation seam fed by `render`
pub trait RenderSink {
    fn open_box(&mut self, kind: &'static str, geom: BoxGeometry);
    fn glyph_run(&mut self, text: &str, x: f32, y: f32, scale: f32);
    fn rule(&mut self, x: f32, y: f32, w: f32, thickness: f32);
    fn close_box(&mut self);
}

/// One recorded sink call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderOp {
    OpenBox {
        kind: String,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        d: f32,
        margin_right: Option<f32>,
    },
    GlyphRun {
        text: String,
        x: f32,
        y: f32,
        scale: f32,
    },
    Rule {
        x: f32,
        y: f32,
        w: f32,
        thickness: f32,
    },
    CloseBox,
}

/// Sink that records every call, for tests and tooling
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub ops: Vec<RenderOp>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded container tags, in open order
    pub fn opened_kinds(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                RenderOp::OpenBox { kind, .. } => Some(kind.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for RecordingSink {
    fn open_box(&mut self, kind: &'static str, geom: BoxGeometry) {
        self.ops.push(RenderOp::OpenBox {
            kind: kind.to_string(),
            x: geom.x,
            y: geom.y,
            w: geom.bbox.w,
            h: geom.bbox.h,
            d: geom.bbox.d,
            margin_right: geom.margin_right,
        });
    }

    fn glyph_run(&mut self, text: &str, x: f32, y: f32, scale: f32) {
        self.ops.push(RenderOp::GlyphRun {
            text: text.to_string(),
            x,
            y,
            scale,
        });
    }

    fn rule(&mut self, x: f32, y: f32, w: f32, thickness: f32) {
        self.ops.push(RenderOp::Rule { x, y, w, thickness });
    }

    fn close_box(&mut self) {
        self.ops.push(RenderOp::CloseBox);
    }
}

impl<'a> Wrapper<'a> {
    /// Emit this subtree into the sink. Requires `compute_bbox` first.
    pub fn render(&self, sink: &mut dyn RenderSink) -> LayoutResult<()> {
        self.render_at(sink, 0.0, 0.0)
    }

    fn render_at(&self, sink: &mut dyn RenderSink, x: f32, y: f32) -> LayoutResult<()> {
        let bbox = *self.bbox();
        match self.role() {
            Role::Row if self.node().is_inferred() => {
                // No container of its own: children land directly in the
                // parent at the offsets the row would have used.
                self.render_run(sink, x, y)?;
            }
            Role::Math | Role::Row | Role::TableRow | Role::TableCell | Role::Fallback => {
                sink.open_box(self.node().kind().tag(), self.row_geometry(x, y, bbox));
                self.render_run(sink, 0.0, 0.0)?;
                sink.close_box();
            }
            Role::Token | Role::Operator => {
                sink.open_box(
                    self.node().kind().tag(),
                    BoxGeometry { x, y, bbox, margin_right: None },
                );
                if let Some(text) = self.node().text() {
                    sink.glyph_run(text, 0.0, 0.0, self.scale());
                }
                sink.close_box();
            }
            Role::Space => {
                sink.open_box(
                    self.node().kind().tag(),
                    BoxGeometry { x, y, bbox, margin_right: None },
                );
                sink.close_box();
            }
            Role::Fraction(geom) => {
                sink.open_box(
                    self.node().kind().tag(),
                    BoxGeometry { x, y, bbox, margin_right: None },
                );
                if let Some(g) = geom {
                    self.child(0)?.render_at(sink, g.num_x, g.num_y)?;
                    self.child(1)?.render_at(sink, g.den_x, g.den_y)?;
                    sink.rule(0.0, g.rule_y, g.rule_w, g.rule_t);
                }
                sink.close_box();
            }
            Role::Radical { with_index, geom } => {
                sink.open_box(
                    self.node().kind().tag(),
                    BoxGeometry { x, y, bbox, margin_right: None },
                );
                if let Some(g) = geom {
                    sink.glyph_run("\u{221a}", g.surd_x, g.surd_y, self.scale());
                    sink.rule(g.base_x, g.rule_y, g.rule_w, bbox.h - g.rule_y);
                    self.child(0)?.render_at(sink, g.base_x, 0.0)?;
                    if *with_index {
                        self.child(1)?.render_at(sink, g.index_x, g.index_y)?;
                    }
                }
                sink.close_box();
            }
            Role::Table(geom) => {
                sink.open_box(
                    self.node().kind().tag(),
                    BoxGeometry { x, y, bbox, margin_right: None },
                );
                if let Some(g) = geom {
                    for (r, row) in self.children().iter().enumerate() {
                        sink.open_box(
                            row.node().kind().tag(),
                            BoxGeometry {
                                x: 0.0,
                                y: g.row_y[r],
                                bbox: *row.bbox(),
                                margin_right: None,
                            },
                        );
                        for (c, cell) in row.children().iter().enumerate() {
                            let cx = cell_offset(
                                cell.node().attr("columnalign").unwrap_or("center"),
                                g.col_widths[c],
                                cell.bbox().rscale * cell.bbox().w,
                            );
                            cell.render_at(sink, g.col_x[c] + cx, 0.0)?;
                        }
                        sink.close_box();
                    }
                }
                sink.close_box();
            }
        }
        Ok(())
    }

    /// Children of a row-like wrapper, left to right with no gaps
    fn render_run(&self, sink: &mut dyn RenderSink, x: f32, y: f32) -> LayoutResult<()> {
        let mut dx = x;
        for child in self.children() {
            child.render_at(sink, dx, y)?;
            dx += child.bbox().rscale * child.bbox().w;
        }
        Ok(())
    }

    fn row_geometry(&self, x: f32, y: f32, bbox: BBox) -> BoxGeometry {
        if bbox.w < 0.0 {
            let mut clamped = bbox;
            clamped.w = 0.0;
            BoxGeometry {
                x,
                y,
                bbox: clamped,
                margin_right: Some(bbox.w),
            }
        } else {
            BoxGeometry { x, y, bbox, margin_right: None }
        }
    }

    fn child(&self, index: usize) -> LayoutResult<&Wrapper<'a>> {
        self.children()
            .get(index)
            .ok_or(crate::error::LayoutError::MissingChild {
                kind: self.node().kind().tag(),
                index,
            })
    }
}

/// Horizontal offset of a cell within its column
fn cell_offset(align: &str, col_w: f32, cell_w: f32) -> f32 {
    match align {
        "left" => 0.0,
        "right" => col_w - cell_w,
        _ => (col_w - cell_w) / 2.0,
    }
}
