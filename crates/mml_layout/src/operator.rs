//! Operator sizing
//!
//! Stretchy operators are measured twice: once at their natural size during
//! the initial bounding-box pass, and once more if a container asks them to
//! cover a target extent. Variant selection picks the smallest pre-built
//! size that covers the target, falls back to extensible assembly for an
//! exact fit, and otherwise settles for the largest variant. The result may
//! exceed or fall short of the request; callers read the achieved box.

use crate::bbox::BBox;
use crate::metrics::FontMetrics;

/// Natural (unstretched) box for a delimiter character.
///
/// The smallest variant when the font lists one, otherwise the font's
/// nominal ascent/descent at the character's advance width.
pub fn natural_delimiter_box(metrics: &FontMetrics, ch: char) -> BBox {
    if let Some(delim) = metrics.delimiter(ch) {
        if let Some(v) = delim.variants.first() {
            return BBox::sized(v.w, v.h, v.d);
        }
    }
    BBox::sized(metrics.char_width(ch), metrics.ascent, metrics.descent)
}

/// Box for a delimiter stretched toward the target height and depth
pub fn stretched_box(metrics: &FontMetrics, ch: char, height: f32, depth: f32) -> BBox {
    let Some(delim) = metrics.delimiter(ch) else {
        return natural_delimiter_box(metrics, ch);
    };

    // Smallest pre-built variant covering the request.
    for v in &delim.variants {
        if v.h >= height && v.d >= depth {
            return BBox::sized(v.w, v.h, v.d);
        }
    }

    if delim.extensible {
        // Assembled glyphs hit the target exactly.
        let w = delim
            .variants
            .last()
            .map(|v| v.w)
            .unwrap_or_else(|| metrics.char_width(ch));
        return BBox::sized(w, height, depth);
    }

    match delim.variants.last() {
        Some(v) => BBox::sized(v.w, v.h, v.d),
        None => natural_delimiter_box(metrics, ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Delimiter, GlyphVariant};

    #[test]
    fn test_natural_box_uses_smallest_variant() {
        let metrics = FontMetrics::default();
        let bbox = natural_delimiter_box(&metrics, '(');
        assert_eq!((bbox.h, bbox.d), (0.75, 0.25));
    }

    #[test]
    fn test_natural_box_for_plain_char() {
        let metrics = FontMetrics::default();
        let bbox = natural_delimiter_box(&metrics, '+');
        assert_eq!(bbox.w, metrics.char_width('+'));
        assert_eq!((bbox.h, bbox.d), (metrics.ascent, metrics.descent));
    }

    #[test]
    fn test_stretch_picks_smallest_covering_variant() {
        let metrics = FontMetrics::default();
        let bbox = stretched_box(&metrics, '(', 1.0, 0.5);
        // Third variant (1.05, 0.55) is the first that covers both extents.
        assert_eq!((bbox.h, bbox.d), (1.05, 0.55));
    }

    #[test]
    fn test_stretch_may_exceed_request() {
        let metrics = FontMetrics::default();
        let bbox = stretched_box(&metrics, '(', 0.8, 0.3);
        assert!(bbox.h > 0.8 && bbox.d > 0.3);
    }

    #[test]
    fn test_extensible_assembly_is_exact() {
        let metrics = FontMetrics::default();
        let bbox = stretched_box(&metrics, '(', 5.0, 3.0);
        assert_eq!((bbox.h, bbox.d), (5.0, 3.0));
    }

    #[test]
    fn test_non_extensible_caps_at_largest_variant() {
        let mut metrics = FontMetrics::default();
        metrics.delimiters.insert(
            '^',
            Delimiter {
                variants: vec![
                    GlyphVariant { h: 0.5, d: 0.0, w: 0.5 },
                    GlyphVariant { h: 0.7, d: 0.0, w: 0.8 },
                ],
                extensible: false,
            },
        );
        let bbox = stretched_box(&metrics, '^', 4.0, 0.0);
        assert_eq!((bbox.h, bbox.d, bbox.w), (0.7, 0.0, 0.8));
    }
}
