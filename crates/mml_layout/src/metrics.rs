//! Font metrics
//!
//! Layout is font-agnostic: every dimension a wrapper needs comes through a
//! `FontMetrics` value, so tests can pin exact numbers and an embedder can
//! supply measured ones. All dimensions are in em units at scale 1.

use std::collections::BTreeMap;

/// Script-level size multiplier (1/sqrt(2), applied per level)
pub const SCRIPT_MULTIPLIER: f32 = 0.7071;

/// One size variant of a stretchable glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphVariant {
    pub h: f32,
    pub d: f32,
    pub w: f32,
}

/// Stretch data for a delimiter character
#[derive(Debug, Clone, PartialEq)]
pub struct Delimiter {
    /// Pre-built size variants, smallest first
    pub variants: Vec<GlyphVariant>,
    /// Whether the glyph can be assembled to an arbitrary extent
    pub extensible: bool,
}

/// Dimensions the layout pass reads from the font
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    /// Height of a lowercase x above the baseline
    pub x_height: f32,
    /// Nominal character ascent
    pub ascent: f32,
    /// Nominal character descent
    pub descent: f32,
    /// Thickness of fraction bars and surd rules
    pub rule_thickness: f32,
    /// Height of the fraction axis above the baseline
    pub axis_height: f32,
    /// Width used for characters absent from `char_widths`
    pub default_char_width: f32,
    /// Per-character advance widths
    pub char_widths: BTreeMap<char, f32>,
    /// Per-character stretch data
    pub delimiters: BTreeMap<char, Delimiter>,
}

impl FontMetrics {
    /// Advance width of a single character
    pub fn char_width(&self, ch: char) -> f32 {
        self.char_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_char_width)
    }

    /// Width of a text run
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.char_width(ch)).sum()
    }

    /// Stretch data for a character, if the font can stretch it
    pub fn delimiter(&self, ch: char) -> Option<&Delimiter> {
        self.delimiters.get(&ch)
    }

    /// Parse a length attribute into ems.
    ///
    /// Accepts `em` and `ex` suffixed values plus bare numbers; `ex`
    /// converts through `x_height`. Unparseable input falls back to the
    /// given default.
    pub fn parse_length(&self, value: &str, fallback: f32) -> f32 {
        let value = value.trim();
        if let Some(ems) = value.strip_suffix("em") {
            return ems.trim().parse().unwrap_or(fallback);
        }
        if let Some(exs) = value.strip_suffix("ex") {
            return exs
                .trim()
                .parse::<f32>()
                .map(|v| v * self.x_height)
                .unwrap_or(fallback);
        }
        value.parse().unwrap_or(fallback)
    }
}

impl Default for FontMetrics {
    /// Metrics modeled on a TeX-style math font
    fn default() -> Self {
        let mut char_widths = BTreeMap::new();
        for (ch, w) in [
            ('(', 0.389),
            (')', 0.389),
            ('[', 0.278),
            (']', 0.278),
            ('{', 0.389),
            ('}', 0.389),
            ('|', 0.278),
            ('+', 0.778),
            ('\u{2212}', 0.778),
            ('=', 0.778),
            ('<', 0.778),
            ('>', 0.778),
            (',', 0.278),
            (';', 0.278),
            ('.', 0.278),
            ('/', 0.5),
            ('\u{221a}', 0.56),
            ('\u{2211}', 1.056),
            ('\u{220f}', 1.056),
            ('\u{222b}', 0.556),
        ] {
            char_widths.insert(ch, w);
        }

        let paren_variants = vec![
            GlyphVariant { h: 0.75, d: 0.25, w: 0.389 },
            GlyphVariant { h: 0.85, d: 0.35, w: 0.458 },
            GlyphVariant { h: 1.05, d: 0.55, w: 0.528 },
            GlyphVariant { h: 1.35, d: 0.85, w: 0.583 },
        ];
        let mut delimiters = BTreeMap::new();
        for ch in ['(', ')', '[', ']', '{', '}', '|', '\u{27e8}', '\u{27e9}'] {
            delimiters.insert(
                ch,
                Delimiter {
                    variants: paren_variants.clone(),
                    extensible: true,
                },
            );
        }
        delimiters.insert(
            '\u{221a}',
            Delimiter {
                variants: vec![GlyphVariant { h: 0.85, d: 0.15, w: 0.56 }],
                extensible: true,
            },
        );

        Self {
            x_height: 0.442,
            ascent: 0.75,
            descent: 0.25,
            rule_thickness: 0.06,
            axis_height: 0.25,
            default_char_width: 0.5,
            char_widths,
            delimiters,
        }
    }
}
