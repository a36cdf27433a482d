//! Bounding boxes
//!
//! A box is width plus height above and depth below the baseline, together
//! with the scale pair driven by script level (`scale` is absolute, `rscale`
//! relative to the parent wrapper). Fresh boxes start with sentinel
//! height/depth so that combining is a pure max; `clean` zeroes whatever
//! sentinel survived.

use serde::{Deserialize, Serialize};

/// Sentinel magnitude marking an extent no content has touched yet
pub const BIG_DIMEN: f32 = 1e30;

/// Width / height / depth box with script scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Width
    pub w: f32,
    /// Height above the baseline
    pub h: f32,
    /// Depth below the baseline
    pub d: f32,
    /// Absolute scale of the content
    pub scale: f32,
    /// Scale relative to the parent wrapper
    pub rscale: f32,
}

impl BBox {
    /// An empty box awaiting contributions
    pub fn empty() -> Self {
        Self {
            w: 0.0,
            h: -BIG_DIMEN,
            d: -BIG_DIMEN,
            scale: 1.0,
            rscale: 1.0,
        }
    }

    /// A zero-extent box
    pub fn zero() -> Self {
        Self {
            w: 0.0,
            h: 0.0,
            d: 0.0,
            scale: 1.0,
            rscale: 1.0,
        }
    }

    /// A box with the given extents at unit scale
    pub fn sized(w: f32, h: f32, d: f32) -> Self {
        Self {
            w,
            h,
            d,
            scale: 1.0,
            rscale: 1.0,
        }
    }

    /// Extend this box to include `other` placed at horizontal offset `dx`
    /// and vertical offset `dy` (positive `dy` raises `other`'s baseline).
    pub fn combine(&mut self, other: &BBox, dx: f32, dy: f32) {
        let rscale = other.rscale;
        let w = dx + rscale * other.w;
        let h = dy + rscale * other.h;
        let d = rscale * other.d - dy;
        if w > self.w {
            self.w = w;
        }
        if h > self.h {
            self.h = h;
        }
        if d > self.d {
            self.d = d;
        }
    }

    /// Concatenate `other` to the right: widths accumulate, height and depth
    /// take the running max.
    pub fn append(&mut self, other: &BBox) {
        let rscale = other.rscale;
        self.w += rscale * other.w;
        if rscale * other.h > self.h {
            self.h = rscale * other.h;
        }
        if rscale * other.d > self.d {
            self.d = rscale * other.d;
        }
    }

    /// Clear any sentinel extent left after all contributions are merged
    pub fn clean(&mut self) {
        if self.h <= -BIG_DIMEN / 2.0 {
            self.h = 0.0;
        }
        if self.d <= -BIG_DIMEN / 2.0 {
            self.d = 0.0;
        }
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::zero()
    }
}
