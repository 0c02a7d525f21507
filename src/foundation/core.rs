use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::foundation::error::{PlotError, PlotResult};

/// Maximum number of dash/gap pairs a dash pattern may hold.
pub const MAX_DASH: usize = 10;

/// Axis-aligned rectangle in device units. Bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceRect {
    /// Left edge.
    pub xmin: i32,
    /// Bottom edge.
    pub ymin: i32,
    /// Right edge.
    pub xmax: i32,
    /// Top edge.
    pub ymax: i32,
}

impl DeviceRect {
    /// Create a rectangle from its four edges.
    pub const fn new(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Horizontal extent.
    pub fn width(self) -> i32 {
        self.xmax - self.xmin
    }

    /// Vertical extent.
    pub fn height(self) -> i32 {
        self.ymax - self.ymin
    }
}

/// A point in physical (inch) units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InchPoint {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

/// Running extent of logged geometry, in device units.
///
/// A box built with [`BoundingBox::inverted`] starts with every edge on the opposite device
/// limit, so the first [`BoundingBox::include`] snaps it onto real geometry and a box that never
/// saw any geometry reports [`BoundingBox::is_empty`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest x seen.
    pub xmin: i32,
    /// Largest x seen.
    pub xmax: i32,
    /// Smallest y seen.
    pub ymin: i32,
    /// Largest y seen.
    pub ymax: i32,
}

impl BoundingBox {
    /// Box with inverted extrema relative to `limits`.
    pub fn inverted(limits: DeviceRect) -> Self {
        Self {
            xmin: limits.xmax,
            xmax: limits.xmin,
            ymin: limits.ymax,
            ymax: limits.ymin,
        }
    }

    /// Box spanning exactly the given corners.
    pub fn from_corners(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Grow to include `(x, y)`.
    pub fn include(&mut self, x: i32, y: i32) {
        self.xmin = self.xmin.min(x);
        self.xmax = self.xmax.max(x);
        self.ymin = self.ymin.min(y);
        self.ymax = self.ymax.max(y);
    }

    /// Grow to include all of `other`.
    pub fn merge(&mut self, other: &BoundingBox) {
        self.xmin = self.xmin.min(other.xmin);
        self.xmax = self.xmax.max(other.xmax);
        self.ymin = self.ymin.min(other.ymin);
        self.ymax = self.ymax.max(other.ymax);
    }

    /// `true` if nothing was ever included.
    pub fn is_empty(&self) -> bool {
        self.xmax < self.xmin || self.ymax < self.ymin
    }

    /// Horizontal extent (negative when empty).
    pub fn width(&self) -> i32 {
        self.xmax - self.xmin
    }

    /// Vertical extent (negative when empty).
    pub fn height(&self) -> i32 {
        self.ymax - self.ymin
    }

    /// `true` when any edge sits on any device hard limit.
    pub fn touches_limits(&self, limits: DeviceRect) -> bool {
        let on_x = |v: i32| v == limits.xmin || v == limits.xmax;
        let on_y = |v: i32| v == limits.ymin || v == limits.ymax;
        on_x(self.xmin) || on_x(self.xmax) || on_y(self.ymin) || on_y(self.ymax)
    }

    /// Scale every edge, truncating toward zero.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            xmin: (f64::from(self.xmin) * sx) as i32,
            xmax: (f64::from(self.xmax) * sx) as i32,
            ymin: (f64::from(self.ymin) * sy) as i32,
            ymax: (f64::from(self.ymax) * sy) as i32,
        }
    }
}

/// One dash length followed by one gap length, in inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashPair {
    /// Inked length.
    pub dash: f32,
    /// Blank length.
    pub gap: f32,
}

/// Bounded dash pattern. No pairs means solid lines.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DashPair>", into = "Vec<DashPair>")]
pub struct DashPattern {
    pairs: SmallVec<[DashPair; MAX_DASH]>,
}

impl DashPattern {
    /// Solid line pattern.
    pub fn solid() -> Self {
        Self::default()
    }

    /// Build a pattern, rejecting more than [`MAX_DASH`] pairs.
    pub fn new(pairs: impl IntoIterator<Item = DashPair>) -> PlotResult<Self> {
        let mut out = SmallVec::new();
        for pair in pairs {
            if out.len() == MAX_DASH {
                return Err(PlotError::capacity(format!(
                    "dash pattern holds at most {MAX_DASH} pairs"
                )));
            }
            out.push(pair);
        }
        Ok(Self { pairs: out })
    }

    /// Dash/gap pairs in drawing order.
    pub fn pairs(&self) -> &[DashPair] {
        &self.pairs
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` for a solid pattern.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl TryFrom<Vec<DashPair>> for DashPattern {
    type Error = PlotError;

    fn try_from(pairs: Vec<DashPair>) -> Result<Self, Self::Error> {
        Self::new(pairs)
    }
}

impl From<DashPattern> for Vec<DashPair> {
    fn from(p: DashPattern) -> Self {
        p.pairs.into_vec()
    }
}

/// Round half away from zero, the way device fatness and marker sizes are quantized.
pub(crate) fn round_to_i32(v: f64) -> i32 {
    v.round() as i32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
