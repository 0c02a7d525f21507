//! Physical output collaborator: the wire-level calls a plotting device understands.
//!
//! Everything crossing this boundary is already in physical (inch) units. The core converts
//! from device resolution units using the constants carried by [`DeviceProfile`].

pub mod recording;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{DashPattern, DeviceRect, InchPoint, round_to_i32};
use crate::foundation::error::PlotResult;

pub use recording::{DeviceCall, RecordingDevice};

/// A block of raster samples, row-major, one byte per sample.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterBlock {
    /// Samples per row.
    pub xpix: usize,
    /// Number of rows.
    pub ypix: usize,
    /// `xpix * ypix` samples.
    pub data: Vec<u8>,
}

/// Output primitives of one device family.
///
/// Implementations own the actual transport (a plot file, a pipe, an in-memory log). Errors they
/// return are propagated unchanged through the pipeline.
pub trait PlotDevice {
    /// Clear the page.
    fn erase(&mut self) -> PlotResult<()>;
    /// Start a new page without clearing device state.
    fn page_break(&mut self) -> PlotResult<()>;
    /// Switch the device to absolute positioning.
    fn absolute_style(&mut self) -> PlotResult<()>;
    /// Select the current drawing color.
    fn color(&mut self, index: i32) -> PlotResult<()>;
    /// Define one color-table entry; channels are fractions in `[0, 1]`.
    fn color_table(&mut self, index: usize, rgb: [f32; 3]) -> PlotResult<()>;
    /// Set the clip window.
    fn clip(&mut self, min: InchPoint, max: InchPoint) -> PlotResult<()>;
    /// Set the dash pattern; an empty pattern selects solid lines.
    fn dash(&mut self, pattern: &DashPattern) -> PlotResult<()>;
    /// Load a fill pattern bitmap into device slot `slot`.
    fn pattern_load(
        &mut self,
        density: i32,
        xdim: usize,
        ydim: usize,
        slot: i32,
        bits: &[i32],
    ) -> PlotResult<()>;
    /// Select text font, precision and overlay mode.
    fn text_font(&mut self, font: i32, precision: i32, overlay: i32) -> PlotResult<()>;
    /// Select text justification.
    fn text_justify(&mut self, horizontal: i32, vertical: i32) -> PlotResult<()>;
    /// Set line fatness in device fatness units.
    fn fat(&mut self, fat: i32) -> PlotResult<()>;
    /// Open a named group.
    fn begin_group(&mut self, name: &str) -> PlotResult<()>;
    /// Close the innermost group.
    fn end_group(&mut self) -> PlotResult<()>;
    /// Move the pen without drawing.
    fn move_to(&mut self, to: InchPoint) -> PlotResult<()>;
    /// Draw from the current pen position.
    fn draw_to(&mut self, to: InchPoint) -> PlotResult<()>;
    /// Outline or pattern-filled area. `fill` is `None` when no pattern applies.
    fn area(
        &mut self,
        vertices: &[InchPoint],
        fill: Option<i32>,
        pattern_dims: (usize, usize),
    ) -> PlotResult<()>;
    /// Solid fill in the current color.
    fn fill(&mut self, vertices: &[InchPoint]) -> PlotResult<()>;
    /// Polymarker.
    fn marker(&mut self, kind: i32, size: i32, points: &[InchPoint]) -> PlotResult<()>;
    /// Text anchored at `at`, laid along `path` with `up` as the glyph up vector.
    fn text(
        &mut self,
        at: InchPoint,
        path: InchPoint,
        up: InchPoint,
        text: &str,
    ) -> PlotResult<()>;
    /// Raster block stretched over `[min, max]`. `bit` carries the depth of a bit raster.
    fn raster(
        &mut self,
        block: &RasterBlock,
        bit: Option<i32>,
        min: InchPoint,
        max: InchPoint,
        orient: i32,
    ) -> PlotResult<()>;
    /// User-visible message.
    fn message(&mut self, text: &str) -> PlotResult<()>;
}

/// Device constants: resolution, unit conversions and screen geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Device units per inch.
    pub resolution_per_inch: f64,
    /// Fatness units per inch.
    pub fat_per_inch: f64,
    /// Text size units per inch.
    pub text_per_inch: f64,
    /// Largest color gun value.
    pub max_gun: i32,
    /// Number of color-table entries.
    pub color_table_size: usize,
    /// Half-extent of the unbounded ("big") screen, inches.
    pub big_extent_inches: f64,
    /// Height of the standard screen, inches.
    pub standard_height_inches: f64,
    /// Height/width ratio of the standard screen.
    pub screen_ratio: f64,
    /// Color index used for grid frame borders.
    pub border_color: i32,
    /// Color selected by a device reset.
    pub default_color: i32,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            resolution_per_inch: 600.0,
            fat_per_inch: 200.0,
            text_per_inch: 33.0,
            max_gun: 255,
            color_table_size: 16384,
            big_extent_inches: 54.6,
            standard_height_inches: 10.24,
            screen_ratio: 0.75,
            border_color: 7,
            default_color: 7,
        }
    }
}

impl DeviceProfile {
    /// Device units to inches.
    pub fn to_inches(&self, v: i32) -> f32 {
        (f64::from(v) / self.resolution_per_inch) as f32
    }

    /// Device point to inch point.
    pub fn inch_point(&self, x: i32, y: i32) -> InchPoint {
        InchPoint {
            x: self.to_inches(x),
            y: self.to_inches(y),
        }
    }

    /// Fatness in device resolution units to device fatness units.
    pub fn device_fat(&self, fat: i32) -> i32 {
        round_to_i32(f64::from(fat) * self.fat_per_inch / self.resolution_per_inch)
    }

    /// Marker size in device resolution units to text size units.
    pub fn device_text_size(&self, size: i32) -> i32 {
        round_to_i32(f64::from(size) * self.text_per_inch / self.resolution_per_inch)
    }

    /// Color gun value to a `[0, 1]` fraction.
    pub fn gun_fraction(&self, v: i32) -> f32 {
        (f64::from(v) / f64::from(self.max_gun)) as f32
    }

    /// Hard limits of the unbounded screen, centered on the origin.
    pub fn big_limits(&self) -> DeviceRect {
        let xmax = round_to_i32(self.big_extent_inches * self.resolution_per_inch);
        let ymax =
            round_to_i32(self.big_extent_inches * self.resolution_per_inch * self.screen_ratio);
        DeviceRect::new(-xmax, -ymax, xmax, ymax)
    }

    /// Hard limits of the standard screen, origin at the lower left.
    pub fn standard_limits(&self) -> DeviceRect {
        let ymax = self.standard_top();
        let xmax = round_to_i32(
            self.standard_height_inches * self.resolution_per_inch / self.screen_ratio,
        );
        DeviceRect::new(0, 0, xmax, ymax)
    }

    /// Top edge of the standard screen.
    pub fn standard_top(&self) -> i32 {
        round_to_i32(self.standard_height_inches * self.resolution_per_inch)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/profile.rs"]
mod tests;
