use serde::{Deserialize, Serialize};

use crate::device::RasterBlock;
use crate::foundation::core::DashPattern;

/// One decoded plot command. Coordinates are plot units before placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlotCommand {
    /// Erase between frames.
    Erase,
    /// Page break.
    Break,
    /// Move the current point.
    Move { x: i32, y: i32 },
    /// Draw from the current point.
    Draw { x: i32, y: i32 },
    /// Single dot; becomes the current point.
    Point { x: i32, y: i32 },
    /// Polymarker.
    Marker {
        kind: i32,
        /// Marker size, plot units.
        size: i32,
        points: Vec<[i32; 2]>,
    },
    /// Text anchored at `(x, y)`.
    Text {
        x: i32,
        y: i32,
        text: String,
        /// Baseline vector, plot units.
        path: [f32; 2],
        /// Up vector, plot units.
        up: [f32; 2],
    },
    /// Closed area in the current fill pattern.
    Polygon { points: Vec<[i32; 2]> },
    /// Raster block.
    Raster {
        block: RasterBlock,
        min: [i32; 2],
        max: [i32; 2],
        /// Orientation code.
        #[serde(default)]
        orient: i32,
    },
    /// Select a color.
    Color { index: i32 },
    /// Define a color-table entry.
    ColorTable { index: i32, rgb: [i32; 3] },
    /// Set the clip window.
    Window {
        xmin: i32,
        ymin: i32,
        xmax: i32,
        ymax: i32,
    },
    /// Set the dash pattern; empty turns dashing off.
    Dash {
        /// Dash/gap pairs, inches.
        #[serde(default)]
        pattern: DashPattern,
    },
    /// Set line fatness, plot units.
    Fat { fat: i32 },
    /// Select a font; omitted fields keep their previous value.
    Font {
        #[serde(default)]
        font: Option<i32>,
        #[serde(default)]
        precision: Option<i32>,
        #[serde(default)]
        overlay: Option<i32>,
    },
    /// Set text justification.
    Justify { horizontal: i32, vertical: i32 },
    /// Set overlay mode.
    Overlay { mode: i32 },
    /// Load a fill pattern into the device.
    LoadPattern { index: usize },
    /// Fill subsequent polygons with a pattern; 0 outlines them.
    SelectPattern { index: usize },
    /// Open a named group.
    BeginGroup { name: String },
    /// Close the innermost group.
    EndGroup,
    /// User message for the device.
    Message { text: String },
    /// Informational text for the operator.
    Note { text: String },
}
