use std::io::Write;

use serde::Serialize;

use crate::device::{PlotDevice, RasterBlock};
use crate::foundation::core::{DashPattern, InchPoint};
use crate::foundation::error::PlotResult;

/// One call made against a [`PlotDevice`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum DeviceCall {
    /// [`PlotDevice::erase`].
    Erase,
    /// [`PlotDevice::page_break`].
    PageBreak,
    /// [`PlotDevice::absolute_style`].
    AbsoluteStyle,
    /// [`PlotDevice::color`].
    Color { index: i32 },
    /// [`PlotDevice::color_table`].
    ColorTable { index: usize, rgb: [f32; 3] },
    /// [`PlotDevice::clip`].
    Clip { min: InchPoint, max: InchPoint },
    /// [`PlotDevice::dash`].
    Dash { pattern: DashPattern },
    /// [`PlotDevice::pattern_load`].
    PatternLoad {
        /// Pattern density.
        density: i32,
        /// Bitmap width.
        xdim: usize,
        /// Bitmap height.
        ydim: usize,
        /// Device slot.
        slot: i32,
        /// Bitmap.
        bits: Vec<i32>,
    },
    /// [`PlotDevice::text_font`].
    TextFont {
        font: i32,
        precision: i32,
        overlay: i32,
    },
    /// [`PlotDevice::text_justify`].
    TextJustify { horizontal: i32, vertical: i32 },
    /// [`PlotDevice::fat`].
    Fat { fat: i32 },
    /// [`PlotDevice::begin_group`].
    BeginGroup { name: String },
    /// [`PlotDevice::end_group`].
    EndGroup,
    /// [`PlotDevice::move_to`].
    Move { to: InchPoint },
    /// [`PlotDevice::draw_to`].
    Draw { to: InchPoint },
    /// [`PlotDevice::area`].
    Area {
        /// Outline.
        vertices: Vec<InchPoint>,
        /// Pattern, if any.
        fill: Option<i32>,
        /// Pattern bitmap dimensions.
        pattern_dims: (usize, usize),
    },
    /// [`PlotDevice::fill`].
    Fill { vertices: Vec<InchPoint> },
    /// [`PlotDevice::marker`].
    Marker {
        kind: i32,
        /// Marker size in text units.
        size: i32,
        /// Marker positions.
        points: Vec<InchPoint>,
    },
    /// [`PlotDevice::text`].
    Text {
        at: InchPoint,
        /// Baseline direction.
        path: InchPoint,
        /// Up direction.
        up: InchPoint,
        text: String,
    },
    /// [`PlotDevice::raster`].
    Raster {
        /// Samples per row.
        xpix: usize,
        /// Rows.
        ypix: usize,
        /// Bit depth of a bit raster.
        bit: Option<i32>,
        min: InchPoint,
        max: InchPoint,
        /// Orientation code.
        orient: i32,
    },
    /// [`PlotDevice::message`].
    Message { text: String },
}

impl DeviceCall {
    /// `true` for pen movement calls.
    pub fn is_pen_motion(&self) -> bool {
        matches!(self, Self::Move { .. } | Self::Draw { .. })
    }
}

/// In-memory device for tests and for replaying a job into a log.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    calls: Vec<DeviceCall>,
}

impl RecordingDevice {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls in the order they were made.
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Take and clear the recorded calls.
    pub fn take(&mut self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&DeviceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Write the recorded calls as one JSON object per line.
    pub fn write_json_lines(&self, out: &mut dyn Write) -> PlotResult<()> {
        for call in &self.calls {
            serde_json::to_writer(&mut *out, call).map_err(anyhow::Error::from)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn push(&mut self, call: DeviceCall) -> PlotResult<()> {
        self.calls.push(call);
        Ok(())
    }
}

impl PlotDevice for RecordingDevice {
    fn erase(&mut self) -> PlotResult<()> {
        self.push(DeviceCall::Erase)
    }

    fn page_break(&mut self) -> PlotResult<()> {
        self.push(DeviceCall::PageBreak)
    }

    fn absolute_style(&mut self) -> PlotResult<()> {
        self.push(DeviceCall::AbsoluteStyle)
    }

    fn color(&mut self, index: i32) -> PlotResult<()> {
        self.push(DeviceCall::Color { index })
    }

    fn color_table(&mut self, index: usize, rgb: [f32; 3]) -> PlotResult<()> {
        self.push(DeviceCall::ColorTable { index, rgb })
    }

    fn clip(&mut self, min: InchPoint, max: InchPoint) -> PlotResult<()> {
        self.push(DeviceCall::Clip { min, max })
    }

    fn dash(&mut self, pattern: &DashPattern) -> PlotResult<()> {
        self.push(DeviceCall::Dash {
            pattern: pattern.clone(),
        })
    }

    fn pattern_load(
        &mut self,
        density: i32,
        xdim: usize,
        ydim: usize,
        slot: i32,
        bits: &[i32],
    ) -> PlotResult<()> {
        self.push(DeviceCall::PatternLoad {
            density,
            xdim,
            ydim,
            slot,
            bits: bits.to_vec(),
        })
    }

    fn text_font(&mut self, font: i32, precision: i32, overlay: i32) -> PlotResult<()> {
        self.push(DeviceCall::TextFont {
            font,
            precision,
            overlay,
        })
    }

    fn text_justify(&mut self, horizontal: i32, vertical: i32) -> PlotResult<()> {
        self.push(DeviceCall::TextJustify {
            horizontal,
            vertical,
        })
    }

    fn fat(&mut self, fat: i32) -> PlotResult<()> {
        self.push(DeviceCall::Fat { fat })
    }

    fn begin_group(&mut self, name: &str) -> PlotResult<()> {
        self.push(DeviceCall::BeginGroup {
            name: name.to_string(),
        })
    }

    fn end_group(&mut self) -> PlotResult<()> {
        self.push(DeviceCall::EndGroup)
    }

    fn move_to(&mut self, to: InchPoint) -> PlotResult<()> {
        self.push(DeviceCall::Move { to })
    }

    fn draw_to(&mut self, to: InchPoint) -> PlotResult<()> {
        self.push(DeviceCall::Draw { to })
    }

    fn area(
        &mut self,
        vertices: &[InchPoint],
        fill: Option<i32>,
        pattern_dims: (usize, usize),
    ) -> PlotResult<()> {
        self.push(DeviceCall::Area {
            vertices: vertices.to_vec(),
            fill,
            pattern_dims,
        })
    }

    fn fill(&mut self, vertices: &[InchPoint]) -> PlotResult<()> {
        self.push(DeviceCall::Fill {
            vertices: vertices.to_vec(),
        })
    }

    fn marker(&mut self, kind: i32, size: i32, points: &[InchPoint]) -> PlotResult<()> {
        self.push(DeviceCall::Marker {
            kind,
            size,
            points: points.to_vec(),
        })
    }

    fn text(
        &mut self,
        at: InchPoint,
        path: InchPoint,
        up: InchPoint,
        text: &str,
    ) -> PlotResult<()> {
        self.push(DeviceCall::Text {
            at,
            path,
            up,
            text: text.to_string(),
        })
    }

    fn raster(
        &mut self,
        block: &RasterBlock,
        bit: Option<i32>,
        min: InchPoint,
        max: InchPoint,
        orient: i32,
    ) -> PlotResult<()> {
        self.push(DeviceCall::Raster {
            xpix: block.xpix,
            ypix: block.ypix,
            bit,
            min,
            max,
            orient,
        })
    }

    fn message(&mut self, text: &str) -> PlotResult<()> {
        self.push(DeviceCall::Message {
            text: text.to_string(),
        })
    }
}
