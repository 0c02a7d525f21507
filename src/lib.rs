#![forbid(unsafe_code)]
//! Generic plotting-device backend.
//!
//! Plot primitives arrive through [`PlotSink`] from a [`CommandStream`] and leave through a
//! [`PlotDevice`]. In between, [`Plotter`] suppresses redundant attribute writes, orders pen
//! travel, lays out frames and, through [`render_streams`], optionally measures every stream in
//! a dry run to report statistics or to fit and align the plot before drawing it.

pub mod config;
pub mod device;
pub mod foundation;
pub mod render;
pub mod stream;

pub use config::{AlignSpec, GridConfig, HAlign, PenConfig, StatMode, TextDefaults, VAlign};
pub use device::{DeviceCall, DeviceProfile, PlotDevice, RasterBlock, RecordingDevice};
pub use foundation::core::{BoundingBox, DashPair, DashPattern, DeviceRect, InchPoint, MAX_DASH};
pub use foundation::error::{PlotError, PlotResult};
pub use render::attributes::{Attribute, AttributeCache, FontSpec};
pub use render::bindings::{BindingSet, DIAGNOSTIC, LIVE};
pub use render::frame::{EraseEvent, FrameState, GridLayout};
pub use render::message::MessageEvent;
pub use render::pattern::{FillPattern, PatternTable};
pub use render::pipeline::{
    FileExtent, Fit, PassMode, PipelineReport, StreamFailure, alignment_shift, fit_scale,
    render_streams,
};
pub use render::plotter::Plotter;
pub use render::state::{ColorTable, InterpreterState, PenPosition, Placement, StreamControl};
pub use stream::{CommandList, CommandStream, PlotCommand, PlotSink};
