//! Upstream seam: command streams and the primitive interface they drive.

pub mod command;
pub mod list;

use crate::device::RasterBlock;
use crate::foundation::core::DeviceRect;
use crate::foundation::error::PlotResult;
use crate::render::attributes::Attribute;
use crate::render::frame::EraseEvent;
use crate::render::message::MessageEvent;
use crate::render::state::{InterpreterState, Placement};

pub use command::PlotCommand;
pub use list::CommandList;

/// Device capability interface a command interpreter drives.
///
/// All geometry is in integer device units. Implementations decide, per primitive, whether
/// the call reaches a device or only feeds statistics.
pub trait PlotSink {
    /// Reinitialize device state at the start of a job.
    fn reset(&mut self) -> PlotResult<()>;
    /// Message protocol.
    fn message(&mut self, event: MessageEvent, text: &str) -> PlotResult<()>;
    /// Frame boundary.
    fn erase(&mut self, event: EraseEvent) -> PlotResult<()>;
    /// End of job.
    fn close(&mut self) -> PlotResult<()>;
    /// Line segment. Negative `fat` draws nothing.
    fn vector(&mut self, from: (i32, i32), to: (i32, i32), fat: i32, dash_on: bool)
    -> PlotResult<()>;
    /// Polymarker.
    fn marker(&mut self, kind: i32, size: i32, points: &[(i32, i32)]) -> PlotResult<()>;
    /// Text at the interpreter's current point.
    fn text(&mut self, text: &str, path: (f32, f32), up: (f32, f32)) -> PlotResult<()>;
    /// Closed area filled with the current fill pattern.
    fn area(&mut self, vertices: &[(i32, i32)]) -> PlotResult<()>;
    /// Raster block stretched over `[min, max]`.
    fn raster(
        &mut self,
        block: &RasterBlock,
        min: (i32, i32),
        max: (i32, i32),
        orient: i32,
    ) -> PlotResult<()>;
    /// Single dot.
    fn point(&mut self, at: (i32, i32)) -> PlotResult<()> {
        self.vector(at, at, 0, false)
    }
    /// Attribute change.
    fn attributes(&mut self, attr: &Attribute) -> PlotResult<()>;
    /// Raw move or draw.
    fn plot(&mut self, at: (i32, i32), draw: bool) -> PlotResult<()>;
    /// Open a polygon of `count` vertices.
    fn start_polygon(&mut self, count: usize) -> PlotResult<()>;
    /// Append a polygon vertex.
    fn add_vertex(&mut self, at: (i32, i32)) -> PlotResult<()>;
    /// Close and emit the open polygon.
    fn end_polygon(&mut self, last: bool) -> PlotResult<()>;
    /// Interactive point input; non-interactive devices have none.
    fn getpoint(&mut self) -> PlotResult<Option<(i32, i32)>> {
        Ok(None)
    }
    /// Wait for user interaction.
    fn interact(&mut self) -> PlotResult<()> {
        Ok(())
    }

    /// Interpreter-owned values the primitives consult.
    fn interpreter_mut(&mut self) -> &mut InterpreterState;
    /// Default scale and shift.
    fn placement(&self) -> Placement;
    /// Limits of the current frame.
    fn frame_limits(&self) -> DeviceRect;
    /// Consume the start-fresh request.
    fn take_start_fresh(&mut self) -> bool;
    /// Consume the parameter-reset request.
    fn take_parameter_reset(&mut self) -> bool;
}

/// A named, rewindable source of plot commands.
pub trait CommandStream {
    /// Name shown in statistics.
    fn name(&self) -> &str;
    /// Replay every command into `sink`.
    fn replay(&mut self, sink: &mut dyn PlotSink) -> PlotResult<()>;
    /// Prepare for another replay.
    fn rewind(&mut self) -> PlotResult<()>;
    /// Release the stream; no replay may follow.
    fn close(&mut self) -> PlotResult<()>;
}
