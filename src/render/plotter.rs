use crate::config::{PenConfig, TextDefaults};
use crate::device::{DeviceProfile, PlotDevice, RasterBlock};
use crate::foundation::core::{BoundingBox, DashPattern, DeviceRect, InchPoint};
use crate::foundation::error::{PlotResult, scratch_buffer};
use crate::foundation::geom::clip_segment;
use crate::render::attributes::{Attribute, AttributeCache, FontSpec};
use crate::render::bindings::{
    AreaBinding, AttributeBinding, BindingSet, EraseBinding, LIVE, MessageBinding, ResetBinding,
    ShapeBinding, VectorBinding,
};
use crate::render::frame::{EraseEvent, FrameState, GridLayout};
use crate::render::message::{MessageEvent, MessageLog};
use crate::render::pattern::PatternTable;
use crate::render::polygon::PolygonBuffer;
use crate::render::state::{InterpreterState, PenPosition, Placement, StreamControl};
use crate::stream::PlotSink;

/// Plotting state for one job, writing to a single device.
///
/// Every primitive dispatches through the active [`BindingSet`]. A fresh plotter starts on the
/// live set with a start-fresh request pending.
pub struct Plotter<D: PlotDevice> {
    pub(crate) device: D,
    pub(crate) config: PenConfig,
    pub(crate) profile: DeviceProfile,
    pub(crate) patterns: PatternTable,
    pub(crate) bindings: &'static BindingSet,
    pub(crate) pen: PenPosition,
    pub(crate) interp: InterpreterState,
    pub(crate) attrs: AttributeCache,
    pub(crate) frames: FrameState,
    pub(crate) grid: Option<GridLayout>,
    pub(crate) polygon: Option<PolygonBuffer>,
    pub(crate) extent: BoundingBox,
    pub(crate) placement: Placement,
    pub(crate) control: StreamControl,
    pub(crate) messages: MessageLog,
}

impl<D: PlotDevice> Plotter<D> {
    /// Validate `config` and set up state for `device`.
    pub fn new(
        device: D,
        config: PenConfig,
        profile: DeviceProfile,
        patterns: PatternTable,
    ) -> PlotResult<Self> {
        config.validate()?;
        let limits = config.limits(&profile);
        let grid = config.grid_layout(&profile);
        let attrs = AttributeCache::new(
            profile.color_table_size,
            profile.default_color,
            config.dumb,
        );
        Ok(Self {
            device,
            interp: InterpreterState::new(limits, config.text),
            config,
            profile,
            patterns,
            bindings: &LIVE,
            pen: PenPosition::default(),
            attrs,
            frames: FrameState::new(limits),
            grid,
            polygon: None,
            extent: BoundingBox::inverted(limits),
            placement: Placement::default(),
            control: StreamControl {
                start_fresh: true,
                reset_parameters: false,
            },
            messages: MessageLog::default(),
        })
    }

    /// Output device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Output device, mutably.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Give the device back.
    pub fn into_device(self) -> D {
        self.device
    }

    /// Job configuration.
    pub fn config(&self) -> &PenConfig {
        &self.config
    }

    /// Device constants.
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Pen tracker.
    pub fn pen(&self) -> PenPosition {
        self.pen
    }

    /// Attribute cache.
    pub fn attributes_cache(&self) -> &AttributeCache {
        &self.attrs
    }

    /// Interpreter view.
    pub fn interpreter(&self) -> &InterpreterState {
        &self.interp
    }

    /// Frame counter and limits.
    pub fn frames(&self) -> FrameState {
        self.frames
    }

    /// Pending stream flags.
    pub fn control(&self) -> StreamControl {
        self.control
    }

    /// Extent logged since the last [`Plotter::reset_extent`].
    pub fn extent(&self) -> BoundingBox {
        self.extent
    }

    /// Active binding set.
    pub fn bindings(&self) -> &'static BindingSet {
        self.bindings
    }

    /// Device hard limits for this job.
    pub fn hard_limits(&self) -> DeviceRect {
        self.config.limits(&self.profile)
    }

    /// Swap the whole binding set.
    pub fn use_bindings(&mut self, bindings: &'static BindingSet) {
        tracing::debug!(bindings = bindings.name, "switching device bindings");
        self.bindings = bindings;
    }

    /// Replace the default scale and shift.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Ask the interpreter to start from scratch and reset its parameters.
    pub fn request_fresh_start(&mut self) {
        self.control.start_fresh = true;
        self.control.reset_parameters = true;
    }

    /// Start a new per-file extent.
    pub fn reset_extent(&mut self) {
        self.extent = BoundingBox::inverted(self.frames.limits);
    }

    pub(crate) fn forget_device_state(&mut self) {
        self.pen.lose();
        self.attrs.invalidate();
    }

    /// Route an attribute through the cache. The pen is lost whether or not anything is sent.
    pub(crate) fn apply_attribute(&mut self, attr: &Attribute) -> PlotResult<()> {
        self.pen.lose();
        self.attrs
            .apply(attr, &mut self.device, &self.profile, &self.patterns)?;
        Ok(())
    }

    fn log_segment(&mut self, from: (i32, i32), to: (i32, i32)) {
        if let Some((a, b)) = clip_segment(self.interp.window, from, to) {
            self.extent.include(a.0, a.1);
            self.extent.include(b.0, b.1);
        }
    }

    fn log_outline(&mut self, vertices: &[(i32, i32)]) {
        let Some(&first) = vertices.first() else {
            return;
        };
        for pair in vertices.windows(2) {
            self.log_segment(pair[0], pair[1]);
        }
        if let Some(&last) = vertices.last() {
            self.log_segment(last, first);
        }
    }

    fn live_reset(&mut self) -> PlotResult<()> {
        self.attrs.invalidate();
        if self.config.force_initial_erase {
            self.device.erase()?;
        }
        self.restore_style()?;
        if self.config.dumb {
            return Ok(());
        }
        let TextDefaults {
            font,
            precision,
            overlay,
            horizontal,
            vertical,
        } = self.interp.text;
        let defaults = [
            Attribute::Window(self.frames.limits),
            Attribute::Color(self.profile.default_color),
            Attribute::Fat(0),
            Attribute::Dash(DashPattern::solid()),
            Attribute::Font(FontSpec {
                font: Some(font),
                precision: Some(precision),
                overlay: Some(overlay),
            }),
            Attribute::Justify {
                horizontal,
                vertical,
            },
            Attribute::Overlay(self.interp.overlay),
        ];
        defaults
            .iter()
            .try_for_each(|attr| self.apply_attribute(attr))
    }

    fn inch_points(&self, points: &[(i32, i32)], what: &str) -> PlotResult<Vec<InchPoint>> {
        let mut out = scratch_buffer(points.len(), what)?;
        out.extend(points.iter().map(|&(x, y)| self.profile.inch_point(x, y)));
        Ok(out)
    }

    fn scale_direction(&self, (x, y): (f32, f32)) -> InchPoint {
        let rpi = self.profile.resolution_per_inch as f32;
        InchPoint {
            x: x / rpi,
            y: y / rpi,
        }
    }
}

impl<D: PlotDevice> PlotSink for Plotter<D> {
    fn reset(&mut self) -> PlotResult<()> {
        match self.bindings.reset {
            ResetBinding::Ignore => Ok(()),
            ResetBinding::Device => self.live_reset(),
        }
    }

    fn message(&mut self, event: MessageEvent, text: &str) -> PlotResult<()> {
        match self.bindings.message {
            MessageBinding::Log => {
                self.messages.diagnostic(event, text);
                Ok(())
            }
            MessageBinding::Device => {
                if let Some(done) = self.messages.live(event, text)?
                    && !self.config.dumb
                {
                    self.device.message(&done)?;
                }
                Ok(())
            }
        }
    }

    fn erase(&mut self, event: EraseEvent) -> PlotResult<()> {
        match self.bindings.erase {
            EraseBinding::CountFrames => {
                self.frames.count(event);
                Ok(())
            }
            EraseBinding::Frames => self.live_erase(event),
        }
    }

    fn close(&mut self) -> PlotResult<()> {
        tracing::debug!(bindings = self.bindings.name, "close");
        Ok(())
    }

    fn vector(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        fat: i32,
        dash_on: bool,
    ) -> PlotResult<()> {
        match self.bindings.vector {
            VectorBinding::LogExtent => {
                self.log_segment(from, to);
                Ok(())
            }
            VectorBinding::Optimize => self.optimized_vector(from, to, fat, dash_on),
        }
    }

    fn marker(&mut self, kind: i32, size: i32, points: &[(i32, i32)]) -> PlotResult<()> {
        match self.bindings.marker {
            ShapeBinding::LogExtent => {
                for &p in points {
                    self.log_segment(p, p);
                }
                Ok(())
            }
            ShapeBinding::Device => {
                self.forget_device_state();
                let inches = self.inch_points(points, "marker points")?;
                let size = self.profile.device_text_size(size);
                self.device.marker(kind, size, &inches)
            }
        }
    }

    fn text(&mut self, text: &str, path: (f32, f32), up: (f32, f32)) -> PlotResult<()> {
        let anchor = self.interp.cursor;
        match self.bindings.text {
            ShapeBinding::LogExtent => {
                self.log_segment(anchor, anchor);
                Ok(())
            }
            ShapeBinding::Device => {
                self.forget_device_state();
                if text.is_empty() {
                    return Ok(());
                }
                let at = self.profile.inch_point(anchor.0, anchor.1);
                let (path, up) = (self.scale_direction(path), self.scale_direction(up));
                self.device.text(at, path, up, text)?;
                // Every font returns the pen to the anchor; glyph advance stays with the device.
                self.device.move_to(at)
            }
        }
    }

    fn area(&mut self, vertices: &[(i32, i32)]) -> PlotResult<()> {
        match self.bindings.area {
            AreaBinding::LogOutline => {
                self.log_outline(vertices);
                Ok(())
            }
            AreaBinding::Polygon => {
                self.start_polygon(vertices.len())?;
                for &v in vertices {
                    self.add_vertex(v)?;
                }
                self.end_polygon(true)
            }
        }
    }

    fn raster(
        &mut self,
        block: &RasterBlock,
        min: (i32, i32),
        max: (i32, i32),
        orient: i32,
    ) -> PlotResult<()> {
        match self.bindings.raster {
            ShapeBinding::LogExtent => {
                self.log_outline(&[min, (max.0, min.1), max, (min.0, max.1)]);
                Ok(())
            }
            ShapeBinding::Device => {
                self.forget_device_state();
                let bit = (self.config.bit > 0).then_some(self.config.bit);
                self.device.raster(
                    block,
                    bit,
                    self.profile.inch_point(min.0, min.1),
                    self.profile.inch_point(max.0, max.1),
                    orient,
                )
            }
        }
    }

    fn attributes(&mut self, attr: &Attribute) -> PlotResult<()> {
        match self.bindings.attributes {
            AttributeBinding::Ignore => Ok(()),
            AttributeBinding::Cache => self.apply_attribute(attr),
        }
    }

    fn plot(&mut self, at: (i32, i32), draw: bool) -> PlotResult<()> {
        self.plot_point(at, draw)
    }

    fn start_polygon(&mut self, count: usize) -> PlotResult<()> {
        match self.bindings.area {
            AreaBinding::LogOutline => Ok(()),
            AreaBinding::Polygon => self.begin_polygon(count),
        }
    }

    fn add_vertex(&mut self, (x, y): (i32, i32)) -> PlotResult<()> {
        match self.bindings.area {
            AreaBinding::LogOutline => Ok(()),
            AreaBinding::Polygon => self.push_vertex(x, y),
        }
    }

    fn end_polygon(&mut self, _last: bool) -> PlotResult<()> {
        match self.bindings.area {
            AreaBinding::LogOutline => Ok(()),
            AreaBinding::Polygon => self.finish_polygon(),
        }
    }

    fn interpreter_mut(&mut self) -> &mut InterpreterState {
        &mut self.interp
    }

    fn placement(&self) -> Placement {
        self.placement
    }

    fn frame_limits(&self) -> DeviceRect {
        self.frames.limits
    }

    fn take_start_fresh(&mut self) -> bool {
        std::mem::take(&mut self.control.start_fresh)
    }

    fn take_parameter_reset(&mut self) -> bool {
        std::mem::take(&mut self.control.reset_parameters)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plotter.rs"]
mod tests;
