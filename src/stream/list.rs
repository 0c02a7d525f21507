use crate::foundation::core::{DeviceRect, round_to_i32};
use crate::foundation::error::{PlotError, PlotResult};
use crate::render::attributes::{Attribute, FontSpec};
use crate::render::frame::EraseEvent;
use crate::render::message::MessageEvent;
use crate::render::state::Placement;
use crate::stream::{CommandStream, PlotCommand, PlotSink};

/// In-memory stream of decoded commands.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandList {
    name: String,
    commands: Vec<PlotCommand>,
    closed: bool,
    replays: usize,
}

impl CommandList {
    /// Named list of commands.
    pub fn new(name: impl Into<String>, commands: Vec<PlotCommand>) -> Self {
        Self {
            name: name.into(),
            commands,
            closed: false,
            replays: 0,
        }
    }

    /// Parse a JSON array of commands.
    pub fn from_json(name: impl Into<String>, json: &str) -> PlotResult<Self> {
        let name = name.into();
        let commands = serde_json::from_str(json)
            .map_err(|e| PlotError::validation(format!("{name}: {e}")))?;
        Ok(Self::new(name, commands))
    }

    /// Commands in replay order.
    pub fn commands(&self) -> &[PlotCommand] {
        &self.commands
    }

    /// Number of replays so far.
    pub fn replays(&self) -> usize {
        self.replays
    }

    /// `true` after [`CommandStream::close`].
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl CommandStream for CommandList {
    fn name(&self) -> &str {
        &self.name
    }

    fn replay(&mut self, sink: &mut dyn PlotSink) -> PlotResult<()> {
        if self.closed {
            return Err(PlotError::validation(format!(
                "stream {} replayed after close",
                self.name
            )));
        }
        self.replays += 1;

        if sink.take_start_fresh() {
            let limits = sink.frame_limits();
            sink.interpreter_mut().reset_parameters(limits);
            sink.reset()?;
            sink.erase(EraseEvent::Start)?;
        }
        {
            let interp = sink.interpreter_mut();
            interp.cursor = (0, 0);
            interp.group_depth = 1;
        }
        // Level 0 is the file itself; user groups nest below it.
        sink.attributes(&Attribute::BeginGroup {
            name: self.name.clone(),
            level: 0,
        })?;

        let placement = sink.placement();
        for command in &self.commands {
            if sink.take_parameter_reset() {
                reset_parameters(sink)?;
            }
            execute(sink, &placement, command)?;
        }

        let open = sink.interpreter_mut().group_depth;
        if open != 1 {
            return Err(PlotError::validation(format!(
                "stream {} ends with {} unclosed group(s)",
                self.name,
                open.saturating_sub(1)
            )));
        }
        sink.interpreter_mut().group_depth = 0;
        sink.attributes(&Attribute::EndGroup { level: 0 })
    }

    fn rewind(&mut self) -> PlotResult<()> {
        if self.closed {
            return Err(PlotError::validation(format!(
                "stream {} rewound after close",
                self.name
            )));
        }
        Ok(())
    }

    fn close(&mut self) -> PlotResult<()> {
        self.closed = true;
        Ok(())
    }
}

fn reset_parameters(sink: &mut dyn PlotSink) -> PlotResult<()> {
    let limits = sink.frame_limits();
    sink.interpreter_mut().reset_parameters(limits);
    sink.attributes(&Attribute::Window(limits))?;
    sink.attributes(&Attribute::Fat(0))?;
    sink.attributes(&Attribute::Dash(Default::default()))
}

fn placed(placement: &Placement, points: &[[i32; 2]]) -> Vec<(i32, i32)> {
    points.iter().map(|&[x, y]| placement.apply(x, y)).collect()
}

fn execute(sink: &mut dyn PlotSink, placement: &Placement, command: &PlotCommand) -> PlotResult<()> {
    match command {
        PlotCommand::Erase => sink.erase(EraseEvent::Middle),
        PlotCommand::Break => sink.erase(EraseEvent::Break),
        PlotCommand::Move { x, y } => {
            sink.interpreter_mut().cursor = placement.apply(*x, *y);
            Ok(())
        }
        PlotCommand::Draw { x, y } => {
            let to = placement.apply(*x, *y);
            let (from, fat, dash_on) = {
                let interp = sink.interpreter_mut();
                (interp.cursor, interp.fat, interp.dash_on)
            };
            sink.vector(from, to, fat, dash_on)?;
            sink.interpreter_mut().cursor = to;
            Ok(())
        }
        PlotCommand::Point { x, y } => {
            let at = placement.apply(*x, *y);
            sink.interpreter_mut().cursor = at;
            sink.point(at)
        }
        PlotCommand::Marker { kind, size, points } => {
            let size = round_to_i32(f64::from(*size) * placement.yscale);
            sink.marker(*kind, size, &placed(placement, points))
        }
        PlotCommand::Text {
            x,
            y,
            text,
            path,
            up,
        } => {
            sink.interpreter_mut().cursor = placement.apply(*x, *y);
            let (sx, sy) = (placement.xscale as f32, placement.yscale as f32);
            sink.text(text, (path[0] * sx, path[1] * sy), (up[0] * sx, up[1] * sy))
        }
        PlotCommand::Polygon { points } => sink.area(&placed(placement, points)),
        PlotCommand::Raster {
            block,
            min,
            max,
            orient,
        } => sink.raster(
            block,
            placement.apply(min[0], min[1]),
            placement.apply(max[0], max[1]),
            *orient,
        ),
        PlotCommand::Color { index } => sink.attributes(&Attribute::Color(*index)),
        PlotCommand::ColorTable { index, rgb } => sink.attributes(&Attribute::ColorTable {
            index: *index,
            rgb: *rgb,
        }),
        PlotCommand::Window {
            xmin,
            ymin,
            xmax,
            ymax,
        } => {
            let limits = sink.frame_limits();
            let (x0, y0) = placement.apply(*xmin, *ymin);
            let (x1, y1) = placement.apply(*xmax, *ymax);
            let window = DeviceRect::new(
                x0.max(limits.xmin),
                y0.max(limits.ymin),
                x1.min(limits.xmax),
                y1.min(limits.ymax),
            );
            sink.interpreter_mut().window = window;
            sink.attributes(&Attribute::Window(window))
        }
        PlotCommand::Dash { pattern } => {
            let interp = sink.interpreter_mut();
            interp.dashes = pattern.clone();
            interp.dash_on = !pattern.is_empty();
            sink.attributes(&Attribute::Dash(pattern.clone()))
        }
        PlotCommand::Fat { fat } => {
            let fat = placement.fat(*fat);
            sink.interpreter_mut().fat = fat;
            sink.attributes(&Attribute::Fat(fat))
        }
        PlotCommand::Font {
            font,
            precision,
            overlay,
        } => sink.attributes(&Attribute::Font(FontSpec {
            font: *font,
            precision: *precision,
            overlay: *overlay,
        })),
        PlotCommand::Justify {
            horizontal,
            vertical,
        } => sink.attributes(&Attribute::Justify {
            horizontal: *horizontal,
            vertical: *vertical,
        }),
        PlotCommand::Overlay { mode } => {
            sink.interpreter_mut().overlay = *mode;
            sink.attributes(&Attribute::Overlay(*mode))
        }
        PlotCommand::LoadPattern { index } => sink.attributes(&Attribute::FillPattern(*index)),
        PlotCommand::SelectPattern { index } => {
            sink.interpreter_mut().fill_pattern = *index;
            Ok(())
        }
        PlotCommand::BeginGroup { name } => {
            let interp = sink.interpreter_mut();
            let level = interp.group_depth;
            interp.group_depth += 1;
            sink.attributes(&Attribute::BeginGroup {
                name: name.clone(),
                level,
            })
        }
        PlotCommand::EndGroup => {
            let interp = sink.interpreter_mut();
            let level = interp
                .group_depth
                .checked_sub(1)
                .filter(|&level| level > 0)
                .ok_or_else(|| PlotError::validation("end of group without a matching begin"))?;
            interp.group_depth = level;
            sink.attributes(&Attribute::EndGroup { level })
        }
        PlotCommand::Message { text } => {
            sink.message(MessageEvent::Message, "")?;
            sink.message(MessageEvent::Text, text)?;
            sink.message(MessageEvent::Done, "")
        }
        PlotCommand::Note { text } => {
            sink.message(MessageEvent::Ready, "")?;
            sink.message(MessageEvent::Text, text)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stream/list.rs"]
mod tests;
