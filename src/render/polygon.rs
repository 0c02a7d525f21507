use crate::device::PlotDevice;
use crate::foundation::core::InchPoint;
use crate::foundation::error::{PlotError, PlotResult, scratch_buffer};
use crate::render::plotter::Plotter;

/// Vertices collected between polygon start and end, inches.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonBuffer {
    vertices: Vec<InchPoint>,
    capacity: usize,
}

impl<D: PlotDevice> Plotter<D> {
    pub(crate) fn begin_polygon(&mut self, count: usize) -> PlotResult<()> {
        self.forget_device_state();
        let vertices = scratch_buffer(count, "polygon vertices")?;
        self.polygon = Some(PolygonBuffer {
            vertices,
            capacity: count,
        });
        Ok(())
    }

    pub(crate) fn push_vertex(&mut self, x: i32, y: i32) -> PlotResult<()> {
        let at = self.profile.inch_point(x, y);
        let buf = self
            .polygon
            .as_mut()
            .ok_or_else(|| PlotError::validation("polygon vertex outside a polygon"))?;
        if buf.vertices.len() == buf.capacity {
            return Err(PlotError::capacity(format!(
                "polygon declared with {} vertices",
                buf.capacity
            )));
        }
        buf.vertices.push(at);
        Ok(())
    }

    /// Outline with no pattern, or fill in the pattern's color.
    pub(crate) fn finish_polygon(&mut self) -> PlotResult<()> {
        let buf = self
            .polygon
            .take()
            .ok_or_else(|| PlotError::validation("polygon end without a start"))?;
        let pattern = self.interp.fill_pattern;
        if pattern == 0 {
            return self
                .device
                .area(&buf.vertices, None, self.patterns.original_dims(0));
        }

        let fill_color = i32::try_from(pattern - 1)
            .map_err(|_| PlotError::validation(format!("fill pattern {pattern} out of range")))?;
        let current = self.attrs.color();
        if fill_color != current {
            self.device.color(fill_color)?;
        }
        self.device.fill(&buf.vertices)?;
        if fill_color != current {
            self.device.color(current)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/polygon.rs"]
mod tests;
