//! Frame boundaries: page erases, page breaks and multi-frame grid cells.

use serde::{Deserialize, Serialize};

use crate::device::PlotDevice;
use crate::foundation::core::DeviceRect;
use crate::foundation::error::{PlotError, PlotResult};
use crate::render::attributes::Attribute;
use crate::render::plotter::Plotter;

/// Frame boundary reported by the command interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraseEvent {
    /// First frame of the job.
    Start,
    /// Erase between frames.
    Middle,
    /// Page break without an erase.
    Break,
}

/// Fixed cell geometry of a multi-frame page, device units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Cells per row.
    pub columns: u32,
    /// Rows per page.
    pub rows: u32,
    /// Cell width.
    pub cell_width: i32,
    /// Cell height.
    pub cell_height: i32,
    /// Top edge of the page.
    pub top: i32,
    /// Border fatness, raw device fatness units; `None` draws no border.
    pub border_fat: Option<i32>,
}

impl GridLayout {
    /// Cell occupied by 0-based frame `index`, rows filled top to bottom.
    pub fn cell(&self, index: u32) -> DeviceRect {
        let col = index % self.columns;
        let row = index / self.columns;
        let xmin = col as i32 * self.cell_width;
        let ymin = self.top - (row as i32 + 1) * self.cell_height;
        DeviceRect::new(xmin, ymin, xmin + self.cell_width, ymin + self.cell_height)
    }
}

/// Frame counter and current frame limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameState {
    /// Frames started minus one; `-1` before the first start.
    pub counter: i32,
    /// Current frame limits.
    pub limits: DeviceRect,
}

impl FrameState {
    /// No frame started, limits set to the whole device.
    pub fn new(limits: DeviceRect) -> Self {
        Self {
            counter: -1,
            limits,
        }
    }

    /// Frame counting used by the dry run.
    pub fn count(&mut self, event: EraseEvent) {
        match event {
            EraseEvent::Start => self.counter = 0,
            EraseEvent::Middle => self.counter += 1,
            EraseEvent::Break => {}
        }
    }

    /// Move the limits to the next grid cell and bump the counter.
    pub fn advance_cell(&mut self, grid: &GridLayout, event: EraseEvent) -> PlotResult<()> {
        if event == EraseEvent::Start {
            self.counter = 0;
        }
        let index = u32::try_from(self.counter).map_err(|_| {
            PlotError::frame_order("grid layout needs an initial erase before the first frame")
        })?;
        self.limits = grid.cell(index);
        self.counter += 1;
        Ok(())
    }
}

impl<D: PlotDevice> Plotter<D> {
    /// Live erase handling.
    pub(crate) fn live_erase(&mut self, event: EraseEvent) -> PlotResult<()> {
        match self.grid {
            None => self.page_erase(event),
            Some(grid) => self.grid_erase(&grid, event),
        }
    }

    fn page_erase(&mut self, event: EraseEvent) -> PlotResult<()> {
        match event {
            EraseEvent::Start => self.frames.counter = 0,
            EraseEvent::Middle => {
                self.frames.counter += 1;
                self.device.erase()?;
                self.restore_style()?;
                self.forget_device_state();
                if !self.config.dumb {
                    self.resync_color_table()?;
                    self.forget_device_state();
                }
            }
            EraseEvent::Break => {
                self.device.page_break()?;
                self.restore_style()?;
                self.forget_device_state();
            }
        }
        Ok(())
    }

    fn resync_color_table(&mut self) -> PlotResult<()> {
        let entries: Vec<(usize, [i32; 3])> = self.attrs.color_table().iter_set().collect();
        tracing::debug!(entries = entries.len(), "resyncing color table");
        self.attrs.set_resync(true);
        let sent = entries.into_iter().try_for_each(|(index, rgb)| {
            let index = i32::try_from(index)
                .map_err(|_| PlotError::capacity(format!("color table index {index}")))?;
            self.apply_attribute(&Attribute::ColorTable { index, rgb })
        });
        self.attrs.set_resync(false);
        sent
    }

    fn grid_erase(&mut self, grid: &GridLayout, event: EraseEvent) -> PlotResult<()> {
        if event == EraseEvent::Break {
            return Ok(());
        }
        if event == EraseEvent::Middle && self.frames.counter >= 0 {
            self.device.page_break()?;
        }
        self.frames.advance_cell(grid, event)?;
        self.forget_device_state();
        self.control.reset_parameters = true;
        tracing::debug!(frame = self.frames.counter, limits = ?self.frames.limits, "grid cell");

        if let Some(border) = grid.border_fat {
            self.draw_border(border)?;
        }
        Ok(())
    }

    fn draw_border(&mut self, border_fat: i32) -> PlotResult<()> {
        let r = self.frames.limits;
        self.device.color(self.profile.border_color)?;
        self.device.fat(border_fat)?;
        self.device.move_to(self.profile.inch_point(r.xmin, r.ymin))?;
        for (x, y) in [
            (r.xmax, r.ymin),
            (r.xmax, r.ymax),
            (r.xmin, r.ymax),
            (r.xmin, r.ymin),
        ] {
            self.device.draw_to(self.profile.inch_point(x, y))?;
        }
        self.device.color(self.attrs.color())?;
        self.device.fat(self.profile.device_fat(self.attrs.fat()))
    }

    pub(crate) fn restore_style(&mut self) -> PlotResult<()> {
        if !self.config.dumb && self.config.uses_absolute_style() {
            self.device.absolute_style()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
