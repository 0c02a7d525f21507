use serde::{Deserialize, Serialize};

use crate::config::TextDefaults;
use crate::foundation::core::{DashPattern, DeviceRect, round_to_i32};
use crate::foundation::error::{PlotError, PlotResult};

/// Last plotted point and whether the device cursor can still be trusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PenPosition {
    /// Last point drawn to, device units.
    pub last: (i32, i32),
    /// Device cursor position is unknown; the next draw needs an explicit move.
    pub lost: bool,
}

impl Default for PenPosition {
    fn default() -> Self {
        Self {
            last: (0, 0),
            lost: true,
        }
    }
}

impl PenPosition {
    /// Forget where the device cursor is.
    pub fn lose(&mut self) {
        self.lost = true;
    }

    /// Manhattan distance from the last plotted point.
    pub fn travel_to(&self, (x, y): (i32, i32)) -> i64 {
        (i64::from(x) - i64::from(self.last.0)).abs() + (i64::from(y) - i64::from(self.last.1)).abs()
    }
}

/// Values owned by the upstream command interpreter that primitives consult.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpreterState {
    /// Current line fatness, device units.
    pub fat: i32,
    /// Dashing enabled.
    pub dash_on: bool,
    /// Current dash table.
    pub dashes: DashPattern,
    /// Current clip window.
    pub window: DeviceRect,
    /// Current pen point.
    pub cursor: (i32, i32),
    /// Active fill pattern; 0 outlines polygons instead of filling them.
    pub fill_pattern: usize,
    /// Current overlay mode.
    pub overlay: i32,
    /// Text state restored by a device reset.
    pub text: TextDefaults,
    /// Open group nesting.
    pub group_depth: u32,
}

impl InterpreterState {
    /// Fresh state clipped to `window`.
    pub fn new(window: DeviceRect, text: TextDefaults) -> Self {
        Self {
            fat: 0,
            dash_on: false,
            dashes: DashPattern::solid(),
            window,
            cursor: (0, 0),
            fill_pattern: 0,
            overlay: 0,
            text,
            group_depth: 0,
        }
    }

    /// Return to defaults, clipped to `window`. Group nesting and text defaults survive.
    pub fn reset_parameters(&mut self, window: DeviceRect) {
        self.fat = 0;
        self.dash_on = false;
        self.dashes = DashPattern::solid();
        self.window = window;
        self.fill_pattern = 0;
        self.overlay = 0;
    }
}

/// Default scale and shift the interpreter applies to every coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Horizontal scale.
    pub xscale: f64,
    /// Vertical scale.
    pub yscale: f64,
    /// Horizontal shift, device units.
    pub hshift: i32,
    /// Vertical shift, device units.
    pub vshift: i32,
    /// Line fatness multiplier.
    pub fatmult: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self::shifted(0, 0)
    }
}

impl Placement {
    /// Unit scale with the given shift.
    pub fn shifted(hshift: i32, vshift: i32) -> Self {
        Self {
            xscale: 1.0,
            yscale: 1.0,
            hshift,
            vshift,
            fatmult: 1.0,
        }
    }

    /// Map a plot coordinate to device units.
    pub fn apply(&self, x: i32, y: i32) -> (i32, i32) {
        (
            round_to_i32(f64::from(x) * self.xscale) + self.hshift,
            round_to_i32(f64::from(y) * self.yscale) + self.vshift,
        )
    }

    /// Scale a fatness value.
    pub fn fat(&self, fat: i32) -> i32 {
        round_to_i32(f64::from(fat) * self.fatmult)
    }
}

/// Flags the core raises for the upstream interpreter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamControl {
    /// Start from scratch: the next replay must reset the device first.
    pub start_fresh: bool,
    /// Interpreter parameters must be reset before the next command.
    pub reset_parameters: bool,
}

/// Last transmitted RGB per color-table index. Survives erases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<Option<[i32; 3]>>,
}

impl ColorTable {
    /// Table with `capacity` unset entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity],
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Last value transmitted for `index`, if any.
    pub fn get(&self, index: usize) -> PlotResult<Option<[i32; 3]>> {
        self.entries
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Record a transmission.
    pub fn set(&mut self, index: usize, rgb: [i32; 3]) -> PlotResult<()> {
        let err = self.out_of_range(index);
        let slot = self.entries.get_mut(index).ok_or(err)?;
        *slot = Some(rgb);
        Ok(())
    }

    /// Entries that have been transmitted, in ascending index order.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, [i32; 3])> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|rgb| (i, rgb)))
    }

    fn out_of_range(&self, index: usize) -> PlotError {
        PlotError::capacity(format!(
            "color table index {index} outside 0..{}",
            self.entries.len()
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/state.rs"]
mod tests;
