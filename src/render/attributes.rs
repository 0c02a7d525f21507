//! Suppression of redundant attribute writes.
//!
//! [`AttributeCache`] remembers the last value transmitted for every attribute category. A
//! category whose validity flag is set and whose value matches the request is not sent again.
//! Invalidation clears the flags but keeps the values, which the frame manager and the polygon
//! path still read back.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceProfile, PlotDevice};
use crate::foundation::core::{DashPattern, DeviceRect};
use crate::foundation::error::{PlotError, PlotResult, scratch_buffer};
use crate::render::pattern::PatternTable;
use crate::render::state::ColorTable;

/// Font selection; `None` on an axis keeps the previously transmitted value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub font: Option<i32>,
    pub precision: Option<i32>,
    pub overlay: Option<i32>,
}

/// One attribute change requested by the command stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribute {
    /// Select a color index.
    Color(i32),
    /// Define a color-table entry with gun values in `0..=max_gun`.
    ColorTable { index: i32, rgb: [i32; 3] },
    /// Set the clip window, device units.
    Window(DeviceRect),
    /// Set the dash pattern; empty means solid.
    Dash(DashPattern),
    /// Load fill pattern `n` from the pattern table into the device.
    FillPattern(usize),
    /// Select text font.
    Font(FontSpec),
    /// Select text justification.
    Justify { horizontal: i32, vertical: i32 },
    /// Set line fatness, device resolution units.
    Fat(i32),
    /// Set overlay mode.
    Overlay(i32),
    /// Open a group at nesting `level`.
    BeginGroup {
        name: String,
        /// Nesting level; level 0 is the file itself.
        level: u32,
    },
    /// Close a group at nesting `level`.
    EndGroup { level: u32 },
}

#[derive(Clone, Debug, PartialEq)]
struct Cached<T> {
    value: T,
    valid: bool,
}

impl<T: PartialEq> Cached<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            valid: false,
        }
    }

    fn is_current(&self, v: &T) -> bool {
        self.valid && self.value == *v
    }

    fn store(&mut self, v: T) {
        self.value = v;
        self.valid = true;
    }
}

/// Last-transmitted graphics state.
#[derive(Clone, Debug)]
pub struct AttributeCache {
    color: Cached<i32>,
    color_select: Cached<(usize, [i32; 3])>,
    table: ColorTable,
    window: Cached<DeviceRect>,
    dash: Cached<DashPattern>,
    font: Cached<(i32, i32, i32)>,
    justify: Cached<(i32, i32)>,
    fat: Cached<i32>,
    overlay: Cached<i32>,
    resync: bool,
    dumb: bool,
}

impl AttributeCache {
    /// Empty cache. `dumb` restricts it to color changes.
    pub fn new(color_table_size: usize, default_color: i32, dumb: bool) -> Self {
        Self {
            color: Cached::new(default_color),
            color_select: Cached::new((0, [0; 3])),
            table: ColorTable::new(color_table_size),
            window: Cached::new(DeviceRect::new(0, 0, 0, 0)),
            dash: Cached::new(DashPattern::solid()),
            font: Cached::new((0, 0, 0)),
            justify: Cached::new((0, 0)),
            fat: Cached::new(0),
            overlay: Cached::new(0),
            resync: false,
            dumb,
        }
    }

    /// Forget what was transmitted. Color-table history survives.
    pub fn invalidate(&mut self) {
        self.color.valid = false;
        self.color_select.valid = false;
        self.window.valid = false;
        self.dash.valid = false;
        self.font.valid = false;
        self.justify.valid = false;
        self.fat.valid = false;
        self.overlay.valid = false;
    }

    /// Force color-table entries out even when unchanged.
    pub fn set_resync(&mut self, on: bool) {
        self.resync = on;
    }

    /// Last color index sent.
    pub fn color(&self) -> i32 {
        self.color.value
    }

    /// Last fatness sent, device resolution units.
    pub fn fat(&self) -> i32 {
        self.fat.value
    }

    /// Last overlay mode recorded.
    pub fn overlay(&self) -> i32 {
        self.overlay.value
    }

    /// Color-table history.
    pub fn color_table(&self) -> &ColorTable {
        &self.table
    }

    /// Reduced-capability mode.
    pub fn is_dumb(&self) -> bool {
        self.dumb
    }

    /// Transmit `attr` unless the device already holds it. Returns whether anything was sent.
    pub fn apply<D: PlotDevice + ?Sized>(
        &mut self,
        attr: &Attribute,
        device: &mut D,
        profile: &DeviceProfile,
        patterns: &PatternTable,
    ) -> PlotResult<bool> {
        if self.dumb && !matches!(attr, Attribute::Color(_)) {
            return Ok(false);
        }
        match attr {
            Attribute::Color(index) => {
                if self.color.is_current(index) {
                    return Ok(false);
                }
                device.color(*index)?;
                self.color.store(*index);
            }
            Attribute::ColorTable { index, rgb } => {
                let slot = usize::try_from(*index).map_err(|_| {
                    PlotError::capacity(format!("negative color table index {index}"))
                })?;
                if self.color_select.is_current(&(slot, *rgb)) {
                    return Ok(false);
                }
                let sent = self.resync || self.table.get(slot)? != Some(*rgb);
                if sent {
                    let fractions = rgb.map(|v| profile.gun_fraction(v));
                    device.color_table(slot, fractions)?;
                    self.table.set(slot, *rgb)?;
                }
                self.color_select.store((slot, *rgb));
                return Ok(sent);
            }
            Attribute::Window(rect) => {
                if self.window.is_current(rect) {
                    return Ok(false);
                }
                device.clip(
                    profile.inch_point(rect.xmin, rect.ymin),
                    profile.inch_point(rect.xmax, rect.ymax),
                )?;
                self.window.store(*rect);
            }
            Attribute::Dash(pattern) => {
                if self.dash.is_current(pattern) {
                    return Ok(false);
                }
                device.dash(pattern)?;
                self.dash.store(pattern.clone());
            }
            Attribute::FillPattern(index) => {
                let pattern = patterns.get(*index).ok_or_else(|| {
                    PlotError::validation(format!("fill pattern {index} is not defined"))
                })?;
                let mut bits = scratch_buffer(pattern.bits.len(), "fill pattern")?;
                bits.extend_from_slice(&pattern.bits);
                let slot = i32::try_from(*index).map_err(|_| {
                    PlotError::validation(format!("fill pattern {index} out of range"))
                })? - 1;
                device.pattern_load(
                    profile.resolution_per_inch as i32,
                    pattern.xdim,
                    pattern.ydim,
                    slot,
                    &bits,
                )?;
            }
            Attribute::Font(spec) => {
                let (font, precision, overlay) = self.font.value;
                let wanted = (
                    spec.font.unwrap_or(font),
                    spec.precision.unwrap_or(precision),
                    spec.overlay.unwrap_or(overlay),
                );
                if self.font.is_current(&wanted) {
                    return Ok(false);
                }
                device.text_font(wanted.0, wanted.1, wanted.2)?;
                self.font.store(wanted);
            }
            Attribute::Justify {
                horizontal,
                vertical,
            } => {
                let wanted = (*horizontal, *vertical);
                if self.justify.is_current(&wanted) {
                    return Ok(false);
                }
                device.text_justify(wanted.0, wanted.1)?;
                self.justify.store(wanted);
            }
            Attribute::Fat(fat) => {
                if self.fat.is_current(fat) {
                    return Ok(false);
                }
                device.fat(profile.device_fat(*fat))?;
                self.fat.store(*fat);
            }
            Attribute::Overlay(mode) => {
                // Recorded only: devices have no overlay command.
                self.overlay.store(*mode);
                return Ok(false);
            }
            Attribute::BeginGroup { name, level } => {
                if *level == 0 {
                    return Ok(false);
                }
                device.begin_group(name)?;
            }
            Attribute::EndGroup { level } => {
                if *level == 0 {
                    return Ok(false);
                }
                device.end_group()?;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/attributes.rs"]
mod tests;
