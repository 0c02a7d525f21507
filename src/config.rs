//! Configuration consumed by the plotting core.
//!
//! Parsing of command lines lives elsewhere; this module only holds the resolved values and the
//! quantities derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::DeviceProfile;
use crate::foundation::core::{DeviceRect, round_to_i32};
use crate::foundation::error::{PlotError, PlotResult};
use crate::render::frame::GridLayout;

/// How the diagnostic pass reports extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatMode {
    /// No statistics.
    #[default]
    Off,
    /// One tight line per file.
    Full,
    /// Whitespace-separated columns, for post-processing.
    Compact,
}

impl StatMode {
    /// Parse the classic one-letter codes: `y`/`1` for full, `l` for compact.
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('y' | 'Y' | '1') => Self::Full,
            Some('l' | 'L') => Self::Compact,
            _ => Self::Off,
        }
    }

    /// `true` unless statistics are off.
    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

/// Horizontal alignment of the aggregate extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    /// Left edge to zero.
    Left,
    /// Right edge to zero.
    Right,
    /// Midpoint to zero.
    Center,
    /// Leave alone.
    Unconstrained,
    /// Unrecognized code; warned about and ignored.
    Unknown(char),
}

/// Vertical alignment of the aggregate extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    /// Bottom edge to zero.
    Bottom,
    /// Top edge to zero.
    Top,
    /// Midpoint to zero.
    Center,
    /// Leave alone.
    Unconstrained,
    /// Unrecognized code; warned about and ignored.
    Unknown(char),
}

/// Two-character alignment code such as `"lb"` or `"cc"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlignSpec {
    pub horizontal: HAlign,
    pub vertical: VAlign,
}

impl Default for AlignSpec {
    fn default() -> Self {
        Self {
            horizontal: HAlign::Unconstrained,
            vertical: VAlign::Unconstrained,
        }
    }
}

impl AlignSpec {
    /// Parse a code of exactly two characters. Unknown letters are kept, not rejected.
    pub fn parse(code: &str) -> PlotResult<Self> {
        let mut chars = code.chars();
        let (Some(h), Some(v), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PlotError::config(format!(
                "alignment code must be two characters, got {code:?}"
            )));
        };
        let horizontal = match h {
            'l' => HAlign::Left,
            'r' => HAlign::Right,
            'c' => HAlign::Center,
            'u' => HAlign::Unconstrained,
            other => HAlign::Unknown(other),
        };
        let vertical = match v {
            'b' => VAlign::Bottom,
            't' => VAlign::Top,
            'c' => VAlign::Center,
            'u' => VAlign::Unconstrained,
            other => VAlign::Unknown(other),
        };
        Ok(Self {
            horizontal,
            vertical,
        })
    }

    /// `true` for `"uu"`.
    pub fn is_unconstrained(&self) -> bool {
        self.horizontal == HAlign::Unconstrained && self.vertical == VAlign::Unconstrained
    }
}

impl fmt::Display for AlignSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = match self.horizontal {
            HAlign::Left => 'l',
            HAlign::Right => 'r',
            HAlign::Center => 'c',
            HAlign::Unconstrained => 'u',
            HAlign::Unknown(c) => c,
        };
        let v = match self.vertical {
            VAlign::Bottom => 'b',
            VAlign::Top => 't',
            VAlign::Center => 'c',
            VAlign::Unconstrained => 'u',
            VAlign::Unknown(c) => c,
        };
        write!(f, "{h}{v}")
    }
}

impl TryFrom<String> for AlignSpec {
    type Error = PlotError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AlignSpec> for String {
    fn from(a: AlignSpec) -> Self {
        a.to_string()
    }
}

/// Multi-frame page layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: u32,
    /// Rows per page; defaults to `columns`.
    #[serde(default)]
    pub rows: Option<u32>,
    /// Cell width and height in inches; defaults to an even split of the standard screen.
    #[serde(default)]
    pub cell_size: Option<[f64; 2]>,
}

/// Text state installed by a device reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub font: i32,
    pub precision: i32,
    pub overlay: i32,
    pub horizontal: i32,
    pub vertical: i32,
}

impl Default for TextDefaults {
    fn default() -> Self {
        // Hardcopy font and stroke precision; the first pass hard-wires the font.
        Self {
            font: 3,
            precision: 2,
            overlay: 0,
            horizontal: 0,
            vertical: 0,
        }
    }
}

/// Resolved configuration for one plotting job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenConfig {
    /// Statistics reporting.
    pub stat: StatMode,
    /// Alignment of the aggregate extent.
    pub align: AlignSpec,
    /// Target width in inches, 0 = unconstrained.
    pub xsize: f64,
    /// Target height in inches, 0 = unconstrained.
    pub ysize: f64,
    /// Grid layout, if any.
    pub grid: Option<GridConfig>,
    /// Border fatness for grid cells; negative disables the border.
    pub frame_border: i32,
    /// Reduced-capability device: only color changes are honored.
    pub dumb: bool,
    /// Raster bit depth; 0 sends byte rasters.
    pub bit: i32,
    /// Unbounded screen; defaults to `true` without a grid.
    pub big: Option<bool>,
    /// Reapply absolute positioning after erases; defaults to `true` without a grid.
    pub absolute_style: Option<bool>,
    /// Erase the page on reset.
    pub force_initial_erase: bool,
    /// Text state installed by reset.
    pub text: TextDefaults,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            stat: StatMode::Off,
            align: AlignSpec::default(),
            xsize: 0.0,
            ysize: 0.0,
            grid: None,
            frame_border: -1,
            dumb: false,
            bit: 0,
            big: None,
            absolute_style: None,
            force_initial_erase: false,
            text: TextDefaults::default(),
        }
    }
}

impl PenConfig {
    /// Reject values the core cannot honor.
    pub fn validate(&self) -> PlotResult<()> {
        if self.xsize < 0.0 || self.ysize < 0.0 {
            return Err(PlotError::config("xsize and ysize must be >= 0"));
        }
        if self.bit < 0 {
            return Err(PlotError::config("bit depth must be >= 0"));
        }
        if let Some(grid) = &self.grid {
            if grid.columns == 0 {
                return Err(PlotError::config("grid needs at least one column"));
            }
            if grid.rows == Some(0) {
                return Err(PlotError::config("grid needs at least one row"));
            }
            if let Some([w, h]) = grid.cell_size
                && (w <= 0.0 || h <= 0.0)
            {
                return Err(PlotError::config("grid cell size must be positive"));
            }
        }
        Ok(())
    }

    /// Unbounded screen in effect.
    pub fn is_big(&self) -> bool {
        self.big.unwrap_or(self.grid.is_none())
    }

    /// Absolute positioning is reapplied after erases and resets.
    pub fn uses_absolute_style(&self) -> bool {
        self.absolute_style.unwrap_or(self.grid.is_none())
    }

    /// A target size was requested.
    pub fn wants_fit(&self) -> bool {
        self.xsize != 0.0 || self.ysize != 0.0
    }

    /// Statistics, alignment or fitting need a dry run first.
    pub fn wants_diagnostic_pass(&self) -> bool {
        self.stat.is_enabled() || !self.align.is_unconstrained() || self.wants_fit()
    }

    /// Device hard limits for this job.
    pub fn limits(&self, profile: &DeviceProfile) -> DeviceRect {
        if self.is_big() {
            profile.big_limits()
        } else {
            profile.standard_limits()
        }
    }

    /// Grid layout in device units, if a grid is configured.
    pub fn grid_layout(&self, profile: &DeviceProfile) -> Option<GridLayout> {
        let grid = self.grid.as_ref()?;
        let columns = grid.columns;
        let rows = grid.rows.unwrap_or(columns);
        let height = profile.standard_height_inches;
        let [w, h] = grid.cell_size.unwrap_or([
            height / profile.screen_ratio / f64::from(columns),
            height / f64::from(rows),
        ]);
        Some(GridLayout {
            columns,
            rows,
            cell_width: round_to_i32(w * profile.resolution_per_inch),
            cell_height: round_to_i32(h * profile.resolution_per_inch),
            top: profile.standard_top(),
            border_fat: (self.frame_border >= 0).then_some(self.frame_border),
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
