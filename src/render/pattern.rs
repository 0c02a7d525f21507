use crate::foundation::error::{PlotError, PlotResult};

/// A fill pattern bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillPattern {
    /// Bitmap width as loaded.
    pub xdim: usize,
    /// Bitmap height as loaded.
    pub ydim: usize,
    /// Width as originally defined, before any device scaling.
    pub xdim_orig: usize,
    /// Height as originally defined.
    pub ydim_orig: usize,
    /// `xdim * ydim` color indices, row-major.
    pub bits: Vec<i32>,
}

impl FillPattern {
    /// Pattern whose loaded and original dimensions agree.
    pub fn new(xdim: usize, ydim: usize, bits: Vec<i32>) -> PlotResult<Self> {
        if bits.len() != xdim * ydim {
            return Err(PlotError::validation(format!(
                "pattern bitmap has {} entries, expected {xdim}x{ydim}",
                bits.len()
            )));
        }
        Ok(Self {
            xdim,
            ydim,
            xdim_orig: xdim,
            ydim_orig: ydim,
            bits,
        })
    }
}

/// Read-only table of fill patterns, indexed by pattern number.
#[derive(Clone, Debug, Default)]
pub struct PatternTable {
    patterns: Vec<Option<FillPattern>>,
}

impl PatternTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, index: usize, pattern: FillPattern) -> Self {
        if self.patterns.len() <= index {
            self.patterns.resize(index + 1, None);
        }
        self.patterns[index] = Some(pattern);
        self
    }

    /// Pattern at `index`, if defined.
    pub fn get(&self, index: usize) -> Option<&FillPattern> {
        self.patterns.get(index).and_then(Option::as_ref)
    }

    /// Original dimensions of pattern `index`, `(0, 0)` when undefined.
    pub fn original_dims(&self, index: usize) -> (usize, usize) {
        self.get(index)
            .map(|p| (p.xdim_orig, p.ydim_orig))
            .unwrap_or((0, 0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pattern.rs"]
mod tests;
