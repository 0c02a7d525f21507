/// Crate-wide result alias.
pub type PlotResult<T> = Result<T, PlotError>;

/// Errors raised by the plotting core.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    /// Malformed input: command sequencing or argument shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration that cannot be honored.
    #[error("configuration error: {0}")]
    Config(String),

    /// A bounded sequence (dash table, color table, polygon buffer) would overflow.
    #[error("capacity exceeded: {0}")]
    Capacity(String),

    /// Scratch buffer reservation failed.
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// A frame event arrived out of order. Unrecoverable for the current job.
    #[error("frame order error: {0}")]
    FrameOrder(String),

    /// Statistics or device-log output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlotError {
    /// Build a [`PlotError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlotError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PlotError::Capacity`].
    pub fn capacity(msg: impl Into<String>) -> Self {
        Self::Capacity(msg.into())
    }

    /// Build a [`PlotError::Allocation`].
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`PlotError::FrameOrder`].
    pub fn frame_order(msg: impl Into<String>) -> Self {
        Self::FrameOrder(msg.into())
    }

    /// `true` for errors that must abort the whole job rather than a single stream.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FrameOrder(_) | Self::Allocation(_))
    }
}

/// Reserve `len` slots in a fresh vector, reporting failure instead of aborting.
pub(crate) fn scratch_buffer<T>(len: usize, what: &str) -> PlotResult<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| PlotError::allocation(format!("{what} ({len} entries): {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
