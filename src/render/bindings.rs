//! The two device binding sets.
//!
//! A [`BindingSet`] names the implementation each primitive dispatches to. The pipeline swaps
//! the whole set between passes; individual entries are never changed.

/// Vector primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorBinding {
    /// Clip to the current window and grow the bounding box.
    LogExtent,
    /// Move/draw through the pen-travel optimizer.
    Optimize,
}

/// Attribute primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeBinding {
    /// Drop the change.
    Ignore,
    /// Send through the attribute cache.
    Cache,
}

/// Erase primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EraseBinding {
    /// Count frames only.
    CountFrames,
    /// Full frame manager.
    Frames,
}

/// Message primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageBinding {
    /// Log text, never reach the device.
    Log,
    /// Buffer user messages for the device.
    Device,
}

/// Marker, text and raster primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeBinding {
    /// Log the occupied area into the bounding box.
    LogExtent,
    /// Send to the device.
    Device,
}

/// Area primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AreaBinding {
    /// Log the closed outline.
    LogOutline,
    /// Accumulate and fill through the polygon path.
    Polygon,
}

/// Reset primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetBinding {
    /// Do nothing.
    Ignore,
    /// Reinitialize the device.
    Device,
}

/// Implementation chosen for every primitive.
#[derive(Debug, PartialEq, Eq)]
pub struct BindingSet {
    /// Name used in logs.
    pub name: &'static str,
    /// Vectors.
    pub vector: VectorBinding,
    /// Attribute changes.
    pub attributes: AttributeBinding,
    /// Erases.
    pub erase: EraseBinding,
    /// Messages.
    pub message: MessageBinding,
    /// Markers.
    pub marker: ShapeBinding,
    /// Text.
    pub text: ShapeBinding,
    /// Rasters.
    pub raster: ShapeBinding,
    /// Areas.
    pub area: AreaBinding,
    /// Resets.
    pub reset: ResetBinding,
}

/// Statistics-only dry run: no device output.
pub static DIAGNOSTIC: BindingSet = BindingSet {
    name: "diagnostic",
    vector: VectorBinding::LogExtent,
    attributes: AttributeBinding::Ignore,
    erase: EraseBinding::CountFrames,
    message: MessageBinding::Log,
    marker: ShapeBinding::LogExtent,
    text: ShapeBinding::LogExtent,
    raster: ShapeBinding::LogExtent,
    area: AreaBinding::LogOutline,
    reset: ResetBinding::Ignore,
};

/// Real output.
pub static LIVE: BindingSet = BindingSet {
    name: "live",
    vector: VectorBinding::Optimize,
    attributes: AttributeBinding::Cache,
    erase: EraseBinding::Frames,
    message: MessageBinding::Device,
    marker: ShapeBinding::Device,
    text: ShapeBinding::Device,
    raster: ShapeBinding::Device,
    area: AreaBinding::Polygon,
    reset: ResetBinding::Device,
};

impl BindingSet {
    /// `true` for the dry-run set.
    pub fn is_diagnostic(&self) -> bool {
        *self == DIAGNOSTIC
    }
}
