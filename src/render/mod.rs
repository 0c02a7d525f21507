//! Plotting core: state caches, primitives and the two-pass pipeline.

pub mod attributes;
pub mod bindings;
pub mod frame;
pub mod message;
pub mod pattern;
pub mod pipeline;
pub mod plotter;
pub mod polygon;
pub mod state;
pub mod vector;
