//! ShapeButton Render Library
//!
//! Drawing surfaces for ShapeButton: a headless recorder used for tests and
//! command-line output, and an optional Vello scene builder.

mod recording;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{RenderContext, RenderError, RenderResult, Renderer};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
