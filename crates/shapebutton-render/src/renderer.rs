//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use shapebutton_core::ShapeCollection;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("restore() without matching save()")]
    UnbalancedRestore,
    #[error("{0} save() call(s) never restored")]
    UnclosedSave(usize),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The button's shapes.
    pub shapes: &'a ShapeCollection,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color; `None` leaves the target transparent.
    pub background_color: Option<Color>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(shapes: &'a ShapeCollection, viewport_size: Size) -> Self {
        Self {
            shapes,
            viewport_size,
            scale_factor: 1.0,
            background_color: None,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the command buffer for a frame.
    ///
    /// Called once per frame; any previously built frame is discarded.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Option<Color> {
        ctx.background_color
    }
}
