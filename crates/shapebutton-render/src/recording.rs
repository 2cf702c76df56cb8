//! Headless surface that records fill commands with resolved transforms.

use crate::renderer::{RenderContext, RenderError, RenderResult, Renderer};
use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use peniko::Color;
use shapebutton_core::DrawSurface;
use shapebutton_core::shapes::{EmbossFilter, ShapePaint};

/// One recorded fill, in the coordinate space given by `transform`.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        transform: Affine,
        color: Color,
        emboss: EmbossFilter,
    },
    FillOval {
        bounds: Rect,
        transform: Affine,
        color: Color,
        emboss: EmbossFilter,
    },
    FillPath {
        path: BezPath,
        transform: Affine,
        color: Color,
        emboss: EmbossFilter,
    },
}

impl DrawCommand {
    pub fn transform(&self) -> Affine {
        match self {
            DrawCommand::FillRect { transform, .. }
            | DrawCommand::FillOval { transform, .. }
            | DrawCommand::FillPath { transform, .. } => *transform,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::FillRect { color, .. }
            | DrawCommand::FillOval { color, .. }
            | DrawCommand::FillPath { color, .. } => *color,
        }
    }

    /// Short name of the primitive ("rect", "oval" or "path").
    pub fn primitive(&self) -> &'static str {
        match self {
            DrawCommand::FillRect { .. } => "rect",
            DrawCommand::FillOval { .. } => "oval",
            DrawCommand::FillPath { .. } => "path",
        }
    }

    /// Local-space bounds of the filled primitive.
    pub fn local_bounds(&self) -> Rect {
        match self {
            DrawCommand::FillRect { rect, .. } => *rect,
            DrawCommand::FillOval { bounds, .. } => *bounds,
            DrawCommand::FillPath { path, .. } => kurbo::Shape::bounding_box(path),
        }
    }
}

/// [`DrawSurface`] that keeps a list of [`DrawCommand`]s.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    transform: Affine,
    stack: Vec<Affine>,
    commands: Vec<DrawCommand>,
    unbalanced: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Drop all recorded state.
    pub fn clear(&mut self) {
        self.transform = Affine::IDENTITY;
        self.stack.clear();
        self.commands.clear();
        self.unbalanced = false;
    }

    /// Take the recorded commands, checking that every `save` was restored.
    pub fn finish(&mut self) -> RenderResult<Vec<DrawCommand>> {
        if std::mem::take(&mut self.unbalanced) {
            return Err(RenderError::UnbalancedRestore);
        }
        if !self.stack.is_empty() {
            return Err(RenderError::UnclosedSave(self.stack.len()));
        }
        Ok(std::mem::take(&mut self.commands))
    }
}

impl DrawSurface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(transform) => self.transform = transform,
            None => {
                log::warn!("restore() called with an empty transform stack");
                self.unbalanced = true;
            }
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform *= Affine::translate(offset);
    }

    fn rotate_about(&mut self, degrees: f64, center: Point) {
        if degrees != 0.0 {
            self.transform *= Affine::rotate_about(degrees.to_radians(), center);
        }
    }

    fn fill_rect(&mut self, rect: Rect, paint: &ShapePaint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            transform: self.transform,
            color: paint.color,
            emboss: paint.emboss,
        });
    }

    fn fill_oval(&mut self, bounds: Rect, paint: &ShapePaint) {
        self.commands.push(DrawCommand::FillOval {
            bounds,
            transform: self.transform,
            color: paint.color,
            emboss: paint.emboss,
        });
    }

    fn fill_path(&mut self, path: &BezPath, paint: &ShapePaint) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            transform: self.transform,
            color: paint.color,
            emboss: paint.emboss,
        });
    }
}

impl Renderer for RecordingSurface {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.clear();
        if ctx.scale_factor != 1.0 {
            self.transform = Affine::scale(ctx.scale_factor);
        }
        ctx.shapes.draw(self);
    }
}
