//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, BezPath, Ellipse, Point, Rect, Vec2};
use peniko::Fill;
use shapebutton_core::DrawSurface;
use shapebutton_core::shapes::ShapePaint;
use vello::Scene;

/// Vello-based renderer for GPU-accelerated drawing of a button.
///
/// Fills are solid; emboss parameters are not rendered by this backend.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    transform: Affine,
    stack: Vec<Affine>,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            transform: Affine::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl DrawSurface for VelloRenderer {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(transform) => self.transform = transform,
            None => log::warn!("restore() called with an empty transform stack"),
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform *= Affine::translate(offset);
    }

    fn rotate_about(&mut self, degrees: f64, center: Point) {
        self.transform *= Affine::rotate_about(degrees.to_radians(), center);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &ShapePaint) {
        self.scene
            .fill(Fill::NonZero, self.transform, paint.color, None, &rect);
    }

    fn fill_oval(&mut self, bounds: Rect, paint: &ShapePaint) {
        let ellipse = Ellipse::from_rect(bounds);
        self.scene
            .fill(Fill::NonZero, self.transform, paint.color, None, &ellipse);
    }

    fn fill_path(&mut self, path: &BezPath, paint: &ShapePaint) {
        self.scene
            .fill(Fill::NonZero, self.transform, paint.color, None, path);
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.stack.clear();
        self.transform = Affine::scale(ctx.scale_factor);

        if let Some(background) = ctx.background_color {
            let viewport = Rect::from_origin_size(Point::ZERO, ctx.viewport_size);
            self.scene
                .fill(Fill::NonZero, Affine::IDENTITY, background, None, &viewport);
        }

        ctx.shapes.draw(self);
    }
}
