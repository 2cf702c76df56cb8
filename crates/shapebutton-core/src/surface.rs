//! Drawing surface abstraction consumed by shape drawing.

use crate::shapes::ShapePaint;
use kurbo::{BezPath, Point, Rect, Vec2};

/// A 2D canvas with a current transform.
///
/// Transform calls pre-concatenate onto the current transform, so later
/// calls apply in the shape's local space. `save`/`restore` push and pop
/// the transform.
pub trait DrawSurface {
    /// Push the current transform.
    fn save(&mut self);

    /// Pop the transform pushed by the matching `save`.
    fn restore(&mut self);

    /// Move the origin by `offset`.
    fn translate(&mut self, offset: Vec2);

    /// Rotate by `degrees` (positive toward +y) about `center`.
    fn rotate_about(&mut self, degrees: f64, center: Point);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, paint: &ShapePaint);

    /// Fill the ellipse inscribed in `bounds`.
    fn fill_oval(&mut self, bounds: Rect, paint: &ShapePaint);

    /// Fill a closed path with the non-zero winding rule.
    fn fill_path(&mut self, path: &BezPath, paint: &ShapePaint);
}
