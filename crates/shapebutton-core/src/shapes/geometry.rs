//! Pure geometry for button shapes: path construction, rotated hit-testing
//! and rotated extents.
//!
//! All angles are in degrees, with 0° along +x and positive angles turning
//! toward +y (screen convention, y grows downward).

use super::ShapeKind;
use kurbo::{Affine, Arc, BezPath, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Accuracy used when approximating elliptical arcs with cubic segments.
pub const ARC_TOLERANCE: f64 = 0.1;

/// Angular sweep of an arc shape, in whole degrees.
///
/// The sweep runs from `start` toward increasing angles until it reaches
/// `end`. When `end` is smaller than `start` the sweep wraps past 360°,
/// so `350..10` covers the 20° around the +x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArcRange {
    pub start: i32,
    pub end: i32,
}

impl ArcRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// End angle shifted by whole turns so that it lies above `start`.
    ///
    /// A reversed range a whole number of turns long (`360..0`) is a full turn.
    fn unwrapped_end(&self) -> f64 {
        let start = self.start as f64;
        let mut end = self.end as f64;
        if end < start {
            end += ((start - end) / 360.0).floor() * 360.0 + 360.0;
        }
        end
    }

    /// Sweep angle in degrees (never negative).
    pub fn sweep(&self) -> f64 {
        self.unwrapped_end() - self.start as f64
    }

    /// Check whether an angle (degrees, any value) falls in `[start, end)`.
    pub fn contains(&self, angle: f64) -> bool {
        let start = self.start as f64;
        let value = start + (angle - start).rem_euclid(360.0);
        value < self.unwrapped_end()
    }
}

/// Point on the ellipse with the given center and radii at `angle` (radians).
fn ellipse_point(center: Point, radii: Vec2, angle: f64) -> Point {
    Point::new(
        center.x + radii.x * angle.cos(),
        center.y + radii.y * angle.sin(),
    )
}

/// Isosceles triangle filling `size`: apex at the top middle, base along the bottom edge.
pub fn triangle_path(size: Size) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((size.width / 2.0, 0.0));
    path.line_to((size.width, size.height));
    path.line_to((0.0, size.height));
    path.close_path();
    path
}

/// Arc shape inscribed in a box of `size` anchored at the origin.
///
/// With `thickness == 0` this is a pie wedge closed through the center.
/// Otherwise it is a ring segment: the outer arc, a line to the inner
/// ellipse (inset by `thickness` on every side), the inner arc back to the
/// start angle and a line closing onto the outer arc.
pub fn arc_path(size: Size, range: ArcRange, thickness: f64) -> BezPath {
    let center = Rect::from_origin_size(Point::ZERO, size).center();
    let outer_radii = Vec2::new(size.width / 2.0, size.height / 2.0);
    let start = (range.start as f64).to_radians();
    let sweep = range.sweep().to_radians();
    let end = start + sweep;

    let outer = Arc {
        center,
        radii: outer_radii,
        start_angle: start,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };

    let mut path = BezPath::new();
    path.move_to(ellipse_point(center, outer_radii, start));
    path.extend(outer.append_iter(ARC_TOLERANCE));

    if thickness > 0.0 {
        let inner_radii = outer_radii - Vec2::new(thickness, thickness);
        let inner = Arc {
            center,
            radii: inner_radii,
            start_angle: end,
            sweep_angle: -sweep,
            x_rotation: 0.0,
        };
        path.line_to(ellipse_point(center, inner_radii, end));
        path.extend(inner.append_iter(ARC_TOLERANCE));
        path.line_to(ellipse_point(center, outer_radii, start));
    } else {
        path.line_to(center);
    }
    path.close_path();
    path
}

/// Outline path for kinds that need one; rectangles and ovals are drawn as primitives.
pub fn shape_path(
    kind: ShapeKind,
    size: Size,
    range: ArcRange,
    thickness: f64,
) -> Option<BezPath> {
    match kind {
        ShapeKind::Rectangle | ShapeKind::Oval => None,
        ShapeKind::Triangle => Some(triangle_path(size)),
        ShapeKind::Arc => Some(arc_path(size, range, thickness)),
    }
}

/// Express `point` relative to the center of `bounds` with the shape's
/// rotation undone.
pub fn to_local(bounds: Rect, rotation_deg: f64, point: Point) -> Point {
    let offset = point - bounds.center();
    Affine::rotate(-rotation_deg.to_radians()) * offset.to_point()
}

/// Strictly-inside test against an axis-aligned ellipse centered on the origin.
fn inside_ellipse(local: Point, rx: f64, ry: f64) -> bool {
    let nx = local.x / rx;
    let ny = local.y / ry;
    nx * nx + ny * ny < 1.0
}

/// Check if `point` hits a shape occupying `bounds` rotated by
/// `rotation_deg` about its own center.
///
/// Triangles are tested against their bounding box.
pub fn hit_test(
    kind: ShapeKind,
    bounds: Rect,
    rotation_deg: f64,
    range: ArcRange,
    thickness: f64,
    point: Point,
) -> bool {
    let local = to_local(bounds, rotation_deg, point);
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;

    match kind {
        ShapeKind::Rectangle | ShapeKind::Triangle => local.x.abs() <= rx && local.y.abs() <= ry,
        ShapeKind::Oval => inside_ellipse(local, rx, ry),
        ShapeKind::Arc => {
            let mut hit = inside_ellipse(local, rx, ry);
            if thickness > 0.0 {
                let nx = local.x / (rx - thickness);
                let ny = local.y / (ry - thickness);
                hit &= nx * nx + ny * ny > 1.0;
            }
            hit && range.contains(local.y.atan2(local.x).to_degrees())
        }
    }
}

/// Axis-aligned footprint of a `size` box rotated by `rotation_deg`.
pub fn rotated_footprint(size: Size, rotation_deg: f64) -> Size {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Size::new(
        cos * size.width + sin * size.height,
        sin * size.width + cos * size.height,
    )
}

/// Room needed from the container origin to hold a shape at `position`
/// with `size`, rotated about its center. Rounded to whole pixels.
pub fn needed_extent(position: Point, size: Size, rotation_deg: f64) -> Size {
    let footprint = rotated_footprint(size, rotation_deg);
    Size::new(
        (position.x + size.width / 2.0 + footprint.width / 2.0 + 0.5).trunc(),
        (position.y + size.height / 2.0 + footprint.height / 2.0 + 0.5).trunc(),
    )
}
