//! A single clickable shape on the button surface.

use super::geometry::{self, ArcRange};
use super::{SerializableColor, ShapeId, ShapeKind};
use crate::surface::DrawSurface;
use kurbo::{BezPath, Point, Rect, Size, Vec2};
use peniko::Color;
use std::cell::OnceCell;
use std::cmp::Ordering;
use uuid::Uuid;

/// Alpha applied to the base color of a disabled shape.
pub const DISABLED_ALPHA: u8 = 128;

/// Simulated emboss lighting attached to every shape fill.
///
/// The parameters are fixed when the element is created; surfaces that
/// cannot render the effect are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbossFilter {
    /// Direction of the light source (x, y, z).
    pub direction: [f64; 3],
    /// Ambient light level (0..1).
    pub ambient: f64,
    /// Specular highlight coefficient.
    pub specular: f64,
    /// Blur applied before lighting, in pixels.
    pub blur_radius: f64,
}

impl EmbossFilter {
    /// Emboss filter with a blur of one density-independent pixel.
    pub fn for_density(density: f64) -> Self {
        Self {
            blur_radius: density,
            ..Self::default()
        }
    }
}

impl Default for EmbossFilter {
    fn default() -> Self {
        Self {
            direction: [1.0, 1.0, 1.0],
            ambient: 0.8,
            specular: 3.0,
            blur_radius: 1.0,
        }
    }
}

/// Fill paint handed to a [`DrawSurface`].
#[derive(Debug, Clone, Copy)]
pub struct ShapePaint {
    pub color: Color,
    pub emboss: EmbossFilter,
}

/// One shape: geometry, colors and interaction state.
#[derive(Debug, Clone)]
pub struct ShapeElement {
    id: ShapeId,
    kind: ShapeKind,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    z_order: i32,
    rotation: i32,
    range: ArcRange,
    thickness: u32,
    base: SerializableColor,
    accent: SerializableColor,
    enabled: bool,
    pressed: bool,
    identifier: Option<String>,
    emboss: EmbossFilter,
    /// Outline for path-drawn kinds, rebuilt after size/range/thickness changes.
    path: OnceCell<BezPath>,
}

impl ShapeElement {
    /// Create an empty (zero-sized) shape of the given kind with default colors.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            z_order: 0,
            rotation: 0,
            range: ArcRange::default(),
            thickness: 0,
            base: SerializableColor::default_base(),
            accent: SerializableColor::default_accent(),
            enabled: true,
            pressed: false,
            identifier: None,
            emboss: EmbossFilter::default(),
            path: OnceCell::new(),
        }
    }

    /// Replace the emboss parameters (normally done once, right after creation).
    pub fn with_emboss(mut self, emboss: EmbossFilter) -> Self {
        self.emboss = emboss;
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Bounds in container coordinates, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.size())
    }

    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    /// Rotation about the shape's center, in degrees.
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn range(&self) -> ArcRange {
        self.range
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn base_color(&self) -> SerializableColor {
        self.base
    }

    pub fn accent_color(&self) -> SerializableColor {
        self.accent
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn emboss(&self) -> EmbossFilter {
        self.emboss
    }

    pub fn set_identifier(&mut self, identifier: Option<String>) {
        self.identifier = identifier;
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Set position and z-order together (markup's `z` doubles as the z-order).
    pub fn set_position_z(&mut self, x: i32, y: i32, z: i32) {
        self.set_position(x, y);
        self.z_order = z;
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.path.take();
    }

    pub fn set_z_order(&mut self, z_order: i32) {
        self.z_order = z_order;
    }

    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation = degrees;
    }

    /// Set the arc sweep; ignored by non-arc kinds.
    pub fn set_range(&mut self, start: i32, end: i32) {
        self.range = ArcRange::new(start, end);
        self.path.take();
    }

    /// Ring thickness for arcs; 0 draws a filled wedge.
    ///
    /// Expected to stay below half the smaller side; not validated.
    pub fn set_thickness(&mut self, thickness: u32) {
        self.thickness = thickness;
        self.path.take();
    }

    pub fn set_base_color(&mut self, color: SerializableColor) {
        self.base = color;
    }

    pub fn set_accent_color(&mut self, color: SerializableColor) {
        self.accent = color;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Color the shape is currently painted with.
    pub fn fill_color(&self) -> Color {
        if !self.enabled {
            self.base.with_alpha(DISABLED_ALPHA).into()
        } else if self.pressed {
            self.accent.into()
        } else {
            self.base.into()
        }
    }

    /// Outline in shape-local coordinates, for path-drawn kinds.
    pub fn path(&self) -> Option<&BezPath> {
        if !self.kind.uses_path() {
            return None;
        }
        Some(self.path.get_or_init(|| {
            geometry::shape_path(self.kind, self.size(), self.range, self.thickness as f64)
                .unwrap_or_default()
        }))
    }

    /// Paint the shape at its position, rotated about its own center.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let paint = ShapePaint {
            color: self.fill_color(),
            emboss: self.emboss,
        };
        let local = Rect::from_origin_size(Point::ZERO, self.size());

        surface.save();
        surface.translate(Vec2::new(self.x as f64, self.y as f64));
        surface.rotate_about(self.rotation as f64, local.center());
        match self.kind {
            ShapeKind::Rectangle => surface.fill_rect(local, &paint),
            ShapeKind::Oval => surface.fill_oval(local, &paint),
            ShapeKind::Triangle | ShapeKind::Arc => {
                if let Some(path) = self.path() {
                    surface.fill_path(path, &paint);
                }
            }
        }
        surface.restore();
    }

    /// Axis-aligned size of the shape at its current rotation.
    pub fn measure_extent(&self) -> Size {
        geometry::rotated_footprint(self.size(), self.rotation as f64)
    }

    /// Room needed from the container origin to fully show this shape.
    pub fn needed_extent(&self) -> Size {
        geometry::needed_extent(self.position(), self.size(), self.rotation as f64)
    }

    /// Check if a point in container coordinates touches this shape.
    ///
    /// Disabled shapes never accept touches.
    pub fn hit_test(&self, point: Point) -> bool {
        if !self.enabled {
            return false;
        }
        geometry::hit_test(
            self.kind,
            self.bounds(),
            self.rotation as f64,
            self.range,
            self.thickness as f64,
            point,
        )
    }

    /// Paint/touch priority ordering (by z-order only).
    pub fn cmp_z(&self, other: &Self) -> Ordering {
        self.z_order.cmp(&other.z_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls(Vec<String>);

    impl DrawSurface for Calls {
        fn save(&mut self) {
            self.0.push("save".into());
        }
        fn restore(&mut self) {
            self.0.push("restore".into());
        }
        fn translate(&mut self, offset: Vec2) {
            self.0.push(format!("translate {} {}", offset.x, offset.y));
        }
        fn rotate_about(&mut self, degrees: f64, center: Point) {
            self.0.push(format!("rotate {} {} {}", degrees, center.x, center.y));
        }
        fn fill_rect(&mut self, rect: Rect, _paint: &ShapePaint) {
            self.0.push(format!("rect {}x{}", rect.width(), rect.height()));
        }
        fn fill_oval(&mut self, bounds: Rect, _paint: &ShapePaint) {
            self.0.push(format!("oval {}x{}", bounds.width(), bounds.height()));
        }
        fn fill_path(&mut self, _path: &BezPath, _paint: &ShapePaint) {
            self.0.push("path".into());
        }
    }

    fn rect(x: i32, y: i32, width: u32, height: u32) -> ShapeElement {
        let mut shape = ShapeElement::new(ShapeKind::Rectangle);
        shape.set_position(x, y);
        shape.set_size(width, height);
        shape
    }

    #[test]
    fn test_defaults() {
        let shape = ShapeElement::new(ShapeKind::Oval);
        assert!(shape.is_enabled());
        assert!(!shape.is_pressed());
        assert_eq!(shape.identifier(), None);
        assert_eq!(shape.base_color(), SerializableColor::new(214, 214, 214, 255));
        assert_eq!(shape.accent_color(), SerializableColor::new(51, 173, 214, 255));
    }

    #[test]
    fn test_fill_color_states() {
        let mut shape = rect(0, 0, 10, 10);
        shape.set_base_color(SerializableColor::new(10, 20, 30, 255));
        shape.set_accent_color(SerializableColor::new(200, 0, 0, 255));
        assert_eq!(
            SerializableColor::from(shape.fill_color()),
            SerializableColor::new(10, 20, 30, 255)
        );

        shape.set_pressed(true);
        assert_eq!(
            SerializableColor::from(shape.fill_color()),
            SerializableColor::new(200, 0, 0, 255)
        );

        // Disabled wins over pressed
        shape.set_enabled(false);
        assert_eq!(
            SerializableColor::from(shape.fill_color()),
            SerializableColor::new(10, 20, 30, 128)
        );
    }

    #[test]
    fn test_disabled_never_hits() {
        let mut shape = rect(0, 0, 100, 100);
        assert!(shape.hit_test(Point::new(50.0, 50.0)));
        shape.set_enabled(false);
        for (x, y) in [(50.0, 50.0), (0.0, 0.0), (99.0, 1.0), (-10.0, 500.0)] {
            assert!(!shape.hit_test(Point::new(x, y)));
        }
    }

    #[test]
    fn test_hit_uses_position() {
        let shape = rect(100, 50, 20, 20);
        assert!(shape.hit_test(Point::new(110.0, 60.0)));
        assert!(!shape.hit_test(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_measure_extent() {
        let mut shape = rect(0, 0, 100, 40);
        assert_eq!(shape.measure_extent(), Size::new(100.0, 40.0));
        shape.set_rotation(90);
        let extent = shape.measure_extent();
        assert!((extent.width - 40.0).abs() < 1e-9);
        assert!((extent.height - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_needed_extent_includes_position() {
        let shape = rect(20, 30, 100, 40);
        assert_eq!(shape.needed_extent(), Size::new(120.0, 70.0));
    }

    #[test]
    fn test_path_only_for_path_kinds() {
        let mut arc = ShapeElement::new(ShapeKind::Arc);
        arc.set_size(100, 100);
        arc.set_range(0, 90);
        assert!(arc.path().is_some());
        assert!(rect(0, 0, 10, 10).path().is_none());
    }

    #[test]
    fn test_path_rebuilt_after_resize() {
        let mut triangle = ShapeElement::new(ShapeKind::Triangle);
        triangle.set_size(10, 10);
        let before = triangle.path().cloned();
        triangle.set_size(40, 20);
        let after = triangle.path().cloned();
        assert_ne!(before, after);
        assert_eq!(after, Some(geometry::triangle_path(Size::new(40.0, 20.0))));
    }

    #[test]
    fn test_draw_sequence() {
        let mut shape = ShapeElement::new(ShapeKind::Oval);
        shape.set_position(5, 7);
        shape.set_size(20, 10);
        shape.set_rotation(30);

        let mut calls = Calls::default();
        shape.draw(&mut calls);
        assert_eq!(
            calls.0,
            vec!["save", "translate 5 7", "rotate 30 10 5", "oval 20x10", "restore"]
        );
    }

    #[test]
    fn test_draw_path_kinds() {
        let mut shape = ShapeElement::new(ShapeKind::Triangle);
        shape.set_size(20, 10);
        let mut calls = Calls::default();
        shape.draw(&mut calls);
        assert!(calls.0.contains(&"path".to_string()));
    }

    #[test]
    fn test_emboss_for_density() {
        let shape =
            ShapeElement::new(ShapeKind::Rectangle).with_emboss(EmbossFilter::for_density(2.0));
        assert!((shape.emboss().blur_radius - 2.0).abs() < f64::EPSILON);
        assert!((shape.emboss().ambient - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cmp_z() {
        let mut low = rect(0, 0, 1, 1);
        let mut high = rect(0, 0, 1, 1);
        low.set_z_order(1);
        high.set_z_order(5);
        assert_eq!(low.cmp_z(&high), Ordering::Less);
        assert_eq!(high.cmp_z(&low), Ordering::Greater);
    }
}
