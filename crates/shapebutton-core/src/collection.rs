//! The button's shape list: z-ordering, measurement, drawing and touch dispatch.

use crate::config::{ConfigResult, DisplayMetrics, Insets, load_shapes_xml};
use crate::input::PointerEvent;
use crate::shapes::{ShapeElement, ShapeId};
use crate::surface::DrawSurface;
use kurbo::{Point, Size, Vec2};
use std::fmt;

/// Layout constraint for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeasureSpec {
    /// The container must be exactly this size.
    Exactly(f64),
    /// The container may be at most this size.
    AtMost(f64),
    /// No constraint.
    #[default]
    Unspecified,
}

impl MeasureSpec {
    /// Apply this constraint to the size the content asks for.
    pub fn resolve(self, needed: f64) -> f64 {
        match self {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(size) => needed.min(size),
            MeasureSpec::Unspecified => needed,
        }
    }
}

/// Callback receiving the identifier of a clicked shape.
pub type ClickListener = Box<dyn FnMut(&str)>;

/// Ordered shapes of one button surface plus its touch state.
///
/// Shapes are kept sorted by ascending z-order (stable, so equal z-orders
/// keep insertion order). Drawing goes front to back through the list;
/// touches are tested from the back (topmost) first.
pub struct ShapeCollection {
    shapes: Vec<ShapeElement>,
    /// Index of the pressed shape, if any.
    selected: Option<usize>,
    padding: Insets,
    on_click: Option<ClickListener>,
    redraw_requested: bool,
}

impl Default for ShapeCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShapeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeCollection")
            .field("shapes", &self.shapes)
            .field("selected", &self.selected)
            .field("padding", &self.padding)
            .field("has_listener", &self.on_click.is_some())
            .field("redraw_requested", &self.redraw_requested)
            .finish()
    }
}

impl ShapeCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            selected: None,
            padding: Insets::default(),
            on_click: None,
            redraw_requested: false,
        }
    }

    /// Set the padding (builder style).
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
        self.request_redraw();
    }

    /// Register the click callback, replacing any previous one.
    pub fn set_on_click(&mut self, listener: impl FnMut(&str) + 'static) {
        self.on_click = Some(Box::new(listener));
    }

    /// Add a shape, keeping the list sorted by z-order.
    pub fn add_shape(&mut self, shape: ShapeElement) {
        let selected_id = self.selected_shape();
        self.shapes.push(shape);
        self.shapes.sort_by(|a, b| a.cmp_z(b));
        if let Some(id) = selected_id {
            self.selected = self.shapes.iter().position(|s| s.id() == id);
        }
        self.request_redraw();
    }

    /// Add several shapes in order.
    pub fn add_shapes(&mut self, shapes: impl IntoIterator<Item = ShapeElement>) {
        for shape in shapes {
            self.add_shape(shape);
        }
    }

    /// Parse shape markup and add every shape it describes.
    ///
    /// Nothing is added if the markup fails to load. Returns the number of
    /// shapes added.
    pub fn add_shapes_from_xml(
        &mut self,
        xml: &str,
        metrics: &DisplayMetrics,
    ) -> ConfigResult<usize> {
        let shapes = load_shapes_xml(xml, metrics)?;
        let count = shapes.len();
        log::debug!("Loaded {} shapes from markup", count);
        self.add_shapes(shapes);
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in paint order (ascending z-order).
    pub fn iter(&self) -> impl Iterator<Item = &ShapeElement> {
        self.shapes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ShapeElement> {
        self.shapes.get(index)
    }

    /// Index of the currently pressed shape.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Identity of the currently pressed shape.
    pub fn selected_shape(&self) -> Option<ShapeId> {
        self.selected.and_then(|i| self.shapes.get(i)).map(|s| s.id())
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Whether a redraw has been requested since the last
    /// [`take_redraw_request`](Self::take_redraw_request).
    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Consume the pending redraw request. Many changes in one tick collapse into one.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Desired container size under the given constraints.
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let content = self.shapes.iter().fold(Size::ZERO, |acc, shape| {
            let needed = shape.needed_extent();
            Size::new(acc.width.max(needed.width), acc.height.max(needed.height))
        });
        Size::new(
            width.resolve(content.width + self.padding.horizontal()),
            height.resolve(content.height + self.padding.vertical()),
        )
    }

    /// Draw every shape, lowest z-order first.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.save();
        surface.translate(Vec2::new(self.padding.left, self.padding.top));
        for shape in &self.shapes {
            shape.draw(surface);
        }
        surface.restore();
    }

    /// Convert a widget-space point into shape (content) space.
    fn content_point(&self, position: Point) -> Point {
        position - Vec2::new(self.padding.left, self.padding.top)
    }

    /// Index of the topmost shape under `point`.
    fn topmost_hit(&self, point: Point) -> Option<usize> {
        self.shapes.iter().rposition(|shape| shape.hit_test(point))
    }

    /// Feed one pointer event through the press/drag/release cycle.
    ///
    /// Returns whether a shape is pressed after the event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        let point = self.content_point(event.position());

        match event {
            PointerEvent::Down { .. } => {
                if let Some(previous) = self.selected.take() {
                    self.shapes[previous].set_pressed(false);
                    self.request_redraw();
                }
                if let Some(index) = self.topmost_hit(point) {
                    log::debug!("Press on shape {} ({:?})", index, self.shapes[index].identifier());
                    self.shapes[index].set_pressed(true);
                    self.selected = Some(index);
                    self.request_redraw();
                }
            }
            PointerEvent::Move { .. } => {
                if let Some(index) = self.selected {
                    if !self.shapes[index].hit_test(point) {
                        log::debug!("Press on shape {} cancelled by drag-out", index);
                        self.shapes[index].set_pressed(false);
                        self.selected = None;
                        self.request_redraw();
                    }
                }
            }
            PointerEvent::Up { .. } => {
                if let Some(index) = self.selected.take() {
                    let shape = &self.shapes[index];
                    if shape.hit_test(point) {
                        if let (Some(listener), Some(identifier)) =
                            (self.on_click.as_mut(), shape.identifier())
                        {
                            log::debug!("Click on shape '{}'", identifier);
                            listener(identifier);
                        }
                    }
                    self.shapes[index].set_pressed(false);
                    self.request_redraw();
                }
            }
        }

        self.selected.is_some()
    }

    /// Enable or disable every shape carrying `identifier`.
    pub fn set_shape_enabled(&mut self, identifier: &str, enabled: bool) {
        let mut changed = false;
        for shape in self
            .shapes
            .iter_mut()
            .filter(|s| s.identifier() == Some(identifier))
        {
            shape.set_enabled(enabled);
            changed = true;
        }
        if changed {
            self.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeKind, ShapePaint};
    use kurbo::{BezPath, Rect};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn shape(kind: ShapeKind, id: &str, z: i32, x: i32, y: i32, w: u32, h: u32) -> ShapeElement {
        let mut shape = ShapeElement::new(kind);
        shape.set_identifier(Some(id.to_string()));
        shape.set_position_z(x, y, z);
        shape.set_size(w, h);
        shape
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down { position: Point::new(x, y) }
    }

    fn moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move { position: Point::new(x, y) }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up { position: Point::new(x, y) }
    }

    /// Collection with a click log.
    fn recording() -> (ShapeCollection, Rc<RefCell<Vec<String>>>) {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let mut collection = ShapeCollection::new();
        let sink = clicks.clone();
        collection.set_on_click(move |id| sink.borrow_mut().push(id.to_string()));
        (collection, clicks)
    }

    #[derive(Default)]
    struct Origins(Vec<Vec2>);

    impl DrawSurface for Origins {
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn translate(&mut self, offset: Vec2) {
            self.0.push(offset);
        }
        fn rotate_about(&mut self, _degrees: f64, _center: Point) {}
        fn fill_rect(&mut self, _rect: Rect, _paint: &ShapePaint) {}
        fn fill_oval(&mut self, _bounds: Rect, _paint: &ShapePaint) {}
        fn fill_path(&mut self, _path: &BezPath, _paint: &ShapePaint) {}
    }

    #[test]
    fn test_z_order_is_stable() {
        let mut collection = ShapeCollection::new();
        for (id, z) in [("a", 5), ("b", 1), ("c", 5), ("d", 3)] {
            collection.add_shape(shape(ShapeKind::Rectangle, id, z, 0, 0, 10, 10));
        }
        let order: Vec<_> = collection.iter().filter_map(|s| s.identifier()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_draw_follows_z_order() {
        let mut collection = ShapeCollection::new().with_padding(Insets::new(1.0, 2.0, 0.0, 0.0));
        collection.add_shape(shape(ShapeKind::Oval, "high", 9, 30, 0, 10, 10));
        collection.add_shape(shape(ShapeKind::Rectangle, "low", 0, 10, 0, 10, 10));
        collection.add_shape(shape(ShapeKind::Triangle, "mid", 4, 20, 0, 10, 10));

        let mut surface = Origins::default();
        collection.draw(&mut surface);
        assert_eq!(
            surface.0,
            vec![
                Vec2::new(1.0, 2.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(20.0, 0.0),
                Vec2::new(30.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_add_requests_redraw() {
        let mut collection = ShapeCollection::new();
        assert!(!collection.needs_redraw());
        collection.add_shape(shape(ShapeKind::Rectangle, "a", 0, 0, 0, 1, 1));
        assert!(collection.take_redraw_request());
        assert!(!collection.take_redraw_request());
    }

    #[test]
    fn test_measure_modes() {
        let mut collection = ShapeCollection::new().with_padding(Insets::new(5.0, 1.0, 5.0, 1.0));
        collection.add_shape(shape(ShapeKind::Rectangle, "a", 0, 10, 10, 100, 40));
        collection.add_shape(shape(ShapeKind::Oval, "b", 0, 0, 0, 50, 80));

        let free = collection.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(free, Size::new(120.0, 82.0));

        let capped = collection.measure(MeasureSpec::AtMost(60.0), MeasureSpec::AtMost(200.0));
        assert_eq!(capped, Size::new(60.0, 82.0));

        let exact = collection.measure(MeasureSpec::Exactly(300.0), MeasureSpec::Exactly(10.0));
        assert_eq!(exact, Size::new(300.0, 10.0));
    }

    #[test]
    fn test_measure_rotated() {
        let mut collection = ShapeCollection::new();
        let mut bar = shape(ShapeKind::Rectangle, "bar", 0, 0, 0, 100, 20);
        bar.set_rotation(90);
        collection.add_shape(bar);
        let size = collection.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(size, Size::new(60.0, 60.0));
    }

    #[test]
    fn test_measure_empty() {
        let collection = ShapeCollection::new().with_padding(Insets::uniform(4.0));
        let size = collection.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(size, Size::new(8.0, 8.0));
    }

    #[test]
    fn test_click_fires_once() {
        let (mut collection, clicks) = recording();
        collection.add_shape(shape(ShapeKind::Rectangle, "a", 0, 0, 0, 100, 100));

        assert!(collection.handle_pointer_event(down(50.0, 50.0)));
        assert!(collection.get(0).unwrap().is_pressed());
        assert!(collection.handle_pointer_event(moved(60.0, 60.0)));
        assert!(!collection.handle_pointer_event(up(60.0, 60.0)));

        assert_eq!(*clicks.borrow(), vec!["a".to_string()]);
        assert!(!collection.get(0).unwrap().is_pressed());
        assert_eq!(collection.selected_index(), None);
    }

    #[test]
    fn test_drag_out_cancels_click() {
        let (mut collection, clicks) = recording();
        collection.add_shape(shape(ShapeKind::Rectangle, "a", 0, 0, 0, 100, 100));
        collection.add_shape(shape(ShapeKind::Rectangle, "b", 0, 200, 0, 100, 100));

        assert!(collection.handle_pointer_event(down(50.0, 50.0)));
        collection.take_redraw_request();
        assert!(!collection.handle_pointer_event(moved(250.0, 50.0)));
        assert!(collection.take_redraw_request());
        // No re-acquisition of "b" and no click on release
        assert!(!collection.handle_pointer_event(moved(260.0, 50.0)));
        assert!(!collection.handle_pointer_event(up(250.0, 50.0)));

        assert!(clicks.borrow().is_empty());
        assert!(collection.iter().all(|s| !s.is_pressed()));
    }

    #[test]
    fn test_release_outside_without_move() {
        let (mut collection, clicks) = recording();
        collection.add_shape(shape(ShapeKind::Rectangle, "a", 0, 0, 0, 100, 100));
        collection.handle_pointer_event(down(50.0, 50.0));
        collection.handle_pointer_event(up(500.0, 500.0));
        assert!(clicks.borrow().is_empty());
        assert!(!collection.get(0).unwrap().is_pressed());
    }

    #[test]
    fn test_topmost_wins() {
        let (mut collection, clicks) = recording();
        collection.add_shape(shape(ShapeKind::Rectangle, "top", 10, 0, 0, 100, 100));
        collection.add_shape(shape(ShapeKind::Rectangle, "bottom", 1, 0, 0, 100, 100));

        collection.handle_pointer_event(down(50.0, 50.0));
        let pressed: Vec<_> = collection
            .iter()
            .filter(|s| s.is_pressed())
            .filter_map(|s| s.identifier())
            .collect();
        assert_eq!(pressed, vec!["top"]);
        collection.handle_pointer_event(up(50.0, 50.0));
        assert_eq!(*clicks.borrow(), vec!["top".to_string()]);
    }

    #[test]
    fn test_press_misses_everything() {
        let (mut collection, _clicks) = recording();
        collection.add_shape(shape(ShapeKind::Oval, "o", 0, 0, 0, 100, 100));
        // Corner of the oval's box is outside the ellipse
        assert!(!collection.handle_pointer_event(down(2.0, 2.0)));
        assert_eq!(collection.selected_index(), None);
        assert!(!collection.handle_pointer_event(up(2.0, 2.0)));
    }

    #[test]
    fn test_disabled_shape_falls_through() {
        let (mut collection, clicks) = recording();
        collection.add_shape(shape(ShapeKind::Rectangle, "under", 0, 0, 0, 100, 100));
        collection.add_shape(shape(ShapeKind::Rectangle, "over", 1, 0, 0, 100, 100));
        collection.set_shape_enabled("over", false);

        collection.handle_pointer_event(down(50.0, 50.0));
        collection.handle_pointer_event(up(50.0, 50.0));
        assert_eq!(*clicks.borrow(), vec!["under".to_string()]);
    }

    #[test]
    fn test_set_enabled_applies_to_all_matches() {
        let mut collection = ShapeCollection::new();
        collection.add_shape(shape(ShapeKind::Rectangle, "dup", 0, 0, 0, 10, 10));
        collection.add_shape(shape(ShapeKind::Oval, "dup", 1, 0, 0, 10, 10));
        collection.add_shape(shape(ShapeKind::Oval, "other", 2, 0, 0, 10, 10));
        collection.take_redraw_request();

        collection.set_shape_enabled("dup", false);
        let enabled: Vec<_> = collection.iter().map(|s| s.is_enabled()).collect();
        assert_eq!(enabled, vec![false, false, true]);
        assert!(collection.take_redraw_request());

        collection.set_shape_enabled("missing", false);
        assert!(!collection.needs_redraw());
    }

    #[test]
    fn test_no_callback_without_identifier() {
        let (mut collection, clicks) = recording();
        let mut anonymous = ShapeElement::new(ShapeKind::Rectangle);
        anonymous.set_size(100, 100);
        collection.add_shape(anonymous);

        assert!(collection.handle_pointer_event(down(50.0, 50.0)));
        collection.handle_pointer_event(up(50.0, 50.0));
        assert!(clicks.borrow().is_empty());
        assert!(!collection.get(0).unwrap().is_pressed());
    }

    #[test]
    fn test_padding_offsets_touch() {
        let (mut collection, clicks) = recording();
        collection.set_padding(Insets::new(100.0, 50.0, 0.0, 0.0));
        collection.add_shape(shape(ShapeKind::Rectangle, "a", 0, 0, 0, 20, 20));

        assert!(!collection.handle_pointer_event(down(10.0, 10.0)));
        assert!(collection.handle_pointer_event(down(110.0, 60.0)));
        collection.handle_pointer_event(up(110.0, 60.0));
        assert_eq!(*clicks.borrow(), vec!["a".to_string()]);
    }

    #[test]
    fn test_selection_survives_insert() {
        let mut collection = ShapeCollection::new();
        collection.add_shape(shape(ShapeKind::Rectangle, "a", 5, 0, 0, 100, 100));
        collection.handle_pointer_event(down(50.0, 50.0));
        let pressed = collection.selected_shape();

        collection.add_shape(shape(ShapeKind::Rectangle, "b", 0, 200, 200, 10, 10));
        assert_eq!(collection.selected_index(), Some(1));
        assert_eq!(collection.selected_shape(), pressed);
    }

    #[test]
    fn test_add_shapes_from_xml() {
        let mut collection = ShapeCollection::new();
        let xml = r#"<shapes><rect id="b" z="2"/><oval id="a" z="1"/></shapes>"#;
        let added = collection
            .add_shapes_from_xml(xml, &DisplayMetrics::default())
            .unwrap();
        assert_eq!(added, 2);
        let order: Vec<_> = collection.iter().filter_map(|s| s.identifier()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_failed_xml_adds_nothing() {
        let mut collection = ShapeCollection::new();
        let xml = r#"<shapes><rect id="ok"/><rect id="bad" x="1.5"/></shapes>"#;
        assert!(collection
            .add_shapes_from_xml(xml, &DisplayMetrics::default())
            .is_err());
        assert!(collection.is_empty());
    }
}
