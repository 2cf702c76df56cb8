//! ShapeButton Core Library
//!
//! Platform-agnostic model of a button surface made of several shapes:
//! geometry, z-ordering, measurement, touch dispatch and shape markup loading.

pub mod collection;
pub mod config;
pub mod input;
pub mod shapes;
pub mod surface;

pub use collection::{ClickListener, MeasureSpec, ShapeCollection};
pub use config::{
    ConfigError, ConfigResult, DisplayMetrics, Insets, ShapeRecord, load_shapes_file,
    load_shapes_json, load_shapes_xml, parse_color, parse_pixel_size,
};
pub use input::{PointerEvent, PointerPhase};
pub use shapes::{ArcRange, SerializableColor, ShapeElement, ShapeId, ShapeKind, ShapePaint};
pub use surface::DrawSurface;
