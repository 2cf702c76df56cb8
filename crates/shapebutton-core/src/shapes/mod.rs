//! Shape definitions for the button surface.

mod element;
pub mod geometry;

pub use element::{EmbossFilter, ShapeElement, ShapePaint};
pub use geometry::ArcRange;

use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Default fill for a shape at rest (light gray).
    pub fn default_base() -> Self {
        Self::new(214, 214, 214, 255)
    }

    /// Default fill for a pressed shape (light blue).
    pub fn default_accent() -> Self {
        Self::new(51, 173, 214, 255)
    }

    /// Same color with its alpha replaced.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// The four primitive kinds a button surface is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Oval,
    Triangle,
    Arc,
}

impl ShapeKind {
    /// Look up a kind by its markup tag name (`rect`, `oval`, `triangle`, `arc`).
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rect" => Some(ShapeKind::Rectangle),
            "oval" => Some(ShapeKind::Oval),
            "triangle" => Some(ShapeKind::Triangle),
            "arc" => Some(ShapeKind::Arc),
            _ => None,
        }
    }

    /// Markup tag name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Oval => "oval",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Arc => "arc",
        }
    }

    /// Whether this kind is drawn from a constructed path rather than a primitive.
    pub fn uses_path(self) -> bool {
        matches!(self, ShapeKind::Triangle | ShapeKind::Arc)
    }
}

/// Unique identity of a shape element (independent of its string identifier).
pub type ShapeId = Uuid;
