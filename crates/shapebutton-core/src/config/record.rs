//! One shape's raw configuration and its conversion into a [`ShapeElement`].

use super::{ConfigError, ConfigResult, DisplayMetrics, parse_color, parse_pixel_size};
use crate::shapes::{EmbossFilter, SerializableColor, ShapeElement, ShapeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute value as written in a configuration source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(value) => write!(f, "{value}"),
            AttributeValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

/// A shape as described by markup: its kind name plus raw attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeRecord {
    /// Kind name (`rect`, `oval`, `triangle`, `arc`).
    pub kind: String,
    /// Attributes by name; names are matched case-insensitively.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl ShapeRecord {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Build the element this record describes.
    ///
    /// Returns `Ok(None)` (after logging a warning) when the kind name is
    /// not recognized. Malformed numbers or colors are errors.
    pub fn to_element(&self, metrics: &DisplayMetrics) -> ConfigResult<Option<ShapeElement>> {
        let Some(kind) = ShapeKind::from_name(&self.kind) else {
            log::warn!("Unknown shape type: {}", self.kind);
            return Ok(None);
        };

        let mut element =
            ShapeElement::new(kind).with_emboss(EmbossFilter::for_density(metrics.density));
        let (mut x, mut y, mut z) = (0, 0, 0);
        let (mut width, mut height, mut thickness) = (0, 0, 0);
        let (mut angle, mut start, mut end) = (0, 0, 0);

        for (name, value) in &self.attributes {
            let text = value.to_string();
            let pixels = || pixel_attribute(name, &text, metrics.density);
            let degrees = || integer_attribute(name, &text);
            match name.to_ascii_lowercase().as_str() {
                "x" => x = pixels()?,
                "y" => y = pixels()?,
                "z" => z = pixels()?,
                "width" => width = pixels()?,
                "height" => height = pixels()?,
                "thickness" => thickness = pixels()?,
                "angle" => angle = degrees()?,
                "start" => start = degrees()?,
                "end" => end = degrees()?,
                "id" => element.set_identifier(Some(text.clone())),
                "base" => element.set_base_color(color_attribute(name, &text)?),
                "accent" => element.set_accent_color(color_attribute(name, &text)?),
                _ => {}
            }
        }

        element.set_position_z(x, y, z);
        element.set_size(dimension("width", width), dimension("height", height));
        element.set_rotation(angle);
        element.set_range(start, end);
        element.set_thickness(dimension("thickness", thickness));
        Ok(Some(element))
    }
}

fn pixel_attribute(name: &str, value: &str, density: f64) -> ConfigResult<i32> {
    parse_pixel_size(value, density).map_err(|_| ConfigError::InvalidNumber {
        attribute: name.to_string(),
        value: value.to_string(),
    })
}

fn integer_attribute(name: &str, value: &str) -> ConfigResult<i32> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        attribute: name.to_string(),
        value: value.to_string(),
    })
}

fn color_attribute(name: &str, value: &str) -> ConfigResult<SerializableColor> {
    parse_color(value).ok_or_else(|| ConfigError::InvalidColor {
        attribute: name.to_string(),
        value: value.to_string(),
    })
}

/// Sizes cannot be negative; clamp to zero.
fn dimension(name: &str, value: i32) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| {
        log::warn!("Negative {name} ({value}) clamped to 0");
        0
    })
}
