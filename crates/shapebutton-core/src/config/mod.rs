//! Shape configuration: display metrics, padding, attribute parsing and
//! loading shape lists from markup.

mod record;
mod xml;

pub use record::{AttributeValue, ShapeRecord};
pub use xml::parse_shape_records;

use crate::shapes::{SerializableColor, ShapeElement};
use peniko::color::{Srgb, parse_color as parse_css_color};
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid number for '{attribute}': {value:?}")]
    InvalidNumber { attribute: String, value: String },
    #[error("Invalid color for '{attribute}': {value:?}")]
    InvalidColor { attribute: String, value: String },
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    XmlAttribute(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("error while reading shape configuration: {source}")]
    Read { source: Box<ConfigError> },
}

impl ConfigError {
    /// Wrap in [`ConfigError::Read`] unless already wrapped.
    fn into_read(self) -> Self {
        match self {
            read @ ConfigError::Read { .. } => read,
            other => ConfigError::Read {
                source: Box::new(other),
            },
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Screen density used to convert `dp` values to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// Pixels per density-independent pixel.
    pub density: f64,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}

impl DisplayMetrics {
    pub fn new(density: f64) -> Self {
        Self { density }
    }
}

/// Container padding around the shapes, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// left + right
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// top + bottom
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Convert a size attribute to pixels.
///
/// `"12px"` and `"12"` are raw pixels, `"12dp"` is scaled by `density` and
/// rounded. An empty value is 0.
pub fn parse_pixel_size(value: &str, density: f64) -> Result<i32, ParseIntError> {
    if value.is_empty() {
        Ok(0)
    } else if let Some(px) = value.strip_suffix("px") {
        px.parse()
    } else if let Some(dp) = value.strip_suffix("dp") {
        let dp: i32 = dp.parse()?;
        Ok((dp as f64 * density + 0.5) as i32)
    } else {
        value.parse()
    }
}

/// Parse `#RRGGBB`, `#AARRGGBB` or a CSS color name.
pub fn parse_color(value: &str) -> Option<SerializableColor> {
    if let Some(hex) = value.strip_prefix('#') {
        let byte = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
        };
        return match hex.len() {
            6 => Some(SerializableColor::new(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(SerializableColor::new(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => None,
        };
    }
    parse_css_color(value)
        .ok()
        .map(|color| color.to_alpha_color::<Srgb>().into())
}

/// Build elements from records, skipping unknown kinds.
fn build_elements(
    records: &[ShapeRecord],
    metrics: &DisplayMetrics,
) -> ConfigResult<Vec<ShapeElement>> {
    records
        .iter()
        .filter_map(|record| record.to_element(metrics).transpose())
        .collect()
}

/// Load shapes from XML markup.
///
/// Any malformed value aborts the whole load.
pub fn load_shapes_xml(xml: &str, metrics: &DisplayMetrics) -> ConfigResult<Vec<ShapeElement>> {
    parse_shape_records(xml)
        .and_then(|records| build_elements(&records, metrics))
        .map_err(ConfigError::into_read)
}

/// Load shapes from a JSON array of records. Blank input yields no shapes.
pub fn load_shapes_json(json: &str, metrics: &DisplayMetrics) -> ConfigResult<Vec<ShapeElement>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<ShapeRecord>>(json)
        .map_err(ConfigError::from)
        .and_then(|records| build_elements(&records, metrics))
        .map_err(ConfigError::into_read)
}

/// Load shapes from a file; `.json` files are read as JSON, anything else as XML.
///
/// No path means no shapes.
pub fn load_shapes_file(
    path: Option<&Path>,
    metrics: &DisplayMetrics,
) -> ConfigResult<Vec<ShapeElement>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::from(e).into_read())?;
    log::debug!("Loading shapes from {}", path.display());

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        load_shapes_json(&text, metrics)
    } else {
        load_shapes_xml(&text, metrics)
    }
}
