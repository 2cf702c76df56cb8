//! Shape markup reader.
//!
//! Every element below the document root becomes a [`ShapeRecord`] named
//! after its tag, with its attributes as raw text:
//!
//! ```xml
//! <shapes>
//!     <rect id="ok" x="10dp" y="10dp" z="1" width="80dp" height="40dp" base="#D6D6D6" />
//!     <arc id="dial" width="120dp" height="120dp" start="-90" end="180" thickness="12dp" />
//! </shapes>
//! ```

use super::{AttributeValue, ConfigError, ConfigResult, ShapeRecord};
use crate::shapes::ShapeKind;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Read shape records from markup, in document order.
pub fn parse_shape_records(xml: &str) -> ConfigResult<Vec<ShapeRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if let Some(record) = read_element(e, depth)? {
                    records.push(record);
                }
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                if let Some(record) = read_element(e, depth)? {
                    records.push(record);
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => break,
            Err(e) => return Err(ConfigError::Xml(e)),
            _ => {}
        }
    }

    Ok(records)
}

/// Turn a start tag into a record. The root container is not a shape
/// unless its own tag names a shape kind.
fn read_element(e: &BytesStart<'_>, depth: usize) -> ConfigResult<Option<ShapeRecord>> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
    if depth == 0 && ShapeKind::from_name(&name).is_none() {
        log::debug!("Skipping root container <{}>", name);
        return Ok(None);
    }

    let mut record = ShapeRecord::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|e| ConfigError::XmlAttribute(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| ConfigError::XmlAttribute(e.to_string()))?;
        record
            .attributes
            .insert(key, AttributeValue::Text(value.into_owned()));
    }
    Ok(Some(record))
}
