//! Storage shape of a template.
//!
//! The persisted form flattens every element into one record with a single
//! `content` slot, whatever its kind: a logo's `logoUrl`, a QR code's
//! `qrValue` and a barcode's `barcodeValue` all land in `content`.
//!
//! ```json
//! {
//!   "formatName": "Store receipt",
//!   "dimensions": {"width": 40, "height": 10},
//!   "elements": [
//!     {"id": "1", "type": "text", "content": "Thanks", "line": 1, "align": "center", ...},
//!     {"id": "2", "type": "qr", "content": "ORDER-123", "position": {"x": 5, "y": 5}}
//!   ]
//! }
//! ```
//!
//! Reading is lenient per element and strict per template: a corrupt entry is
//! skipped, a document without numeric dimensions or an element array is
//! rejected as a whole.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::*;
use super::{Element, Template};
use crate::error::{DesignerError, ValidationError};

/// Minimum length of a format name accepted for saving.
pub const MIN_FORMAT_NAME_LEN: usize = 5;

/// A template as exchanged with storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedTemplate {
    pub format_name: String,
    pub dimensions: Dimensions,
    pub elements: Vec<WireElement>,
}

impl SerializedTemplate {
    /// Check the rules storage applies on save.
    pub fn validate_for_save(&self) -> Result<(), ValidationError> {
        let len = self.format_name.chars().count();
        if len < MIN_FORMAT_NAME_LEN {
            return Err(ValidationError::FormatNameTooShort {
                len,
                min: MIN_FORMAT_NAME_LEN,
            });
        }
        Ok(())
    }
}

/// One flattened element record.
///
/// Only the fields relevant to `kind` are populated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireElement {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_type: Option<PlaceholderKind>,
}

impl WireElement {
    fn flow(id: String, kind: &str, line: u32) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            line: Some(line),
            ..Default::default()
        }
    }

    fn positioned(id: String, kind: &str, content: &str, position: Position) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            content: content.to_string(),
            position: Some(position),
            ..Default::default()
        }
    }
}

impl Template {
    /// Project the template into its storage shape.
    pub fn to_wire(&self) -> SerializedTemplate {
        let elements = self
            .elements()
            .iter()
            .map(|e| {
                let id = e.id.to_string();
                let kind = e.element.type_name();
                match &e.element {
                    Element::Text(t) => WireElement {
                        content: t.content.clone(),
                        align: Some(t.align),
                        font: Some(t.font),
                        font_size: Some(t.font_size),
                        bold: Some(t.bold),
                        italic: Some(t.italic),
                        underline: Some(t.underline),
                        ..WireElement::flow(id, kind, t.line)
                    },
                    Element::Line(d) => WireElement::flow(id, kind, d.line),
                    Element::Spacer(s) => WireElement::flow(id, kind, s.line),
                    Element::Logo(l) => WireElement::positioned(id, kind, &l.logo_url, l.position),
                    Element::Qr(q) => WireElement::positioned(id, kind, &q.qr_value, q.position),
                    Element::Code128(b) => {
                        WireElement::positioned(id, kind, &b.barcode_value, b.position)
                    }
                    Element::Code39(b) => {
                        WireElement::positioned(id, kind, &b.barcode_value, b.position)
                    }
                    Element::Placeholder(p) => WireElement {
                        placeholder_type: Some(p.placeholder_type),
                        ..WireElement::positioned(id, kind, "", p.position)
                    },
                }
            })
            .collect();

        SerializedTemplate {
            format_name: self.format_name().to_string(),
            dimensions: self.dimensions(),
            elements,
        }
    }

    /// Rebuild a template from stored JSON.
    ///
    /// Fails only when the document is not shaped like a template: a string
    /// `formatName`, numeric `dimensions` and an `elements` array. Elements
    /// that are not objects or carry an unknown `type` are skipped. The
    /// variant-named fields (`logoUrl`, `qrValue`, `barcodeValue`) win over
    /// `content` when both are present and non-empty.
    pub fn from_wire(value: &Value) -> Result<Template, DesignerError> {
        let root = value
            .as_object()
            .ok_or_else(|| invalid("template is not an object"))?;

        let format_name = root
            .get("formatName")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("formatName is not a string"))?
            .to_string();

        let dimensions = root
            .get("dimensions")
            .and_then(Value::as_object)
            .ok_or_else(|| invalid("dimensions missing"))?;
        let width = dimensions
            .get("width")
            .and_then(Value::as_f64)
            .ok_or_else(|| invalid("dimensions.width is not a number"))?;
        let height = dimensions
            .get("height")
            .and_then(Value::as_f64)
            .ok_or_else(|| invalid("dimensions.height is not a number"))?;

        let entries = root
            .get("elements")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("elements is not an array"))?;

        let mut template = Template::with_dimensions(width.round() as i64, height.round() as i64);
        template.set_format_name(format_name);

        for (i, entry) in entries.iter().enumerate() {
            let Some(obj) = entry.as_object() else {
                warn!("elements[{}]: skipping non-object entry", i);
                continue;
            };
            match parse_element(obj) {
                Some(element) => {
                    let id = obj.get("id").and_then(id_of);
                    template.push_loaded(id, element);
                }
                None => warn!(
                    "elements[{}]: skipping entry with unknown type {}",
                    i,
                    obj.get("type").unwrap_or(&Value::Null)
                ),
            }
        }

        Ok(template)
    }
}

impl TryFrom<&SerializedTemplate> for Template {
    type Error = DesignerError;

    fn try_from(wire: &SerializedTemplate) -> Result<Self, Self::Error> {
        Template::from_wire(&serde_json::to_value(wire)?)
    }
}

fn invalid(reason: &str) -> DesignerError {
    DesignerError::InvalidTemplate(reason.to_string())
}

fn id_of(value: &Value) -> Option<ElementId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(ElementId::new(s.clone())),
        Value::Number(n) => Some(ElementId::new(n.to_string())),
        _ => None,
    }
}

/// Build the typed element for one record, or `None` for an unknown type.
fn parse_element(obj: &Map<String, Value>) -> Option<Element> {
    let kind = obj.get("type").and_then(Value::as_str)?;
    let element = match kind {
        "text" => Element::Text(Text {
            content: string(obj, "content"),
            align: enum_field(obj, "align"),
            font: enum_field(obj, "font"),
            font_size: enum_field(obj, "fontSize"),
            bold: flag(obj, "bold"),
            italic: flag(obj, "italic"),
            underline: flag(obj, "underline"),
            line: line(obj),
        }),
        "line" => Element::Line(Divider { line: line(obj) }),
        "spacer" => Element::Spacer(Spacer { line: line(obj) }),
        "logo" => Element::Logo(Logo {
            logo_url: first_non_empty(obj, "logoUrl"),
            position: position(obj),
        }),
        "qr" => Element::Qr(Qr {
            qr_value: first_non_empty(obj, "qrValue"),
            position: position(obj),
        }),
        "code128" => Element::Code128(Code128 {
            barcode_value: first_non_empty(obj, "barcodeValue"),
            position: position(obj),
        }),
        "code39" => Element::Code39(Code39 {
            barcode_value: first_non_empty(obj, "barcodeValue"),
            position: position(obj),
        }),
        "placeholder" => Element::Placeholder(Placeholder {
            placeholder_type: enum_field(obj, "placeholderType"),
            position: position(obj),
        }),
        _ => return None,
    };
    Some(element)
}

fn string(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The named field if non-empty, else `content`, else empty.
fn first_non_empty(obj: &Map<String, Value>, key: &str) -> String {
    let named = string(obj, key);
    if named.is_empty() {
        string(obj, "content")
    } else {
        named
    }
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Styling enums fall back to their default on a missing or unknown value.
fn enum_field<T>(obj: &Map<String, Value>, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    obj.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

fn line(obj: &Map<String, Value>) -> u32 {
    obj.get("line")
        .and_then(Value::as_f64)
        .filter(|n| *n >= 1.0)
        .map(|n| n.round().min(u32::MAX as f64) as u32)
        .unwrap_or(1)
}

fn coordinate(value: Option<&Value>) -> u32 {
    value
        .and_then(Value::as_f64)
        .map(|n| n.round().clamp(0.0, u32::MAX as f64) as u32)
        .unwrap_or(0)
}

fn position(obj: &Map<String, Value>) -> Position {
    match obj.get("position").and_then(Value::as_object) {
        Some(p) => Position {
            x: coordinate(p.get("x")),
            y: coordinate(p.get("y")),
        },
        None => Position::default(),
    }
}
