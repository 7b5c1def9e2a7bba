//! Element struct types for the receipt template model.
//!
//! These are the editing shape: each element kind carries only its own
//! fields under descriptive names (`logo_url`, `qr_value`, ...). The flattened
//! storage shape lives in [`super::wire`].
//!
//! Each element implements [`ElementMeta`] to declare its display label and
//! editor default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata that every element struct must provide.
pub trait ElementMeta: Sized {
    /// Human-readable display label (e.g. "QR Code", "Placeholder").
    fn label() -> &'static str;

    /// Starter value for the designer form.
    fn editor_default() -> Self;
}

// ============================================================================
// IDENTITY & GEOMETRY
// ============================================================================

/// Opaque, stable element handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Receipt size in template units.
///
/// `width` is also the word budget for a single text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const MIN_WIDTH: u32 = 20;
    pub const MAX_WIDTH: u32 = 100;
    pub const MIN_HEIGHT: u32 = 20;
    pub const MAX_HEIGHT: u32 = 3000;

    /// Build dimensions, clamping each axis into its allowed range.
    pub fn clamped(width: i64, height: i64) -> Self {
        Self {
            width: width.clamp(Self::MIN_WIDTH as i64, Self::MAX_WIDTH as i64) as u32,
            height: height.clamp(Self::MIN_HEIGHT as i64, Self::MAX_HEIGHT as i64) as u32,
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 300,
        }
    }
}

/// Absolute placement in template units. Only the lower bound is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// TEXT STYLING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Serif,
    #[default]
    SansSerif,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// What a placeholder stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderKind {
    #[default]
    Text,
    Logo,
    Qr,
    Code128,
    Code39,
}

// ============================================================================
// FLOW ELEMENTS
// ============================================================================

fn default_line() -> u32 {
    1
}

/// Styled text on one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub font: FontFamily,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    /// Row, 1-indexed.
    #[serde(default = "default_line")]
    pub line: u32,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            content: String::new(),
            align: Align::Left,
            font: FontFamily::SansSerif,
            font_size: FontSize::Medium,
            bold: false,
            italic: false,
            underline: false,
            line: 1,
        }
    }
}

impl ElementMeta for Text {
    fn label() -> &'static str { "Text" }
    fn editor_default() -> Self { Self::default() }
}

impl Text {
    pub fn new(content: impl Into<String>, line: u32) -> Self {
        Self {
            content: content.into(),
            line,
            ..Default::default()
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn center(self) -> Self {
        self.align(Align::Center)
    }

    pub fn right(self) -> Self {
        self.align(Align::Right)
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn font(mut self, font: FontFamily) -> Self {
        self.font = font;
        self
    }

    pub fn size(mut self, size: FontSize) -> Self {
        self.font_size = size;
        self
    }

    /// Number of whitespace-separated words in the content.
    ///
    /// Runs of spaces and leading or trailing whitespace count as nothing,
    /// so `"a   b"` is two words, not four.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Horizontal separator across a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divider {
    #[serde(default = "default_line")]
    pub line: u32,
}

impl Default for Divider {
    fn default() -> Self {
        Self { line: 1 }
    }
}

impl ElementMeta for Divider {
    fn label() -> &'static str { "Line" }
    fn editor_default() -> Self { Self::default() }
}

/// Empty row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacer {
    #[serde(default = "default_line")]
    pub line: u32,
}

impl Default for Spacer {
    fn default() -> Self {
        Self { line: 1 }
    }
}

impl ElementMeta for Spacer {
    fn label() -> &'static str { "Spacer" }
    fn editor_default() -> Self { Self::default() }
}

// ============================================================================
// POSITIONED ELEMENTS
// ============================================================================

/// Image reference placed at an absolute position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub position: Position,
}

impl ElementMeta for Logo {
    fn label() -> &'static str { "Logo" }
    fn editor_default() -> Self { Self::default() }
}

impl Logo {
    pub fn new(logo_url: impl Into<String>, position: Position) -> Self {
        Self {
            logo_url: logo_url.into(),
            position,
        }
    }
}

/// QR code symbol.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qr {
    #[serde(default)]
    pub qr_value: String,
    #[serde(default)]
    pub position: Position,
}

impl ElementMeta for Qr {
    fn label() -> &'static str { "QR Code" }
    fn editor_default() -> Self { Self::default() }
}

impl Qr {
    pub fn new(qr_value: impl Into<String>, position: Position) -> Self {
        Self {
            qr_value: qr_value.into(),
            position,
        }
    }
}

/// Code 128 barcode (full ASCII).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Code128 {
    #[serde(default)]
    pub barcode_value: String,
    #[serde(default)]
    pub position: Position,
}

impl ElementMeta for Code128 {
    fn label() -> &'static str { "Code 128" }
    fn editor_default() -> Self { Self::default() }
}

impl Code128 {
    pub fn new(barcode_value: impl Into<String>, position: Position) -> Self {
        Self {
            barcode_value: barcode_value.into(),
            position,
        }
    }
}

/// Code 39 barcode (A-Z, 0-9, space, - . $ / + %).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Code39 {
    #[serde(default)]
    pub barcode_value: String,
    #[serde(default)]
    pub position: Position,
}

impl ElementMeta for Code39 {
    fn label() -> &'static str { "Code 39" }
    fn editor_default() -> Self { Self::default() }
}

impl Code39 {
    pub fn new(barcode_value: impl Into<String>, position: Position) -> Self {
        Self {
            barcode_value: barcode_value.into(),
            position,
        }
    }
}

/// Design-time marker. Renders as an icon, never as real content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    #[serde(default)]
    pub placeholder_type: PlaceholderKind,
    #[serde(default)]
    pub position: Position,
}

impl ElementMeta for Placeholder {
    fn label() -> &'static str { "Placeholder" }
    fn editor_default() -> Self { Self::default() }
}

impl Placeholder {
    pub fn new(placeholder_type: PlaceholderKind, position: Position) -> Self {
        Self {
            placeholder_type,
            position,
        }
    }
}
