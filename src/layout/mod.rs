//! # Layout Renderer
//!
//! Projects a [`Template`] onto a printable surface as an ordered list of
//! [`RenderNode`]s. The surface is a grid of `height` rows of `unit_px`
//! pixels each; flow elements land on a row, positioned elements at absolute
//! pixel coordinates.
//!
//! ## Architecture
//!
//! ```text
//! Template ──→ Renderer ──→ Vec<RenderNode>
//!                 ↓
//!           For each element, in insertion order:
//!           - resolve placement (row, or x/y × unit_px)
//!           - resolve content (text run, QR matrix, bars, icon...)
//! ```
//!
//! Rendering is pure: the template is not touched and the same template
//! always renders to the same nodes. Nodes are never re-sorted, so two
//! elements on one row keep their insertion order.
//!
//! ## Example
//!
//! ```
//! use talonario::layout::{self, NodeKind, Placement};
//! use talonario::template::*;
//!
//! let mut template = Template::with_dimensions(40, 10);
//! template.add_element(Element::Qr(Qr::new("ORDER-123", Position::new(5, 5)))).unwrap();
//!
//! let nodes = layout::render(&template);
//! assert_eq!(nodes[0].placement, Placement::Absolute { x: 50, y: 50 });
//! assert!(matches!(&nodes[0].kind, NodeKind::Qr { value, .. } if value == "ORDER-123"));
//! ```

pub mod symbol;

pub use symbol::{QrMatrix, Symbology};

use serde::Serialize;
use serde_json::Value;

use crate::config::LayoutConfig;
use crate::error::DesignerError;
use crate::template::{
    Align, Anchor, Element, ElementId, FontFamily, FontSize, PlaceholderKind, ReceiptElement,
    Template, Text,
};

/// Where a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Placement {
    /// Full-width row of the grid, 1-indexed.
    Row { row: u32 },
    /// Top-left corner in pixels.
    Absolute { x: u32, y: u32 },
}

/// Icon shown for a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Type,
    Image,
    QrCode,
    Barcode,
}

impl Icon {
    pub fn for_placeholder(kind: PlaceholderKind) -> Self {
        match kind {
            PlaceholderKind::Text => Icon::Type,
            PlaceholderKind::Logo => Icon::Image,
            PlaceholderKind::Qr => Icon::QrCode,
            PlaceholderKind::Code128 | PlaceholderKind::Code39 => Icon::Barcode,
        }
    }
}

/// Styled text ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub content: String,
    pub align: Align,
    pub font: FontFamily,
    pub size: FontSize,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl From<&Text> for TextRun {
    fn from(text: &Text) -> Self {
        Self {
            content: text.content.clone(),
            align: text.align,
            font: text.font,
            size: text.font_size,
            bold: text.bold,
            italic: text.italic,
            underline: text.underline,
        }
    }
}

/// Resolved visual content of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Text(TextRun),
    Divider,
    Spacer,
    Logo {
        src: String,
        size: u32,
    },
    Qr {
        value: String,
        size: u32,
        matrix: QrMatrix,
    },
    Barcode {
        symbology: Symbology,
        value: String,
        module_width: u32,
        height: u32,
        show_value: bool,
        /// One entry per module, `true` = bar
        bars: Vec<bool>,
    },
    Placeholder {
        stands_for: PlaceholderKind,
        icon: Icon,
        size: u32,
    },
}

/// One resolved, positioned unit of the layout.
///
/// `id` is the source element's id, so a display can offer removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderNode {
    pub id: ElementId,
    pub kind: NodeKind,
    pub placement: Placement,
}

/// Rendered nodes plus the surface they are drawn on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub width_px: u32,
    pub height_px: u32,
    pub row_height_px: u32,
    pub nodes: Vec<RenderNode>,
}

/// Template → nodes projection for one [`LayoutConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    config: LayoutConfig,
}

impl Renderer {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Render every element in insertion order.
    pub fn render(&self, template: &Template) -> Vec<RenderNode> {
        template
            .elements()
            .iter()
            .map(|e| self.render_element(e))
            .collect()
    }

    /// Render with the surface size.
    pub fn layout(&self, template: &Template) -> Layout {
        let dimensions = template.dimensions();
        Layout {
            width_px: self.config.to_px(dimensions.width),
            height_px: self.config.to_px(dimensions.height),
            row_height_px: self.config.unit_px,
            nodes: self.render(template),
        }
    }

    fn render_element(&self, receipt_element: &ReceiptElement) -> RenderNode {
        let placement = match receipt_element.element.anchor() {
            Anchor::Line(row) => Placement::Row { row },
            Anchor::Position(p) => Placement::Absolute {
                x: self.config.to_px(p.x),
                y: self.config.to_px(p.y),
            },
        };

        let kind = match &receipt_element.element {
            Element::Text(text) => NodeKind::Text(TextRun::from(text)),
            Element::Line(_) => NodeKind::Divider,
            Element::Spacer(_) => NodeKind::Spacer,
            Element::Logo(logo) => NodeKind::Logo {
                src: if logo.logo_url.is_empty() {
                    self.config.fallback_logo.to_string()
                } else {
                    logo.logo_url.clone()
                },
                size: self.config.logo_size_px,
            },
            Element::Qr(qr) => NodeKind::Qr {
                value: qr.qr_value.clone(),
                size: self.config.qr_size_px,
                matrix: symbol::encode_qr(&qr.qr_value),
            },
            Element::Code128(b) => self.barcode(Symbology::Code128, &b.barcode_value),
            Element::Code39(b) => self.barcode(Symbology::Code39, &b.barcode_value),
            Element::Placeholder(p) => NodeKind::Placeholder {
                stands_for: p.placeholder_type,
                icon: Icon::for_placeholder(p.placeholder_type),
                size: self.config.placeholder_size_px,
            },
        };

        RenderNode {
            id: receipt_element.id.clone(),
            kind,
            placement,
        }
    }

    fn barcode(&self, symbology: Symbology, value: &str) -> NodeKind {
        NodeKind::Barcode {
            symbology,
            value: value.to_string(),
            module_width: self.config.barcode_module_px,
            height: self.config.barcode_height_px,
            show_value: self.config.barcode_show_value,
            bars: symbol::encode_bars(symbology, value),
        }
    }
}

/// Render a template with the reference geometry.
pub fn render(template: &Template) -> Vec<RenderNode> {
    Renderer::default().render(template)
}

/// Render a stored template straight from its JSON.
///
/// Fails only when the JSON is not shaped like a template; corrupt
/// elements are left out.
pub fn render_wire(value: &Value) -> Result<Vec<RenderNode>, DesignerError> {
    let template = Template::from_wire(value)?;
    Ok(render(&template))
}

impl Template {
    /// Shorthand for [`layout::render`](render).
    pub fn render(&self) -> Vec<RenderNode> {
        render(self)
    }
}
