//! # Receipt Template Model
//!
//! A [`Template`] is the in-memory description of one receipt layout: its
//! [`Dimensions`] and an ordered list of elements. Order is creation order and
//! doubles as stacking order when positioned elements overlap.
//!
//! ```
//! use talonario::template::*;
//!
//! let mut template = Template::with_dimensions(40, 10);
//! let id = template
//!     .add_element(Element::Text(Text::new("Thank you", 1).center()))
//!     .unwrap();
//! template.add_element(Element::Line(Divider { line: 2 })).unwrap();
//!
//! assert_eq!(template.len(), 2);
//! assert!(template.remove_element(&id));
//! assert!(!template.remove_element(&id));
//! ```
//!
//! Elements come in two placement families:
//!
//! | Family | Kinds | Placement |
//! |--------|-------|-----------|
//! | Flow | `text`, `line`, `spacer` | row number, 1-indexed |
//! | Positioned | `logo`, `qr`, `code128`, `code39`, `placeholder` | `(x, y)` in units |

mod id;
pub mod types;
pub mod wire;

pub use id::IdGenerator;
pub use types::*;
pub use wire::{SerializedTemplate, WireElement};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Where an element sits on the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Flow element on a row.
    Line(u32),
    /// Positioned element at absolute coordinates.
    Position(Position),
}

/// Define the Element enum and its dispatch methods from a single list.
///
/// Adding a new kind: add one line here, then define the struct in
/// `types.rs` with `impl ElementMeta`.
macro_rules! define_elements {
    ($($variant:ident($inner:ty) => $tag:tt),+ $(,)?) => {
        /// One receipt element, without its id.
        ///
        /// This is also the draft handed to [`Template::add_element`].
        /// Serializes as `{"type": "text", ...}`.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(tag = "type")]
        pub enum Element {
            $(#[serde(rename = $tag)] $variant($inner),)+
        }

        impl Element {
            /// The `type` tag used in both the editing and wire shapes.
            pub fn type_name(&self) -> &'static str {
                match self { $(Element::$variant(_) => $tag,)+ }
            }

            /// Human-readable display label (from [`ElementMeta::label`]).
            pub fn label(&self) -> &'static str {
                match self { $(Element::$variant(_) => <$inner>::label(),)+ }
            }

            /// Editor defaults for every element kind, in declaration order.
            pub fn all_editor_defaults() -> Vec<Self> {
                vec![$(Element::$variant(<$inner>::editor_default()),)+]
            }

            /// All known `type` tags.
            pub const TYPE_NAMES: &'static [&'static str] = &[$($tag,)+];
        }
    };
}

define_elements! {
    Text(Text) => "text",
    Line(Divider) => "line",
    Spacer(Spacer) => "spacer",
    Logo(Logo) => "logo",
    Qr(Qr) => "qr",
    Code128(Code128) => "code128",
    Code39(Code39) => "code39",
    Placeholder(Placeholder) => "placeholder",
}

impl Element {
    /// Row or coordinates of this element.
    pub fn anchor(&self) -> Anchor {
        match self {
            Element::Text(t) => Anchor::Line(t.line),
            Element::Line(d) => Anchor::Line(d.line),
            Element::Spacer(s) => Anchor::Line(s.line),
            Element::Logo(l) => Anchor::Position(l.position),
            Element::Qr(q) => Anchor::Position(q.position),
            Element::Code128(b) => Anchor::Position(b.position),
            Element::Code39(b) => Anchor::Position(b.position),
            Element::Placeholder(p) => Anchor::Position(p.position),
        }
    }

    /// Create an element with editor defaults by type tag.
    pub fn default_for(type_name: &str) -> Option<Element> {
        Element::all_editor_defaults()
            .into_iter()
            .find(|e| e.type_name() == type_name)
    }

    /// Check this element against a template's dimensions.
    pub fn validate(&self, dimensions: Dimensions) -> Result<(), ValidationError> {
        if let Element::Text(text) = self {
            let words = text.word_count();
            if words > dimensions.width as usize {
                return Err(ValidationError::TooManyWords {
                    words,
                    max: dimensions.width,
                });
            }
        }

        if let Anchor::Line(line) = self.anchor() {
            if line < 1 || line > dimensions.height {
                return Err(ValidationError::LineOutOfRange {
                    line,
                    height: dimensions.height,
                });
            }
        }

        Ok(())
    }
}

/// Element kind metadata for editors.
#[derive(Debug, Clone, Serialize)]
pub struct ElementTypeMeta {
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub label: &'static str,
}

/// Every element kind with its display label.
pub fn element_types() -> Vec<ElementTypeMeta> {
    Element::all_editor_defaults()
        .iter()
        .map(|e| ElementTypeMeta {
            type_name: e.type_name(),
            label: e.label(),
        })
        .collect()
}

/// An element together with its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptElement {
    pub id: ElementId,
    #[serde(flatten)]
    pub element: Element,
}

/// A receipt template: format name, dimensions and ordered elements.
#[derive(Debug, Clone, Default)]
pub struct Template {
    format_name: String,
    dimensions: Dimensions,
    elements: Vec<ReceiptElement>,
    ids: IdGenerator,
}

impl Template {
    /// Create an empty template with default dimensions (100 × 300).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty template with clamped dimensions.
    pub fn with_dimensions(width: i64, height: i64) -> Self {
        let mut template = Self::new();
        template.set_dimensions(width, height);
        template
    }

    pub fn format_name(&self) -> &str {
        &self.format_name
    }

    pub fn set_format_name(&mut self, name: impl Into<String>) {
        self.format_name = name.into();
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Set dimensions, clamping width into 20..=100 and height into 20..=3000.
    ///
    /// Existing elements are kept as they are, even if a row now falls
    /// outside the new height.
    pub fn set_dimensions(&mut self, width: i64, height: i64) -> Dimensions {
        self.dimensions = Dimensions::clamped(width, height);
        debug!(
            "dimensions set to {}x{} (requested {}x{})",
            self.dimensions.width, self.dimensions.height, width, height
        );
        self.dimensions
    }

    pub fn elements(&self) -> &[ReceiptElement] {
        &self.elements
    }

    pub fn element(&self, id: &ElementId) -> Option<&ReceiptElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Validate and append an element, returning its fresh id.
    ///
    /// On error the template is unchanged.
    pub fn add_element(&mut self, draft: Element) -> Result<ElementId, ValidationError> {
        draft.validate(self.dimensions)?;
        let id = self.fresh_id();
        debug!("adding {} element {}", draft.type_name(), id);
        self.elements.push(ReceiptElement {
            id: id.clone(),
            element: draft,
        });
        Ok(id)
    }

    /// Replace an element's fields in place, keeping its id and slot.
    pub fn update_element(&mut self, id: &ElementId, draft: Element) -> Result<(), ValidationError> {
        draft.validate(self.dimensions)?;
        let slot = self
            .elements
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| ValidationError::UnknownElement(id.clone()))?;
        debug!("updating element {} as {}", id, draft.type_name());
        slot.element = draft;
        Ok(())
    }

    /// Remove the element with this id. Returns whether anything was removed.
    pub fn remove_element(&mut self, id: &ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| &e.id != id);
        let removed = self.elements.len() != before;
        if removed {
            debug!("removed element {}", id);
        }
        removed
    }

    /// Drop all elements and the format name and restore default dimensions.
    ///
    /// Ids already handed out stay retired.
    pub fn reset(&mut self) {
        self.elements.clear();
        self.format_name.clear();
        self.dimensions = Dimensions::default();
    }

    /// Validation problems of elements already in the template.
    ///
    /// Loaded templates skip `add_element`, so this is how a stored template
    /// gets checked against the editing rules.
    pub fn audit(&self) -> Vec<(ElementId, ValidationError)> {
        self.elements
            .iter()
            .filter_map(|e| {
                e.element
                    .validate(self.dimensions)
                    .err()
                    .map(|err| (e.id.clone(), err))
            })
            .collect()
    }

    /// Next generated id not already carried by an element.
    fn fresh_id(&mut self) -> ElementId {
        loop {
            let id = self.ids.next_id();
            if self.element(&id).is_none() {
                return id;
            }
        }
    }

    /// Append an element without validation, as read from storage.
    ///
    /// Keeps the stored id unless it is missing or already taken.
    pub(crate) fn push_loaded(&mut self, id: Option<ElementId>, element: Element) -> ElementId {
        let id = match id {
            Some(id) if self.element(&id).is_none() => {
                self.ids.observe(&id);
                id
            }
            _ => self.fresh_id(),
        };
        self.elements.push(ReceiptElement {
            id: id.clone(),
            element,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_new_template_defaults() {
        let template = Template::new();
        assert_eq!(template.dimensions(), Dimensions { width: 100, height: 300 });
        assert!(template.is_empty());
        assert_eq!(template.format_name(), "");
    }

    #[test]
    fn test_set_dimensions_clamps() {
        let mut template = Template::new();
        assert_eq!(
            template.set_dimensions(5, 5000),
            Dimensions { width: 20, height: 3000 }
        );
        assert_eq!(
            template.set_dimensions(500, -3),
            Dimensions { width: 100, height: 20 }
        );
        assert_eq!(
            template.set_dimensions(64, 1200),
            Dimensions { width: 64, height: 1200 }
        );
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut template = Template::new();
        let a = template.add_element(Element::Line(Divider { line: 1 })).unwrap();
        let b = template.add_element(Element::Line(Divider { line: 1 })).unwrap();
        assert_ne!(a, b);
        assert_eq!(template.elements()[0].id, a);
        assert_eq!(template.elements()[1].id, b);
    }

    #[test]
    fn test_text_word_budget() {
        let mut template = Template::with_dimensions(20, 100);

        let ok = Element::Text(Text::new(words(20), 1));
        assert!(template.add_element(ok).is_ok());

        let too_long = Element::Text(Text::new(words(21), 1));
        let err = template.add_element(too_long).unwrap_err();
        assert_eq!(err, ValidationError::TooManyWords { words: 21, max: 20 });
        assert_eq!(template.len(), 1);
    }

    #[test]
    fn test_word_budget_ignores_extra_whitespace() {
        let mut template = Template::with_dimensions(20, 100);
        assert_eq!(Text::new("  a   b ", 1).word_count(), 2);
        let spaced = format!("  {}  ", words(20).replace(' ', "   "));
        assert!(template.add_element(Element::Text(Text::new(spaced, 1))).is_ok());
    }

    #[test]
    fn test_line_out_of_range_rejected() {
        let mut template = Template::with_dimensions(40, 20);
        let err = template
            .add_element(Element::Spacer(Spacer { line: 21 }))
            .unwrap_err();
        assert_eq!(err, ValidationError::LineOutOfRange { line: 21, height: 20 });

        let err = template
            .add_element(Element::Text(Text::new("zero", 0)))
            .unwrap_err();
        assert_eq!(err, ValidationError::LineOutOfRange { line: 0, height: 20 });
        assert!(template.is_empty());
    }

    #[test]
    fn test_positioned_elements_have_no_upper_bound() {
        let mut template = Template::with_dimensions(20, 20);
        let far = Position::new(10_000, 10_000);
        assert!(template.add_element(Element::Qr(Qr::new("x", far))).is_ok());
        assert!(
            template
                .add_element(Element::Placeholder(Placeholder::new(PlaceholderKind::Logo, far)))
                .is_ok()
        );
    }

    #[test]
    fn test_remove_element() {
        let mut template = Template::new();
        let a = template.add_element(Element::Spacer(Spacer { line: 3 })).unwrap();
        let b = template.add_element(Element::Spacer(Spacer { line: 4 })).unwrap();

        assert!(template.remove_element(&a));
        assert_eq!(template.len(), 1);
        assert_eq!(template.elements()[0].id, b);

        assert!(!template.remove_element(&a));
        assert!(!template.remove_element(&ElementId::from("missing")));
        assert_eq!(template.len(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut template = Template::new();
        let a = template.add_element(Element::Spacer(Spacer::default())).unwrap();
        template.remove_element(&a);
        let b = template.add_element(Element::Spacer(Spacer::default())).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_update_element_keeps_identity_and_order() {
        let mut template = Template::new();
        let a = template.add_element(Element::Text(Text::new("first", 1))).unwrap();
        let b = template.add_element(Element::Text(Text::new("second", 1))).unwrap();

        template
            .update_element(&a, Element::Text(Text::new("first, edited", 2).bold()))
            .unwrap();

        assert_eq!(template.elements()[0].id, a);
        assert_eq!(template.elements()[1].id, b);
        match &template.elements()[0].element {
            Element::Text(t) => {
                assert_eq!(t.content, "first, edited");
                assert_eq!(t.line, 2);
                assert!(t.bold);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_update_element_validates() {
        let mut template = Template::with_dimensions(20, 20);
        let a = template.add_element(Element::Text(Text::new("ok", 1))).unwrap();
        let err = template
            .update_element(&a, Element::Text(Text::new(words(30), 1)))
            .unwrap_err();
        assert!(matches!(err, ValidationError::TooManyWords { .. }));

        let err = template
            .update_element(&ElementId::from("nope"), Element::Spacer(Spacer::default()))
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownElement(ElementId::from("nope")));
    }

    #[test]
    fn test_reset() {
        let mut template = Template::with_dimensions(40, 40);
        template.set_format_name("Morning shift");
        let a = template.add_element(Element::Spacer(Spacer::default())).unwrap();

        template.reset();
        assert!(template.is_empty());
        assert_eq!(template.format_name(), "");
        assert_eq!(template.dimensions(), Dimensions::default());

        let b = template.add_element(Element::Spacer(Spacer::default())).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_audit_reports_shrunk_template() {
        let mut template = Template::with_dimensions(40, 100);
        let id = template.add_element(Element::Spacer(Spacer { line: 90 })).unwrap();
        template.set_dimensions(40, 50);
        assert_eq!(
            template.audit(),
            vec![(id, ValidationError::LineOutOfRange { line: 90, height: 50 })]
        );
    }

    #[test]
    fn test_push_loaded_replaces_duplicate_ids() {
        let mut template = Template::new();
        let dup = ElementId::from("42");
        let first = template.push_loaded(Some(dup.clone()), Element::Spacer(Spacer::default()));
        let second = template.push_loaded(Some(dup.clone()), Element::Spacer(Spacer::default()));
        let third = template.push_loaded(None, Element::Spacer(Spacer::default()));
        assert_eq!(first, dup);
        assert_ne!(second, dup);
        assert_ne!(third, second);
    }

    #[test]
    fn test_element_types_complete() {
        let types = element_types();
        assert_eq!(types.len(), Element::TYPE_NAMES.len());

        let mut seen = std::collections::HashSet::new();
        for meta in &types {
            assert!(seen.insert(meta.type_name), "Duplicate type: {}", meta.type_name);
            let element = Element::default_for(meta.type_name).unwrap();
            let json = serde_json::to_value(&element).unwrap();
            assert_eq!(json["type"].as_str().unwrap(), meta.type_name);
        }
        assert!(Element::default_for("banner").is_none());
    }

    #[test]
    fn test_text_editor_default() {
        let text = Text::editor_default();
        assert_eq!(text.align, Align::Left);
        assert_eq!(text.font, FontFamily::SansSerif);
        assert_eq!(text.font_size, FontSize::Medium);
        assert_eq!(text.line, 1);
        assert!(!text.bold && !text.italic && !text.underline);
        assert_eq!(Placeholder::editor_default().placeholder_type, PlaceholderKind::Text);
    }

    #[test]
    fn test_editing_shape_json() {
        let element = ReceiptElement {
            id: ElementId::from("7"),
            element: Element::Logo(Logo::new("https://cdn.example/logo.png", Position::new(2, 3))),
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["type"], "logo");
        assert_eq!(json["logoUrl"], "https://cdn.example/logo.png");
        assert_eq!(json["position"]["x"], 2);

        let back: ReceiptElement = serde_json::from_value(json).unwrap();
        assert_eq!(back, element);
    }

    #[test]
    fn test_text_styles_deserialize() {
        let json = r#"{"type": "text", "content": "hi", "font": "sans-serif", "fontSize": "large", "align": "right"}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        match element {
            Element::Text(t) => {
                assert_eq!(t.font, FontFamily::SansSerif);
                assert_eq!(t.font_size, FontSize::Large);
                assert_eq!(t.align, Align::Right);
                assert_eq!(t.line, 1);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }
}
