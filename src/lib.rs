//! # Talonario - Receipt Layout Engine
//!
//! Talonario is the layout core of a receipt designer. It provides:
//!
//! - **Template model**: dimensions plus ordered, typed receipt elements
//! - **Validation**: clamped dimensions, word budgets, row bounds
//! - **Wire format**: the flattened shape templates are stored in
//! - **Layout rendering**: templates projected to positioned render nodes
//! - **Proofs**: render nodes rasterized to PNG
//!
//! ## Quick Start
//!
//! ```
//! use talonario::{
//!     layout::{self, NodeKind, Placement},
//!     template::{Divider, Element, Position, Qr, Template, Text},
//! };
//!
//! let mut template = Template::with_dimensions(40, 10);
//! template.set_format_name("Store receipt");
//!
//! template.add_element(Element::Text(Text::new("Thank you for shopping", 1).center()))?;
//! template.add_element(Element::Line(Divider { line: 2 }))?;
//! template.add_element(Element::Qr(Qr::new("ORDER-123", Position::new(5, 5))))?;
//!
//! let nodes = layout::render(&template);
//! assert_eq!(nodes.len(), 3);
//! assert_eq!(nodes[2].placement, Placement::Absolute { x: 50, y: 50 });
//! assert_eq!(nodes[1].kind, NodeKind::Divider);
//!
//! // Stored form, and back
//! let wire = template.to_wire();
//! wire.validate_for_save()?;
//! let stored = serde_json::to_value(&wire)?;
//! assert_eq!(layout::render_wire(&stored)?, nodes);
//!
//! # Ok::<(), talonario::error::DesignerError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Template model, validation and wire format |
//! | [`layout`] | Render nodes and symbol encoding |
//! | [`preview`] | PNG proofs |
//! | [`config`] | Layout geometry |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod layout;
pub mod preview;
pub mod template;

// Re-exports for convenience
pub use config::LayoutConfig;
pub use error::{DesignerError, ValidationError};
pub use layout::{RenderNode, Renderer};
pub use template::Template;
