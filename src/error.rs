//! # Error Types
//!
//! This module defines error types used throughout the talonario library.

use thiserror::Error;

use crate::template::ElementId;

/// Main error type for talonario operations
#[derive(Debug, Error)]
pub enum DesignerError {
    /// An edit was rejected; the template was left unchanged
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Stored template data does not have the shape of a template
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Proof image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons an element or template edit is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text content has more words than the template width allows.
    #[error("content has {words} words, exceeding the maximum width of {max} words")]
    TooManyWords { words: usize, max: u32 },

    /// A flow element was placed on a row the template does not have.
    #[error("line {line} is outside the template rows 1..={height}")]
    LineOutOfRange { line: u32, height: u32 },

    /// The format name is too short to be saved.
    #[error("format name must be at least {min} characters long (got {len})")]
    FormatNameTooShort { len: usize, min: usize },

    /// No element carries the given id.
    #[error("no element with id {0}")]
    UnknownElement(ElementId),
}
