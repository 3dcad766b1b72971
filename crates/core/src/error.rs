//! Error types for the pdfp parsing library.

use crate::atoms::Atom;
use thiserror::Error;

/// Primary error type for PDF parsing operations.
///
/// Grammar and token level failures are kept apart from file structural
/// failures; see [`PdfError::is_structural`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PdfError {
    #[error("invalid token at position {pos}: {msg}")]
    TokenError { pos: usize, msg: String },

    #[error("unexpected end of input in {context}")]
    UnexpectedEof { context: &'static str },

    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        expected: &'static str,
        got: &'static str,
    },

    #[error("duplicate atom definition: {0}")]
    DuplicateAtom(String),

    #[error("atom value 0 is reserved")]
    ReservedAtom,

    #[error("PDF syntax error at position {pos}: {msg}")]
    SyntaxError { pos: usize, msg: String },

    #[error("invalid number at position {pos}: {msg}")]
    NumberError { pos: usize, msg: String },

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("key not found: atom {0}")]
    KeyNotFound(Atom),

    #[error("no PDF header found")]
    MissingHeader,

    #[error("no trailer found")]
    MissingTrailer,

    #[error("invalid trailer: {0}")]
    InvalidTrailer(String),

    #[error("trailer /Size is missing, not a positive integer, or larger than the file")]
    InvalidSize,

    #[error("PDF object not found: {0}")]
    ObjectNotFound(u32),
}

impl PdfError {
    /// True for failures in the file structure (header, trailer, object
    /// table), false for grammar and token level failures.
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MissingHeader
                | Self::MissingTrailer
                | Self::InvalidTrailer(_)
                | Self::InvalidSize
                | Self::ObjectNotFound(_)
        )
    }
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;
