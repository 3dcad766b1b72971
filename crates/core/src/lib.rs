//! pdfp - PDF object syntax and file structure.
//!
//! Tokenizes PDF bytes, parses objects into [`PDFObject`] values and
//! resolves the trailer and cross-reference chain of a whole file.

pub mod atoms;
pub mod document;
pub mod error;
pub mod model;
pub mod parser;
pub mod span;

pub use atoms::{Atom, AtomTable};
pub use document::PDFDocument;
pub use error::{PdfError, Result};
pub use model::{PDFDict, PDFObjRef, PDFObject};
pub use parser::PDFParser;
pub use span::Span;
