//! PDF Document module - file structure.
//!
//! This module contains:
//! - `catalog` - header check, trailer discovery, xref chain (PDFDocument)
//! - `trailer` - typed view over trailer dictionaries
//! - `xref` - cross-reference entries and the object table

pub mod catalog;
pub mod trailer;
pub mod xref;

pub use catalog::PDFDocument;
pub use trailer::Trailer;
pub use xref::{Liveness, XRefEntry, XRefHeader, XRefSection, XRefTable};
