//! PDF model types.
//!
//! - `objects` - PDF object types (PDFObject, PDFDict, PDFObjRef)

pub mod objects;

// Re-export main types for convenience
pub use objects::{PDFDict, PDFObjRef, PDFObject};
