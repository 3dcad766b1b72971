//! Typed access to trailer dictionaries.

use crate::atoms::Atom;
use crate::error::{PdfError, Result};
use crate::model::objects::{PDFDict, PDFObjRef, PDFObject};

/// Read-only view over a trailer dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Trailer<'d, 'a> {
    dict: &'d PDFDict<'a>,
}

impl<'d, 'a> Trailer<'d, 'a> {
    /// Wrap `obj`, which must be a dict.
    pub fn new(obj: &'d PDFObject<'a>) -> Result<Self> {
        Ok(Self::from_dict(obj.as_dict()?))
    }

    pub const fn from_dict(dict: &'d PDFDict<'a>) -> Self {
        Self { dict }
    }

    pub const fn dict(&self) -> &'d PDFDict<'a> {
        self.dict
    }

    pub fn get(&self, name: Atom) -> Option<&'d PDFObject<'a>> {
        self.dict.get(&name)
    }

    /// Integer entry `name`, or `default` when absent.
    ///
    /// A present entry of another kind is a type error.
    pub fn get_integer(&self, name: Atom, default: i64) -> Result<i64> {
        match self.dict.get(&name) {
            Some(obj) => obj.as_int(),
            None => Ok(default),
        }
    }

    /// `/Size`: one greater than the highest object number.
    pub fn size(&self) -> Result<usize> {
        match self.dict.get(&Atom::SIZE) {
            Some(PDFObject::Int(n)) if *n > 0 => usize::try_from(*n).map_err(|_| PdfError::InvalidSize),
            _ => Err(PdfError::InvalidSize),
        }
    }

    /// `/Prev`: offset of the previous xref section.
    pub fn prev(&self) -> Result<Option<usize>> {
        let Some(obj) = self.dict.get(&Atom::PREV) else {
            return Ok(None);
        };
        let n = obj
            .as_int()
            .map_err(|e| PdfError::InvalidTrailer(format!("/Prev: {e}")))?;
        usize::try_from(n)
            .map(Some)
            .map_err(|_| PdfError::InvalidTrailer(format!("/Prev {n} is negative")))
    }

    /// `/Root`, if it is a reference.
    pub fn root(&self) -> Option<PDFObjRef> {
        self.get(Atom::ROOT)?.as_ref().ok()
    }

    /// `/Info`, if it is a reference.
    pub fn info(&self) -> Option<PDFObjRef> {
        self.get(Atom::INFO)?.as_ref().ok()
    }

    /// `/ID` file identifier array.
    pub fn id(&self) -> Option<&'d [PDFObject<'a>]> {
        self.get(Atom::ID)?.as_array().ok().map(Vec::as_slice)
    }

    pub fn is_encrypted(&self) -> bool {
        self.dict.contains_key(&Atom::ENCRYPT)
    }
}
