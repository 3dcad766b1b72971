//! PDF object types.
//!
//! [`PDFObject`] is the value model for anything the object parser can
//! produce. Arrays and dicts own their elements, so `clone()` is a deep copy
//! and [`PDFObject::take`] moves a value out, leaving [`PDFObject::Nothing`]
//! behind. Strings borrow their raw bytes from the parsed buffer.

use crate::atoms::Atom;
use crate::error::{PdfError, Result};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::fmt;

/// Dictionary storage: unique atom keys, insertion order kept for display.
pub type PDFDict<'a> = IndexMap<Atom, PDFObject<'a>, FxBuildHasher>;

/// PDF Object types - the fundamental value type in PDF.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PDFObject<'a> {
    /// No object at all. Distinct from the PDF `null` object.
    #[default]
    Nothing,
    /// Null object
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Real (floating point) value
    Real(f64),
    /// Name object (e.g., /Type, /Font)
    Name(Atom),
    /// Bare keyword other than `true`, `false` and `null`
    Keyword(Atom),
    /// Literal string, raw bytes between the parentheses
    String(&'a [u8]),
    /// Hex string, raw bytes between the angle brackets
    HexString(&'a [u8]),
    /// Array of objects
    Array(Vec<Self>),
    /// Dictionary (name -> object mapping)
    Dict(PDFDict<'a>),
    /// Indirect object reference
    Ref(PDFObjRef),
}

impl<'a> PDFObject<'a> {
    /// Create an empty array.
    pub fn new_array() -> Self {
        Self::Array(Vec::new())
    }

    /// Create an empty dictionary.
    pub fn new_dict() -> Self {
        Self::Dict(PDFDict::default())
    }

    /// Create an indirect reference.
    pub const fn new_ref(objid: u32, genno: u32) -> Self {
        Self::Ref(PDFObjRef::new(objid, genno))
    }

    /// Move the value out, leaving `Nothing` in its place.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Check if this is a null object
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    pub const fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }

    pub const fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }

    pub const fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword(_))
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub const fn is_hexstring(&self) -> bool {
        matches!(self, Self::HexString(_))
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub const fn is_dict(&self) -> bool {
        matches!(self, Self::Dict(_))
    }

    pub const fn is_ref(&self) -> bool {
        matches!(self, Self::Ref(_))
    }

    /// Get as boolean
    pub const fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(self.type_error("bool")),
        }
    }

    /// Get as integer
    pub const fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            _ => Err(self.type_error("int")),
        }
    }

    /// Get as real (float)
    pub const fn as_real(&self) -> Result<f64> {
        match self {
            Self::Real(n) => Ok(*n),
            _ => Err(self.type_error("real")),
        }
    }

    /// Get numeric value (int or real coerced to f64)
    pub const fn as_num(&self) -> Result<f64> {
        match self {
            Self::Int(n) => Ok(*n as f64),
            Self::Real(n) => Ok(*n),
            _ => Err(self.type_error("number")),
        }
    }

    /// Get as name atom
    pub const fn as_name(&self) -> Result<Atom> {
        match self {
            Self::Name(a) => Ok(*a),
            _ => Err(self.type_error("name")),
        }
    }

    /// Get as keyword atom
    pub const fn as_keyword(&self) -> Result<Atom> {
        match self {
            Self::Keyword(a) => Ok(*a),
            _ => Err(self.type_error("keyword")),
        }
    }

    /// Get the raw bytes of a literal string
    pub const fn as_string(&self) -> Result<&'a [u8]> {
        match self {
            Self::String(s) => Ok(*s),
            _ => Err(self.type_error("string")),
        }
    }

    /// Get the raw bytes of a hex string
    pub const fn as_hexstring(&self) -> Result<&'a [u8]> {
        match self {
            Self::HexString(s) => Ok(*s),
            _ => Err(self.type_error("hexstring")),
        }
    }

    /// Get as array
    pub const fn as_array(&self) -> Result<&Vec<Self>> {
        match self {
            Self::Array(arr) => Ok(arr),
            _ => Err(self.type_error("array")),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Self>> {
        match self {
            Self::Array(arr) => Ok(arr),
            _ => Err(self.type_error("array")),
        }
    }

    /// Get as dictionary
    pub const fn as_dict(&self) -> Result<&PDFDict<'a>> {
        match self {
            Self::Dict(d) => Ok(d),
            _ => Err(self.type_error("dict")),
        }
    }

    pub fn as_dict_mut(&mut self) -> Result<&mut PDFDict<'a>> {
        match self {
            Self::Dict(d) => Ok(d),
            _ => Err(self.type_error("dict")),
        }
    }

    /// Get as object reference
    pub const fn as_ref(&self) -> Result<PDFObjRef> {
        match self {
            Self::Ref(r) => Ok(*r),
            _ => Err(self.type_error("ref")),
        }
    }

    /// Array element at `index`.
    pub fn get(&self, index: usize) -> Result<&Self> {
        let arr = self.as_array()?;
        arr.get(index).ok_or(PdfError::IndexOutOfBounds {
            index,
            len: arr.len(),
        })
    }

    /// Dictionary entry for `key`.
    pub fn get_key(&self, key: Atom) -> Result<&Self> {
        self.as_dict()?.get(&key).ok_or(PdfError::KeyNotFound(key))
    }

    /// Number of elements of an array or entries of a dict; 0 otherwise.
    pub fn len(&self) -> usize {
        match self {
            Self::Array(arr) => arr.len(),
            Self::Dict(d) => d.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get type name for error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nothing => "nothing",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Real(_) => "real",
            Self::Name(_) => "name",
            Self::Keyword(_) => "keyword",
            Self::String(_) => "string",
            Self::HexString(_) => "hexstring",
            Self::Array(_) => "array",
            Self::Dict(_) => "dict",
            Self::Ref(_) => "ref",
        }
    }

    const fn type_error(&self, expected: &'static str) -> PdfError {
        PdfError::TypeError {
            expected,
            got: self.type_name(),
        }
    }
}

/// PDF indirect object reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PDFObjRef {
    /// Object ID
    pub objid: u32,
    /// Generation number
    pub genno: u32,
}

impl PDFObjRef {
    /// Create a new object reference.
    pub const fn new(objid: u32, genno: u32) -> Self {
        Self { objid, genno }
    }
}

impl fmt::Display for PDFObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.objid, self.genno)
    }
}
