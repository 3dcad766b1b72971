//! PDF Document - main entry point for PDF parsing.
//!
//! Handles:
//! - Header check
//! - Trailer discovery (the last `trailer` keyword in the file)
//! - XRef table parsing along the `/Prev` chain
//! - Single object lookup

use super::trailer::Trailer;
use super::xref::{XRefEntry, XRefHeader, XRefSection, XRefTable};
use crate::atoms::{Atom, AtomTable};
use crate::error::{PdfError, Result};
use crate::model::objects::{PDFDict, PDFObjRef, PDFObject};
use crate::parser::lexer::{TokenKind, is_delimiter, is_whitespace, peek_token};
use crate::parser::pdf_parser::PDFParser;
use crate::span::Span;
use rustc_hash::FxHashSet;

const HEADER: &[u8] = b"%PDF-1.";

/// A parsed PDF file: trailer, object table and the atoms seen so far.
///
/// Borrows the whole file; nothing is copied out of it.
pub struct PDFDocument<'a> {
    data: &'a [u8],
    atoms: AtomTable<'a>,
    trailer: PDFDict<'a>,
    startxref: usize,
    xref: XRefTable,
    sections: Vec<XRefSection>,
}

impl<'a> PDFDocument<'a> {
    /// Parse the file structure of `data`.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let input = Span::new(data);
        if !input.starts_with(HEADER) {
            return Err(PdfError::MissingHeader);
        }
        let at = input.find_last(b"trailer");
        if at.is_empty() {
            return Err(PdfError::MissingTrailer);
        }

        let mut atoms = AtomTable::new();
        let (trailer, startxref) = read_trailer(at, &mut atoms)?;
        let size = Trailer::from_dict(&trailer).size()?;
        // Every object takes at least one byte of the file.
        if size > data.len() {
            tracing::warn!(size, len = data.len(), "trailer /Size exceeds file length");
            return Err(PdfError::InvalidSize);
        }
        tracing::debug!(offset = at.offset(), size, startxref, "found trailer");

        let mut doc = Self {
            data,
            atoms,
            trailer,
            startxref,
            xref: XRefTable::new(size),
            sections: Vec::new(),
        };
        doc.load_xrefs()?;
        Ok(doc)
    }

    /// Walk the xref chain from `startxref`, newest section first.
    fn load_xrefs(&mut self) -> Result<()> {
        let mut visited = FxHashSet::default();
        let mut pos = self.startxref;
        // The newest section may have no trailer of its own right after it.
        let mut fallback_prev = Trailer::from_dict(&self.trailer).prev()?;

        loop {
            if !visited.insert(pos) {
                tracing::warn!(offset = pos, "xref /Prev chain revisits an offset, stopping");
                break;
            }
            let section = self.load_xref_section(pos, fallback_prev.take())?;
            let prev = section.prev;
            self.sections.push(section);
            match prev {
                Some(prev) => pos = prev,
                None => break,
            }
        }

        Ok(())
    }

    /// Load one traditional xref section and the trailer that follows it.
    fn load_xref_section(&mut self, pos: usize, fallback_prev: Option<usize>) -> Result<XRefSection> {
        let mut parser = PDFParser::new(Span::new(self.data).skip(pos), &mut self.atoms);

        if is_keyword(&parser, b"xref") {
            parser.next_object()?;
        }

        let mut headers = Vec::new();
        let mut merged = 0usize;
        while let Some(header) = read_header(&mut parser) {
            for i in 0..header.count {
                let entry_pos = parser.tell();
                let objid = header.first.checked_add(i).ok_or(PdfError::SyntaxError {
                    pos: entry_pos,
                    msg: format!("object id {} + {i} out of range", header.first),
                })?;
                let entry = read_entry(&mut parser)?;
                if self.xref.insert_if_absent(objid, entry) {
                    merged += 1;
                }
            }
            headers.push(header);
        }

        let prev = if is_keyword(&parser, b"trailer") {
            parser.next_object()?;
            let dict = parser.expect_dict()?;
            Trailer::new(&dict)?.prev()?
        } else {
            fallback_prev
        };

        tracing::debug!(
            offset = pos,
            subsections = headers.len(),
            merged,
            ?prev,
            "loaded xref section"
        );

        Ok(XRefSection {
            offset: pos,
            headers,
            prev,
        })
    }

    /// Parse the object stored under `objid`.
    ///
    /// Reads `objid gen obj` at the entry's offset and returns the object
    /// after it. References inside the object are left unresolved.
    pub fn get_object(&mut self, objid: u32) -> Result<PDFObject<'a>> {
        let entry = self
            .xref
            .get(objid)
            .filter(|entry| entry.is_in_use())
            .copied()
            .ok_or(PdfError::ObjectNotFound(objid))?;
        if entry.offset >= self.data.len() {
            return Err(PdfError::SyntaxError {
                pos: entry.offset,
                msg: format!("object {objid} offset exceeds file size {}", self.data.len()),
            });
        }

        let mut parser = PDFParser::new(Span::new(self.data).skip(entry.offset), &mut self.atoms);
        let found_id = parser.expect_integer()?;
        let found_gen = parser.expect_integer()?;
        if found_id != i64::from(objid) || found_gen != i64::from(entry.genno) {
            return Err(PdfError::SyntaxError {
                pos: entry.offset,
                msg: format!(
                    "expected object {objid} {}, found {found_id} {found_gen}",
                    entry.genno
                ),
            });
        }
        parser.expect_keyword(Atom::OBJ)?;
        let obj = parser.next_object()?;
        tracing::trace!(objid, offset = entry.offset, kind = obj.type_name(), "loaded object");
        Ok(obj)
    }

    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Version from the header, e.g. `1.4`.
    pub fn version(&self) -> &'a [u8] {
        Span::new(self.data)
            .skip(HEADER.len() - 2)
            .take_until(|b| is_whitespace(b) || is_delimiter(b))
            .as_bytes()
    }

    /// The newest trailer dictionary.
    pub const fn trailer(&self) -> Trailer<'_, 'a> {
        Trailer::from_dict(&self.trailer)
    }

    pub const fn trailer_dict(&self) -> &PDFDict<'a> {
        &self.trailer
    }

    /// Offset named by the last `startxref`.
    pub const fn startxref(&self) -> usize {
        self.startxref
    }

    pub const fn xref(&self) -> &XRefTable {
        &self.xref
    }

    /// Capacity of the object table (`/Size`).
    pub fn size(&self) -> usize {
        self.xref.len()
    }

    pub fn root(&self) -> Option<PDFObjRef> {
        self.trailer().root()
    }

    pub fn info(&self) -> Option<PDFObjRef> {
        self.trailer().info()
    }

    /// Visited xref sections, newest first.
    pub fn sections(&self) -> &[XRefSection] {
        &self.sections
    }

    pub const fn atoms(&self) -> &AtomTable<'a> {
        &self.atoms
    }
}

/// Parse `trailer << ... >> startxref N` at `input`.
fn read_trailer<'a>(input: Span<'a>, atoms: &mut AtomTable<'a>) -> Result<(PDFDict<'a>, usize)> {
    let mut parser = PDFParser::new(input, atoms);
    parser.expect_keyword(Atom::TRAILER)?;
    let PDFObject::Dict(trailer) = parser.next_object()? else {
        return Err(PdfError::InvalidTrailer("no trailer dictionary".into()));
    };
    parser.expect_keyword(Atom::STARTXREF)?;
    let startxref = parser
        .next_object()?
        .as_int()
        .map_err(|_| PdfError::InvalidTrailer("startxref is not an integer".into()))?;
    let startxref = usize::try_from(startxref)
        .map_err(|_| PdfError::InvalidTrailer(format!("startxref {startxref} is negative")))?;
    Ok((trailer, startxref))
}

fn is_keyword(parser: &PDFParser<'_, '_>, keyword: &[u8]) -> bool {
    let token = peek_token(parser.remainder());
    token.is(TokenKind::Keyword) && token.value == *keyword
}

/// Read a `first count` subsection header.
///
/// Anything else ends the section: the cursor is restored and `None`
/// returned.
fn read_header(parser: &mut PDFParser<'_, '_>) -> Option<XRefHeader> {
    let saved = parser.remainder();
    let header = (|| {
        let first = u32::try_from(parser.expect_integer().ok()?).ok()?;
        let count = u32::try_from(parser.expect_integer().ok()?).ok()?;
        Some(XRefHeader::new(first, count))
    })();
    if header.is_none() {
        parser.seek(saved);
    }
    header
}

/// Read one `offset generation n|f` entry.
fn read_entry(parser: &mut PDFParser<'_, '_>) -> Result<XRefEntry> {
    let pos = parser.tell();
    let offset = parser.expect_integer()?;
    let genno = parser.expect_integer()?;
    let flag = parser.next_object()?.as_keyword()?;

    let (Ok(offset), Ok(genno)) = (usize::try_from(offset), u32::try_from(genno)) else {
        return Err(PdfError::SyntaxError {
            pos,
            msg: format!("xref entry {offset} {genno} out of range"),
        });
    };
    match flag {
        Atom::N => Ok(XRefEntry::in_use(offset, genno)),
        Atom::F => Ok(XRefEntry::free(offset, genno)),
        other => Err(PdfError::SyntaxError {
            pos,
            msg: format!("xref entry flag must be n or f, got {other}"),
        }),
    }
}
