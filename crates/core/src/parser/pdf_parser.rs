//! PDF parser - converts tokens to PDF objects.
//!
//! Recursive descent over [`next_token`]. Arrays and dicts are collected
//! with `parse_until`, which also folds `id gen R` into a single reference:
//! whenever an `R` keyword shows up, the two objects collected just before
//! it are replaced by a [`PDFObjRef`].

use super::lexer::{Token, TokenKind, next_token, peek_token};
use crate::atoms::{Atom, AtomTable};
use crate::error::{PdfError, Result};
use crate::model::objects::{PDFDict, PDFObjRef, PDFObject};
use crate::span::Span;

/// Maximum nesting of arrays and dicts.
pub const MAX_NESTING: usize = 256;

/// PDF Parser - parses PDF object syntax
///
/// Holds a cursor into the input and borrows the session's atom table, which
/// it grows as new names and keywords are seen.
pub struct PDFParser<'a, 't> {
    input: Span<'a>,
    atoms: &'t mut AtomTable<'a>,
    depth: usize,
}

impl<'a, 't> PDFParser<'a, 't> {
    pub fn new(input: Span<'a>, atoms: &'t mut AtomTable<'a>) -> Self {
        Self {
            input,
            atoms,
            depth: 0,
        }
    }

    /// Unconsumed input.
    pub const fn remainder(&self) -> Span<'a> {
        self.input
    }

    /// Current position in the original buffer.
    pub const fn tell(&self) -> usize {
        self.input.offset()
    }

    /// Move the cursor, e.g. to retry from a saved position.
    pub const fn seek(&mut self, input: Span<'a>) {
        self.input = input;
    }

    pub fn atoms(&self) -> &AtomTable<'a> {
        &*self.atoms
    }

    fn next_token(&mut self) -> Token<'a> {
        let (token, rest) = next_token(self.input);
        self.input = rest;
        token
    }

    /// Parse next PDF object.
    ///
    /// Returns [`PDFObject::Nothing`] once the input is exhausted.
    pub fn next_object(&mut self) -> Result<PDFObject<'a>> {
        let token = self.next_token();
        self.token_to_object(token)
    }

    /// Require the next object to be the keyword `keyword`.
    pub fn expect_keyword(&mut self, keyword: Atom) -> Result<()> {
        let pos = self.input.offset();
        let found = self.next_object()?.as_keyword()?;
        if found != keyword {
            return Err(PdfError::SyntaxError {
                pos,
                msg: format!("expected keyword {keyword}, got {found}"),
            });
        }
        Ok(())
    }

    /// Require the next object to be an integer and return it.
    pub fn expect_integer(&mut self) -> Result<i64> {
        self.next_object()?.as_int()
    }

    /// Require the next object to be a dictionary and return it.
    pub fn expect_dict(&mut self) -> Result<PDFObject<'a>> {
        let obj = self.next_object()?;
        obj.as_dict()?;
        Ok(obj)
    }

    /// Convert a token to a PDF object
    fn token_to_object(&mut self, token: Token<'a>) -> Result<PDFObject<'a>> {
        let pos = token.value.offset();
        match token.kind {
            TokenKind::EndOfStream => Ok(PDFObject::Nothing),
            TokenKind::Bad => Err(PdfError::TokenError {
                pos,
                msg: format!(
                    "unexpected {:?}",
                    String::from_utf8_lossy(token.value.as_bytes())
                ),
            }),
            TokenKind::Keyword => {
                let atom = self.atoms.intern(token.value.as_bytes());
                Ok(match atom {
                    Atom::NULL => PDFObject::Null,
                    Atom::TRUE => PDFObject::Bool(true),
                    Atom::FALSE => PDFObject::Bool(false),
                    _ => PDFObject::Keyword(atom),
                })
            }
            TokenKind::Name => Ok(PDFObject::Name(self.atoms.intern(token.value.as_bytes()))),
            TokenKind::String => Ok(PDFObject::String(token.value.as_bytes())),
            TokenKind::HexString => Ok(PDFObject::HexString(token.value.as_bytes())),
            TokenKind::Number => parse_number(token.value),
            TokenKind::ArrayBegin => self.parse_array(pos),
            TokenKind::DictBegin => self.parse_dict(pos),
            TokenKind::ArrayEnd => Err(PdfError::SyntaxError {
                pos,
                msg: "unexpected array end".into(),
            }),
            TokenKind::DictEnd => Err(PdfError::SyntaxError {
                pos,
                msg: "unexpected dict end".into(),
            }),
        }
    }

    /// Collect objects until a token of kind `end`, folding `id gen R`.
    fn parse_until(
        &mut self,
        end: TokenKind,
        context: &'static str,
        result: &mut Vec<PDFObject<'a>>,
    ) -> Result<()> {
        loop {
            let token = peek_token(self.input);
            match token.kind {
                kind if kind == end => {
                    self.next_token();
                    return Ok(());
                }
                TokenKind::EndOfStream => return Err(PdfError::UnexpectedEof { context }),
                TokenKind::Keyword if Atom::well_known(token.value.as_bytes()) == Some(Atom::R) => {
                    self.next_token();
                    generate_reference(result, token.value.offset())?;
                }
                _ => result.push(self.next_object()?),
            }
        }
    }

    fn enter(&mut self, pos: usize) -> Result<()> {
        if self.depth >= MAX_NESTING {
            return Err(PdfError::SyntaxError {
                pos,
                msg: format!("nesting deeper than {MAX_NESTING}"),
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Parse array contents until ]
    fn parse_array(&mut self, pos: usize) -> Result<PDFObject<'a>> {
        self.enter(pos)?;
        let mut arr = Vec::new();
        let result = self.parse_until(TokenKind::ArrayEnd, "array", &mut arr);
        self.depth -= 1;
        result?;
        Ok(PDFObject::Array(arr))
    }

    /// Parse dict contents until >>
    fn parse_dict(&mut self, pos: usize) -> Result<PDFObject<'a>> {
        self.enter(pos)?;
        let mut items = Vec::new();
        let result = self.parse_until(TokenKind::DictEnd, "dict", &mut items);
        self.depth -= 1;
        result?;

        let mut dict = PDFDict::default();
        let mut iter = items.into_iter();
        while let Some(key) = iter.next() {
            // Key must be a literal name
            let PDFObject::Name(name) = key else {
                return Err(PdfError::SyntaxError {
                    pos,
                    msg: format!("dict key is a {}, not a name", key.type_name()),
                });
            };
            let Some(value) = iter.next() else {
                tracing::debug!(pos, key = %name, "dropping dict key without value");
                break;
            };
            if dict.insert(name, value).is_some() {
                tracing::debug!(pos, key = %name, "duplicate dict key, last value wins");
            }
        }

        Ok(PDFObject::Dict(dict))
    }
}

/// Replace the two objects at the end of `objects` with a reference.
fn generate_reference(objects: &mut Vec<PDFObject<'_>>, pos: usize) -> Result<()> {
    if objects.len() < 2 {
        return Err(PdfError::SyntaxError {
            pos,
            msg: "R needs an object number and a generation".into(),
        });
    }
    let genno = objects.pop();
    let objid = objects.pop();
    let (Some(PDFObject::Int(objid)), Some(PDFObject::Int(genno))) = (objid, genno) else {
        return Err(PdfError::SyntaxError {
            pos,
            msg: "R operands must be integers".into(),
        });
    };
    let (Ok(objid), Ok(genno)) = (u32::try_from(objid), u32::try_from(genno)) else {
        return Err(PdfError::SyntaxError {
            pos,
            msg: format!("reference {objid} {genno} R out of range"),
        });
    };
    objects.push(PDFObject::Ref(PDFObjRef::new(objid, genno)));
    Ok(())
}

/// Parse a number token into an integer or real.
///
/// An optional leading sign is followed by digits and at most one decimal
/// point. Fractional digits beyond what an `i64` accumulator holds are
/// dropped; an integer part that overflows is an error.
pub fn parse_number<'a>(token: Span<'_>) -> Result<PDFObject<'a>> {
    let pos = token.offset();
    let bytes = token.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i64 = 0;
    let mut decimal = false;
    let mut divisor = 1.0f64;

    for &c in digits {
        match c {
            b'.' if !decimal => decimal = true,
            b'.' => {
                return Err(PdfError::NumberError {
                    pos,
                    msg: "second decimal point".into(),
                });
            }
            b'+' | b'-' => {
                return Err(PdfError::NumberError {
                    pos,
                    msg: "embedded sign".into(),
                });
            }
            d @ b'0'..=b'9' => {
                let next = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(i64::from(d - b'0')));
                match next {
                    Some(v) => {
                        value = v;
                        if decimal {
                            divisor *= 10.0;
                        }
                    }
                    None if decimal => {}
                    None => {
                        return Err(PdfError::NumberError {
                            pos,
                            msg: "integer overflow".into(),
                        });
                    }
                }
            }
            _ => {
                return Err(PdfError::NumberError {
                    pos,
                    msg: "invalid digit".into(),
                });
            }
        }
    }

    if decimal {
        let sign = if negative { -1.0 } else { 1.0 };
        Ok(PDFObject::Real(sign * value as f64 / divisor))
    } else {
        Ok(PDFObject::Int(if negative { -value } else { value }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(s: &str) -> Result<PDFObject<'static>> {
        parse_number(Span::new(s.as_bytes()))
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(number("1").unwrap(), PDFObject::Int(1));
        assert_eq!(number("-17").unwrap(), PDFObject::Int(-17));
        assert_eq!(number("-1.0").unwrap(), PDFObject::Real(-1.0));
        assert_eq!(number("+2.5").unwrap(), PDFObject::Real(2.5));
        assert_eq!(number(".5").unwrap(), PDFObject::Real(0.5));
    }

    #[test]
    fn test_parse_number_rejects_malformed() {
        assert!(matches!(number("1.2.3"), Err(PdfError::NumberError { .. })));
        assert!(matches!(number("1-2"), Err(PdfError::NumberError { .. })));
        assert!(matches!(
            number("99999999999999999999"),
            Err(PdfError::NumberError { .. })
        ));
    }

    #[test]
    fn test_parse_number_rejects_non_digits() {
        for s in ["1 ", "1a", "/", "12e3"] {
            assert!(
                matches!(number(s), Err(PdfError::NumberError { .. })),
                "{s:?} should not parse"
            );
        }
    }

    #[test]
    fn test_long_fraction_is_truncated() {
        let v = number("0.33333333333333333333333").unwrap().as_real().unwrap();
        assert!((v - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_nesting_limit() {
        let data = "[".repeat(MAX_NESTING + 1);
        let mut atoms = AtomTable::new();
        let mut parser = PDFParser::new(Span::new(data.as_bytes()), &mut atoms);
        assert!(matches!(
            parser.next_object(),
            Err(PdfError::SyntaxError { .. })
        ));
    }
}
