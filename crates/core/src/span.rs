//! Byte spans over a caller-owned buffer.
//!
//! A [`Span`] never owns memory. It remembers where it starts inside the
//! buffer it was cut from, so positions can be reported in error messages.
//! All operations clamp instead of panicking; only [`Span::first`] fails.

use crate::error::{PdfError, Result};
use memchr::memmem;
use std::fmt;

/// Immutable, non-owning view over a range of bytes.
#[derive(Clone, Copy, Default)]
pub struct Span<'a> {
    data: &'a [u8],
    /// Offset of `data[0]` within the original buffer.
    offset: usize,
}

impl<'a> Span<'a> {
    /// Create a span covering the whole buffer.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// The bytes covered by this span.
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Position of the first byte within the original buffer.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// First byte of the span.
    pub fn first(&self) -> Result<u8> {
        self.data.first().copied().ok_or(PdfError::UnexpectedEof {
            context: "span",
        })
    }

    /// Byte at `index`, if present.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Drop the first byte. No-op on an empty span.
    pub fn rest(&self) -> Self {
        self.skip(1)
    }

    /// The first `n` bytes (clamped).
    pub fn left(&self, n: usize) -> Self {
        let n = n.min(self.data.len());
        Self {
            data: &self.data[..n],
            offset: self.offset,
        }
    }

    /// Everything after the first `n` bytes (clamped).
    pub fn remove_left(&self, n: usize) -> Self {
        self.skip(n)
    }

    /// Skip `n` bytes (clamped).
    pub fn skip(&self, n: usize) -> Self {
        let n = n.min(self.data.len());
        Self {
            data: &self.data[n..],
            offset: self.offset + n,
        }
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.data.starts_with(prefix)
    }

    /// Remaining suffix after skipping bytes matching `pred`.
    pub fn skip_while(&self, pred: impl Fn(u8) -> bool) -> Self {
        self.skip(self.count_while(pred))
    }

    /// Remaining suffix starting at the first byte matching `pred`.
    pub fn skip_until(&self, pred: impl Fn(u8) -> bool) -> Self {
        self.skip(self.count_while(|b| !pred(b)))
    }

    /// Prefix of bytes matching `pred`.
    pub fn take_while(&self, pred: impl Fn(u8) -> bool) -> Self {
        self.left(self.count_while(pred))
    }

    /// Prefix up to (not including) the first byte matching `pred`.
    pub fn take_until(&self, pred: impl Fn(u8) -> bool) -> Self {
        self.left(self.count_while(|b| !pred(b)))
    }

    /// Suffix starting at the last occurrence of `needle`, or an empty span.
    pub fn find_last(&self, needle: &[u8]) -> Self {
        match memmem::rfind(self.data, needle) {
            Some(pos) => self.skip(pos),
            None => self.skip(self.data.len()),
        }
    }

    fn count_while(&self, pred: impl Fn(u8) -> bool) -> usize {
        self.data
            .iter()
            .position(|&b| !pred(b))
            .unwrap_or(self.data.len())
    }
}

impl PartialEq for Span<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Span<'_> {}

impl PartialEq<[u8]> for Span<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.data == other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Span<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.data == other.as_slice()
    }
}

impl PartialEq<&str> for Span<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.data == other.as_bytes()
    }
}

impl<'a> From<&'a [u8]> for Span<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({}, {:?})", self.offset, String::from_utf8_lossy(self.data))
    }
}
