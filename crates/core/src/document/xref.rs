//! Cross-reference table types.

/// Whether an xref entry points at a live object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Liveness {
    /// `n` entry: the offset locates the object.
    InUse,
    /// `f` entry: the object number is on the free list.
    Free,
}

/// XRef entry - location of an object in the PDF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRefEntry {
    /// Byte offset in file. Only meaningful for in-use entries.
    pub offset: usize,
    /// Generation number
    pub genno: u32,
    pub liveness: Liveness,
}

impl XRefEntry {
    pub const fn in_use(offset: usize, genno: u32) -> Self {
        Self {
            offset,
            genno,
            liveness: Liveness::InUse,
        }
    }

    pub const fn free(next: usize, genno: u32) -> Self {
        Self {
            offset: next,
            genno,
            liveness: Liveness::Free,
        }
    }

    pub const fn is_in_use(&self) -> bool {
        matches!(self.liveness, Liveness::InUse)
    }
}

/// Subsection header: `count` entries for ids `first..first + count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRefHeader {
    pub first: u32,
    pub count: u32,
}

impl XRefHeader {
    pub const fn new(first: u32, count: u32) -> Self {
        Self { first, count }
    }
}

/// One visited link of the `/Prev` chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XRefSection {
    /// Byte offset the section was read from.
    pub offset: usize,
    pub headers: Vec<XRefHeader>,
    /// `/Prev` of the trailer that follows this section.
    pub prev: Option<usize>,
}

/// Cross-reference table for locating objects in a PDF.
///
/// Sized by the trailer's `/Size`. Sections are merged newest first, so the
/// first entry recorded for an id is the one that counts.
#[derive(Debug, Clone, Default)]
pub struct XRefTable {
    entries: Vec<Option<XRefEntry>>,
}

impl XRefTable {
    pub fn new(size: usize) -> Self {
        Self {
            entries: vec![None; size],
        }
    }

    /// Capacity of the table, i.e. the trailer's `/Size`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, objid: u32) -> Option<&XRefEntry> {
        self.entries.get(objid as usize)?.as_ref()
    }

    /// Record `entry` for `objid` unless an entry is already present.
    ///
    /// Returns true if the entry was stored. Ids outside the table are
    /// dropped with a warning.
    pub fn insert_if_absent(&mut self, objid: u32, entry: XRefEntry) -> bool {
        let Some(slot) = self.entries.get_mut(objid as usize) else {
            tracing::warn!(objid, size = self.entries.len(), "xref entry beyond /Size ignored");
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(entry);
        true
    }

    /// Live objects in id order.
    pub fn in_use(&self) -> impl Iterator<Item = (u32, &XRefEntry)> + '_ {
        self.iter().filter(|(_, entry)| entry.is_in_use())
    }

    /// All recorded entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &XRefEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(id, entry)| Some((id as u32, entry.as_ref()?)))
    }
}
