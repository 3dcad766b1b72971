//! Atom table: interning of PDF names and keywords.
//!
//! Two tiers back the table. Well-known PDF keywords and names have fixed
//! ids below [`Atom::FIRST_DYNAMIC`] and are resolved by a fixed match.
//! Everything else is assigned a fresh id on first sight. Within one table,
//! equal content always yields the same atom and different content yields
//! different atoms.

use crate::error::{PdfError, Result};
use rustc_hash::FxHashMap;
use std::fmt;

/// Small integer identifying interned byte content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(u32);

impl Atom {
    /// Reserved "no atom" value. Never handed out by a table.
    pub const NONE: Atom = Atom(0);

    /// First id handed out by the dynamic tier.
    pub const FIRST_DYNAMIC: u32 = 0x10000;

    // Keywords
    pub const F: Atom = Atom(1001);
    pub const FALSE: Atom = Atom(1002);
    pub const N: Atom = Atom(1003);
    pub const NULL: Atom = Atom(1004);
    pub const R: Atom = Atom(1005);
    pub const TRAILER: Atom = Atom(1006);
    pub const TRUE: Atom = Atom(1007);
    pub const STARTXREF: Atom = Atom(1008);
    pub const XREF: Atom = Atom(1009);
    pub const OBJ: Atom = Atom(1010);
    pub const ENDOBJ: Atom = Atom(1011);
    pub const STREAM: Atom = Atom(1012);
    pub const ENDSTREAM: Atom = Atom(1013);

    // Names
    pub const ID: Atom = Atom(2001);
    pub const INFO: Atom = Atom(2002);
    pub const PREV: Atom = Atom(2003);
    pub const ROOT: Atom = Atom(2004);
    pub const SIZE: Atom = Atom(2005);
    pub const ENCRYPT: Atom = Atom(2006);
    pub const TYPE: Atom = Atom(2007);
    pub const LENGTH: Atom = Atom(2008);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Look up the static tier.
    pub fn well_known(key: &[u8]) -> Option<Self> {
        let atom = match key {
            b"f" => Self::F,
            b"false" => Self::FALSE,
            b"n" => Self::N,
            b"null" => Self::NULL,
            b"R" => Self::R,
            b"trailer" => Self::TRAILER,
            b"true" => Self::TRUE,
            b"startxref" => Self::STARTXREF,
            b"xref" => Self::XREF,
            b"obj" => Self::OBJ,
            b"endobj" => Self::ENDOBJ,
            b"stream" => Self::STREAM,
            b"endstream" => Self::ENDSTREAM,
            b"ID" => Self::ID,
            b"Info" => Self::INFO,
            b"Prev" => Self::PREV,
            b"Root" => Self::ROOT,
            b"Size" => Self::SIZE,
            b"Encrypt" => Self::ENCRYPT,
            b"Type" => Self::TYPE,
            b"Length" => Self::LENGTH,
            _ => return None,
        };
        Some(atom)
    }

    /// Content of a static-tier atom.
    pub fn well_known_bytes(self) -> Option<&'static [u8]> {
        let bytes: &'static [u8] = match self {
            Self::F => b"f",
            Self::FALSE => b"false",
            Self::N => b"n",
            Self::NULL => b"null",
            Self::R => b"R",
            Self::TRAILER => b"trailer",
            Self::TRUE => b"true",
            Self::STARTXREF => b"startxref",
            Self::XREF => b"xref",
            Self::OBJ => b"obj",
            Self::ENDOBJ => b"endobj",
            Self::STREAM => b"stream",
            Self::ENDSTREAM => b"endstream",
            Self::ID => b"ID",
            Self::INFO => b"Info",
            Self::PREV => b"Prev",
            Self::ROOT => b"Root",
            Self::SIZE => b"Size",
            Self::ENCRYPT => b"Encrypt",
            Self::TYPE => b"Type",
            Self::LENGTH => b"Length",
            _ => return None,
        };
        Some(bytes)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.well_known_bytes() {
            Some(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// Dynamic tier of the atom table, scoped to one parse session.
///
/// Keys borrow from the parsed buffer, so the table cannot outlive it.
#[derive(Debug)]
pub struct AtomTable<'a> {
    table: FxHashMap<&'a [u8], Atom>,
    reverse: FxHashMap<Atom, &'a [u8]>,
    next: u32,
}

impl Default for AtomTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> AtomTable<'a> {
    pub fn new() -> Self {
        Self {
            table: FxHashMap::default(),
            reverse: FxHashMap::default(),
            next: Atom::FIRST_DYNAMIC,
        }
    }

    /// Create a table and register each `(key, atom)` pair with [`add`](Self::add).
    pub fn with_atoms<I>(atoms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a [u8], Atom)>,
    {
        let mut table = Self::new();
        for (key, atom) in atoms {
            table.add(key, atom)?;
        }
        Ok(table)
    }

    /// Return the atom for `key`, allocating a fresh one if needed.
    pub fn intern(&mut self, key: &'a [u8]) -> Atom {
        if let Some(atom) = self.find(key) {
            return atom;
        }
        // Explicit registrations may already occupy ids in the dynamic range.
        while self.reverse.contains_key(&Atom(self.next)) {
            self.next += 1;
        }
        let atom = Atom(self.next);
        self.next += 1;
        self.table.insert(key, atom);
        self.reverse.insert(atom, key);
        atom
    }

    /// Register `key` under an explicit atom value.
    pub fn add(&mut self, key: &'a [u8], atom: Atom) -> Result<()> {
        if atom.is_none() {
            return Err(PdfError::ReservedAtom);
        }
        if self.find(key).is_some()
            || atom.well_known_bytes().is_some()
            || self.reverse.contains_key(&atom)
        {
            return Err(PdfError::DuplicateAtom(
                String::from_utf8_lossy(key).into_owned(),
            ));
        }
        self.table.insert(key, atom);
        self.reverse.insert(atom, key);
        Ok(())
    }

    /// Look up `key` without inserting it.
    pub fn find(&self, key: &[u8]) -> Option<Atom> {
        Atom::well_known(key).or_else(|| self.table.get(key).copied())
    }

    /// Content of an atom, if this table (or the static tier) knows it.
    pub fn resolve(&self, atom: Atom) -> Option<&'a [u8]> {
        atom.well_known_bytes()
            .or_else(|| self.reverse.get(&atom).copied())
    }

    /// Number of atoms in the dynamic tier.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
