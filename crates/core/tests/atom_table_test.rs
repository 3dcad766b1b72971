//! Tests for atom interning.

use pdfp_core::atoms::{Atom, AtomTable};
use pdfp_core::error::PdfError;

#[test]
fn test_intern_is_idempotent() {
    let mut atoms = AtomTable::new();
    let a = atoms.intern(b"Catalog");
    let b = atoms.intern(b"Catalog");
    assert_eq!(a, b);
    assert_eq!(atoms.len(), 1);
}

#[test]
fn test_distinct_content_distinct_atoms() {
    let mut atoms = AtomTable::new();
    let a = atoms.intern(b"Pages");
    let b = atoms.intern(b"Page");
    assert_ne!(a, b);
    assert_ne!(atoms.intern(b"Root"), a);
}

#[test]
fn test_well_known_atoms_are_static() {
    let mut atoms = AtomTable::new();
    assert_eq!(atoms.intern(b"trailer"), Atom::TRAILER);
    assert_eq!(atoms.intern(b"Size"), Atom::SIZE);
    assert_eq!(atoms.find(b"startxref"), Some(Atom::STARTXREF));
    assert!(atoms.is_empty());
}

#[test]
fn test_find_does_not_insert() {
    let mut atoms = AtomTable::new();
    assert_eq!(atoms.find(b"MediaBox"), None);
    assert!(atoms.is_empty());
    let a = atoms.intern(b"MediaBox");
    assert_eq!(atoms.find(b"MediaBox"), Some(a));
}

#[test]
fn test_add_duplicate_fails() {
    let mut atoms = AtomTable::new();
    atoms.add(b"Kids", Atom::new(70_000)).unwrap();
    assert_eq!(
        atoms.add(b"Kids", Atom::new(70_001)),
        Err(PdfError::DuplicateAtom("Kids".into()))
    );
    assert!(matches!(
        atoms.add(b"Root", Atom::new(70_002)),
        Err(PdfError::DuplicateAtom(_))
    ));
}

#[test]
fn test_add_rejects_used_value() {
    let mut atoms = AtomTable::new();
    atoms.add(b"Kids", Atom::new(70_000)).unwrap();
    assert!(atoms.add(b"Count", Atom::new(70_000)).is_err());
    assert!(atoms.add(b"Count", Atom::TRAILER).is_err());
    assert_eq!(atoms.add(b"Count", Atom::NONE), Err(PdfError::ReservedAtom));
}

#[test]
fn test_with_atoms_and_resolve() {
    let atoms = AtomTable::with_atoms([
        (&b"Kids"[..], Atom::new(70_000)),
        (&b"Count"[..], Atom::new(70_001)),
    ])
    .unwrap();
    assert_eq!(atoms.find(b"Count"), Some(Atom::new(70_001)));
    assert_eq!(atoms.resolve(Atom::new(70_000)), Some(&b"Kids"[..]));
    assert_eq!(atoms.resolve(Atom::ROOT), Some(&b"Root"[..]));
    assert_eq!(atoms.resolve(Atom::new(99_999)), None);
}

#[test]
fn test_with_atoms_propagates_duplicates() {
    let result = AtomTable::with_atoms([
        (&b"Kids"[..], Atom::new(70_000)),
        (&b"Kids"[..], Atom::new(70_001)),
    ]);
    assert!(matches!(result, Err(PdfError::DuplicateAtom(_))));
}
