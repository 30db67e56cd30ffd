//! String interning for identifier deduplication.
//!
//! `classy` programs reference the same names (value names, type variables,
//! class names, labels) many times over; interning lets every namespace
//! newtype carry a cheap `Copy` id instead of an owned `String`.

use rustc_hash::FxHashMap;
use std::fmt;

/// An interned string. Equality and ordering compare the interned id, not
/// the text; use [`Interner::resolve`] to get the text back for display.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({})", self.0)
    }
}

/// A single-threaded string interner, matching `classy`'s strictly
/// sequential execution model (§5 of the specification).
#[derive(Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    ids: FxHashMap<Box<str>, Atom>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning its `Atom`. Interning the same text twice
    /// returns the same `Atom`.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&atom) = self.ids.get(text) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.ids.insert(boxed, atom);
        atom
    }

    /// Resolve an `Atom` back to its text. Panics if `atom` was not
    /// produced by this interner — an internal invariant violation, not a
    /// user-facing error.
    #[must_use]
    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }
}
