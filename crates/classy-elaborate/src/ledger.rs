//! The `NamespaceLedger` (spec §4.6): a monotone record of which value
//! names are overloaded (class members) and which are ordinary bindings.
//!
//! Once a name's mode is fixed it never changes; binding it again under
//! the other mode is rejected. This is what makes `let eq = 3` alongside
//! a class member `eq` an error rather than silent shadowing.

use rustc_hash::FxHashMap;

use classy_common::{ClassyError, Span, ValueName};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Normal,
    Overloaded,
}

#[derive(Default)]
pub struct NamespaceLedger {
    modes: FxHashMap<ValueName, Mode>,
}

impl NamespaceLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scheme binding: `Overloaded` if it carries any predicate,
    /// `Normal` otherwise.
    pub fn bind_scheme(&mut self, name: ValueName, has_predicates: bool, at: Span) -> Result<(), ClassyError> {
        let mode = if has_predicates { Mode::Overloaded } else { Mode::Normal };
        self.assert_and_set(name, mode, at)
    }

    /// Record a plain binding with no scheme of its own (synthetic
    /// dictionary values and accessors): always `Normal`.
    pub fn bind_simple(&mut self, name: ValueName, at: Span) -> Result<(), ClassyError> {
        self.assert_and_set(name, Mode::Normal, at)
    }

    fn assert_and_set(&mut self, name: ValueName, mode: Mode, at: Span) -> Result<(), ClassyError> {
        if let Some(existing) = self.modes.get(&name) {
            if *existing != mode {
                return Err(ClassyError::OverloadedSymbolCannotBeBound { name: format!("{name:?}"), at });
            }
            return Ok(());
        }
        self.modes.insert(name, mode);
        Ok(())
    }
}
