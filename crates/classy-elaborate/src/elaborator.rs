//! The elaborator's own state: an interner, the well-known names it needs
//! to build arrow types without a parser's help, the namespace ledger, and
//! a fresh-name counter for the dictionary parameters it mints.

use classy_common::{Interner, Span, ValueName, WellKnownNames};
use classy_types::{ClassPredicate, Type};

use crate::ledger::NamespaceLedger;
use crate::naming;
use crate::resolve::AmbientCtx;

/// One `Elaborator` lives for a whole compilation run, the way
/// `classy-infer`'s `Generator` does — fresh dictionary-parameter names
/// must never collide across the whole program, not just within one
/// definition.
pub struct Elaborator<'a> {
    pub(crate) interner: &'a mut Interner,
    pub(crate) well_known: WellKnownNames,
    ledger: NamespaceLedger,
    counter: u64,
}

impl<'a> Elaborator<'a> {
    #[must_use]
    pub fn new(interner: &'a mut Interner, well_known: WellKnownNames) -> Self {
        Elaborator { interner, well_known, ledger: NamespaceLedger::new(), counter: 0 }
    }

    #[must_use]
    pub fn ledger(&self) -> &NamespaceLedger {
        &self.ledger
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut NamespaceLedger {
        &mut self.ledger
    }

    pub(crate) fn fresh_value_name(&mut self, prefix: &str) -> ValueName {
        let label = format!("${prefix}{}", self.counter);
        self.counter += 1;
        ValueName::new(self.interner.intern(&label))
    }

    /// Mint one fresh dictionary parameter per predicate in `context`,
    /// recording each in an [`AmbientCtx`] keyed by the variable it
    /// witnesses, alongside the `(name, type)` pairs the caller lambda-
    /// abstracts over.
    pub(crate) fn bind_ambient(&mut self, context: &[ClassPredicate], at: Span) -> (AmbientCtx, Vec<(ValueName, Type)>) {
        let mut ambient: AmbientCtx = rustc_hash::FxHashMap::default();
        let mut params = Vec::with_capacity(context.len());
        for pred in context {
            let dict_var = self.fresh_value_name("d");
            let dict_ty = Type::App(
                at,
                naming::class_type_name(self.interner, pred.class),
                smallvec::smallvec![Type::Var(at, pred.variable)],
            );
            ambient.entry(pred.variable).or_default().push((pred.class, dict_var));
            params.push((dict_var, dict_ty));
        }
        (ambient, params)
    }
}
