//! The generator's own state: a fresh-variable counter and the well-known
//! names it needs to build arrow types and primitive types without a
//! parser's help.

use rustc_hash::FxHashMap;

use classy_common::{Interner, Span, TypeVarName, WellKnownNames};
use classy_types::Type;

/// Threads a single counter and interner through every `generate_*` call so
/// fresh type variables never collide with source-written ones or with
/// each other. One `Generator` is built per compilation run and lives for
/// the whole program (spec §4.4's rules reference a single global source
/// of fresh names, not one scoped to an individual expression).
pub struct Generator<'a> {
    interner: &'a mut Interner,
    well_known: WellKnownNames,
    counter: u64,
    /// Per-lambda record of the fresh type variable minted for its
    /// parameter (spec §4.4's `x1` in the `Lambda` rule), keyed by the
    /// lambda's own span. [`crate::materialize`] reads this back, resolved
    /// through the solution's substitution, to fill in `Explicit`'s
    /// concrete parameter annotation.
    lambda_param_vars: FxHashMap<Span, TypeVarName>,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub fn new(interner: &'a mut Interner, well_known: WellKnownNames) -> Self {
        Generator { interner, well_known, counter: 0, lambda_param_vars: FxHashMap::default() }
    }

    #[must_use]
    pub fn well_known(&self) -> WellKnownNames {
        self.well_known
    }

    #[must_use]
    pub fn lambda_param_vars(&self) -> &FxHashMap<Span, TypeVarName> {
        &self.lambda_param_vars
    }

    pub(crate) fn record_lambda_param(&mut self, span: Span, var: TypeVarName) {
        self.lambda_param_vars.insert(span, var);
    }

    pub(crate) fn fresh_tyvar(&mut self) -> TypeVarName {
        let label = format!("$g{}", self.counter);
        self.counter += 1;
        TypeVarName::new(self.interner.intern(&label))
    }

    /// Build a fresh substitution for a type's own declared parameters —
    /// used whenever a polymorphic thing (a data constructor, a record
    /// type, an instance's dictionary) is referenced and needs its own
    /// private copy of its quantifiers.
    pub(crate) fn freshen_params(
        &mut self,
        params: &[TypeVarName],
    ) -> (Vec<Type>, FxHashMap<TypeVarName, Type>) {
        let mut sigma = FxHashMap::default();
        let mut fresh_args = Vec::with_capacity(params.len());
        for p in params {
            let fresh = self.fresh_tyvar();
            let arg = Type::Var(Span::dummy(), fresh);
            sigma.insert(*p, arg.clone());
            fresh_args.push(arg);
        }
        (fresh_args, sigma)
    }
}
