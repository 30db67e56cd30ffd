//! The external solver contract (spec §4.3, §6). `classy-infer` depends
//! only on this trait — not on any particular solving algorithm, so a test
//! can plug in a mock solver without touching the generator.

use classy_common::{Span, ValueName};
use classy_types::{Substitution, TyScheme, Type};
use rustc_hash::FxHashMap;

use crate::Constraint;

/// A solver's successful result: a substitution over the flexible
/// variables introduced by `Exists`/`Let`, the schemes derived for each
/// `Let`-bound name, and — so the generator can materialize the Explicit
/// AST's type-application sites (spec §4.4) — the concrete types each
/// `InstanceOf` occurrence instantiated its scheme's quantifiers to,
/// keyed by that occurrence's span.
#[derive(Clone, Debug, Default)]
pub struct Solution {
    pub substitution: Substitution,
    pub schemes: FxHashMap<ValueName, TyScheme>,
    pub instantiations: FxHashMap<Span, Vec<Type>>,
}

/// Why a solver could not satisfy a constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    UnsatisfiableEquation { at: Span },
    CannotGeneralize { at: Span },
    UnresolvedOverloading { name: String, at: Span },
}

impl SolveError {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            SolveError::UnsatisfiableEquation { at }
            | SolveError::CannotGeneralize { at }
            | SolveError::UnresolvedOverloading { at, .. } => *at,
        }
    }
}

/// The solver contract: consume a root constraint, yield a [`Solution`] or
/// a [`SolveError`]. The generator relies only on this trait (spec §4.3).
pub trait Solver {
    fn solve(&mut self, root: Constraint) -> Result<Solution, SolveError>;
}
