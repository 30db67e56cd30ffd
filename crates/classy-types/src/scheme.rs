//! Type schemes and class predicates (spec §3, "Type schemes").

use crate::Type;
use classy_common::{TypeConName, TypeVarName};

/// `ClassPredicate(class, variable)` — references only a scheme's own
/// quantifiers (invariant I2, checked where schemes are constructed, not
/// enforced by this type itself).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassPredicate {
    pub class: TypeConName,
    pub variable: TypeVarName,
}

/// `TyScheme(quantifiers, predicates, body)`.
#[derive(Clone, Debug)]
pub struct TyScheme {
    pub quantifiers: Vec<TypeVarName>,
    pub predicates: Vec<ClassPredicate>,
    pub body: Type,
}

impl TyScheme {
    #[must_use]
    pub fn monomorphic(body: Type) -> Self {
        TyScheme {
            quantifiers: Vec::new(),
            predicates: Vec::new(),
            body,
        }
    }

    /// Invariant I2: every predicate's variable is among this scheme's
    /// quantifiers.
    #[must_use]
    pub fn predicates_are_quantified(&self) -> bool {
        self.predicates
            .iter()
            .all(|p| self.quantifiers.contains(&p.variable))
    }
}
