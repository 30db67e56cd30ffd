//! The union-find table backing unification: one `ena` key per flexible
//! type variable, carrying the resolved type once known.

use classy_types::Type;
use ena::unify::UnifyKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TyVarKey(u32);

impl UnifyKey for TyVarKey {
    type Value = SlotValue;

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        TyVarKey(u)
    }

    fn tag() -> &'static str {
        "TyVarKey"
    }
}

/// A union-find slot's payload. A local type (rather than `Option<Type>`
/// directly) so [`ena::unify::UnifyValue`], a foreign trait, can be
/// implemented for it here.
#[derive(Clone, Debug)]
pub enum SlotValue {
    Unbound,
    Bound(Type),
}

/// Uninhabited in practice: [`SlotValue::unify_values`] never returns
/// `Err`, since conflicting bound types are caught by structural
/// unification before the table ever merges their keys.
#[derive(Clone, Copy, Debug)]
pub struct SlotConflict;

impl ena::unify::UnifyValue for SlotValue {
    type Error = SlotConflict;

    fn unify_values(a: &Self, b: &Self) -> Result<Self, Self::Error> {
        match (a, b) {
            (SlotValue::Unbound, SlotValue::Unbound) => Ok(SlotValue::Unbound),
            (SlotValue::Bound(t), SlotValue::Unbound) | (SlotValue::Unbound, SlotValue::Bound(t)) => {
                Ok(SlotValue::Bound(t.clone()))
            }
            // Both sides already resolved: `unify::unify_types` structurally
            // unifies the two bound types before ever merging their keys,
            // so this arm only runs once they already agree.
            (SlotValue::Bound(t), SlotValue::Bound(_)) => Ok(SlotValue::Bound(t.clone())),
        }
    }
}
