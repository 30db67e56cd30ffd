//! Context canonicity (invariant I3, spec §3 and §4.7).
//!
//! A context (a list of `ClassPredicate`s) is canonical when no two
//! predicates name classes where one is a (transitive) superclass of the
//! other. This module only states the check in terms of an abstract
//! "is a superclass of" relation; `classy-env::Environment::is_superclass`
//! supplies that relation.

use crate::ClassPredicate;
use classy_common::TypeConName;

/// Find the first pair of predicates in `context` that violate canonicity
/// under `is_superclass`, if any. Returns `(first, second)` where
/// `is_superclass(first.class, second.class)` or vice versa.
pub fn find_non_canonical_pair(
    context: &[ClassPredicate],
    is_superclass: impl Fn(TypeConName, TypeConName) -> bool,
) -> Option<(ClassPredicate, ClassPredicate)> {
    for i in 0..context.len() {
        for j in (i + 1)..context.len() {
            let a = context[i];
            let b = context[j];
            if a.variable != b.variable {
                continue;
            }
            if a.class == b.class {
                continue;
            }
            if is_superclass(a.class, b.class) || is_superclass(b.class, a.class) {
                return Some((a, b));
            }
        }
    }
    None
}

#[must_use]
pub fn is_canonical(
    context: &[ClassPredicate],
    is_superclass: impl Fn(TypeConName, TypeConName) -> bool,
) -> bool {
    find_non_canonical_pair(context, is_superclass).is_none()
}
