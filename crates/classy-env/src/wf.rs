//! Well-formedness checks (spec §4.7): kind-checking types against an
//! environment and checking a typing context for canonicity.

use classy_common::{ClassyError, Span, TypeConName};
use classy_types::{ClassPredicate, Kind, Type};

use crate::Environment;

/// `check_wf_type` — a type is well-kinded against an expected kind.
pub fn check_wf_type(env: &Environment, ty: &Type, expected: &Kind) -> Result<(), ClassyError> {
    let found = infer_kind(env, ty)?;
    check_equivalent_kind(&found, expected, ty.pos())
}

/// Infer a type's kind: `TVar` has no kind recorded directly (variables are
/// always `Star` in this language — §9 notes higher-kinded classes are out
/// of scope beyond the `is_constructor_class` bypass), `TApp` looks up the
/// head constructor's kind and checks the application's arity and argument
/// kinds via [`check_type_constructor_application`].
fn infer_kind(env: &Environment, ty: &Type) -> Result<Kind, ClassyError> {
    match ty {
        Type::Var(..) => Ok(Kind::Star),
        Type::App(pos, con, args) => {
            let head_kind = env.lookup_type_kind(*con, *pos)?;
            check_type_constructor_application(env, *con, &head_kind, args, *pos)
        }
    }
}

/// `check_type_constructor_application` — arity and per-argument kinds.
/// Returns the resulting kind once all arguments have been consumed.
pub fn check_type_constructor_application(
    env: &Environment,
    _con: TypeConName,
    head_kind: &Kind,
    args: &[Type],
    at: Span,
) -> Result<Kind, ClassyError> {
    let mut current = head_kind.clone();
    for arg in args {
        match current {
            Kind::Arrow(from, to) => {
                check_wf_type(env, arg, &from)?;
                current = *to;
            }
            Kind::Star => return Err(ClassyError::IllKindedType { at }),
        }
    }
    Ok(current)
}

/// `check_equivalent_kind` — on mismatch, yields `IncompatibleKinds`.
pub fn check_equivalent_kind(found: &Kind, expected: &Kind, at: Span) -> Result<(), ClassyError> {
    if found == expected {
        Ok(())
    } else {
        Err(ClassyError::IncompatibleKinds {
            expected: expected.to_string(),
            found: found.to_string(),
            at,
        })
    }
}

/// `check_equal_types` — α-equivalence, else `IncompatibleTypes`.
pub fn check_equal_types(found: &Type, expected: &Type, at: Span) -> Result<(), ClassyError> {
    if found.equivalent(expected) {
        Ok(())
    } else {
        Err(ClassyError::IncompatibleTypes {
            expected: expected.to_string(),
            found: found.to_string(),
            at,
        })
    }
}

/// `check_correct_context` — each predicate's variable is among
/// `quantifiers`, each named class exists, and the context is canonical
/// (invariant I3: no two predicates relate via the superclass DAG).
pub fn check_correct_context(
    env: &Environment,
    context: &[ClassPredicate],
    quantifiers: &[classy_common::TypeVarName],
    at: Span,
) -> Result<(), ClassyError> {
    for pred in context {
        if !quantifiers.contains(&pred.variable) {
            return Err(ClassyError::UnboundTypeVariable {
                name: format!("{:?}", pred.variable),
                at,
            });
        }
        env.lookup_class(pred.class, at)?;
    }
    if let Some((p, q)) = classy_types::find_non_canonical_pair(context, |a, b| env.is_superclass(a, b)) {
        return Err(ClassyError::TheseTwoClassesMustNotBeInTheSameContext {
            first: format!("{:?}", p.class),
            second: format!("{:?}", q.class),
            at,
        });
    }
    Ok(())
}
