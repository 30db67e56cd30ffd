//! The resolution rule (spec §4.5): turn a class predicate at a concrete
//! type into a dictionary-valued expression, either by reading an ambient
//! dictionary parameter (possibly walking down a superclass field chain)
//! or by calling an instance's dictionary constructor.

use rustc_hash::FxHashMap;

use classy_ast::{Expr, Explicit};
use classy_common::{ClassyError, Interner, Span, TypeConName, TypeVarName, ValueName};
use classy_env::Environment;
use classy_types::Type;

use crate::naming;

/// For each of a scheme's (or instance's) quantified variables, the
/// dictionaries bound over it: `class` is the predicate it witnesses,
/// `var` is the lambda parameter carrying that dictionary at runtime.
/// A variable may carry more than one dictionary when the context names
/// several unrelated classes over it (invariant I3 only forbids *related*
/// classes sharing a variable).
pub type AmbientCtx = FxHashMap<TypeVarName, Vec<(TypeConName, ValueName)>>;

pub fn resolve_predicate(
    interner: &mut Interner,
    env: &Environment,
    ambient: &AmbientCtx,
    class: TypeConName,
    ty: &Type,
    at: Span,
) -> Result<Expr<Explicit>, ClassyError> {
    match ty {
        Type::Var(_, var) => resolve_from_ambient(interner, env, ambient, class, *var, at),
        Type::App(_, head, args) => {
            let info = env
                .lookup_instance(class, *head)
                .ok_or_else(|| ClassyError::UnresolvedOverloading { class: format!("{class:?}"), at })?;
            let dict_name = naming::instance_dict_name(interner, class, *head);
            let mut expr = Expr::Var(at, dict_name, Vec::new());
            if !info.context.is_empty() {
                for pred in &info.context {
                    let idx = info
                        .params
                        .iter()
                        .position(|p| *p == pred.variable)
                        .expect("instance context variable is one of its own params");
                    let arg_expr = resolve_predicate(interner, env, ambient, pred.class, &args[idx], at)?;
                    expr = Expr::App(at, Box::new(expr), Box::new(arg_expr));
                }
            }
            Ok(expr)
        }
    }
}

fn resolve_from_ambient(
    interner: &mut Interner,
    env: &Environment,
    ambient: &AmbientCtx,
    class: TypeConName,
    var: TypeVarName,
    at: Span,
) -> Result<Expr<Explicit>, ClassyError> {
    let candidates = ambient
        .get(&var)
        .ok_or_else(|| ClassyError::UnresolvedOverloading { class: format!("{class:?}"), at })?;

    for (bound_class, dict_var) in candidates {
        if *bound_class == class {
            return Ok(Expr::Var(at, *dict_var, Vec::new()));
        }
    }
    for (bound_class, dict_var) in candidates {
        if env.is_superclass(class, *bound_class) {
            if let Some(expr) =
                extract_superclass_dict(interner, env, *bound_class, class, Expr::Var(at, *dict_var, Vec::new()), at)?
            {
                return Ok(expr);
            }
        }
    }
    Err(ClassyError::UnresolvedOverloading { class: format!("{class:?}"), at })
}

/// Walk `from_class`'s superclass chain down to `to_class`, wrapping
/// `expr` in nested `RecordAccess`es through each `superclass_field_*`
/// along the way.
fn extract_superclass_dict(
    interner: &mut Interner,
    env: &Environment,
    from_class: TypeConName,
    to_class: TypeConName,
    expr: Expr<Explicit>,
    at: Span,
) -> Result<Option<Expr<Explicit>>, ClassyError> {
    if from_class == to_class {
        return Ok(Some(expr));
    }
    let info = env.lookup_class(from_class, at)?;
    for sup in &info.supers {
        if env.is_superclass(to_class, *sup) {
            let field = naming::superclass_field_name(interner, from_class, *sup);
            let accessed = Expr::RecordAccess(at, Box::new(expr.clone()), field);
            if let Some(found) = extract_superclass_dict(interner, env, *sup, to_class, accessed, at)? {
                return Ok(Some(found));
            }
        }
    }
    Ok(None)
}
