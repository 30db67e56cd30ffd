//! The first-order type term language (spec §4.1).
//!
//! Types are first-order: `TVar` leaves and `TApp` nodes, no binders.
//! That is what makes [`substitute`] capture-unaware — there is nothing
//! for a substituted type to accidentally capture.

use classy_common::{Span, TypeConName, TypeVarName};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Debug)]
pub enum Type {
    Var(Span, TypeVarName),
    App(Span, TypeConName, SmallVec<[Type; 2]>),
}

impl Type {
    #[must_use]
    pub fn pos(&self) -> Span {
        match self {
            Type::Var(pos, _) => *pos,
            Type::App(pos, _, _) => *pos,
        }
    }

    /// Build the arrow type `from -> to` at `pos`, using the interned
    /// arrow constructor name (spec §3).
    #[must_use]
    pub fn arrow(pos: Span, arrow_name: TypeConName, from: Type, to: Type) -> Type {
        Type::App(pos, arrow_name, SmallVec::from_vec(vec![from, to]))
    }

    /// `destruct_tyarrow` — the left inverse of [`Type::arrow`]: if `self`
    /// is a single arrow application, return its `(from, to)` pair.
    #[must_use]
    pub fn destruct_tyarrow(&self, arrow_name: TypeConName) -> Option<(&Type, &Type)> {
        match self {
            Type::App(_, con, args) if *con == arrow_name && args.len() == 2 => {
                Some((&args[0], &args[1]))
            }
            _ => None,
        }
    }

    /// `ntyarrow` — fold a list of input types into nested arrows ending
    /// in `result`: `i0 -> i1 -> ... -> result`.
    #[must_use]
    pub fn ntyarrow(pos: Span, arrow_name: TypeConName, inputs: Vec<Type>, result: Type) -> Type {
        inputs
            .into_iter()
            .rev()
            .fold(result, |acc, input| Type::arrow(pos, arrow_name, input, acc))
    }

    /// `destruct_ntyarrow` — the left inverse of [`Type::ntyarrow`]:
    /// collect all input arrows and the final result type.
    #[must_use]
    pub fn destruct_ntyarrow(&self, arrow_name: TypeConName) -> (Vec<&Type>, &Type) {
        let mut inputs = Vec::new();
        let mut current = self;
        while let Some((from, to)) = current.destruct_tyarrow(arrow_name) {
            inputs.push(from);
            current = to;
        }
        (inputs, current)
    }

    /// Structural, position-ignoring α-equivalence. Since types carry no
    /// binders, this amounts to checking that the two trees agree on
    /// shape and that corresponding free-variable occurrences form a
    /// consistent bijection (the same renaming throughout both trees).
    #[must_use]
    pub fn equivalent(&self, other: &Type) -> bool {
        let mut forward = FxHashMap::default();
        let mut backward = FxHashMap::default();
        equivalent_rec(self, other, &mut forward, &mut backward)
    }

    /// Apply a substitution mapping type variables to types. Capture-unaware:
    /// types have no binders, so there is nothing to avoid capturing.
    #[must_use]
    pub fn substitute(&self, sigma: &FxHashMap<TypeVarName, Type>) -> Type {
        match self {
            Type::Var(pos, name) => sigma.get(name).cloned().unwrap_or(Type::Var(*pos, *name)),
            Type::App(pos, con, args) => Type::App(
                *pos,
                *con,
                args.iter().map(|a| a.substitute(sigma)).collect(),
            ),
        }
    }

    /// The set of type variables occurring at a leaf.
    #[must_use]
    pub fn free_vars(&self) -> FxHashSet<TypeVarName> {
        let mut out = FxHashSet::default();
        self.collect_free_vars(&mut out);
        out
    }

    fn collect_free_vars(&self, out: &mut FxHashSet<TypeVarName>) {
        match self {
            Type::Var(_, name) => {
                out.insert(*name);
            }
            Type::App(_, _, args) => {
                for a in args {
                    a.collect_free_vars(out);
                }
            }
        }
    }

    /// The set of type constructors occurring at non-leaves.
    #[must_use]
    pub fn type_constructors(&self) -> FxHashSet<TypeConName> {
        let mut out = FxHashSet::default();
        self.collect_type_constructors(&mut out);
        out
    }

    fn collect_type_constructors(&self, out: &mut FxHashSet<TypeConName>) {
        if let Type::App(_, con, args) = self {
            out.insert(*con);
            for a in args {
                a.collect_type_constructors(out);
            }
        }
    }
}

fn equivalent_rec(
    a: &Type,
    b: &Type,
    forward: &mut FxHashMap<TypeVarName, TypeVarName>,
    backward: &mut FxHashMap<TypeVarName, TypeVarName>,
) -> bool {
    match (a, b) {
        (Type::Var(_, x), Type::Var(_, y)) => {
            let fwd_ok = *forward.entry(*x).or_insert(*y) == *y;
            let bwd_ok = *backward.entry(*y).or_insert(*x) == *x;
            fwd_ok && bwd_ok
        }
        (Type::App(_, con_a, args_a), Type::App(_, con_b, args_b)) => {
            con_a == con_b
                && args_a.len() == args_b.len()
                && args_a
                    .iter()
                    .zip(args_b.iter())
                    .all(|(x, y)| equivalent_rec(x, y, forward, backward))
        }
        _ => false,
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Var(_, name) => write!(f, "t{:?}", name.atom()),
            Type::App(_, con, args) if args.is_empty() => write!(f, "{:?}", con),
            Type::App(_, con, args) => {
                write!(f, "({:?}", con)?;
                for a in args {
                    write!(f, " {a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
