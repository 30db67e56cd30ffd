//! The constraint language (spec §4.3): the intermediate representation
//! the generator emits and the external solver consumes.

use classy_common::{Span, TypeVarName, ValueName};
use classy_types::{ClassPredicate, Type};
use rustc_hash::FxHashMap;

/// A `Let`-bound scheme: rigid quantifiers come from an explicit
/// annotation and must not be generalized further by the solver, flexible
/// quantifiers are open to generalization, `predicates` is the scheme's
/// context, `inner` is the constraint whose solution yields the scheme's
/// body, and `header` maps the names this scheme introduces to the types
/// the outer constraint references them at.
#[derive(Clone, Debug)]
pub struct LetScheme {
    pub rigid: Vec<TypeVarName>,
    pub flexible: Vec<TypeVarName>,
    pub predicates: Vec<ClassPredicate>,
    pub inner: Box<Constraint>,
    pub header: FxHashMap<ValueName, Type>,
}

impl LetScheme {
    /// A monomorphic scheme with no quantifiers or predicates, used for
    /// lambda parameters (spec §4.4: `Let([monoscheme(header)], ...)`).
    #[must_use]
    pub fn monomorphic(header: FxHashMap<ValueName, Type>, inner: Constraint) -> Self {
        LetScheme {
            rigid: Vec::new(),
            flexible: Vec::new(),
            predicates: Vec::new(),
            inner: Box::new(inner),
            header,
        }
    }
}

/// `Constraint` — the sum type of spec §4.3.
#[derive(Clone, Debug)]
pub enum Constraint {
    True,
    /// `t =?= t' @ pos`.
    Eq(Type, Type, Span),
    /// `name <? t @ pos` — instance-of: the named scheme must instantiate to `t`.
    InstanceOf(ValueName, Type, Span),
    Conj(Vec<Constraint>),
    /// `Exists([var], c)` — existential quantification of flexible variables.
    Exists(Vec<TypeVarName>, Box<Constraint>),
    Let(Vec<LetScheme>, Box<Constraint>),
}

impl Constraint {
    #[must_use]
    pub fn conj(constraints: Vec<Constraint>) -> Constraint {
        let mut flat = Vec::with_capacity(constraints.len());
        for c in constraints {
            match c {
                Constraint::True => {}
                Constraint::Conj(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Constraint::True,
            1 => flat.into_iter().next().unwrap(),
            _ => Constraint::Conj(flat),
        }
    }

    #[must_use]
    pub fn exists(vars: Vec<TypeVarName>, body: Constraint) -> Constraint {
        if vars.is_empty() {
            body
        } else {
            Constraint::Exists(vars, Box::new(body))
        }
    }
}
