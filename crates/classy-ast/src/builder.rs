//! Hand-construct `Implicit` ASTs without a real parser (spec §6: parsing
//! is an external collaborator). This module exists only so `classy`'s
//! own tests and the end-to-end scenario tests in `classy-cli` can build
//! fixtures, the way `tsz-binder`'s unit tests build small `NodeArena`
//! fixtures inline rather than running the real scanner/parser.

use crate::{Expr, Implicit, MatchArm, Pattern, Primitive, RecordField};
use classy_common::{LabelName, Span, TypeVarName, ValueName};

pub const DUMMY: Span = Span::dummy();

pub fn var(name: ValueName) -> Expr<Implicit> {
    Expr::Var(DUMMY, name, None)
}

pub fn lambda(param: ValueName, body: Expr<Implicit>) -> Expr<Implicit> {
    Expr::Lambda(DUMMY, param, None, Box::new(body))
}

pub fn app(f: Expr<Implicit>, arg: Expr<Implicit>) -> Expr<Implicit> {
    Expr::App(DUMMY, Box::new(f), Box::new(arg))
}

pub fn int(n: i64) -> Expr<Implicit> {
    Expr::Primitive(DUMMY, Primitive::Int(n))
}

pub fn boolean(b: bool) -> Expr<Implicit> {
    Expr::Primitive(DUMMY, Primitive::Bool(b))
}

pub fn record(fields: Vec<(LabelName, Expr<Implicit>)>) -> Expr<Implicit> {
    Expr::RecordConstruction(
        DUMMY,
        None,
        fields
            .into_iter()
            .map(|(label, value)| RecordField { label, value })
            .collect(),
    )
}

pub fn access(e: Expr<Implicit>, label: LabelName) -> Expr<Implicit> {
    Expr::RecordAccess(DUMMY, Box::new(e), label)
}

pub fn match_expr(scrutinee: Expr<Implicit>, arms: Vec<(Pattern<Implicit>, Expr<Implicit>)>) -> Expr<Implicit> {
    Expr::Match(
        DUMMY,
        Box::new(scrutinee),
        arms.into_iter()
            .map(|(pattern, body)| MatchArm { pattern, body })
            .collect(),
    )
}

pub fn pvar(name: ValueName) -> Pattern<Implicit> {
    Pattern::Variable(DUMMY, name)
}

pub fn pwild() -> Pattern<Implicit> {
    Pattern::Wildcard(DUMMY)
}

pub fn existential(vars: Vec<TypeVarName>, body: Expr<Implicit>) -> Expr<Implicit> {
    Expr::ExistentialIntro(DUMMY, vars, Box::new(body))
}
