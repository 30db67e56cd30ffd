//! Expressions (spec §4.4).

use crate::{Pattern, Phase};
use classy_common::{LabelName, Span, TypeVarName, ValueName};
use classy_types::Type;

/// Literal primitive values. The constraint generator equates these with
/// their fixed primitive type (`typeOfPrimitive`, spec §4.4).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Int(i64),
    Bool(bool),
}

#[derive(Clone, Debug)]
pub struct MatchArm<P: Phase> {
    pub pattern: Pattern<P>,
    pub body: Expr<P>,
}

#[derive(Clone, Debug)]
pub struct RecordField<P: Phase> {
    pub label: LabelName,
    pub value: Expr<P>,
}

#[derive(Clone, Debug)]
pub enum Expr<P: Phase> {
    /// A variable use, `x @ [τ1 .. τm]` once elaborated. In `Implicit`
    /// programs the type application is `None` (to be inferred); in
    /// `Explicit` programs it is the list of type arguments the solver
    /// determined this use instantiates the variable's scheme at.
    Var(Span, ValueName, P::TypeApplication),
    Lambda(Span, ValueName, P::TypeAnnotation, Box<Expr<P>>),
    App(Span, Box<Expr<P>>, Box<Expr<P>>),
    /// `e :: τ` — a user type ascription. `τ` is always a concrete,
    /// source-written type regardless of phase.
    TypeAscription(Span, Box<Expr<P>>, Type),
    /// Existential introduction: fresh flexible variables scoped over `body`.
    ExistentialIntro(Span, Vec<TypeVarName>, Box<Expr<P>>),
    Match(Span, Box<Expr<P>>, Vec<MatchArm<P>>),
    DataConstructor(Span, LabelName, Vec<Expr<P>>),
    Primitive(Span, Primitive),
    /// Record construction. `name` is the source syntax's advisory record
    /// name (spec §9): preserved verbatim, never consulted to determine
    /// the record's type — only the first field's label does that.
    RecordConstruction(Span, Option<LabelName>, Vec<RecordField<P>>),
    RecordAccess(Span, Box<Expr<P>>, LabelName),
}

impl<P: Phase> Expr<P> {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Expr::Var(s, _, _)
            | Expr::Lambda(s, _, _, _)
            | Expr::App(s, _, _)
            | Expr::TypeAscription(s, _, _)
            | Expr::ExistentialIntro(s, _, _)
            | Expr::Match(s, _, _)
            | Expr::DataConstructor(s, _, _)
            | Expr::Primitive(s, _)
            | Expr::RecordConstruction(s, _, _)
            | Expr::RecordAccess(s, _, _) => *s,
        }
    }

    /// Is this expression a value-form (spec §4.4 "Bindings")? Value-forms
    /// are variables, lambdas, primitives, and constructor/record
    /// applications whose immediate subexpressions are themselves
    /// value-forms. Definitions whose body is not a value-form are
    /// subject to the value restriction: their scheme's quantifier list
    /// must be empty.
    #[must_use]
    pub fn is_value_form(&self) -> bool {
        match self {
            Expr::Var(..) | Expr::Lambda(..) | Expr::Primitive(..) => true,
            Expr::DataConstructor(_, _, args) => args.iter().all(Expr::is_value_form),
            Expr::RecordConstruction(_, _, fields) => {
                fields.iter().all(|f| f.value.is_value_form())
            }
            Expr::TypeAscription(_, inner, _) => inner.is_value_form(),
            Expr::App(..)
            | Expr::ExistentialIntro(..)
            | Expr::Match(..)
            | Expr::RecordAccess(..) => false,
        }
    }
}
