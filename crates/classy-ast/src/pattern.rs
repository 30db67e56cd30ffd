//! Patterns (spec §4.4 "Pattern fragments").

use crate::Phase;
use classy_common::{LabelName, Span, ValueName};
use classy_types::Type;

#[derive(Clone, Debug)]
pub enum Pattern<P: Phase> {
    Wildcard(Span),
    Primitive(Span, crate::Primitive),
    Variable(Span, ValueName),
    /// Any one of these subpatterns may match; all must bind the same
    /// variable set with identical types (invariant I6).
    Disjunction(Span, Vec<Pattern<P>>),
    /// All of these subpatterns must match the same scrutinee; their
    /// bound variable sets must be disjoint (invariant I6, else
    /// `NonLinearPattern`).
    Conjunction(Span, Vec<Pattern<P>>),
    /// `pattern @ name` — binds `name` to the whole matched value in
    /// addition to whatever `pattern` binds.
    Alias(Span, Box<Pattern<P>>, ValueName),
    /// `pattern :: ty` — an explicit type ascription on a pattern.
    Typed(Span, Box<Pattern<P>>, Type),
    DataConstructor(Span, LabelName, Vec<Pattern<P>>),
}

impl<P: Phase> Pattern<P> {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Pattern::Wildcard(s)
            | Pattern::Primitive(s, _)
            | Pattern::Variable(s, _)
            | Pattern::Disjunction(s, _)
            | Pattern::Conjunction(s, _)
            | Pattern::Alias(s, _, _)
            | Pattern::Typed(s, _, _)
            | Pattern::DataConstructor(s, _, _) => *s,
        }
    }
}
