//! The `classy` error taxonomy and diagnostic rendering.
//!
//! There is no error recovery in the core pipeline (spec §4.8): the first
//! detected violation aborts the run. `ClassyError` is the single error
//! type threaded through every fallible operation in the generator,
//! environment, and elaborator.

use crate::Span;
use serde::Serialize;
use std::fmt;

/// How a [`ClassyError`] should be rendered by the CLI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportStyle {
    #[default]
    Plain,
    Json,
}

/// The complete error taxonomy from spec §7. Every variant carries the
/// source [`Span`] of the offending construct; generated code (e.g.
/// dictionary bindings) may use [`Span::dummy`] per the spec's own
/// allowance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ClassyError {
    UnboundIdentifier { name: String, at: Span },
    UnboundTypeVariable { name: String, at: Span },
    UnboundClass { name: String, at: Span },
    UnboundLabel { name: String, at: Span },
    IllKindedType { at: Span },
    IncompatibleKinds { expected: String, found: String, at: Span },
    IncompatibleTypes { expected: String, found: String, at: Span },
    ApplicationToNonFunctional { at: Span },
    RecordExpected { at: Span },
    LabelDoesNotBelong { label: String, record_type: String, at: Span },
    MultipleLabels { label: String, at: Span },
    InvalidRecordInstantiation { at: Span },
    InvalidDataConstructorApplication { at: Span },
    PartialDataConstructorApplication { constructor: String, at: Span },
    NotEnoughPatternArgts { constructor: String, at: Span },
    InvalidDisjunctionPattern { at: Span },
    NonLinearPattern { name: String, at: Span },
    PatternsMustBindSameVariables { at: Span },
    OnlyLetsCanIntroduceTypeAbstraction { at: Span },
    InvalidNumberOfTypeAbstraction { at: Span },
    SameNameInTypeAbstractionAndScheme { name: String, at: Span },
    ValueRestriction { at: Span },
    InvalidOverloading { class: String, member: String, at: Span },
    OverloadedSymbolCannotBeBound { name: String, at: Span },
    TheseTwoClassesMustNotBeInTheSameContext { first: String, second: String, at: Span },
    UnresolvedOverloading { class: String, at: Span },
    OverlappingInstances { class: String, head: String, at: Span },
}

impl ClassyError {
    /// The source span this error is anchored to.
    #[must_use]
    pub fn span(&self) -> Span {
        use ClassyError::*;
        match self {
            UnboundIdentifier { at, .. }
            | UnboundTypeVariable { at, .. }
            | UnboundClass { at, .. }
            | UnboundLabel { at, .. }
            | IllKindedType { at }
            | IncompatibleKinds { at, .. }
            | IncompatibleTypes { at, .. }
            | ApplicationToNonFunctional { at }
            | RecordExpected { at }
            | LabelDoesNotBelong { at, .. }
            | MultipleLabels { at, .. }
            | InvalidRecordInstantiation { at }
            | InvalidDataConstructorApplication { at }
            | PartialDataConstructorApplication { at, .. }
            | NotEnoughPatternArgts { at, .. }
            | InvalidDisjunctionPattern { at }
            | NonLinearPattern { at, .. }
            | PatternsMustBindSameVariables { at }
            | OnlyLetsCanIntroduceTypeAbstraction { at }
            | InvalidNumberOfTypeAbstraction { at }
            | SameNameInTypeAbstractionAndScheme { at, .. }
            | ValueRestriction { at }
            | InvalidOverloading { at, .. }
            | OverloadedSymbolCannotBeBound { at, .. }
            | TheseTwoClassesMustNotBeInTheSameContext { at, .. }
            | UnresolvedOverloading { at, .. }
            | OverlappingInstances { at, .. } => *at,
        }
    }
}

impl fmt::Display for ClassyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ClassyError::*;
        match self {
            UnboundIdentifier { name, .. } => write!(f, "unbound identifier `{name}`"),
            UnboundTypeVariable { name, .. } => write!(f, "unbound type variable `{name}`"),
            UnboundClass { name, .. } => write!(f, "unbound class `{name}`"),
            UnboundLabel { name, .. } => write!(f, "unbound label `{name}`"),
            IllKindedType { .. } => write!(f, "ill-kinded type"),
            IncompatibleKinds { expected, found, .. } => {
                write!(f, "incompatible kinds: expected {expected}, found {found}")
            }
            IncompatibleTypes { expected, found, .. } => {
                write!(f, "incompatible types: expected {expected}, found {found}")
            }
            ApplicationToNonFunctional { .. } => write!(f, "application of a non-functional value"),
            RecordExpected { .. } => write!(f, "record type expected"),
            LabelDoesNotBelong { label, record_type, .. } => {
                write!(f, "label `{label}` does not belong to record type `{record_type}`")
            }
            MultipleLabels { label, .. } => write!(f, "label `{label}` appears more than once"),
            InvalidRecordInstantiation { .. } => write!(f, "invalid record instantiation"),
            InvalidDataConstructorApplication { .. } => {
                write!(f, "invalid data constructor application")
            }
            PartialDataConstructorApplication { constructor, .. } => {
                write!(f, "partial application of data constructor `{constructor}`")
            }
            NotEnoughPatternArgts { constructor, .. } => {
                write!(f, "not enough pattern arguments for `{constructor}`")
            }
            InvalidDisjunctionPattern { .. } => write!(f, "invalid disjunction pattern"),
            NonLinearPattern { name, .. } => write!(f, "non-linear pattern: `{name}` bound twice"),
            PatternsMustBindSameVariables { .. } => {
                write!(f, "disjunctive pattern branches must bind the same variables")
            }
            OnlyLetsCanIntroduceTypeAbstraction { .. } => {
                write!(f, "only let-bindings can introduce type abstraction")
            }
            InvalidNumberOfTypeAbstraction { .. } => {
                write!(f, "invalid number of type abstractions")
            }
            SameNameInTypeAbstractionAndScheme { name, .. } => {
                write!(f, "`{name}` used both as a type abstraction and a scheme quantifier")
            }
            ValueRestriction { .. } => write!(f, "generalization rejected by the value restriction"),
            InvalidOverloading { class, member, .. } => write!(
                f,
                "member `{member}` of class `{class}` does not mention the class parameter"
            ),
            OverloadedSymbolCannotBeBound { name, .. } => {
                write!(f, "`{name}` cannot be bound: its mode (overloaded/normal) is already fixed")
            }
            TheseTwoClassesMustNotBeInTheSameContext { first, second, .. } => write!(
                f,
                "`{first}` and `{second}` must not appear in the same context: one is a superclass of the other"
            ),
            UnresolvedOverloading { class, .. } => {
                write!(f, "no instance found to resolve class `{class}`")
            }
            OverlappingInstances { class, head, .. } => {
                write!(f, "overlapping instances of `{class}` for `{head}`")
            }
        }
    }
}

impl std::error::Error for ClassyError {}

/// Render a diagnostic for human consumption: `<offset range>: <message>`.
///
/// This is intentionally not a source-mapped `file:line:col` renderer —
/// line/column mapping is parser/source-map territory (out of scope per
/// spec §1); callers that have a line map can resolve `Span` themselves.
#[must_use]
pub fn render(error: &ClassyError, style: ReportStyle) -> String {
    match style {
        ReportStyle::Plain => {
            let span = error.span();
            if span.is_dummy() {
                format!("<generated>: {error}")
            } else {
                format!("{}..{}: {error}", span.start, span.end)
            }
        }
        ReportStyle::Json => serde_json::to_string(error).unwrap_or_else(|_| error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_render_includes_span_offsets() {
        let err = ClassyError::UnboundIdentifier {
            name: "foo".into(),
            at: Span::new(3, 6),
        };
        assert_eq!(render(&err, ReportStyle::Plain), "3..6: unbound identifier `foo`");
    }

    #[test]
    fn dummy_span_renders_as_generated() {
        let err = ClassyError::ValueRestriction { at: Span::dummy() };
        assert_eq!(render(&err, ReportStyle::Plain), "<generated>: generalization rejected by the value restriction");
    }
}
