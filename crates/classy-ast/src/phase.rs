//! The `Phase` trait ties one AST definition to both program variants
//! named in spec §3: Implicit (annotations optional, type applications
//! inferred) and Explicit (all annotations and applications present).
//!
//! Rather than duplicating the tree (`ImplicitExpr`, `ExplicitExpr`, ...),
//! every node type is generic over `P: Phase` and the phase supplies the
//! associated types that differ between the two variants. This mirrors
//! the teacher's closed-set, sum-type AST discipline (spec §9, "Dynamic
//! dispatch over AST variants") while avoiding two parallel trees that
//! would drift out of sync.

use classy_types::{TyScheme, Type};
use std::fmt::Debug;

pub trait Phase: Clone + Debug + 'static {
    /// A binding's type annotation: absent is possible only in `Implicit`.
    type TypeAnnotation: Clone + Debug;
    /// The type arguments applied at an overloaded identifier's use site.
    type TypeApplication: Clone + Debug;
    /// A value definition's declared scheme (quantifiers, predicates, type).
    type BindingScheme: Clone + Debug;
}

/// Bindings may carry `None` to mean "to be inferred" (spec §6, parser contract).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Implicit;

impl Phase for Implicit {
    type TypeAnnotation = Option<Type>;
    type TypeApplication = Option<Vec<Type>>;
    type BindingScheme = Option<TyScheme>;
}

/// All type applications and annotations are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Explicit;

impl Phase for Explicit {
    type TypeAnnotation = Type;
    type TypeApplication = Vec<Type>;
    type BindingScheme = TyScheme;
}
