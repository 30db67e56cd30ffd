//! NameModel — the four disjoint namespaces of a `classy` program.
//!
//! Each namespace wraps an interned [`Atom`](crate::Atom). Equality and
//! ordering are structural (by underlying text via the atom), matching
//! the data model's "Equality is structural" guarantee. Keeping the four
//! namespaces as distinct newtypes (rather than a single `Name` enum)
//! makes cross-namespace confusion a compile error instead of a runtime
//! bug — e.g. an `Environment::lookup` call can never be accidentally
//! handed a `TypeConName`.

use crate::Atom;
use std::fmt;

macro_rules! name_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub Atom);

        impl $name {
            #[inline]
            pub const fn new(atom: Atom) -> Self {
                $name(atom)
            }

            #[inline]
            pub const fn atom(self) -> Atom {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }
    };
}

name_newtype!(
    /// A value-level identifier: a let-bound name, a lambda parameter, or
    /// a class member accessor.
    ValueName
);

name_newtype!(
    /// A type-variable identifier, bound by a scheme's quantifier list or
    /// by a class definition's single parameter.
    TypeVarName
);

name_newtype!(
    /// A type-constructor or class name. These share one namespace in
    /// source syntax (spec §3) since a class and a type constructor can
    /// never collide in well-formed source — a class name is never used
    /// where a type constructor is expected and vice versa, so sharing
    /// the namespace costs nothing and matches the surface grammar.
    TypeConName
);

name_newtype!(
    /// A record label or data constructor name. Like `TypeConName`, these
    /// share one namespace in source syntax.
    LabelName
);

/// Names the type model and generator need to refer to without a
/// surface-syntax spelling reaching them first — chiefly the arrow type
/// constructor (spec §3: "The arrow type is `TApp(pos, "->", [in; out])`").
///
/// Interned once per compilation run and threaded everywhere a `Type` is
/// built, the way the teacher threads well-known `SyntaxKind` constants
/// through the checker instead of re-deriving them from text each time.
#[derive(Clone, Copy, Debug)]
pub struct WellKnownNames {
    pub arrow: TypeConName,
    /// The built-in nullary type of integer literals.
    pub int: TypeConName,
    /// The built-in nullary type of boolean literals.
    pub bool: TypeConName,
}

impl WellKnownNames {
    pub fn intern(interner: &mut crate::Interner) -> Self {
        WellKnownNames {
            arrow: TypeConName::new(interner.intern("->")),
            int: TypeConName::new(interner.intern("Int")),
            bool: TypeConName::new(interner.intern("Bool")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interner;

    #[test]
    fn namespaces_with_same_text_are_distinct_types() {
        let mut interner = Interner::new();
        let atom = interner.intern("a");
        let value = ValueName::new(atom);
        let tyvar = TypeVarName::new(atom);
        // Compiles only because these are distinct types; the underlying
        // atom is intentionally identical.
        assert_eq!(value.atom(), tyvar.atom());
    }
}
