//! Pattern fragments (spec §4.4): what a pattern contributes to its match
//! arm's environment and constraint set.

use rustc_hash::FxHashMap;

use classy_common::{ClassyError, Span, TypeVarName, ValueName};
use classy_constraints::Constraint;
use classy_types::Type;

/// `Fragment(gamma, vars, constraint)` — the bindings a pattern introduces,
/// the fresh variables it mints, and the constraint it imposes on them.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub gamma: FxHashMap<ValueName, Type>,
    pub vars: Vec<TypeVarName>,
    pub constraint: Constraint,
}

impl Fragment {
    #[must_use]
    pub fn trivial() -> Self {
        Fragment { gamma: FxHashMap::default(), vars: Vec::new(), constraint: Constraint::True }
    }

    /// Merge two fragments whose bound variables must be disjoint (spec
    /// §4.4, invariant I6: conjunction patterns and a data constructor's
    /// argument positions). Fails with `NonLinearPattern` on the first
    /// name both fragments bind.
    pub fn disjoint_union(mut self, other: Fragment, at: Span) -> Result<Fragment, ClassyError> {
        for (name, ty) in other.gamma {
            if self.gamma.contains_key(&name) {
                return Err(ClassyError::NonLinearPattern { name: format!("{name:?}"), at });
            }
            self.gamma.insert(name, ty);
        }
        self.vars.extend(other.vars);
        self.constraint = Constraint::conj(vec![self.constraint, other.constraint]);
        Ok(self)
    }
}
