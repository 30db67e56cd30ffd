//! `RobinsonSolver`: the reference [`Solver`] implementation. Walks a
//! [`Constraint`] tree, threading a single [`UnificationState`] through
//! equality and instance-of constraints, and generalizing `Let`-bound
//! schemes once their defining constraint is solved.

use classy_common::{Interner, Span, TypeVarName, ValueName};
use classy_constraints::{Constraint, LetScheme, Solution, SolveError, Solver};
use classy_types::{ClassPredicate, TyScheme, Type};
use rustc_hash::FxHashMap;

use crate::unify::UnificationState;

/// Mints fresh type variables when instantiating a scheme at a use site.
/// Grounded on the teacher-adjacent `TypeVarContext`-style fresh-variable
/// counter used across the trait-resolution examples in the pack.
struct FreshNames {
    interner: Interner,
    counter: u64,
}

impl FreshNames {
    fn new() -> Self {
        FreshNames { interner: Interner::new(), counter: 0 }
    }

    fn next(&mut self) -> TypeVarName {
        let label = format!("$inst{}", self.counter);
        self.counter += 1;
        TypeVarName::new(self.interner.intern(&label))
    }
}

pub struct RobinsonSolver {
    state: UnificationState,
    fresh: FreshNames,
    scheme_env: FxHashMap<ValueName, TyScheme>,
    instantiations: FxHashMap<Span, Vec<Type>>,
}

impl RobinsonSolver {
    #[must_use]
    pub fn new() -> Self {
        RobinsonSolver {
            state: UnificationState::new(),
            fresh: FreshNames::new(),
            scheme_env: FxHashMap::default(),
            instantiations: FxHashMap::default(),
        }
    }

    fn solve_constraint(&mut self, c: &Constraint) -> Result<(), SolveError> {
        match c {
            Constraint::True => Ok(()),
            Constraint::Eq(t1, t2, at) => self
                .state
                .unify_types(t1, t2, *at)
                .map_err(|at| SolveError::UnsatisfiableEquation { at }),
            Constraint::InstanceOf(name, t, at) => self.solve_instance_of(name, t, *at),
            Constraint::Conj(items) => {
                for item in items {
                    self.solve_constraint(item)?;
                }
                Ok(())
            }
            Constraint::Exists(_vars, body) => self.solve_constraint(body),
            Constraint::Let(schemes, body) => {
                for scheme in schemes {
                    self.solve_let_scheme(scheme)?;
                }
                self.solve_constraint(body)
            }
        }
    }

    fn solve_instance_of(&mut self, name: &ValueName, t: &Type, at: Span) -> Result<(), SolveError> {
        let scheme = self
            .scheme_env
            .get(name)
            .cloned()
            .ok_or_else(|| SolveError::UnresolvedOverloading { name: format!("{name:?}"), at })?;
        let mut sigma = FxHashMap::default();
        for q in &scheme.quantifiers {
            sigma.insert(*q, Type::Var(Span::dummy(), self.fresh.next()));
        }
        let instantiated = scheme.body.substitute(&sigma);
        self.state
            .unify_types(&instantiated, t, at)
            .map_err(|at| SolveError::UnsatisfiableEquation { at })?;
        let args: Vec<Type> = scheme
            .quantifiers
            .iter()
            .map(|q| sigma.get(q).cloned().unwrap_or_else(|| Type::Var(at, *q)))
            .collect();
        self.instantiations.insert(at, args);
        Ok(())
    }

    fn solve_let_scheme(&mut self, scheme: &LetScheme) -> Result<(), SolveError> {
        self.solve_constraint(&scheme.inner)?;
        for (name, ty) in &scheme.header {
            let resolved = self.state.resolve_deep(ty);
            let free = resolved.free_vars();
            let mut quantifiers: Vec<TypeVarName> = scheme.rigid.clone();
            for v in &scheme.flexible {
                if free.contains(v) && !quantifiers.contains(v) {
                    quantifiers.push(*v);
                }
            }
            let predicates: Vec<ClassPredicate> = scheme
                .predicates
                .iter()
                .filter(|p| quantifiers.contains(&p.variable))
                .copied()
                .collect();
            let ty_scheme = TyScheme { quantifiers, predicates, body: resolved };
            self.scheme_env.insert(*name, ty_scheme);
        }
        Ok(())
    }

    fn into_solution(mut self) -> Solution {
        let mut substitution = FxHashMap::default();
        let names: Vec<TypeVarName> = self.state.known_names().collect();
        for name in names {
            let resolved = self.state.resolve_deep(&Type::Var(Span::dummy(), name));
            substitution.insert(name, resolved);
        }
        for tys in self.instantiations.values_mut() {
            for t in tys.iter_mut() {
                *t = self.state.resolve_deep(t);
            }
        }
        Solution {
            substitution,
            schemes: self.scheme_env,
            instantiations: self.instantiations,
        }
    }
}

impl Default for RobinsonSolver {
    fn default() -> Self {
        RobinsonSolver::new()
    }
}

impl Solver for RobinsonSolver {
    fn solve(&mut self, root: Constraint) -> Result<Solution, SolveError> {
        self.solve_constraint(&root)?;
        let solver = std::mem::replace(self, RobinsonSolver::new());
        Ok(solver.into_solution())
    }
}
