//! `generate_pattern` (spec §4.4 "Pattern fragments").

use classy_ast::{Implicit, Pattern};
use classy_common::{ClassyError, Span};
use classy_constraints::Constraint;
use classy_env::{Environment, LabelInfo, TypeInfo};
use classy_types::Type;

use crate::expr::type_of_primitive;
use crate::fragment::Fragment;
use crate::generator::Generator;

impl<'a> Generator<'a> {
    pub fn generate_pattern(
        &mut self,
        env: &Environment,
        pattern: &Pattern<Implicit>,
        expected: &Type,
    ) -> Result<Fragment, ClassyError> {
        match pattern {
            Pattern::Wildcard(_) => Ok(Fragment::trivial()),

            Pattern::Primitive(pos, prim) => Ok(Fragment {
                constraint: Constraint::Eq(expected.clone(), type_of_primitive(self.well_known(), *prim, *pos), *pos),
                ..Fragment::trivial()
            }),

            Pattern::Variable(_pos, name) => {
                let mut gamma = rustc_hash::FxHashMap::default();
                gamma.insert(*name, expected.clone());
                Ok(Fragment { gamma, vars: Vec::new(), constraint: Constraint::True })
            }

            Pattern::Disjunction(pos, subs) => self.generate_disjunction(env, subs, expected, *pos),

            Pattern::Conjunction(pos, subs) => self.generate_conjunction(env, subs, expected, *pos),

            Pattern::Alias(pos, inner, name) => {
                let mut fragment = self.generate_pattern(env, inner, expected)?;
                if fragment.gamma.contains_key(name) {
                    return Err(ClassyError::NonLinearPattern { name: format!("{name:?}"), at: *pos });
                }
                fragment.gamma.insert(*name, expected.clone());
                Ok(fragment)
            }

            Pattern::Typed(pos, inner, tau) => {
                let sub = self.generate_pattern(env, inner, tau)?;
                Ok(Fragment {
                    gamma: sub.gamma,
                    vars: sub.vars,
                    constraint: Constraint::conj(vec![
                        Constraint::Eq(expected.clone(), tau.clone(), *pos),
                        sub.constraint,
                    ]),
                })
            }

            Pattern::DataConstructor(pos, label, args) => {
                self.generate_data_constructor_pattern(env, *pos, *label, args, expected)
            }
        }
    }

    fn generate_disjunction(
        &mut self,
        env: &Environment,
        subs: &[Pattern<Implicit>],
        expected: &Type,
        at: Span,
    ) -> Result<Fragment, ClassyError> {
        if subs.is_empty() {
            return Err(ClassyError::InvalidDisjunctionPattern { at });
        }
        let mut branches = Vec::with_capacity(subs.len());
        for sub in subs {
            branches.push(self.generate_pattern(env, sub, expected)?);
        }
        let first = &branches[0];
        let mut names: Vec<_> = first.gamma.keys().copied().collect();
        names.sort();
        for branch in &branches[1..] {
            let mut other_names: Vec<_> = branch.gamma.keys().copied().collect();
            other_names.sort();
            if other_names != names {
                return Err(ClassyError::PatternsMustBindSameVariables { at });
            }
        }
        let mut constraints = Vec::with_capacity(subs.len() * 2);
        let mut vars = Vec::new();
        for name in &names {
            let first_ty = first.gamma.get(name).unwrap().clone();
            for branch in &branches[1..] {
                let other_ty = branch.gamma.get(name).unwrap().clone();
                constraints.push(Constraint::Eq(first_ty.clone(), other_ty, at));
            }
        }
        for branch in branches {
            vars.extend(branch.vars);
            constraints.push(branch.constraint);
        }
        Ok(Fragment { gamma: first.gamma.clone(), vars, constraint: Constraint::conj(constraints) })
    }

    fn generate_conjunction(
        &mut self,
        env: &Environment,
        subs: &[Pattern<Implicit>],
        expected: &Type,
        at: Span,
    ) -> Result<Fragment, ClassyError> {
        let mut acc = Fragment::trivial();
        for sub in subs {
            let fragment = self.generate_pattern(env, sub, expected)?;
            acc = acc.disjoint_union(fragment, at)?;
        }
        Ok(acc)
    }

    fn generate_data_constructor_pattern(
        &mut self,
        env: &Environment,
        pos: Span,
        label: classy_common::LabelName,
        args: &[Pattern<Implicit>],
        expected: &Type,
    ) -> Result<Fragment, ClassyError> {
        let info = env.lookup_label(label, pos)?;
        let LabelInfo::DataConstructor { type_name, arg_types } = info else {
            return Err(ClassyError::InvalidDataConstructorApplication { at: pos });
        };
        if args.len() < arg_types.len() {
            return Err(ClassyError::NotEnoughPatternArgts { constructor: format!("{label:?}"), at: pos });
        }
        if args.len() > arg_types.len() {
            return Err(ClassyError::InvalidDataConstructorApplication { at: pos });
        }
        let TypeInfo { def: Some(classy_ast::TypeDef::Algebraic(def)), .. } = env.lookup_type_info(type_name, pos)?
        else {
            return Err(ClassyError::InvalidDataConstructorApplication { at: pos });
        };
        let (fresh_args, sigma) = self.freshen_params(&def.params);
        let result_ty = Type::App(pos, type_name, fresh_args.into());

        let mut acc = Fragment { gamma: Default::default(), vars: Vec::new(), constraint: Constraint::Eq(expected.clone(), result_ty, pos) };
        for (arg_pattern, declared) in args.iter().zip(arg_types.iter()) {
            let substituted = declared.substitute(&sigma);
            let fragment = self.generate_pattern(env, arg_pattern, &substituted)?;
            acc = acc.disjoint_union(fragment, pos)?;
        }
        Ok(acc)
    }
}
