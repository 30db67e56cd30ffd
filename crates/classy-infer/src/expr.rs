//! `generate_expr` (spec §4.4).

use smallvec::smallvec;

use classy_ast::{Expr, Implicit, MatchArm, Primitive, RecordField};
use classy_common::{ClassyError, Span, WellKnownNames};
use classy_constraints::{Constraint, LetScheme};
use classy_env::{Environment, LabelInfo, TypeInfo};
use classy_types::Type;

use crate::generator::Generator;

/// `typeOfPrimitive` (spec §4.4): the fixed, built-in type of a literal.
pub(crate) fn type_of_primitive(well_known: WellKnownNames, prim: Primitive, pos: Span) -> Type {
    match prim {
        Primitive::Int(_) => Type::App(pos, well_known.int, smallvec![]),
        Primitive::Bool(_) => Type::App(pos, well_known.bool, smallvec![]),
    }
}

impl<'a> Generator<'a> {
    pub fn generate_expr(
        &mut self,
        env: &Environment,
        expr: &Expr<Implicit>,
        expected: &Type,
    ) -> Result<Constraint, ClassyError> {
        match expr {
            Expr::Var(pos, name, _) => {
                env.lookup(*name, *pos)?;
                Ok(Constraint::InstanceOf(*name, expected.clone(), *pos))
            }

            Expr::Lambda(pos, param, _annotation, body) => {
                let x1 = self.fresh_tyvar();
                let x2 = self.fresh_tyvar();
                self.record_lambda_param(*pos, x1);
                let mut header = rustc_hash::FxHashMap::default();
                header.insert(*param, Type::Var(*pos, x1));
                let inner_env = env.bind_simple(*param, Type::Var(*pos, x1));
                let body_constraint = self.generate_expr(&inner_env, body, &Type::Var(*pos, x2))?;
                let let_scheme = LetScheme::monomorphic(header, body_constraint);
                let arrow = Constraint::Eq(
                    expected.clone(),
                    Type::arrow(*pos, self.well_known().arrow, Type::Var(*pos, x1), Type::Var(*pos, x2)),
                    *pos,
                );
                Ok(Constraint::exists(
                    vec![x1, x2],
                    Constraint::conj(vec![Constraint::Let(vec![let_scheme], Box::new(Constraint::True)), arrow]),
                ))
            }

            Expr::App(pos, e1, e2) => {
                let x = self.fresh_tyvar();
                let arg_ty = Type::Var(*pos, x);
                let fun_ty = Type::arrow(*pos, self.well_known().arrow, arg_ty.clone(), expected.clone());
                let c1 = self.generate_expr(env, e1, &fun_ty)?;
                let c2 = self.generate_expr(env, e2, &arg_ty)?;
                Ok(Constraint::exists(vec![x], Constraint::conj(vec![c1, c2])))
            }

            Expr::TypeAscription(pos, inner, tau) => {
                let inner_constraint = self.generate_expr(env, inner, tau)?;
                Ok(Constraint::conj(vec![Constraint::Eq(expected.clone(), tau.clone(), *pos), inner_constraint]))
            }

            Expr::ExistentialIntro(_pos, vars, inner) => {
                let inner_constraint = self.generate_expr(env, inner, expected)?;
                Ok(Constraint::exists(vars.clone(), inner_constraint))
            }

            Expr::Match(pos, scrutinee, arms) => self.generate_match(env, *pos, scrutinee, arms, expected),

            Expr::DataConstructor(pos, label, args) => {
                self.generate_data_constructor_expr(env, *pos, *label, args, expected)
            }

            Expr::Primitive(pos, prim) => {
                Ok(Constraint::Eq(expected.clone(), type_of_primitive(self.well_known(), *prim, *pos), *pos))
            }

            Expr::RecordConstruction(pos, _name, fields) => {
                self.generate_record_construction(env, *pos, fields, expected)
            }

            Expr::RecordAccess(pos, inner, label) => self.generate_record_access(env, *pos, inner, *label, expected),
        }
    }

    fn generate_match(
        &mut self,
        env: &Environment,
        pos: Span,
        scrutinee: &Expr<Implicit>,
        arms: &[MatchArm<Implicit>],
        expected: &Type,
    ) -> Result<Constraint, ClassyError> {
        let x = self.fresh_tyvar();
        let scrutinee_ty = Type::Var(pos, x);
        let scrutinee_constraint = self.generate_expr(env, scrutinee, &scrutinee_ty)?;
        let mut arm_constraints = Vec::with_capacity(arms.len());
        for arm in arms {
            let fragment = self.generate_pattern(env, &arm.pattern, &scrutinee_ty)?;
            let mut arm_env = env.clone();
            for (name, ty) in &fragment.gamma {
                arm_env = arm_env.bind_simple(*name, ty.clone());
            }
            let body_constraint = self.generate_expr(&arm_env, &arm.body, expected)?;
            let pattern_scheme = LetScheme::monomorphic(fragment.gamma, fragment.constraint);
            arm_constraints.push(Constraint::exists(
                fragment.vars,
                Constraint::Let(vec![pattern_scheme], Box::new(body_constraint)),
            ));
        }
        Ok(Constraint::exists(
            vec![x],
            Constraint::conj(vec![scrutinee_constraint, Constraint::conj(arm_constraints)]),
        ))
    }

    fn generate_data_constructor_expr(
        &mut self,
        env: &Environment,
        pos: Span,
        label: classy_common::LabelName,
        args: &[Expr<Implicit>],
        expected: &Type,
    ) -> Result<Constraint, ClassyError> {
        let info = env.lookup_label(label, pos)?;
        let LabelInfo::DataConstructor { type_name, arg_types } = info else {
            return Err(ClassyError::InvalidDataConstructorApplication { at: pos });
        };
        if args.len() < arg_types.len() {
            return Err(ClassyError::PartialDataConstructorApplication { constructor: format!("{label:?}"), at: pos });
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
        let mut constraints = vec![Constraint::Eq(expected.clone(), result_ty, pos)];
        for (arg_expr, declared) in args.iter().zip(arg_types.iter()) {
            let substituted = declared.substitute(&sigma);
            constraints.push(self.generate_expr(env, arg_expr, &substituted)?);
        }
        Ok(Constraint::conj(constraints))
    }

    fn generate_record_construction(
        &mut self,
        env: &Environment,
        pos: Span,
        fields: &[RecordField<Implicit>],
        expected: &Type,
    ) -> Result<Constraint, ClassyError> {
        if fields.is_empty() {
            return Err(ClassyError::InvalidRecordInstantiation { at: pos });
        }
        let first = env.lookup_label(fields[0].label, pos)?;
        let LabelInfo::RecordField { record_type, .. } = first else {
            return Err(ClassyError::RecordExpected { at: pos });
        };
        let TypeInfo { def: Some(classy_ast::TypeDef::Record(def)), .. } = env.lookup_type_info(record_type, pos)?
        else {
            return Err(ClassyError::RecordExpected { at: pos });
        };
        let (fresh_args, sigma) = self.freshen_params(&def.params);
        let instantiated = Type::App(pos, record_type, fresh_args.into());

        let mut seen = rustc_hash::FxHashSet::default();
        let mut constraints = vec![Constraint::Eq(expected.clone(), instantiated, pos)];
        for field in fields {
            if !seen.insert(field.label) {
                return Err(ClassyError::MultipleLabels { label: format!("{:?}", field.label), at: pos });
            }
            let info = env.lookup_label(field.label, pos)?;
            let LabelInfo::RecordField { record_type: rt, field_type } = info else {
                return Err(ClassyError::LabelDoesNotBelong {
                    label: format!("{:?}", field.label),
                    record_type: format!("{record_type:?}"),
                    at: pos,
                });
            };
            if rt != record_type {
                return Err(ClassyError::LabelDoesNotBelong {
                    label: format!("{:?}", field.label),
                    record_type: format!("{record_type:?}"),
                    at: pos,
                });
            }
            let substituted = field_type.substitute(&sigma);
            constraints.push(self.generate_expr(env, &field.value, &substituted)?);
        }
        Ok(Constraint::conj(constraints))
    }

    fn generate_record_access(
        &mut self,
        env: &Environment,
        pos: Span,
        inner: &Expr<Implicit>,
        label: classy_common::LabelName,
        expected: &Type,
    ) -> Result<Constraint, ClassyError> {
        let info = env.lookup_label(label, pos)?;
        let LabelInfo::RecordField { record_type, field_type } = info else {
            return Err(ClassyError::RecordExpected { at: pos });
        };
        let TypeInfo { def: Some(classy_ast::TypeDef::Record(def)), .. } = env.lookup_type_info(record_type, pos)?
        else {
            return Err(ClassyError::RecordExpected { at: pos });
        };
        let (fresh_args, sigma) = self.freshen_params(&def.params);
        let instantiated_record = Type::App(pos, record_type, fresh_args.into());
        let substituted_field = field_type.substitute(&sigma);
        let inner_constraint = self.generate_expr(env, inner, &instantiated_record)?;
        Ok(Constraint::conj(vec![inner_constraint, Constraint::Eq(expected.clone(), substituted_field, pos)]))
    }
}
