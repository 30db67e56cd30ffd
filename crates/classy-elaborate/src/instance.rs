//! Compiling an `InstanceDefinitions` group into dictionary-constructor
//! value bindings (spec §4.5).
//!
//! All instances in the group are bound into one "big" environment before
//! any member body is elaborated, so a recursive instance group can see
//! each other's dictionaries. Context canonicity is still checked against
//! a "small" environment of only the instances seen so far, mirroring
//! `classy-infer::program::register_instances`'s own ordering.

use classy_ast::{Block, Explicit, InstanceDef, ValueDef};
use classy_common::{ClassyError, Span, TypeConName, TypeVarName, ValueName};
use classy_env::{Environment, InstanceInfo};
use classy_types::{Type, TyScheme};

use crate::elaborator::Elaborator;
use crate::naming;
use crate::resolve::resolve_predicate;

fn head_applied(head: TypeConName, params: &[TypeVarName], at: Span) -> Type {
    let args: Vec<Type> = params.iter().map(|p| Type::Var(at, *p)).collect();
    Type::App(at, head, args.into())
}

impl<'a> Elaborator<'a> {
    pub(crate) fn elaborate_instances(
        &mut self,
        env: &Environment,
        insts: &[InstanceDef<Explicit>],
    ) -> Result<(Environment, Vec<ValueDef<Explicit>>), ClassyError> {
        let mut big_env = env.clone();
        for inst in insts {
            big_env = big_env.bind_instance(
                inst.class,
                inst.head,
                InstanceInfo { params: inst.params.clone(), context: inst.context.clone() },
                inst.span,
            )?;
        }

        let mut small_env = env.clone();
        let mut dict_defs = Vec::with_capacity(insts.len());
        for inst in insts {
            let class_info = big_env.lookup_class(inst.class, inst.span)?;
            classy_env::check_correct_context(&small_env, &inst.context, &inst.params, inst.span)?;
            small_env = small_env.bind_instance(
                inst.class,
                inst.head,
                InstanceInfo { params: inst.params.clone(), context: inst.context.clone() },
                inst.span,
            )?;

            let (ambient, dict_params) = self.bind_ambient(&inst.context, inst.span);
            let head_ty = head_applied(inst.head, &inst.params, inst.span);

            let mut fields = Vec::with_capacity(class_info.supers.len() + inst.members.len());
            for sup in &class_info.supers {
                let dict_expr = resolve_predicate(self.interner, &big_env, &ambient, *sup, &head_ty, inst.span)?;
                let field = naming::superclass_field_name(self.interner, inst.class, *sup);
                fields.push(classy_ast::RecordField { label: field, value: dict_expr });
            }
            for member in &inst.members {
                let body = self.elaborate_expr(&big_env, &ambient, &member.body)?;
                fields.push(classy_ast::RecordField { label: member.label, value: body });
            }

            let class_type = naming::class_type_name(self.interner, inst.class);
            let dict_value = classy_ast::Expr::RecordConstruction(inst.span, None, fields);
            let wrapped = wrap_lambda(dict_params.clone(), dict_value, inst.span);

            let arg_types: Vec<Type> = dict_params.iter().map(|(_, ty)| ty.clone()).collect();
            let result_ty = Type::App(inst.span, class_type, smallvec::smallvec![head_ty]);
            let ctor_ty = Type::ntyarrow(inst.span, self.well_known.arrow, arg_types, result_ty);

            let dict_name = naming::instance_dict_name(self.interner, inst.class, inst.head);
            self.ledger_mut().bind_simple(dict_name, inst.span)?;

            dict_defs.push(ValueDef {
                span: inst.span,
                name: dict_name,
                scheme: TyScheme { quantifiers: inst.params.clone(), predicates: Vec::new(), body: ctor_ty },
                body: wrapped,
            });
        }
        Ok((big_env, dict_defs))
    }
}

fn wrap_lambda(params: Vec<(ValueName, Type)>, body: classy_ast::Expr<Explicit>, at: Span) -> classy_ast::Expr<Explicit> {
    params
        .into_iter()
        .rev()
        .fold(body, |acc, (name, ty)| classy_ast::Expr::Lambda(at, name, ty, Box::new(acc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use classy_ast::{Expr, InstanceMember};
    use classy_common::{Interner, LabelName, WellKnownNames};
    use classy_env::ClassInfo;

    fn setup() -> (Interner, WellKnownNames) {
        let mut interner = Interner::new();
        let well_known = WellKnownNames::intern(&mut interner);
        (interner, well_known)
    }

    #[test]
    fn an_instance_with_no_context_yields_a_nullary_dictionary_constructor() {
        let (mut interner, well_known) = setup();
        let eq = TypeConName::new(interner.intern("Eq"));
        let a = TypeVarName::new(interner.intern("a"));
        let eq_member = LabelName::new(interner.intern("eq"));
        let p = ValueName::new(interner.intern("p"));
        let q = ValueName::new(interner.intern("q"));

        let env = Environment::new().bind_class(
            eq,
            ClassInfo { param: a, supers: vec![], members: vec![(eq_member, Type::Var(Span::dummy(), a))], is_constructor_class: false },
        );
        let instance = InstanceDef {
            span: Span::dummy(),
            class: eq,
            head: well_known.int,
            params: vec![],
            context: vec![],
            members: vec![InstanceMember {
                label: eq_member,
                body: Expr::Lambda(
                    Span::dummy(),
                    p,
                    Type::App(Span::dummy(), well_known.int, smallvec::smallvec![]),
                    Box::new(Expr::Lambda(
                        Span::dummy(),
                        q,
                        Type::App(Span::dummy(), well_known.int, smallvec::smallvec![]),
                        Box::new(Expr::Primitive(Span::dummy(), classy_ast::Primitive::Bool(true))),
                    )),
                ),
            }],
        };
        let mut elaborator = Elaborator::new(&mut interner, well_known);
        let (new_env, defs) = elaborator.elaborate_instances(&env, &[instance]).unwrap();
        assert_eq!(defs.len(), 1);
        assert!(defs[0].scheme.predicates.is_empty());
        assert!(new_env.lookup_instance(eq, well_known.int).is_some());
        let Expr::RecordConstruction(_, _, fields) = &defs[0].body else { panic!("expected a dictionary record") };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, eq_member);
    }

    #[test]
    fn an_instance_with_context_lambda_abstracts_over_one_dictionary_per_predicate() {
        let (mut interner, well_known) = setup();
        let eq = TypeConName::new(interner.intern("Eq"));
        let a = TypeVarName::new(interner.intern("a"));
        let pair = TypeConName::new(interner.intern("Pair"));
        let eq_member = LabelName::new(interner.intern("eq"));

        let env = Environment::new()
            .bind_class(
                eq,
                ClassInfo { param: a, supers: vec![], members: vec![(eq_member, Type::Var(Span::dummy(), a))], is_constructor_class: false },
            )
            .bind_instance(eq, well_known.int, InstanceInfo { params: vec![], context: vec![] }, Span::dummy())
            .unwrap();

        let instance = InstanceDef {
            span: Span::dummy(),
            class: eq,
            head: pair,
            params: vec![a],
            context: vec![classy_types::ClassPredicate { class: eq, variable: a }],
            members: vec![InstanceMember {
                label: eq_member,
                body: Expr::Primitive(Span::dummy(), classy_ast::Primitive::Bool(true)),
            }],
        };
        let mut elaborator = Elaborator::new(&mut interner, well_known);
        let (_env, defs) = elaborator.elaborate_instances(&env, &[instance]).unwrap();
        assert_eq!(defs.len(), 1);
        let Expr::Lambda(_, _, ty, _) = &defs[0].body else { panic!("expected a lambda over the dictionary parameter") };
        let class_type = naming::class_type_name(elaborator.interner, eq);
        assert!(matches!(ty, Type::App(_, con, _) if *con == class_type));
    }
}
