//! `generate_program`: walks an ordered sequence of blocks, extending the
//! environment as type/class/instance declarations are seen and building a
//! single nested `Constraint` whose solution covers the whole program.

use rustc_hash::FxHashMap;

use classy_ast::{Block, ClassDef, Implicit, InstanceDef, Program, TypeDef, ValueDef};
use classy_common::{ClassyError, Span, ValueName};
use classy_constraints::{Constraint, LetScheme};
use classy_env::{ClassInfo, Environment, InstanceInfo, LabelInfo};
use classy_types::{ClassPredicate, Kind, Type};

use crate::generator::Generator;

impl<'a> Generator<'a> {
    /// Generate the root constraint for an entire program, to be handed
    /// to a [`classy_constraints::Solver`].
    #[tracing::instrument(level = "debug", skip_all, fields(blocks = program.len()))]
    pub fn generate_program(&mut self, env: &Environment, program: &Program<Implicit>) -> Result<Constraint, ClassyError> {
        self.generate_blocks(env, program)
    }

    fn generate_blocks(&mut self, env: &Environment, blocks: &[Block<Implicit>]) -> Result<Constraint, ClassyError> {
        let Some((first, rest)) = blocks.split_first() else {
            return Ok(Constraint::True);
        };
        match first {
            Block::TypeDefinitions(defs) => {
                let env2 = self.register_type_definitions(env, defs)?;
                self.generate_blocks(&env2, rest)
            }
            Block::ClassDefinition(class) => {
                let (env2, member_schemes) = self.register_class(env, class)?;
                let continuation = self.generate_blocks(&env2, rest)?;
                Ok(wrap_let(member_schemes, continuation))
            }
            Block::InstanceDefinitions(insts) => {
                let (env2, body_constraints) = self.register_instances(env, insts)?;
                let continuation = self.generate_blocks(&env2, rest)?;
                Ok(Constraint::conj(body_constraints.into_iter().chain(std::iter::once(continuation)).collect()))
            }
            Block::Definition(defs) => {
                let (env2, outer, inner, tail_constraints) = self.generate_definitions_block(env, defs)?;
                let continuation = self.generate_blocks(&env2, rest)?;
                let tail = Constraint::conj(tail_constraints.into_iter().chain(std::iter::once(continuation)).collect());
                Ok(wrap_let(outer, wrap_let(inner, tail)))
            }
        }
    }

    fn register_type_definitions(&mut self, env: &Environment, defs: &[TypeDef]) -> Result<Environment, ClassyError> {
        let mut env = env.clone();
        for def in defs {
            env = env.bind_type(def.name(), Kind::of_arity(def.params().len()), Some(def.clone()));
        }
        for def in defs {
            match def {
                TypeDef::Algebraic(d) => {
                    for ctor in &d.constructors {
                        for arg in &ctor.args {
                            classy_env::check_wf_type(&env, arg, &Kind::Star)?;
                        }
                        env = env.bind_label(
                            ctor.label,
                            LabelInfo::DataConstructor { type_name: d.name, arg_types: ctor.args.clone() },
                        );
                    }
                }
                TypeDef::Record(d) => {
                    for field in &d.fields {
                        classy_env::check_wf_type(&env, &field.ty, &Kind::Star)?;
                        env = env.bind_label(
                            field.label,
                            LabelInfo::RecordField { record_type: d.name, field_type: field.ty.clone() },
                        );
                    }
                }
            }
        }
        Ok(env)
    }

    fn register_class(&mut self, env: &Environment, class: &ClassDef) -> Result<(Environment, Vec<LetScheme>), ClassyError> {
        for sup in &class.supers {
            env.lookup_class(*sup, class.span)?;
        }
        for member in &class.members {
            if !member.ty.free_vars().contains(&class.param) {
                return Err(ClassyError::InvalidOverloading {
                    class: format!("{:?}", class.name),
                    member: format!("{:?}", member.label),
                    at: member.span,
                });
            }
        }
        let info = ClassInfo {
            param: class.param,
            supers: class.supers.clone(),
            members: class.members.iter().map(|m| (m.label, m.ty.clone())).collect(),
            is_constructor_class: class.is_constructor_class,
        };
        let env = env.bind_class(class.name, info);

        let predicates = vec![ClassPredicate { class: class.name, variable: class.param }];
        let mut schemes = Vec::with_capacity(class.members.len());
        for member in &class.members {
            let mut header = FxHashMap::default();
            let value_name = ValueName::new(member.label.atom());
            header.insert(value_name, member.ty.clone());
            schemes.push(LetScheme {
                rigid: vec![class.param],
                flexible: Vec::new(),
                predicates: predicates.clone(),
                inner: Box::new(Constraint::True),
                header,
            });
        }
        Ok((env, schemes))
    }

    fn register_instances(
        &mut self,
        env: &Environment,
        insts: &[InstanceDef<Implicit>],
    ) -> Result<(Environment, Vec<Constraint>), ClassyError> {
        let mut env = env.clone();
        let mut body_constraints = Vec::new();
        for inst in insts {
            let class_info = env.lookup_class(inst.class, inst.span)?;
            let head_kind = env.lookup_type_kind(inst.head, inst.span)?;
            if head_kind.arity() != inst.params.len() {
                return Err(ClassyError::IllKindedType { at: inst.span });
            }
            classy_env::check_correct_context(&env, &inst.context, &inst.params, inst.span)?;

            let mut head_sigma = FxHashMap::default();
            head_sigma.insert(class_info.param, head_applied(inst.head, &inst.params, inst.span));

            for member in &inst.members {
                let declared = class_info
                    .members
                    .iter()
                    .find(|entry| entry.0 == member.label)
                    .map(|entry| entry.1.clone());
                let Some(declared) = declared else {
                    return Err(ClassyError::InvalidOverloading {
                        class: format!("{:?}", inst.class),
                        member: format!("{:?}", member.label),
                        at: inst.span,
                    });
                };
                let expected = declared.substitute(&head_sigma);
                let constraint = self.generate_expr(&env, &member.body, &expected)?;
                body_constraints.push(constraint);
            }

            env = env.bind_instance(
                inst.class,
                inst.head,
                InstanceInfo { params: inst.params.clone(), context: inst.context.clone() },
                inst.span,
            )?;
        }
        Ok((env, body_constraints))
    }

    /// Split a mutually-recursive group of value definitions into the
    /// outer (explicit, fixed-scheme) and inner (implicit, to-be-generalized)
    /// `Let`s spec §4.4 describes, plus the body-checking constraints that
    /// belong in the surrounding continuation (explicit bodies only — the
    /// implicit bodies are folded into the inner `Let`'s own `inner` field
    /// so they're solved in the same pass that generalizes their header).
    #[allow(clippy::type_complexity)]
    fn generate_definitions_block(
        &mut self,
        env: &Environment,
        defs: &[ValueDef<Implicit>],
    ) -> Result<(Environment, Vec<LetScheme>, Vec<LetScheme>, Vec<Constraint>), ClassyError> {
        let mut group_env = env.clone();
        let mut implicit_vars = FxHashMap::default();
        for def in defs {
            match &def.scheme {
                Some(scheme) => group_env = group_env.bind_scheme(def.name, scheme.clone()),
                None => {
                    let y = self.fresh_tyvar();
                    implicit_vars.insert(def.name, y);
                    group_env = group_env.bind_simple(def.name, Type::Var(Span::dummy(), y));
                }
            }
        }

        let mut explicit_schemes = Vec::new();
        let mut explicit_body_constraints = Vec::new();
        let mut implicit_body_constraints = Vec::new();
        let mut value_form_header = FxHashMap::default();
        let mut value_form_flexible = Vec::new();
        let mut non_value_form_header = FxHashMap::default();

        for def in defs {
            match &def.scheme {
                Some(scheme) => {
                    if !def.body.is_value_form() && !scheme.quantifiers.is_empty() {
                        return Err(ClassyError::ValueRestriction { at: def.span });
                    }
                    let constraint = self.generate_expr(&group_env, &def.body, &scheme.body)?;
                    explicit_body_constraints.push(constraint);
                    let mut header = FxHashMap::default();
                    header.insert(def.name, scheme.body.clone());
                    explicit_schemes.push(LetScheme {
                        rigid: scheme.quantifiers.clone(),
                        flexible: Vec::new(),
                        predicates: scheme.predicates.clone(),
                        inner: Box::new(Constraint::True),
                        header,
                    });
                }
                None => {
                    let y = *implicit_vars.get(&def.name).expect("registered above");
                    let expected = Type::Var(Span::dummy(), y);
                    let constraint = self.generate_expr(&group_env, &def.body, &expected)?;
                    implicit_body_constraints.push(constraint);
                    if def.body.is_value_form() {
                        value_form_flexible.push(y);
                        value_form_header.insert(def.name, expected);
                    } else {
                        non_value_form_header.insert(def.name, expected);
                    }
                }
            }
        }

        let mut inner_schemes = Vec::new();
        if !value_form_header.is_empty() {
            inner_schemes.push(LetScheme {
                rigid: Vec::new(),
                flexible: value_form_flexible,
                predicates: Vec::new(),
                inner: Box::new(Constraint::conj(implicit_body_constraints.clone())),
                header: value_form_header,
            });
        }
        if !non_value_form_header.is_empty() {
            let inner = if inner_schemes.is_empty() {
                Constraint::conj(implicit_body_constraints)
            } else {
                Constraint::True
            };
            inner_schemes.push(LetScheme {
                rigid: Vec::new(),
                flexible: Vec::new(),
                predicates: Vec::new(),
                inner: Box::new(inner),
                header: non_value_form_header,
            });
        }

        Ok((group_env, explicit_schemes, inner_schemes, explicit_body_constraints))
    }
}

fn wrap_let(schemes: Vec<LetScheme>, body: Constraint) -> Constraint {
    if schemes.is_empty() {
        body
    } else {
        Constraint::Let(schemes, Box::new(body))
    }
}

fn head_applied(head: classy_common::TypeConName, params: &[classy_common::TypeVarName], at: Span) -> Type {
    let args = params.iter().map(|p| Type::Var(at, *p)).collect::<Vec<_>>();
    Type::App(at, head, args.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use classy_ast::{builder, ClassMember};
    use classy_common::{Interner, TypeVarName, WellKnownNames};
    use classy_constraints::Solver;
    use classy_solver::RobinsonSolver;

    fn setup() -> (Interner, WellKnownNames) {
        let mut interner = Interner::new();
        let well_known = WellKnownNames::intern(&mut interner);
        (interner, well_known)
    }

    #[test]
    fn single_implicit_definition_generalizes_both_lambda_parameters() {
        let (mut interner, well_known) = setup();
        let const_name = ValueName::new(interner.intern("const"));
        let x = ValueName::new(interner.intern("x"));
        let y = ValueName::new(interner.intern("y"));
        let mut gen = Generator::new(&mut interner, well_known);
        let env = Environment::new();
        let body = builder::lambda(x, builder::lambda(y, builder::var(x)));
        let program: Program<Implicit> =
            vec![Block::Definition(vec![ValueDef { span: Span::dummy(), name: const_name, scheme: None, body }])];

        let constraint = gen.generate_program(&env, &program).unwrap();
        let mut solver = RobinsonSolver::new();
        let solution = solver.solve(constraint).unwrap();
        let scheme = solution.schemes.get(&const_name).expect("const's scheme was recorded");
        assert_eq!(scheme.quantifiers.len(), 2);
    }

    #[test]
    fn explicit_scheme_with_non_value_form_body_is_rejected_by_value_restriction() {
        let (mut interner, well_known) = setup();
        let f = ValueName::new(interner.intern("f"));
        let g = ValueName::new(interner.intern("g"));
        let mut gen = Generator::new(&mut interner, well_known);
        let env = Environment::new().bind_simple(g, Type::App(Span::dummy(), well_known.int, smallvec::smallvec![]));
        let a = TypeVarName::new(gen.well_known().arrow.atom());
        let scheme = classy_types::TyScheme {
            quantifiers: vec![a],
            predicates: vec![],
            body: Type::App(Span::dummy(), well_known.int, smallvec::smallvec![]),
        };
        let program: Program<Implicit> = vec![Block::Definition(vec![ValueDef {
            span: Span::dummy(),
            name: f,
            scheme: Some(scheme),
            body: builder::app(builder::var(g), builder::int(1)),
        }])];
        let result = gen.generate_program(&env, &program);
        assert!(matches!(result, Err(ClassyError::ValueRestriction { .. })));
    }

    #[test]
    fn class_member_not_mentioning_the_class_parameter_is_invalid_overloading() {
        let (mut interner, well_known) = setup();
        let eq_class = classy_common::TypeConName::new(interner.intern("Eq"));
        let a = TypeVarName::new(interner.intern("a"));
        let bad_member = classy_common::LabelName::new(interner.intern("bad"));
        let mut gen = Generator::new(&mut interner, well_known);
        let env = Environment::new();
        let class = ClassDef {
            span: Span::dummy(),
            name: eq_class,
            param: a,
            supers: vec![],
            members: vec![ClassMember {
                span: Span::dummy(),
                label: bad_member,
                ty: Type::App(Span::dummy(), well_known.int, smallvec::smallvec![]),
            }],
            is_constructor_class: false,
        };
        let program: Program<Implicit> = vec![Block::ClassDefinition(class)];
        let result = gen.generate_program(&env, &program);
        assert!(matches!(result, Err(ClassyError::InvalidOverloading { .. })));
    }

    #[test]
    fn class_and_instance_together_solve_the_instance_body_against_the_member_type() {
        let (mut interner, well_known) = setup();
        let eq_class = classy_common::TypeConName::new(interner.intern("Eq"));
        let a = TypeVarName::new(interner.intern("a"));
        let eq_member = classy_common::LabelName::new(interner.intern("eq"));
        let p = ValueName::new(interner.intern("p"));
        let q = ValueName::new(interner.intern("q"));
        let mut gen = Generator::new(&mut interner, well_known);
        let env = Environment::new().bind_type(well_known.int, Kind::Star, None);

        let bool_ty = Type::App(Span::dummy(), well_known.bool, smallvec::smallvec![]);
        let member_ty = Type::arrow(
            Span::dummy(),
            well_known.arrow,
            Type::Var(Span::dummy(), a),
            Type::arrow(Span::dummy(), well_known.arrow, Type::Var(Span::dummy(), a), bool_ty),
        );
        let class = ClassDef {
            span: Span::dummy(),
            name: eq_class,
            param: a,
            supers: vec![],
            members: vec![ClassMember { span: Span::dummy(), label: eq_member, ty: member_ty }],
            is_constructor_class: false,
        };
        let instance = InstanceDef {
            span: Span::dummy(),
            class: eq_class,
            head: well_known.int,
            params: vec![],
            context: vec![],
            members: vec![classy_ast::InstanceMember {
                label: eq_member,
                body: builder::lambda(p, builder::lambda(q, builder::boolean(true))),
            }],
        };
        let program: Program<Implicit> =
            vec![Block::ClassDefinition(class), Block::InstanceDefinitions(vec![instance])];

        let constraint = gen.generate_program(&env, &program).unwrap();
        let mut solver = RobinsonSolver::new();
        let solution = solver.solve(constraint).unwrap();
        let eq_value_name = ValueName::new(eq_member.atom());
        let scheme = solution.schemes.get(&eq_value_name).expect("eq's member scheme was recorded");
        assert!(scheme.quantifiers.contains(&a));
    }
}
