//! `elaborate_program`: walks an `Explicit` program block by block,
//! compiling every `ClassDefinition`/`InstanceDefinitions` block into
//! plain `Definition` blocks and rewriting every overloaded symbol use,
//! so the result never mentions a class (spec §4.5's class-free output).

use classy_ast::{Block, Explicit, Program, ValueDef};
use classy_common::{ClassyError, Span, ValueName};
use classy_env::Environment;
use classy_types::{Kind, Type, TyScheme};

use crate::elaborator::Elaborator;

impl<'a> Elaborator<'a> {
    #[tracing::instrument(level = "debug", skip_all, fields(blocks = program.len()))]
    pub fn elaborate_program(&mut self, env: &Environment, program: &Program<Explicit>) -> Result<Program<Explicit>, ClassyError> {
        self.elaborate_blocks(env, program)
    }

    fn elaborate_blocks(&mut self, env: &Environment, blocks: &[Block<Explicit>]) -> Result<Program<Explicit>, ClassyError> {
        let Some((first, rest)) = blocks.split_first() else {
            return Ok(Vec::new());
        };
        match first {
            Block::TypeDefinitions(defs) => {
                let mut new_env = env.clone();
                for def in defs {
                    new_env = new_env.bind_type(def.name(), Kind::of_arity(def.params().len()), Some(def.clone()));
                }
                let mut out = vec![Block::TypeDefinitions(defs.clone())];
                out.extend(self.elaborate_blocks(&new_env, rest)?);
                Ok(out)
            }
            Block::ClassDefinition(class) => {
                let elaboration = self.elaborate_class(env, class)?;
                let mut out = vec![elaboration.type_def_block, elaboration.accessor_block];
                out.extend(self.elaborate_blocks(&elaboration.env, rest)?);
                Ok(out)
            }
            Block::InstanceDefinitions(insts) => {
                let (new_env, dict_defs) = self.elaborate_instances(env, insts)?;
                let mut out = vec![Block::Definition(dict_defs)];
                out.extend(self.elaborate_blocks(&new_env, rest)?);
                Ok(out)
            }
            Block::Definition(defs) => {
                let (new_env, new_defs) = self.elaborate_definitions(env, defs)?;
                let mut out = vec![Block::Definition(new_defs)];
                out.extend(self.elaborate_blocks(&new_env, rest)?);
                Ok(out)
            }
        }
    }

    /// Lambda-abstract every definition in the group over one fresh
    /// dictionary parameter per predicate in its own scheme, and rewrite
    /// its body in an environment where every sibling in the group is
    /// already visible (mutual recursion, spec §4.4).
    fn elaborate_definitions(
        &mut self,
        env: &Environment,
        defs: &[ValueDef<Explicit>],
    ) -> Result<(Environment, Vec<ValueDef<Explicit>>), ClassyError> {
        let mut group_env = env.clone();
        for def in defs {
            self.ledger_mut().bind_scheme(def.name, !def.scheme.predicates.is_empty(), def.span)?;
            group_env = group_env.bind_scheme(def.name, def.scheme.clone());
        }

        let mut new_defs = Vec::with_capacity(defs.len());
        for def in defs {
            let (ambient, dict_params) = self.bind_ambient(&def.scheme.predicates, def.span);
            let elaborated_body = self.elaborate_expr(&group_env, &ambient, &def.body)?;
            let wrapped_body = wrap_lambda(dict_params.clone(), elaborated_body, def.span);

            let arg_types: Vec<Type> = dict_params.iter().map(|(_, ty)| ty.clone()).collect();
            let new_body_ty = Type::ntyarrow(def.span, self.well_known.arrow, arg_types, def.scheme.body.clone());
            let new_scheme = TyScheme { quantifiers: def.scheme.quantifiers.clone(), predicates: Vec::new(), body: new_body_ty };

            new_defs.push(ValueDef { span: def.span, name: def.name, scheme: new_scheme, body: wrapped_body });
        }
        Ok((group_env, new_defs))
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
    use classy_ast::{ClassDef, ClassMember, Expr, InstanceDef, InstanceMember, Primitive};
    use classy_common::{Interner, LabelName, TypeConName, TypeVarName, WellKnownNames};
    use classy_types::ClassPredicate;

    fn setup() -> (Interner, WellKnownNames) {
        let mut interner = Interner::new();
        let well_known = WellKnownNames::intern(&mut interner);
        (interner, well_known)
    }

    #[test]
    fn a_plain_definition_with_no_predicates_passes_through_unwrapped() {
        let (mut interner, well_known) = setup();
        let x = ValueName::new(interner.intern("x"));
        let int_ty = Type::App(Span::dummy(), well_known.int, smallvec::smallvec![]);
        let program: Program<Explicit> = vec![Block::Definition(vec![ValueDef {
            span: Span::dummy(),
            name: x,
            scheme: TyScheme::monomorphic(int_ty.clone()),
            body: Expr::Primitive(Span::dummy(), Primitive::Int(1)),
        }])];
        let mut elaborator = Elaborator::new(&mut interner, well_known);
        let env = Environment::new();
        let result = elaborator.elaborate_program(&env, &program).unwrap();
        let Block::Definition(defs) = &result[0] else { panic!("expected Definition") };
        assert!(matches!(defs[0].body, Expr::Primitive(..)));
        assert!(defs[0].scheme.predicates.is_empty());
    }

    #[test]
    fn a_class_then_instance_program_elaborates_to_two_class_free_blocks() {
        let (mut interner, well_known) = setup();
        let eq = TypeConName::new(interner.intern("Eq"));
        let a = TypeVarName::new(interner.intern("a"));
        let eq_member = LabelName::new(interner.intern("eq"));
        let p = ValueName::new(interner.intern("p"));
        let q = ValueName::new(interner.intern("q"));

        let bool_ty = Type::App(Span::dummy(), well_known.bool, smallvec::smallvec![]);
        let member_ty = Type::arrow(
            Span::dummy(),
            well_known.arrow,
            Type::Var(Span::dummy(), a),
            Type::arrow(Span::dummy(), well_known.arrow, Type::Var(Span::dummy(), a), bool_ty),
        );
        let class = ClassDef {
            span: Span::dummy(),
            name: eq,
            param: a,
            supers: vec![],
            members: vec![ClassMember { span: Span::dummy(), label: eq_member, ty: member_ty }],
            is_constructor_class: false,
        };
        let int_ty = Type::App(Span::dummy(), well_known.int, smallvec::smallvec![]);
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
                    int_ty.clone(),
                    Box::new(Expr::Lambda(Span::dummy(), q, int_ty, Box::new(Expr::Primitive(Span::dummy(), Primitive::Bool(true))))),
                ),
            }],
        };
        let program: Program<Explicit> = vec![Block::ClassDefinition(class), Block::InstanceDefinitions(vec![instance])];
        let mut elaborator = Elaborator::new(&mut interner, well_known);
        let env = Environment::new();
        let result = elaborator.elaborate_program(&env, &program).unwrap();

        assert!(!result.iter().any(|b| matches!(b, Block::ClassDefinition(_) | Block::InstanceDefinitions(_))));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn a_predicate_constrained_definition_lambda_abstracts_over_its_dictionary() {
        let (mut interner, well_known) = setup();
        let eq = TypeConName::new(interner.intern("Eq"));
        let a = TypeVarName::new(interner.intern("a"));
        let p = ValueName::new(interner.intern("p"));

        let scheme = TyScheme {
            quantifiers: vec![a],
            predicates: vec![ClassPredicate { class: eq, variable: a }],
            body: Type::Var(Span::dummy(), a),
        };
        let program: Program<Explicit> = vec![Block::Definition(vec![ValueDef {
            span: Span::dummy(),
            name: p,
            scheme,
            body: Expr::Primitive(Span::dummy(), Primitive::Bool(true)),
        }])];
        let mut elaborator = Elaborator::new(&mut interner, well_known);
        let env = Environment::new();
        let result = elaborator.elaborate_program(&env, &program).unwrap();
        let Block::Definition(defs) = &result[0] else { panic!("expected Definition") };
        assert!(defs[0].scheme.predicates.is_empty());
        assert!(matches!(defs[0].body, Expr::Lambda(..)));
    }
}
