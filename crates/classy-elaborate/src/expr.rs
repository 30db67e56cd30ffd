//! Rewriting overloaded symbol uses (spec §4.5): every `Var` whose scheme
//! carries predicates is applied to one resolved dictionary expression per
//! predicate, in scheme-quantifier order. Every other expression form is
//! walked structurally with no rewriting of its own.

use rustc_hash::FxHashMap;

use classy_ast::{Expr, Explicit, MatchArm, RecordField};
use classy_common::ClassyError;
use classy_env::Environment;
use classy_types::Type;

use crate::elaborator::Elaborator;
use crate::resolve::{resolve_predicate, AmbientCtx};

impl<'a> Elaborator<'a> {
    pub(crate) fn elaborate_expr(
        &mut self,
        env: &Environment,
        ambient: &AmbientCtx,
        expr: &Expr<Explicit>,
    ) -> Result<Expr<Explicit>, ClassyError> {
        match expr {
            Expr::Var(pos, name, type_args) => {
                let scheme = env.lookup(*name, *pos)?;
                if scheme.predicates.is_empty() {
                    return Ok(Expr::Var(*pos, *name, type_args.clone()));
                }
                let mut sigma: FxHashMap<_, Type> = FxHashMap::default();
                for (quantifier, arg) in scheme.quantifiers.iter().zip(type_args.iter()) {
                    sigma.insert(*quantifier, arg.clone());
                }
                let mut result = Expr::Var(*pos, *name, type_args.clone());
                for pred in &scheme.predicates {
                    let instantiated = sigma.get(&pred.variable).cloned().unwrap_or(Type::Var(*pos, pred.variable));
                    let dict_expr = resolve_predicate(self.interner, env, ambient, pred.class, &instantiated, *pos)?;
                    result = Expr::App(*pos, Box::new(result), Box::new(dict_expr));
                }
                Ok(result)
            }
            Expr::Lambda(pos, param, ann, body) => {
                Ok(Expr::Lambda(*pos, *param, ann.clone(), Box::new(self.elaborate_expr(env, ambient, body)?)))
            }
            Expr::App(pos, f, arg) => Ok(Expr::App(
                *pos,
                Box::new(self.elaborate_expr(env, ambient, f)?),
                Box::new(self.elaborate_expr(env, ambient, arg)?),
            )),
            Expr::TypeAscription(pos, inner, tau) => {
                Ok(Expr::TypeAscription(*pos, Box::new(self.elaborate_expr(env, ambient, inner)?), tau.clone()))
            }
            Expr::ExistentialIntro(pos, vars, inner) => {
                Ok(Expr::ExistentialIntro(*pos, vars.clone(), Box::new(self.elaborate_expr(env, ambient, inner)?)))
            }
            Expr::Match(pos, scrutinee, arms) => {
                let scrutinee = self.elaborate_expr(env, ambient, scrutinee)?;
                let mut new_arms = Vec::with_capacity(arms.len());
                for arm in arms {
                    new_arms.push(MatchArm {
                        pattern: arm.pattern.clone(),
                        body: self.elaborate_expr(env, ambient, &arm.body)?,
                    });
                }
                Ok(Expr::Match(*pos, Box::new(scrutinee), new_arms))
            }
            Expr::DataConstructor(pos, label, args) => {
                let mut new_args = Vec::with_capacity(args.len());
                for arg in args {
                    new_args.push(self.elaborate_expr(env, ambient, arg)?);
                }
                Ok(Expr::DataConstructor(*pos, *label, new_args))
            }
            Expr::Primitive(pos, prim) => Ok(Expr::Primitive(*pos, *prim)),
            Expr::RecordConstruction(pos, name, fields) => {
                let mut new_fields = Vec::with_capacity(fields.len());
                for field in fields {
                    new_fields.push(RecordField { label: field.label, value: self.elaborate_expr(env, ambient, &field.value)? });
                }
                Ok(Expr::RecordConstruction(*pos, *name, new_fields))
            }
            Expr::RecordAccess(pos, inner, label) => {
                Ok(Expr::RecordAccess(*pos, Box::new(self.elaborate_expr(env, ambient, inner)?), *label))
            }
        }
    }
}
