//! Turning a solved `Implicit` program into an `Explicit` one: filling in
//! every type application and annotation the generator left as `None`,
//! using the solver's [`Solution`] and the generator's record of which
//! fresh variable stands for which lambda parameter.
//!
//! This is the seam between inference and elaboration (spec §4.4/§4.5):
//! the `Elaborator` only ever sees an `Explicit` program.

use rustc_hash::FxHashMap;

use classy_ast::{
    Block, Expr, Explicit, Implicit, InstanceDef, InstanceMember, MatchArm, Pattern, Program,
    RecordField, ValueDef,
};
use classy_common::{Span, TypeVarName};
use classy_constraints::Solution;
use classy_types::Type;

fn resolve(solution: &Solution, var: TypeVarName, at: Span) -> Type {
    solution.substitution.get(&var).cloned().unwrap_or(Type::Var(at, var))
}

pub fn materialize_program(
    program: &Program<Implicit>,
    solution: &Solution,
    lambda_param_vars: &FxHashMap<Span, TypeVarName>,
) -> Program<Explicit> {
    program.iter().map(|b| materialize_block(b, solution, lambda_param_vars)).collect()
}

fn materialize_block(
    block: &Block<Implicit>,
    solution: &Solution,
    lambdas: &FxHashMap<Span, TypeVarName>,
) -> Block<Explicit> {
    match block {
        Block::TypeDefinitions(defs) => Block::TypeDefinitions(defs.clone()),
        Block::ClassDefinition(class) => Block::ClassDefinition(class.clone()),
        Block::Definition(defs) => {
            Block::Definition(defs.iter().map(|d| materialize_def(d, solution, lambdas)).collect())
        }
        Block::InstanceDefinitions(insts) => {
            Block::InstanceDefinitions(insts.iter().map(|i| materialize_instance(i, solution, lambdas)).collect())
        }
    }
}

fn materialize_def(
    def: &ValueDef<Implicit>,
    solution: &Solution,
    lambdas: &FxHashMap<Span, TypeVarName>,
) -> ValueDef<Explicit> {
    let scheme = def.scheme.clone().unwrap_or_else(|| {
        solution
            .schemes
            .get(&def.name)
            .cloned()
            .unwrap_or_else(|| panic!("no solved scheme recorded for {:?}", def.name))
    });
    ValueDef { span: def.span, name: def.name, scheme, body: materialize_expr(&def.body, solution, lambdas) }
}

fn materialize_instance(
    inst: &InstanceDef<Implicit>,
    solution: &Solution,
    lambdas: &FxHashMap<Span, TypeVarName>,
) -> InstanceDef<Explicit> {
    InstanceDef {
        span: inst.span,
        class: inst.class,
        head: inst.head,
        params: inst.params.clone(),
        context: inst.context.clone(),
        members: inst
            .members
            .iter()
            .map(|m| InstanceMember { label: m.label, body: materialize_expr(&m.body, solution, lambdas) })
            .collect(),
    }
}

fn materialize_expr(
    expr: &Expr<Implicit>,
    solution: &Solution,
    lambdas: &FxHashMap<Span, TypeVarName>,
) -> Expr<Explicit> {
    match expr {
        Expr::Var(pos, name, _) => {
            let args = solution.instantiations.get(pos).cloned().unwrap_or_default();
            Expr::Var(*pos, *name, args)
        }
        Expr::Lambda(pos, param, _, body) => {
            let var = *lambdas.get(pos).unwrap_or_else(|| panic!("no parameter variable recorded for lambda at {pos:?}"));
            let annotation = resolve(solution, var, *pos);
            Expr::Lambda(*pos, *param, annotation, Box::new(materialize_expr(body, solution, lambdas)))
        }
        Expr::App(pos, f, arg) => Expr::App(
            *pos,
            Box::new(materialize_expr(f, solution, lambdas)),
            Box::new(materialize_expr(arg, solution, lambdas)),
        ),
        Expr::TypeAscription(pos, inner, tau) => {
            Expr::TypeAscription(*pos, Box::new(materialize_expr(inner, solution, lambdas)), tau.clone())
        }
        Expr::ExistentialIntro(pos, vars, inner) => {
            Expr::ExistentialIntro(*pos, vars.clone(), Box::new(materialize_expr(inner, solution, lambdas)))
        }
        Expr::Match(pos, scrutinee, arms) => Expr::Match(
            *pos,
            Box::new(materialize_expr(scrutinee, solution, lambdas)),
            arms.iter()
                .map(|arm| MatchArm {
                    pattern: materialize_pattern(&arm.pattern, solution, lambdas),
                    body: materialize_expr(&arm.body, solution, lambdas),
                })
                .collect(),
        ),
        Expr::DataConstructor(pos, label, args) => Expr::DataConstructor(
            *pos,
            *label,
            args.iter().map(|a| materialize_expr(a, solution, lambdas)).collect(),
        ),
        Expr::Primitive(pos, prim) => Expr::Primitive(*pos, *prim),
        Expr::RecordConstruction(pos, name, fields) => Expr::RecordConstruction(
            *pos,
            *name,
            fields
                .iter()
                .map(|f| RecordField { label: f.label, value: materialize_expr(&f.value, solution, lambdas) })
                .collect(),
        ),
        Expr::RecordAccess(pos, inner, label) => {
            Expr::RecordAccess(*pos, Box::new(materialize_expr(inner, solution, lambdas)), *label)
        }
    }
}

fn materialize_pattern(
    pattern: &Pattern<Implicit>,
    solution: &Solution,
    lambdas: &FxHashMap<Span, TypeVarName>,
) -> Pattern<Explicit> {
    match pattern {
        Pattern::Wildcard(pos) => Pattern::Wildcard(*pos),
        Pattern::Primitive(pos, prim) => Pattern::Primitive(*pos, *prim),
        Pattern::Variable(pos, name) => Pattern::Variable(*pos, *name),
        Pattern::Disjunction(pos, subs) => {
            Pattern::Disjunction(*pos, subs.iter().map(|p| materialize_pattern(p, solution, lambdas)).collect())
        }
        Pattern::Conjunction(pos, subs) => {
            Pattern::Conjunction(*pos, subs.iter().map(|p| materialize_pattern(p, solution, lambdas)).collect())
        }
        Pattern::Alias(pos, inner, name) => {
            Pattern::Alias(*pos, Box::new(materialize_pattern(inner, solution, lambdas)), *name)
        }
        Pattern::Typed(pos, inner, tau) => {
            Pattern::Typed(*pos, Box::new(materialize_pattern(inner, solution, lambdas)), tau.clone())
        }
        Pattern::DataConstructor(pos, label, args) => Pattern::DataConstructor(
            *pos,
            *label,
            args.iter().map(|p| materialize_pattern(p, solution, lambdas)).collect(),
        ),
    }
}
