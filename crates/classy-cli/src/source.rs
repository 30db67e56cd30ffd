//! A JSON surface syntax standing in for the parser spec §1 keeps out of
//! scope: `classy check <file>` reads a document in this shape instead of
//! concrete `classy` source text, and [`lower_program`] turns it into the
//! `Implicit` AST the rest of the pipeline expects. Every name is a plain
//! string, interned on the way in — the four namespaces only exist once
//! lowering assigns a string to one of them.

use serde::Deserialize;

use classy_ast::{
    AlgebraicTypeDef, Block, ClassDef, ClassMember, DataConstructorDef, Expr, Implicit,
    InstanceDef, InstanceMember, MatchArm, Pattern, Primitive, Program, RecordField,
    RecordFieldDef, RecordTypeDef, TypeDef, ValueDef,
};
use classy_common::{Interner, LabelName, Span, TypeConName, TypeVarName, ValueName};
use classy_types::{ClassPredicate, Type, TyScheme};

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind")]
pub enum SourceType {
    Var { name: String },
    App { head: String, args: Vec<SourceType> },
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourcePredicate {
    pub class: String,
    pub variable: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceScheme {
    #[serde(default)]
    pub quantifiers: Vec<String>,
    #[serde(default)]
    pub predicates: Vec<SourcePredicate>,
    pub body: SourceType,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind")]
pub enum SourcePrimitive {
    Int { value: i64 },
    Bool { value: bool },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind")]
pub enum SourceExpr {
    Var { name: String },
    Lambda { param: String, annotation: Option<SourceType>, body: Box<SourceExpr> },
    App { func: Box<SourceExpr>, arg: Box<SourceExpr> },
    TypeAscription { inner: Box<SourceExpr>, ty: SourceType },
    ExistentialIntro { vars: Vec<String>, body: Box<SourceExpr> },
    Match { scrutinee: Box<SourceExpr>, arms: Vec<SourceMatchArm> },
    DataConstructor { label: String, args: Vec<SourceExpr> },
    Primitive { value: SourcePrimitive },
    RecordConstruction { name: Option<String>, fields: Vec<SourceRecordField> },
    RecordAccess { inner: Box<SourceExpr>, label: String },
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceMatchArm {
    pub pattern: SourcePattern,
    pub body: SourceExpr,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceRecordField {
    pub label: String,
    pub value: SourceExpr,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind")]
pub enum SourcePattern {
    Wildcard,
    Primitive { value: SourcePrimitive },
    Variable { name: String },
    Disjunction { patterns: Vec<SourcePattern> },
    Conjunction { patterns: Vec<SourcePattern> },
    Alias { pattern: Box<SourcePattern>, name: String },
    Typed { pattern: Box<SourcePattern>, ty: SourceType },
    DataConstructor { label: String, args: Vec<SourcePattern> },
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceValueDef {
    pub name: String,
    pub scheme: Option<SourceScheme>,
    pub body: SourceExpr,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceClassMember {
    pub label: String,
    pub ty: SourceType,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceClassDef {
    pub name: String,
    pub param: String,
    #[serde(default)]
    pub supers: Vec<String>,
    pub members: Vec<SourceClassMember>,
    #[serde(default)]
    pub is_constructor_class: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceInstanceMember {
    pub label: String,
    pub body: SourceExpr,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceInstanceDef {
    pub class: String,
    pub head: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub context: Vec<SourcePredicate>,
    pub members: Vec<SourceInstanceMember>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceDataConstructorDef {
    pub label: String,
    #[serde(default)]
    pub args: Vec<SourceType>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceRecordFieldDef {
    pub label: String,
    pub ty: SourceType,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind")]
pub enum SourceTypeDef {
    Algebraic { name: String, params: Vec<String>, constructors: Vec<SourceDataConstructorDef> },
    Record { name: String, params: Vec<String>, fields: Vec<SourceRecordFieldDef> },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind")]
pub enum SourceBlock {
    TypeDefinitions { defs: Vec<SourceTypeDef> },
    Definition { defs: Vec<SourceValueDef> },
    ClassDefinition { class: SourceClassDef },
    InstanceDefinitions { instances: Vec<SourceInstanceDef> },
}

pub type SourceProgram = Vec<SourceBlock>;

fn vname(interner: &mut Interner, s: &str) -> ValueName {
    ValueName::new(interner.intern(s))
}

fn tvar(interner: &mut Interner, s: &str) -> TypeVarName {
    TypeVarName::new(interner.intern(s))
}

fn tcon(interner: &mut Interner, s: &str) -> TypeConName {
    TypeConName::new(interner.intern(s))
}

fn lname(interner: &mut Interner, s: &str) -> LabelName {
    LabelName::new(interner.intern(s))
}

fn lower_type(interner: &mut Interner, ty: &SourceType) -> Type {
    match ty {
        SourceType::Var { name } => Type::Var(Span::dummy(), tvar(interner, name)),
        SourceType::App { head, args } => {
            let con = tcon(interner, head);
            let lowered = args.iter().map(|a| lower_type(interner, a)).collect();
            Type::App(Span::dummy(), con, lowered)
        }
    }
}

fn lower_predicate(interner: &mut Interner, pred: &SourcePredicate) -> ClassPredicate {
    ClassPredicate { class: tcon(interner, &pred.class), variable: tvar(interner, &pred.variable) }
}

fn lower_scheme(interner: &mut Interner, scheme: &SourceScheme) -> TyScheme {
    TyScheme {
        quantifiers: scheme.quantifiers.iter().map(|q| tvar(interner, q)).collect(),
        predicates: scheme.predicates.iter().map(|p| lower_predicate(interner, p)).collect(),
        body: lower_type(interner, &scheme.body),
    }
}

fn lower_primitive(prim: &SourcePrimitive) -> Primitive {
    match prim {
        SourcePrimitive::Int { value } => Primitive::Int(*value),
        SourcePrimitive::Bool { value } => Primitive::Bool(*value),
    }
}

fn lower_expr(interner: &mut Interner, expr: &SourceExpr) -> Expr<Implicit> {
    let at = Span::dummy();
    match expr {
        SourceExpr::Var { name } => Expr::Var(at, vname(interner, name), None),
        SourceExpr::Lambda { param, annotation, body } => Expr::Lambda(
            at,
            vname(interner, param),
            annotation.as_ref().map(|t| lower_type(interner, t)),
            Box::new(lower_expr(interner, body)),
        ),
        SourceExpr::App { func, arg } => {
            Expr::App(at, Box::new(lower_expr(interner, func)), Box::new(lower_expr(interner, arg)))
        }
        SourceExpr::TypeAscription { inner, ty } => {
            Expr::TypeAscription(at, Box::new(lower_expr(interner, inner)), lower_type(interner, ty))
        }
        SourceExpr::ExistentialIntro { vars, body } => Expr::ExistentialIntro(
            at,
            vars.iter().map(|v| tvar(interner, v)).collect(),
            Box::new(lower_expr(interner, body)),
        ),
        SourceExpr::Match { scrutinee, arms } => Expr::Match(
            at,
            Box::new(lower_expr(interner, scrutinee)),
            arms.iter()
                .map(|arm| MatchArm { pattern: lower_pattern(interner, &arm.pattern), body: lower_expr(interner, &arm.body) })
                .collect(),
        ),
        SourceExpr::DataConstructor { label, args } => {
            Expr::DataConstructor(at, lname(interner, label), args.iter().map(|a| lower_expr(interner, a)).collect())
        }
        SourceExpr::Primitive { value } => Expr::Primitive(at, lower_primitive(value)),
        SourceExpr::RecordConstruction { name, fields } => Expr::RecordConstruction(
            at,
            name.as_ref().map(|n| lname(interner, n)),
            fields
                .iter()
                .map(|f| RecordField { label: lname(interner, &f.label), value: lower_expr(interner, &f.value) })
                .collect(),
        ),
        SourceExpr::RecordAccess { inner, label } => {
            Expr::RecordAccess(at, Box::new(lower_expr(interner, inner)), lname(interner, label))
        }
    }
}

fn lower_pattern(interner: &mut Interner, pat: &SourcePattern) -> Pattern<Implicit> {
    let at = Span::dummy();
    match pat {
        SourcePattern::Wildcard => Pattern::Wildcard(at),
        SourcePattern::Primitive { value } => Pattern::Primitive(at, lower_primitive(value)),
        SourcePattern::Variable { name } => Pattern::Variable(at, vname(interner, name)),
        SourcePattern::Disjunction { patterns } => {
            Pattern::Disjunction(at, patterns.iter().map(|p| lower_pattern(interner, p)).collect())
        }
        SourcePattern::Conjunction { patterns } => {
            Pattern::Conjunction(at, patterns.iter().map(|p| lower_pattern(interner, p)).collect())
        }
        SourcePattern::Alias { pattern, name } => {
            Pattern::Alias(at, Box::new(lower_pattern(interner, pattern)), vname(interner, name))
        }
        SourcePattern::Typed { pattern, ty } => {
            Pattern::Typed(at, Box::new(lower_pattern(interner, pattern)), lower_type(interner, ty))
        }
        SourcePattern::DataConstructor { label, args } => {
            Pattern::DataConstructor(at, lname(interner, label), args.iter().map(|p| lower_pattern(interner, p)).collect())
        }
    }
}

fn lower_value_def(interner: &mut Interner, def: &SourceValueDef) -> ValueDef<Implicit> {
    ValueDef {
        span: Span::dummy(),
        name: vname(interner, &def.name),
        scheme: def.scheme.as_ref().map(|s| lower_scheme(interner, s)),
        body: lower_expr(interner, &def.body),
    }
}

fn lower_class_def(interner: &mut Interner, class: &SourceClassDef) -> ClassDef {
    ClassDef {
        span: Span::dummy(),
        name: tcon(interner, &class.name),
        param: tvar(interner, &class.param),
        supers: class.supers.iter().map(|s| tcon(interner, s)).collect(),
        members: class
            .members
            .iter()
            .map(|m| ClassMember { span: Span::dummy(), label: lname(interner, &m.label), ty: lower_type(interner, &m.ty) })
            .collect(),
        is_constructor_class: class.is_constructor_class,
    }
}

fn lower_instance_def(interner: &mut Interner, inst: &SourceInstanceDef) -> InstanceDef<Implicit> {
    InstanceDef {
        span: Span::dummy(),
        class: tcon(interner, &inst.class),
        head: tcon(interner, &inst.head),
        params: inst.params.iter().map(|p| tvar(interner, p)).collect(),
        context: inst.context.iter().map(|p| lower_predicate(interner, p)).collect(),
        members: inst
            .members
            .iter()
            .map(|m| InstanceMember { label: lname(interner, &m.label), body: lower_expr(interner, &m.body) })
            .collect(),
    }
}

fn lower_type_def(interner: &mut Interner, def: &SourceTypeDef) -> TypeDef {
    match def {
        SourceTypeDef::Algebraic { name, params, constructors } => TypeDef::Algebraic(AlgebraicTypeDef {
            span: Span::dummy(),
            name: tcon(interner, name),
            params: params.iter().map(|p| tvar(interner, p)).collect(),
            constructors: constructors
                .iter()
                .map(|c| DataConstructorDef {
                    span: Span::dummy(),
                    label: lname(interner, &c.label),
                    args: c.args.iter().map(|a| lower_type(interner, a)).collect(),
                })
                .collect(),
        }),
        SourceTypeDef::Record { name, params, fields } => TypeDef::Record(RecordTypeDef {
            span: Span::dummy(),
            name: tcon(interner, name),
            params: params.iter().map(|p| tvar(interner, p)).collect(),
            fields: fields
                .iter()
                .map(|f| RecordFieldDef { span: Span::dummy(), label: lname(interner, &f.label), ty: lower_type(interner, &f.ty) })
                .collect(),
        }),
    }
}

fn lower_block(interner: &mut Interner, block: &SourceBlock) -> Block<Implicit> {
    match block {
        SourceBlock::TypeDefinitions { defs } => {
            Block::TypeDefinitions(defs.iter().map(|d| lower_type_def(interner, d)).collect())
        }
        SourceBlock::Definition { defs } => {
            Block::Definition(defs.iter().map(|d| lower_value_def(interner, d)).collect())
        }
        SourceBlock::ClassDefinition { class } => Block::ClassDefinition(lower_class_def(interner, class)),
        SourceBlock::InstanceDefinitions { instances } => {
            Block::InstanceDefinitions(instances.iter().map(|i| lower_instance_def(interner, i)).collect())
        }
    }
}

#[must_use]
pub fn lower_program(interner: &mut Interner, source: &SourceProgram) -> Program<Implicit> {
    source.iter().map(|b| lower_block(interner, b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_single_identity_definition_parses_and_lowers() {
        let json = r#"[
            { "kind": "Definition", "defs": [
                { "name": "id", "scheme": null, "body":
                    { "kind": "Lambda", "param": "x", "annotation": null, "body":
                        { "kind": "Var", "name": "x" } } } ] }
        ]"#;
        let source: SourceProgram = serde_json::from_str(json).unwrap();
        let mut interner = Interner::new();
        let program = lower_program(&mut interner, &source);
        assert_eq!(program.len(), 1);
        let Block::Definition(defs) = &program[0] else { panic!("expected Definition") };
        assert_eq!(defs.len(), 1);
        assert!(matches!(defs[0].body, Expr::Lambda(..)));
    }

    #[test]
    fn a_class_and_instance_block_round_trip_through_lowering() {
        let json = r#"[
            { "kind": "ClassDefinition", "class": {
                "name": "Eq", "param": "a", "supers": [],
                "members": [ { "label": "eq", "ty": { "kind": "App", "head": "Bool", "args": [] } } ] } },
            { "kind": "InstanceDefinitions", "instances": [ {
                "class": "Eq", "head": "Int", "params": [], "context": [],
                "members": [ { "label": "eq", "body": { "kind": "Primitive", "value": { "kind": "Bool", "value": true } } } ] } ] }
        ]"#;
        let source: SourceProgram = serde_json::from_str(json).unwrap();
        let mut interner = Interner::new();
        let program = lower_program(&mut interner, &source);
        assert_eq!(program.len(), 2);
        assert!(matches!(program[0], Block::ClassDefinition(_)));
        assert!(matches!(program[1], Block::InstanceDefinitions(_)));
    }
}
