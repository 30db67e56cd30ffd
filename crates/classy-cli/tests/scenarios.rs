//! End-to-end scenarios running the whole pipeline — generate, solve,
//! materialize, elaborate — through [`classy_cli::compile`], the way
//! module-level unit tests elsewhere in the workspace cover one stage at
//! a time.

use classy_ast::{
    Block, ClassDef, ClassMember, Expr, Explicit, InstanceDef, InstanceMember, Program, ValueDef, builder,
};
use classy_cli::ClassyConfig;
use classy_common::{Interner, LabelName, Span, TypeConName, TypeVarName, ValueName, WellKnownNames};
use classy_common::ClassyError;
use classy_env::Environment;
use classy_solver::RobinsonSolver;
use classy_types::{ClassPredicate, Kind, Type, TyScheme};

fn setup() -> (Interner, WellKnownNames) {
    let mut interner = Interner::new();
    let well_known = WellKnownNames::intern(&mut interner);
    (interner, well_known)
}

fn bool_ty(well_known: WellKnownNames) -> Type {
    Type::App(Span::dummy(), well_known.bool, smallvec::smallvec![])
}

fn binary_member_ty(well_known: WellKnownNames, a: TypeVarName) -> Type {
    Type::arrow(
        Span::dummy(),
        well_known.arrow,
        Type::Var(Span::dummy(), a),
        Type::arrow(Span::dummy(), well_known.arrow, Type::Var(Span::dummy(), a), bool_ty(well_known)),
    )
}

fn find_def<'a>(program: &'a Program<Explicit>, name: ValueName) -> Option<&'a ValueDef<Explicit>> {
    program.iter().find_map(|block| match block {
        Block::Definition(defs) => defs.iter().find(|d| d.name == name),
        _ => None,
    })
}

/// S1: `class Eq a { eq : a -> a -> bool }` + `instance Eq int { eq = ... }`
/// elaborates to a `class_type_Eq` record, an `eq` accessor, and an
/// `inst_dict_Eq_Int` dictionary built from the instance body.
#[test]
fn s1_a_class_and_one_instance_elaborate_to_a_dictionary_record() {
    let (mut interner, well_known) = setup();
    let eq_class = TypeConName::new(interner.intern("Eq"));
    let a = TypeVarName::new(interner.intern("a"));
    let eq_member = LabelName::new(interner.intern("eq"));
    let p = ValueName::new(interner.intern("p"));
    let q = ValueName::new(interner.intern("q"));

    let class = ClassDef {
        span: Span::dummy(),
        name: eq_class,
        param: a,
        supers: vec![],
        members: vec![ClassMember { span: Span::dummy(), label: eq_member, ty: binary_member_ty(well_known, a) }],
        is_constructor_class: false,
    };
    let instance = InstanceDef {
        span: Span::dummy(),
        class: eq_class,
        head: well_known.int,
        params: vec![],
        context: vec![],
        members: vec![InstanceMember { label: eq_member, body: builder::lambda(p, builder::lambda(q, builder::boolean(true))) }],
    };
    let program: Program<_> = vec![Block::ClassDefinition(class), Block::InstanceDefinitions(vec![instance])];

    let env = Environment::new().bind_type(well_known.int, Kind::Star, None);
    let mut solver = RobinsonSolver::new();
    let config = ClassyConfig::default();
    let result = classy_cli::compile(&mut interner, well_known, &env, &program, &mut solver, &config).unwrap();

    assert!(!result.iter().any(|b| matches!(b, Block::ClassDefinition(_) | Block::InstanceDefinitions(_))));

    let Block::TypeDefinitions(defs) = &result[0] else { panic!("expected TypeDefinitions first") };
    let classy_ast::TypeDef::Record(record) = &defs[0] else { panic!("expected a record type") };
    assert_eq!(interner.resolve(record.name.atom()), "class_type_Eq");
    assert_eq!(record.fields.len(), 1);
    assert_eq!(record.fields[0].label, eq_member);

    let eq_value = ValueName::new(eq_member.atom());
    let accessor = find_def(&result, eq_value).expect("eq accessor is bound");
    assert!(matches!(accessor.body, Expr::Lambda(..)));

    let dict_name = ValueName::new(interner.intern("inst_dict_Eq_Int"));
    let dict = find_def(&result, dict_name).expect("instance dictionary is bound");
    assert!(matches!(dict.body, Expr::RecordConstruction(..)));
}

/// S2: `class Ord a extends Eq { lt : a -> a -> bool }` gives `class_type_Ord`
/// a leading `superclass_field_Ord_Eq` field ahead of `lt`.
#[test]
fn s2_a_subclass_gets_a_leading_superclass_field() {
    let (mut interner, well_known) = setup();
    let eq_class = TypeConName::new(interner.intern("Eq"));
    let ord_class = TypeConName::new(interner.intern("Ord"));
    let a = TypeVarName::new(interner.intern("a"));
    let eq_member = LabelName::new(interner.intern("eq"));
    let lt_member = LabelName::new(interner.intern("lt"));

    let eq_def = ClassDef {
        span: Span::dummy(),
        name: eq_class,
        param: a,
        supers: vec![],
        members: vec![ClassMember { span: Span::dummy(), label: eq_member, ty: binary_member_ty(well_known, a) }],
        is_constructor_class: false,
    };
    let ord_def = ClassDef {
        span: Span::dummy(),
        name: ord_class,
        param: a,
        supers: vec![eq_class],
        members: vec![ClassMember { span: Span::dummy(), label: lt_member, ty: binary_member_ty(well_known, a) }],
        is_constructor_class: false,
    };
    let program: Program<_> = vec![Block::ClassDefinition(eq_def), Block::ClassDefinition(ord_def)];

    let env = Environment::new();
    let mut solver = RobinsonSolver::new();
    let config = ClassyConfig::default();
    let result = classy_cli::compile(&mut interner, well_known, &env, &program, &mut solver, &config).unwrap();

    let ord_record = result.iter().find_map(|b| match b {
        Block::TypeDefinitions(defs) => defs.iter().find_map(|d| match d {
            classy_ast::TypeDef::Record(r) if interner.resolve(r.name.atom()) == "class_type_Ord" => Some(r),
            _ => None,
        }),
        _ => None,
    });
    let ord_record = ord_record.expect("class_type_Ord was elaborated");
    assert_eq!(ord_record.fields.len(), 2);
    assert_eq!(interner.resolve(ord_record.fields[0].label.atom()), "superclass_field_Ord_Eq");
    assert_eq!(ord_record.fields[1].label, lt_member);
}

/// S3: given S1 and S2 plus `instance Ord int { lt = ... }`,
/// `inst_dict_Ord_Int`'s `superclass_field_Ord_Eq` field is exactly
/// `inst_dict_Eq_Int`.
#[test]
fn s3_an_instances_superclass_field_points_at_the_superclass_instance() {
    let (mut interner, well_known) = setup();
    let eq_class = TypeConName::new(interner.intern("Eq"));
    let ord_class = TypeConName::new(interner.intern("Ord"));
    let a = TypeVarName::new(interner.intern("a"));
    let eq_member = LabelName::new(interner.intern("eq"));
    let lt_member = LabelName::new(interner.intern("lt"));
    let p = ValueName::new(interner.intern("p"));
    let q = ValueName::new(interner.intern("q"));

    let eq_def = ClassDef {
        span: Span::dummy(),
        name: eq_class,
        param: a,
        supers: vec![],
        members: vec![ClassMember { span: Span::dummy(), label: eq_member, ty: binary_member_ty(well_known, a) }],
        is_constructor_class: false,
    };
    let eq_instance = InstanceDef {
        span: Span::dummy(),
        class: eq_class,
        head: well_known.int,
        params: vec![],
        context: vec![],
        members: vec![InstanceMember { label: eq_member, body: builder::lambda(p, builder::lambda(q, builder::boolean(true))) }],
    };
    let ord_def = ClassDef {
        span: Span::dummy(),
        name: ord_class,
        param: a,
        supers: vec![eq_class],
        members: vec![ClassMember { span: Span::dummy(), label: lt_member, ty: binary_member_ty(well_known, a) }],
        is_constructor_class: false,
    };
    let ord_instance = InstanceDef {
        span: Span::dummy(),
        class: ord_class,
        head: well_known.int,
        params: vec![],
        context: vec![],
        members: vec![InstanceMember { label: lt_member, body: builder::lambda(p, builder::lambda(q, builder::boolean(false))) }],
    };
    let program: Program<_> = vec![
        Block::ClassDefinition(eq_def),
        Block::InstanceDefinitions(vec![eq_instance]),
        Block::ClassDefinition(ord_def),
        Block::InstanceDefinitions(vec![ord_instance]),
    ];

    let env = Environment::new().bind_type(well_known.int, Kind::Star, None);
    let mut solver = RobinsonSolver::new();
    let config = ClassyConfig::default();
    let result = classy_cli::compile(&mut interner, well_known, &env, &program, &mut solver, &config).unwrap();

    let ord_dict_name = ValueName::new(interner.intern("inst_dict_Ord_Int"));
    let ord_dict = find_def(&result, ord_dict_name).expect("Ord's Int instance is bound");
    let Expr::RecordConstruction(_, _, fields) = &ord_dict.body else { panic!("expected a dictionary record") };
    let super_field = fields.iter().find(|f| interner.resolve(f.label.atom()) == "superclass_field_Ord_Eq");
    let super_field = super_field.expect("Ord's Eq superclass field is present");

    let eq_dict_name = ValueName::new(interner.intern("inst_dict_Eq_Int"));
    assert!(matches!(&super_field.value, Expr::Var(_, name, _) if *name == eq_dict_name));
}

/// S4: `f :: forall a. [Ord a] => a -> a -> bool; f x y = lt x y`
/// elaborates to `f = \d. \x. \y. (lt d) x y`.
#[test]
fn s4_a_predicate_constrained_function_lambda_abstracts_over_its_dictionary() {
    let (mut interner, well_known) = setup();
    let ord_class = TypeConName::new(interner.intern("Ord"));
    let a = TypeVarName::new(interner.intern("a"));
    let lt_member = LabelName::new(interner.intern("lt"));
    let f = ValueName::new(interner.intern("f"));
    let x = ValueName::new(interner.intern("x"));
    let y = ValueName::new(interner.intern("y"));
    let lt_value = ValueName::new(lt_member.atom());

    let ord_def = ClassDef {
        span: Span::dummy(),
        name: ord_class,
        param: a,
        supers: vec![],
        members: vec![ClassMember { span: Span::dummy(), label: lt_member, ty: binary_member_ty(well_known, a) }],
        is_constructor_class: false,
    };

    let f_scheme = TyScheme {
        quantifiers: vec![a],
        predicates: vec![ClassPredicate { class: ord_class, variable: a }],
        body: binary_member_ty(well_known, a),
    };
    let f_body = builder::lambda(
        x,
        builder::lambda(y, builder::app(builder::app(builder::var(lt_value), builder::var(x)), builder::var(y))),
    );
    let f_def = ValueDef { span: Span::dummy(), name: f, scheme: Some(f_scheme), body: f_body };

    let program: Program<_> = vec![Block::ClassDefinition(ord_def), Block::Definition(vec![f_def])];

    let env = Environment::new();
    let mut solver = RobinsonSolver::new();
    let config = ClassyConfig::default();
    let result = classy_cli::compile(&mut interner, well_known, &env, &program, &mut solver, &config).unwrap();

    let elaborated_f = find_def(&result, f).expect("f is bound");
    assert!(elaborated_f.scheme.predicates.is_empty());

    let Expr::Lambda(_, _dict_param, _, body) = &elaborated_f.body else { panic!("expected a lambda over the dictionary") };
    let Expr::Lambda(_, x_param, _, body) = body.as_ref() else { panic!("expected a lambda over x") };
    assert_eq!(*x_param, x);
    let Expr::Lambda(_, y_param, _, body) = body.as_ref() else { panic!("expected a lambda over y") };
    assert_eq!(*y_param, y);

    let Expr::App(_, lhs, rhs) = body.as_ref() else { panic!("expected an application to y") };
    assert!(matches!(rhs.as_ref(), Expr::Var(_, name, _) if *name == y));
    let Expr::App(_, lt_applied, x_arg) = lhs.as_ref() else { panic!("expected an application to x") };
    assert!(matches!(x_arg.as_ref(), Expr::Var(_, name, _) if *name == x));
    let Expr::App(_, lt_fn, dict_arg) = lt_applied.as_ref() else { panic!("expected lt applied to its dictionary") };
    assert!(matches!(lt_fn.as_ref(), Expr::Var(_, name, _) if *name == lt_value));
    assert!(matches!(dict_arg.as_ref(), Expr::Var(..)));
}

/// S5: using `eq` both as an overloaded class member and as a plain local
/// binding raises `OverloadedSymbolCannotBeBound`.
#[test]
fn s5_rebinding_an_overloaded_name_as_a_plain_value_is_rejected() {
    let (mut interner, well_known) = setup();
    let eq_class = TypeConName::new(interner.intern("Eq"));
    let a = TypeVarName::new(interner.intern("a"));
    let eq_member = LabelName::new(interner.intern("eq"));
    let p = ValueName::new(interner.intern("p"));
    let q = ValueName::new(interner.intern("q"));
    let eq_value = ValueName::new(eq_member.atom());

    let class = ClassDef {
        span: Span::dummy(),
        name: eq_class,
        param: a,
        supers: vec![],
        members: vec![ClassMember { span: Span::dummy(), label: eq_member, ty: binary_member_ty(well_known, a) }],
        is_constructor_class: false,
    };
    let instance = InstanceDef {
        span: Span::dummy(),
        class: eq_class,
        head: well_known.int,
        params: vec![],
        context: vec![],
        members: vec![InstanceMember { label: eq_member, body: builder::lambda(p, builder::lambda(q, builder::boolean(true))) }],
    };
    let shadowing_def = ValueDef { span: Span::dummy(), name: eq_value, scheme: None, body: builder::int(3) };

    let program: Program<_> = vec![
        Block::ClassDefinition(class),
        Block::InstanceDefinitions(vec![instance]),
        Block::Definition(vec![shadowing_def]),
    ];

    let env = Environment::new().bind_type(well_known.int, Kind::Star, None);
    let mut solver = RobinsonSolver::new();
    let config = ClassyConfig::default();
    let result = classy_cli::compile(&mut interner, well_known, &env, &program, &mut solver, &config);
    assert!(matches!(result, Err(ClassyError::OverloadedSymbolCannotBeBound { .. })));
}

/// S6: declaring `instance Eq int { ... }` twice raises `OverlappingInstances`
/// on the second.
#[test]
fn s6_a_duplicate_instance_is_rejected_as_overlapping() {
    let (mut interner, well_known) = setup();
    let eq_class = TypeConName::new(interner.intern("Eq"));
    let a = TypeVarName::new(interner.intern("a"));
    let eq_member = LabelName::new(interner.intern("eq"));
    let p = ValueName::new(interner.intern("p"));
    let q = ValueName::new(interner.intern("q"));

    let class = ClassDef {
        span: Span::dummy(),
        name: eq_class,
        param: a,
        supers: vec![],
        members: vec![ClassMember { span: Span::dummy(), label: eq_member, ty: binary_member_ty(well_known, a) }],
        is_constructor_class: false,
    };
    let make_instance = || InstanceDef {
        span: Span::dummy(),
        class: eq_class,
        head: well_known.int,
        params: vec![],
        context: vec![],
        members: vec![InstanceMember { label: eq_member, body: builder::lambda(p, builder::lambda(q, builder::boolean(true))) }],
    };

    let program: Program<_> = vec![
        Block::ClassDefinition(class),
        Block::InstanceDefinitions(vec![make_instance()]),
        Block::InstanceDefinitions(vec![make_instance()]),
    ];

    let env = Environment::new().bind_type(well_known.int, Kind::Star, None);
    let mut solver = RobinsonSolver::new();
    let config = ClassyConfig::default();
    let result = classy_cli::compile(&mut interner, well_known, &env, &program, &mut solver, &config);
    assert!(matches!(result, Err(ClassyError::OverlappingInstances { .. })));
}
