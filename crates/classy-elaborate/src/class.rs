//! Compiling a `ClassDefinition` into a dictionary record type plus one
//! accessor per member (spec §4.5).
//!
//! A class's dictionary type is an ordinary record: one field per
//! superclass (holding that superclass's own dictionary) followed by one
//! field per member. Each accessor is `λz. z.member`, typed
//! `class_type_<k> a -> <declared member type>`, carrying the member's
//! *original* class-qualified scheme so [`crate::expr`]'s rewriting rule
//! still sees it as overloaded at every other use site.

use classy_ast::{Block, Expr, Explicit, RecordFieldDef, RecordTypeDef, TypeDef, ValueDef};
use classy_common::{ClassyError, ValueName};
use classy_env::{ClassInfo, Environment, LabelInfo};
use classy_types::{ClassPredicate, Kind, Type, TyScheme};

use crate::elaborator::Elaborator;
use crate::naming;

pub struct ClassElaboration {
    pub type_def_block: Block<Explicit>,
    pub accessor_block: Block<Explicit>,
    pub env: Environment,
}

impl<'a> Elaborator<'a> {
    pub(crate) fn elaborate_class(
        &mut self,
        env: &Environment,
        class: &classy_ast::ClassDef,
    ) -> Result<ClassElaboration, ClassyError> {
        for sup in &class.supers {
            env.lookup_class(*sup, class.span)?;
        }
        let canonicity_ctx: Vec<ClassPredicate> =
            class.supers.iter().map(|sup| ClassPredicate { class: *sup, variable: class.param }).collect();
        classy_env::check_correct_context(env, &canonicity_ctx, &[class.param], class.span)?;

        let class_type = naming::class_type_name(self.interner, class.name);
        let arrow = self.well_known.arrow;

        let mut fields = Vec::with_capacity(class.supers.len() + class.members.len());
        for sup in &class.supers {
            let field_label = naming::superclass_field_name(self.interner, class.name, *sup);
            let field_ty = Type::App(
                class.span,
                naming::class_type_name(self.interner, *sup),
                smallvec::smallvec![Type::Var(class.span, class.param)],
            );
            fields.push(RecordFieldDef { span: class.span, label: field_label, ty: field_ty });
        }
        for member in &class.members {
            fields.push(RecordFieldDef { span: member.span, label: member.label, ty: member.ty.clone() });
        }

        let record_def = RecordTypeDef { span: class.span, name: class_type, params: vec![class.param], fields: fields.clone() };

        let mut new_env = env.bind_type(class_type, Kind::of_arity(1), Some(TypeDef::Record(record_def.clone())));
        for field in &fields {
            new_env = new_env.bind_label(
                field.label,
                LabelInfo::RecordField { record_type: class_type, field_type: field.ty.clone() },
            );
        }

        let class_info = ClassInfo {
            param: class.param,
            supers: class.supers.clone(),
            members: class.members.iter().map(|m| (m.label, m.ty.clone())).collect(),
            is_constructor_class: class.is_constructor_class,
        };
        new_env = new_env.bind_class(class.name, class_info);

        let dict_ty = Type::App(class.span, class_type, smallvec::smallvec![Type::Var(class.span, class.param)]);
        let mut accessors = Vec::with_capacity(class.members.len());
        for member in &class.members {
            let value_name = ValueName::new(member.label.atom());
            let original_scheme = TyScheme {
                quantifiers: vec![class.param],
                predicates: vec![ClassPredicate { class: class.name, variable: class.param }],
                body: member.ty.clone(),
            };
            self.ledger_mut().bind_scheme(value_name, true, member.span)?;
            new_env = new_env.bind_scheme(value_name, original_scheme);

            let z = self.fresh_value_name("z");
            let accessor_ty = Type::arrow(member.span, arrow, dict_ty.clone(), member.ty.clone());
            let accessor_scheme = TyScheme { quantifiers: vec![class.param], predicates: Vec::new(), body: accessor_ty };
            let body = accessor_body(member.span, z, dict_ty.clone(), member.label);
            accessors.push(ValueDef { span: member.span, name: value_name, scheme: accessor_scheme, body });
        }

        Ok(ClassElaboration {
            type_def_block: Block::TypeDefinitions(vec![TypeDef::Record(record_def)]),
            accessor_block: Block::Definition(accessors),
            env: new_env,
        })
    }
}

/// `λz: dict_ty. z.label` — the body of a class member's accessor.
fn accessor_body(span: classy_common::Span, z: ValueName, dict_ty: Type, label: classy_common::LabelName) -> Expr<Explicit> {
    Expr::Lambda(
        span,
        z,
        dict_ty,
        Box::new(Expr::RecordAccess(span, Box::new(Expr::Var(span, z, Vec::new())), label)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use classy_ast::{ClassDef, ClassMember};
    use classy_common::{Interner, Span, TypeConName, TypeVarName, WellKnownNames};

    fn setup() -> (Interner, WellKnownNames) {
        let mut interner = Interner::new();
        let well_known = WellKnownNames::intern(&mut interner);
        (interner, well_known)
    }

    #[test]
    fn a_class_with_no_supers_yields_one_record_field_per_member() {
        let (mut interner, well_known) = setup();
        let eq = TypeConName::new(interner.intern("Eq"));
        let a = TypeVarName::new(interner.intern("a"));
        let eq_member = classy_common::LabelName::new(interner.intern("eq"));
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
        let mut elaborator = Elaborator::new(&mut interner, well_known);
        let env = Environment::new();
        let elaboration = elaborator.elaborate_class(&env, &class).unwrap();
        let Block::TypeDefinitions(defs) = elaboration.type_def_block else { panic!("expected TypeDefinitions") };
        let TypeDef::Record(record) = &defs[0] else { panic!("expected Record") };
        assert_eq!(record.fields.len(), 1);
        let Block::Definition(accessors) = elaboration.accessor_block else { panic!("expected Definition") };
        assert_eq!(accessors.len(), 1);
        assert_eq!(accessors[0].name, ValueName::new(eq_member.atom()));
    }

    #[test]
    fn a_class_with_a_super_gets_an_extra_leading_field() {
        let (mut interner, well_known) = setup();
        let a = TypeVarName::new(interner.intern("a"));
        let eq = TypeConName::new(interner.intern("Eq"));
        let ord = TypeConName::new(interner.intern("Ord"));
        let lt_member = classy_common::LabelName::new(interner.intern("lt"));
        let bool_ty = Type::App(Span::dummy(), well_known.bool, smallvec::smallvec![]);
        let member_ty = Type::arrow(
            Span::dummy(),
            well_known.arrow,
            Type::Var(Span::dummy(), a),
            Type::arrow(Span::dummy(), well_known.arrow, Type::Var(Span::dummy(), a), bool_ty),
        );
        let class = ClassDef {
            span: Span::dummy(),
            name: ord,
            param: a,
            supers: vec![eq],
            members: vec![ClassMember { span: Span::dummy(), label: lt_member, ty: member_ty }],
            is_constructor_class: false,
        };
        let mut elaborator = Elaborator::new(&mut interner, well_known);
        let env = Environment::new().bind_class(
            eq,
            ClassInfo { param: a, supers: vec![], members: vec![], is_constructor_class: false },
        );
        let elaboration = elaborator.elaborate_class(&env, &class).unwrap();
        let Block::TypeDefinitions(defs) = elaboration.type_def_block else { panic!("expected TypeDefinitions") };
        let TypeDef::Record(record) = &defs[0] else { panic!("expected Record") };
        assert_eq!(record.fields.len(), 2);
        assert_eq!(
            interner.resolve(record.fields[0].label.atom()),
            "superclass_field_Ord_Eq"
        );
    }
}
