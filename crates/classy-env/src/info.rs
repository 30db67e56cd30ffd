//! Payloads stored in the environment's type, label, class and instance
//! tables (spec §3, §4.2).

use classy_ast::TypeDef;
use classy_common::{LabelName, TypeConName, TypeVarName};
use classy_types::{ClassPredicate, Kind, TyScheme, Type};

/// What a type constructor name is bound to: its kind, and (for
/// user-defined types) the declaration it was introduced by. Built-in
/// constructors such as the arrow type have no declaration.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    pub kind: Kind,
    pub def: Option<TypeDef>,
}

/// What a label resolves to: either a record field (reached via
/// `RecordAccess`/`RecordConstruction`) or a data constructor (reached via
/// `Expr::DataConstructor`/`Pattern::DataConstructor`).
#[derive(Clone, Debug)]
pub enum LabelInfo {
    RecordField {
        record_type: TypeConName,
        field_type: Type,
    },
    DataConstructor {
        type_name: TypeConName,
        arg_types: Vec<Type>,
    },
}

/// A class definition's resolved shape: its parameter, its direct
/// superclasses, and its members' declared types (spec §3's
/// `ClassDefinition`).
#[derive(Clone, Debug)]
pub struct ClassInfo {
    pub param: TypeVarName,
    pub supers: Vec<TypeConName>,
    pub members: Vec<(LabelName, Type)>,
    pub is_constructor_class: bool,
}

/// One instance: the class it witnesses, the head type constructor, the
/// instance's own fresh parameters, and its typing context.
#[derive(Clone, Debug)]
pub struct InstanceInfo {
    pub params: Vec<TypeVarName>,
    pub context: Vec<ClassPredicate>,
}
