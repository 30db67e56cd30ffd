//! Programs: ordered sequences of blocks (spec §3, "Programs").

use crate::{Expr, Phase};
use classy_common::{LabelName, Span, TypeConName, TypeVarName, ValueName};
use classy_types::{ClassPredicate, Type};

#[derive(Clone, Debug)]
pub struct DataConstructorDef {
    pub span: Span,
    pub label: LabelName,
    pub args: Vec<Type>,
}

#[derive(Clone, Debug)]
pub struct AlgebraicTypeDef {
    pub span: Span,
    pub name: TypeConName,
    pub params: Vec<TypeVarName>,
    pub constructors: Vec<DataConstructorDef>,
}

#[derive(Clone, Debug)]
pub struct RecordFieldDef {
    pub span: Span,
    pub label: LabelName,
    pub ty: Type,
}

#[derive(Clone, Debug)]
pub struct RecordTypeDef {
    pub span: Span,
    pub name: TypeConName,
    pub params: Vec<TypeVarName>,
    pub fields: Vec<RecordFieldDef>,
}

/// A mutually-recursive group of type declarations.
#[derive(Clone, Debug)]
pub enum TypeDef {
    Algebraic(AlgebraicTypeDef),
    Record(RecordTypeDef),
}

impl TypeDef {
    #[must_use]
    pub fn name(&self) -> TypeConName {
        match self {
            TypeDef::Algebraic(d) => d.name,
            TypeDef::Record(d) => d.name,
        }
    }

    #[must_use]
    pub fn params(&self) -> &[TypeVarName] {
        match self {
            TypeDef::Algebraic(d) => &d.params,
            TypeDef::Record(d) => &d.params,
        }
    }
}

/// A value binding, possibly part of a mutually-recursive group.
/// `scheme` is `None`/absent in `Implicit` programs without an explicit
/// annotation; always present in `Explicit` programs (spec §4.4 "Bindings").
#[derive(Clone, Debug)]
pub struct ValueDef<P: Phase> {
    pub span: Span,
    pub name: ValueName,
    pub scheme: P::BindingScheme,
    pub body: Expr<P>,
}

#[derive(Clone, Debug)]
pub struct ClassMember {
    pub span: Span,
    pub label: LabelName,
    pub ty: Type,
}

/// `ClassDefinition(name, parameter, supers, members, is_constructor_class)`.
#[derive(Clone, Debug)]
pub struct ClassDef {
    pub span: Span,
    pub name: TypeConName,
    pub param: TypeVarName,
    pub supers: Vec<TypeConName>,
    pub members: Vec<ClassMember>,
    /// §9 Open Question: enables higher-kinded classes. Methods of such
    /// classes bypass member-type equality checks during instance
    /// elaboration; semantics beyond the bypass are out of scope.
    pub is_constructor_class: bool,
}

#[derive(Clone, Debug)]
pub struct InstanceMember<P: Phase> {
    pub label: LabelName,
    pub body: Expr<P>,
}

/// One instance within an `InstanceDefinitions` group.
#[derive(Clone, Debug)]
pub struct InstanceDef<P: Phase> {
    pub span: Span,
    pub class: TypeConName,
    /// The head type constructor this instance witnesses the class for.
    pub head: TypeConName,
    /// Fresh parameters `β1 .. βn` for the head's type arguments.
    pub params: Vec<TypeVarName>,
    pub context: Vec<ClassPredicate>,
    pub members: Vec<InstanceMember<P>>,
}

#[derive(Clone, Debug)]
pub enum Block<P: Phase> {
    TypeDefinitions(Vec<TypeDef>),
    Definition(Vec<ValueDef<P>>),
    ClassDefinition(ClassDef),
    InstanceDefinitions(Vec<InstanceDef<P>>),
}

pub type Program<P> = Vec<Block<P>>;
