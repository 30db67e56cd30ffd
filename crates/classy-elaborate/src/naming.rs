//! Deterministic synthetic names the elaborator mints for classes and
//! instances (spec §4.5): `class_type_<k>`, `superclass_field_<k>_<c>`,
//! `inst_dict_<k>_<G>`. Each is a pure function of the interner and the
//! names involved — nothing about them is cached, so the elaborator never
//! needs a side-table mapping a class back to its dictionary type.

use classy_common::{Interner, LabelName, TypeConName, ValueName};

pub fn class_type_name(interner: &mut Interner, class: TypeConName) -> TypeConName {
    let text = format!("class_type_{}", interner.resolve(class.atom()));
    TypeConName::new(interner.intern(&text))
}

pub fn superclass_field_name(interner: &mut Interner, class: TypeConName, super_class: TypeConName) -> LabelName {
    let text = format!(
        "superclass_field_{}_{}",
        interner.resolve(class.atom()),
        interner.resolve(super_class.atom())
    );
    LabelName::new(interner.intern(&text))
}

pub fn instance_dict_name(interner: &mut Interner, class: TypeConName, head: TypeConName) -> ValueName {
    let text = format!(
        "inst_dict_{}_{}",
        interner.resolve(class.atom()),
        interner.resolve(head.atom())
    );
    ValueName::new(interner.intern(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_type_name_is_deterministic() {
        let mut interner = Interner::new();
        let ord = TypeConName::new(interner.intern("Ord"));
        let a = class_type_name(&mut interner, ord);
        let b = class_type_name(&mut interner, ord);
        assert_eq!(a, b);
        assert_eq!(interner.resolve(a.atom()), "class_type_Ord");
    }

    #[test]
    fn superclass_field_name_orders_class_before_super() {
        let mut interner = Interner::new();
        let ord = TypeConName::new(interner.intern("Ord"));
        let eq = TypeConName::new(interner.intern("Eq"));
        let field = superclass_field_name(&mut interner, ord, eq);
        assert_eq!(interner.resolve(field.atom()), "superclass_field_Ord_Eq");
    }

    #[test]
    fn instance_dict_name_combines_class_and_head() {
        let mut interner = Interner::new();
        let eq = TypeConName::new(interner.intern("Eq"));
        let int_ty = TypeConName::new(interner.intern("Int"));
        let dict = instance_dict_name(&mut interner, eq, int_ty);
        assert_eq!(interner.resolve(dict.atom()), "inst_dict_Eq_Int");
    }
}
