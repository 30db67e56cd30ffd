//! The typing environment (spec §4.2): scoped bindings from value names to
//! schemes, type constructors to kinds, labels to record/constructor info,
//! class names to class info, and a (class, head) instance index.
//!
//! Represented as a chain of `Rc`-linked frames, one frame per `bind_*`
//! call, so that extending the environment never mutates an existing one —
//! every binding in scope when a closure captured an `Environment` stays
//! visible no matter what the caller does with it afterwards (spec §3,
//! "Environments share immutable substructure").

use std::rc::Rc;

use classy_common::{ClassyError, LabelName, Span, TypeConName, TypeVarName, ValueName};
use classy_common::limits::MAX_SUPERCLASS_WALK;
use classy_types::{Kind, TyScheme, Type};

use crate::info::{ClassInfo, InstanceInfo, LabelInfo, TypeInfo};

#[derive(Debug)]
enum Node {
    Root,
    Value {
        parent: Rc<Node>,
        name: ValueName,
        scheme: TyScheme,
    },
    Type {
        parent: Rc<Node>,
        name: TypeConName,
        info: TypeInfo,
    },
    Label {
        parent: Rc<Node>,
        label: LabelName,
        info: LabelInfo,
    },
    Class {
        parent: Rc<Node>,
        name: TypeConName,
        info: ClassInfo,
    },
    Instance {
        parent: Rc<Node>,
        class: TypeConName,
        head: TypeConName,
        info: InstanceInfo,
    },
}

/// An immutable, scoped typing context. Cloning is O(1) (an `Rc` bump);
/// every `bind_*` method returns a new `Environment` that sees the parent's
/// bindings plus the one just added.
#[derive(Clone, Debug)]
pub struct Environment(Rc<Node>);

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Environment(Rc::new(Node::Root))
    }

    #[must_use]
    pub fn bind_scheme(&self, name: ValueName, scheme: TyScheme) -> Self {
        Environment(Rc::new(Node::Value {
            parent: Rc::clone(&self.0),
            name,
            scheme,
        }))
    }

    /// `bind_simple` — `bind_scheme` with empty quantifiers and predicates.
    #[must_use]
    pub fn bind_simple(&self, name: ValueName, ty: Type) -> Self {
        self.bind_scheme(name, TyScheme::monomorphic(ty))
    }

    pub fn lookup(&self, name: ValueName, at: Span) -> Result<TyScheme, ClassyError> {
        let mut node = &self.0;
        loop {
            match node.as_ref() {
                Node::Value { name: n, scheme, .. } if *n == name => return Ok(scheme.clone()),
                Node::Root => {
                    return Err(ClassyError::UnboundIdentifier {
                        name: format!("{name:?}"),
                        at,
                    });
                }
                Node::Value { parent, .. }
                | Node::Type { parent, .. }
                | Node::Label { parent, .. }
                | Node::Class { parent, .. }
                | Node::Instance { parent, .. } => node = parent,
            }
        }
    }

    #[must_use]
    pub fn bind_type(&self, name: TypeConName, kind: Kind, def: Option<classy_ast::TypeDef>) -> Self {
        Environment(Rc::new(Node::Type {
            parent: Rc::clone(&self.0),
            name,
            info: TypeInfo { kind, def },
        }))
    }

    pub fn lookup_type_kind(&self, name: TypeConName, at: Span) -> Result<Kind, ClassyError> {
        Ok(self.lookup_type_info(name, at)?.kind)
    }

    pub fn lookup_type_info(&self, name: TypeConName, at: Span) -> Result<TypeInfo, ClassyError> {
        let mut node = &self.0;
        loop {
            match node.as_ref() {
                Node::Type { name: n, info, .. } if *n == name => return Ok(info.clone()),
                Node::Root => {
                    return Err(ClassyError::UnboundIdentifier {
                        name: format!("{name:?}"),
                        at,
                    });
                }
                Node::Value { parent, .. }
                | Node::Type { parent, .. }
                | Node::Label { parent, .. }
                | Node::Class { parent, .. }
                | Node::Instance { parent, .. } => node = parent,
            }
        }
    }

    #[must_use]
    pub fn bind_label(&self, label: LabelName, info: LabelInfo) -> Self {
        Environment(Rc::new(Node::Label {
            parent: Rc::clone(&self.0),
            label,
            info,
        }))
    }

    pub fn lookup_label(&self, label: LabelName, at: Span) -> Result<LabelInfo, ClassyError> {
        let mut node = &self.0;
        loop {
            match node.as_ref() {
                Node::Label { label: l, info, .. } if *l == label => return Ok(info.clone()),
                Node::Root => {
                    return Err(ClassyError::UnboundLabel {
                        name: format!("{label:?}"),
                        at,
                    });
                }
                Node::Value { parent, .. }
                | Node::Type { parent, .. }
                | Node::Label { parent, .. }
                | Node::Class { parent, .. }
                | Node::Instance { parent, .. } => node = parent,
            }
        }
    }

    #[must_use]
    pub fn bind_class(&self, name: TypeConName, info: ClassInfo) -> Self {
        Environment(Rc::new(Node::Class {
            parent: Rc::clone(&self.0),
            name,
            info,
        }))
    }

    pub fn lookup_class(&self, name: TypeConName, at: Span) -> Result<ClassInfo, ClassyError> {
        let mut node = &self.0;
        loop {
            match node.as_ref() {
                Node::Class { name: n, info, .. } if *n == name => return Ok(info.clone()),
                Node::Root => {
                    return Err(ClassyError::UnboundClass {
                        name: format!("{name:?}"),
                        at,
                    });
                }
                Node::Value { parent, .. }
                | Node::Type { parent, .. }
                | Node::Label { parent, .. }
                | Node::Class { parent, .. }
                | Node::Instance { parent, .. } => node = parent,
            }
        }
    }

    /// Bind an instance, rejecting a pre-existing instance of the same
    /// class for the same head constructor (spec §4.2 policy).
    pub fn bind_instance(
        &self,
        class: TypeConName,
        head: TypeConName,
        info: InstanceInfo,
        at: Span,
    ) -> Result<Self, ClassyError> {
        if self.lookup_instance(class, head).is_some() {
            return Err(ClassyError::OverlappingInstances {
                class: format!("{class:?}"),
                head: format!("{head:?}"),
                at,
            });
        }
        Ok(Environment(Rc::new(Node::Instance {
            parent: Rc::clone(&self.0),
            class,
            head,
            info,
        })))
    }

    #[must_use]
    pub fn lookup_instance(&self, class: TypeConName, head: TypeConName) -> Option<InstanceInfo> {
        let mut node = &self.0;
        loop {
            match node.as_ref() {
                Node::Instance { class: c, head: h, info, .. } if *c == class && *h == head => {
                    return Some(info.clone());
                }
                Node::Root => return None,
                Node::Value { parent, .. }
                | Node::Type { parent, .. }
                | Node::Label { parent, .. }
                | Node::Class { parent, .. }
                | Node::Instance { parent, .. } => node = parent,
            }
        }
    }

    /// Reflexive-transitive closure over the class graph: is `ancestor` a
    /// superclass of `descendant`, or the same class?
    #[must_use]
    pub fn is_superclass(&self, ancestor: TypeConName, descendant: TypeConName) -> bool {
        if ancestor == descendant {
            return true;
        }
        let mut frontier = vec![descendant];
        let mut seen = rustc_hash::FxHashSet::default();
        seen.insert(descendant);
        let mut steps = 0;
        while let Some(current) = frontier.pop() {
            steps += 1;
            if steps > MAX_SUPERCLASS_WALK {
                return false;
            }
            let Ok(info) = self.lookup_class(current, Span::dummy()) else {
                continue;
            };
            for sup in info.supers {
                if sup == ancestor {
                    return true;
                }
                if seen.insert(sup) {
                    frontier.push(sup);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classy_common::Interner;
    use classy_types::ClassPredicate;

    fn name(interner: &mut Interner, s: &str) -> ValueName {
        ValueName::new(interner.intern(s))
    }

    fn tycon(interner: &mut Interner, s: &str) -> TypeConName {
        TypeConName::new(interner.intern(s))
    }

    #[test]
    fn lookup_finds_innermost_binding() {
        let mut interner = Interner::new();
        let x = name(&mut interner, "x");
        let int_ty = tycon(&mut interner, "Int");
        let bool_ty = tycon(&mut interner, "Bool");
        let env = Environment::new().bind_simple(x, Type::App(Span::dummy(), int_ty, smallvec::smallvec![]));
        let env = env.bind_simple(x, Type::App(Span::dummy(), bool_ty, smallvec::smallvec![]));
        let scheme = env.lookup(x, Span::dummy()).unwrap();
        match scheme.body {
            Type::App(_, con, _) => assert_eq!(con, bool_ty),
            Type::Var(..) => panic!("expected App"),
        }
    }

    #[test]
    fn lookup_unbound_raises_error() {
        let mut interner = Interner::new();
        let x = name(&mut interner, "x");
        let env = Environment::new();
        assert!(matches!(
            env.lookup(x, Span::dummy()),
            Err(ClassyError::UnboundIdentifier { .. })
        ));
    }

    #[test]
    fn bind_instance_rejects_overlap() {
        let mut interner = Interner::new();
        let show = tycon(&mut interner, "Show");
        let int_ty = tycon(&mut interner, "Int");
        let env = Environment::new()
            .bind_instance(show, int_ty, InstanceInfo { params: vec![], context: vec![] }, Span::dummy())
            .unwrap();
        let result = env.bind_instance(show, int_ty, InstanceInfo { params: vec![], context: vec![] }, Span::dummy());
        assert!(matches!(result, Err(ClassyError::OverlappingInstances { .. })));
    }

    #[test]
    fn is_superclass_is_reflexive_and_transitive() {
        let mut interner = Interner::new();
        let eq = tycon(&mut interner, "Eq");
        let ord = tycon(&mut interner, "Ord");
        let num = tycon(&mut interner, "Num");
        let a = TypeVarName::new(interner.intern("a"));
        let env = Environment::new()
            .bind_class(eq, ClassInfo { param: a, supers: vec![], members: vec![], is_constructor_class: false })
            .bind_class(ord, ClassInfo { param: a, supers: vec![eq], members: vec![], is_constructor_class: false })
            .bind_class(num, ClassInfo { param: a, supers: vec![ord], members: vec![], is_constructor_class: false });
        assert!(env.is_superclass(eq, eq));
        assert!(env.is_superclass(eq, ord));
        assert!(env.is_superclass(eq, num));
        assert!(!env.is_superclass(num, eq));
    }

    #[test]
    fn class_predicate_references_only_its_variable() {
        let mut interner = Interner::new();
        let show = tycon(&mut interner, "Show");
        let a = TypeVarName::new(interner.intern("a"));
        let pred = ClassPredicate { class: show, variable: a };
        assert_eq!(pred.variable, a);
    }
}
