//! Robinson unification over the union-find table, plus shallow/full
//! resolution of a type through the current substitution.

use classy_common::{Span, TypeVarName};
use classy_types::Type;
use ena::unify::{InPlaceUnificationTable, UnifyKey};
use rustc_hash::FxHashMap;

use crate::table::{SlotValue, TyVarKey};

/// Per-run bookkeeping: the union-find table itself, and the two-way
/// mapping between source-level `TypeVarName`s and table keys.
pub struct UnificationState {
    table: InPlaceUnificationTable<TyVarKey>,
    keys: FxHashMap<TypeVarName, TyVarKey>,
    names: Vec<TypeVarName>,
}

impl UnificationState {
    #[must_use]
    pub fn new() -> Self {
        UnificationState {
            table: InPlaceUnificationTable::new(),
            keys: FxHashMap::default(),
            names: Vec::new(),
        }
    }

    /// Look up (allocating if new) the table key for a source-level
    /// variable name.
    fn key_for(&mut self, name: TypeVarName) -> TyVarKey {
        if let Some(key) = self.keys.get(&name) {
            return *key;
        }
        let key = self.table.new_key(SlotValue::Unbound);
        self.keys.insert(name, key);
        self.names.resize(key.index() as usize + 1, name);
        key
    }

    /// The canonical name currently standing for a key's union-find root.
    fn name_for(&mut self, key: TyVarKey) -> TypeVarName {
        let root = self.table.find(key);
        self.names[root.index() as usize]
    }

    /// Resolve `ty` one level: if it's a variable bound to something in
    /// the table, follow the chain; otherwise return it unchanged.
    pub fn resolve_shallow(&mut self, ty: &Type) -> Type {
        match ty {
            Type::Var(pos, name) => {
                let key = self.key_for(*name);
                match self.table.probe_value(key) {
                    SlotValue::Bound(bound) => self.resolve_shallow(&bound),
                    SlotValue::Unbound => {
                        let canonical = self.name_for(key);
                        Type::Var(*pos, canonical)
                    }
                }
            }
            other => other.clone(),
        }
    }

    /// Resolve `ty` fully: every variable reachable from it is followed
    /// through the table, recursively into constructor arguments.
    pub fn resolve_deep(&mut self, ty: &Type) -> Type {
        let shallow = self.resolve_shallow(ty);
        match shallow {
            Type::Var(..) => shallow,
            Type::App(pos, con, args) => {
                Type::App(pos, con, args.iter().map(|a| self.resolve_deep(a)).collect())
            }
        }
    }

    fn occurs_in(&mut self, name: TypeVarName, ty: &Type) -> bool {
        let resolved = self.resolve_shallow(ty);
        match resolved {
            Type::Var(_, n) => n == name,
            Type::App(_, _, args) => args.iter().any(|a| self.occurs_in(name, a)),
        }
    }

    /// Structurally unify two types, threading bindings through the table.
    /// Returns `Err(at)` on a shape/constructor mismatch (caller maps this
    /// to `SolveError::UnsatisfiableEquation`).
    pub fn unify_types(&mut self, t1: &Type, t2: &Type, at: Span) -> Result<(), Span> {
        let t1 = self.resolve_shallow(t1);
        let t2 = self.resolve_shallow(t2);
        match (&t1, &t2) {
            (Type::Var(_, a), Type::Var(_, b)) if a == b => Ok(()),
            (Type::Var(_, a), _) => {
                if self.occurs_in(*a, &t2) {
                    return Err(at);
                }
                let key = self.key_for(*a);
                self.table
                    .unify_var_value(key, SlotValue::Bound(t2))
                    .map_err(|_| at)
            }
            (_, Type::Var(_, b)) => {
                if self.occurs_in(*b, &t1) {
                    return Err(at);
                }
                let key = self.key_for(*b);
                self.table
                    .unify_var_value(key, SlotValue::Bound(t1))
                    .map_err(|_| at)
            }
            (Type::App(_, c1, args1), Type::App(_, c2, args2)) => {
                if c1 != c2 || args1.len() != args2.len() {
                    return Err(at);
                }
                for (a, b) in args1.iter().zip(args2.iter()) {
                    self.unify_types(a, b, at)?;
                }
                Ok(())
            }
        }
    }
}

impl Default for UnificationState {
    fn default() -> Self {
        UnificationState::new()
    }
}

impl UnificationState {
    /// Every source-level variable name this run has allocated a table
    /// slot for, in no particular order.
    pub fn known_names(&self) -> impl Iterator<Item = TypeVarName> + '_ {
        self.keys.keys().copied()
    }
}
