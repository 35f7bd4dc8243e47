//! Atom Type Registry
//!
//! Maps type tags to names and records the type hierarchy. Query node kinds are told apart
//! with [`TypeRegistry::is_a`] against this table rather than by concrete Rust types.

use crate::error::StorageError;
use crate::types::TypeId;
use std::collections::HashMap;

/// Builtin type tags. Ids follow the registration order of [`BUILTIN_TYPES`].
pub mod builtin {
    use crate::types::TypeId;

    pub const ATOM: TypeId = TypeId(0);
    pub const NODE: TypeId = TypeId(1);
    pub const LINK: TypeId = TypeId(2);
    pub const VARIABLE_NODE: TypeId = TypeId(3);
    pub const CONCEPT_NODE: TypeId = TypeId(4);
    pub const PREDICATE_NODE: TypeId = TypeId(5);
    pub const TYPE_NODE: TypeId = TypeId(6);
    pub const LIST_LINK: TypeId = TypeId(7);
    pub const EVALUATION_LINK: TypeId = TypeId(8);
    pub const SIGNATURE_LINK: TypeId = TypeId(9);
    pub const VARIABLE_LIST: TypeId = TypeId(10);
    pub const TYPED_VARIABLE_LINK: TypeId = TypeId(11);
    pub const SCOPE_LINK: TypeId = TypeId(12);
    pub const PRENEX_LINK: TypeId = TypeId(13);
    pub const JOIN_LINK: TypeId = TypeId(14);
    pub const MAXIMAL_JOIN_LINK: TypeId = TypeId(15);
    pub const MINIMAL_JOIN_LINK: TypeId = TypeId(16);
}

/// `(name, parents)` for every builtin type, in id order.
const BUILTIN_TYPES: &[(&str, &[TypeId])] = &[
    ("Atom", &[]),
    ("Node", &[builtin::ATOM]),
    ("Link", &[builtin::ATOM]),
    ("VariableNode", &[builtin::NODE]),
    ("ConceptNode", &[builtin::NODE]),
    ("PredicateNode", &[builtin::NODE]),
    ("TypeNode", &[builtin::NODE]),
    ("ListLink", &[builtin::LINK]),
    ("EvaluationLink", &[builtin::LINK]),
    ("SignatureLink", &[builtin::LINK]),
    ("VariableList", &[builtin::LINK]),
    ("TypedVariableLink", &[builtin::LINK]),
    ("ScopeLink", &[builtin::LINK]),
    ("PrenexLink", &[builtin::SCOPE_LINK]),
    ("JoinLink", &[builtin::PRENEX_LINK]),
    ("MaximalJoinLink", &[builtin::JOIN_LINK]),
    ("MinimalJoinLink", &[builtin::JOIN_LINK]),
];

const _: () = assert!(BUILTIN_TYPES.len() <= u16::MAX as usize);

#[derive(Debug, Clone)]
struct TypeEntry {
    name: String,
    parents: Vec<TypeId>,
}

/// Type name server: names, ids and the ancestor relation.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
    by_name: HashMap<String, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtin_types()
    }
}

impl TypeRegistry {
    /// An empty registry with no types at all.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// A registry preloaded with the builtin atom hierarchy.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::empty();
        for (name, parents) in BUILTIN_TYPES {
            // Cannot run out of ids: the table is bounded by the assertion above.
            let _ = registry.insert(name, parents.to_vec());
        }
        registry
    }

    /// Register a new type below the given parents.
    pub fn register(&mut self, name: &str, parents: &[TypeId]) -> Result<TypeId, StorageError> {
        if self.by_name.contains_key(name) {
            return Err(StorageError::DuplicateType(name.to_string()));
        }
        if let Some(unknown) = parents.iter().find(|p| !self.contains(**p)) {
            return Err(StorageError::UnknownType(*unknown));
        }
        self.insert(name, parents.to_vec())
    }

    fn insert(&mut self, name: &str, parents: Vec<TypeId>) -> Result<TypeId, StorageError> {
        let id = TypeId::from_index(self.entries.len())
            .ok_or(StorageError::CapacityExceeded("type"))?;
        self.entries.push(TypeEntry {
            name: name.to_string(),
            parents,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn contains(&self, t: TypeId) -> bool {
        t.index() < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn type_name(&self, t: TypeId) -> Result<&str, StorageError> {
        self.entries
            .get(t.index())
            .map(|e| e.name.as_str())
            .ok_or(StorageError::UnknownType(t))
    }

    /// Whether `t` is `ancestor` or inherits from it, directly or transitively.
    ///
    /// Unknown types are never a subtype of anything.
    pub fn is_a(&self, t: TypeId, ancestor: TypeId) -> bool {
        if !self.contains(t) || !self.contains(ancestor) {
            return false;
        }
        let mut pending = vec![t];
        let mut seen = vec![false; self.entries.len()];
        while let Some(current) = pending.pop() {
            if current == ancestor {
                return true;
            }
            if std::mem::replace(&mut seen[current.index()], true) {
                continue;
            }
            pending.extend(self.entries[current.index()].parents.iter().copied());
        }
        false
    }
}
