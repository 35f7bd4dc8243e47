//! In-memory arena implementation of the atom store

use crate::error::StorageError;
use crate::store::{builtin, AtomRecord, AtomStore, TypeRegistry};
use crate::types::{NodeId, TypeId};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum AtomKey {
    Node(TypeId, String),
    Link(TypeId, Vec<NodeId>),
}

#[derive(Debug, Default)]
struct Arena {
    records: Vec<AtomRecord>,
    index: HashMap<AtomKey, NodeId>,
}

/// Arena-backed implementation of AtomStore
///
/// Atoms are content-addressed: adding a node with the same type and name, or a link with
/// the same type and outgoing set, returns the existing handle.
pub struct MemoryAtomStore {
    types: TypeRegistry,
    arena: RwLock<Arena>,
}

impl Default for MemoryAtomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAtomStore {
    /// Create an empty store using the builtin type hierarchy
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::with_builtin_types())
    }

    pub fn with_registry(types: TypeRegistry) -> Self {
        Self {
            types,
            arena: RwLock::new(Arena::default()),
        }
    }

    /// Add (or find) a named node
    pub fn add_node(&self, atom_type: TypeId, name: &str) -> Result<NodeId, StorageError> {
        if !self.types.is_a(atom_type, builtin::NODE) {
            return Err(StorageError::NotANodeType(self.describe_type(atom_type)));
        }
        let key = AtomKey::Node(atom_type, name.to_string());
        self.intern(key, || AtomRecord {
            atom_type,
            name: Some(name.to_string()),
            outgoing: Vec::new(),
        })
    }

    /// Add (or find) a link over existing atoms
    pub fn add_link(&self, atom_type: TypeId, outgoing: Vec<NodeId>) -> Result<NodeId, StorageError> {
        if !self.types.is_a(atom_type, builtin::LINK) {
            return Err(StorageError::NotALinkType(self.describe_type(atom_type)));
        }
        {
            let arena = self.arena.read();
            if let Some(missing) = outgoing.iter().find(|h| h.index() >= arena.records.len()) {
                return Err(StorageError::AtomNotFound(*missing));
            }
        }
        let key = AtomKey::Link(atom_type, outgoing.clone());
        self.intern(key, || AtomRecord {
            atom_type,
            name: None,
            outgoing,
        })
    }

    pub fn len(&self) -> usize {
        self.arena.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn intern(
        &self,
        key: AtomKey,
        record: impl FnOnce() -> AtomRecord,
    ) -> Result<NodeId, StorageError> {
        let mut arena = self.arena.write();
        if let Some(existing) = arena.index.get(&key) {
            return Ok(*existing);
        }
        let id = NodeId::from_index(arena.records.len())
            .ok_or(StorageError::CapacityExceeded("atom"))?;
        arena.records.push(record());
        arena.index.insert(key, id);
        Ok(id)
    }

    fn describe_type(&self, atom_type: TypeId) -> String {
        self.types
            .type_name(atom_type)
            .map(str::to_string)
            .unwrap_or_else(|_| atom_type.to_string())
    }
}

impl AtomStore for MemoryAtomStore {
    fn types(&self) -> &TypeRegistry {
        &self.types
    }

    fn get(&self, atom: NodeId) -> Result<AtomRecord, StorageError> {
        self.arena
            .read()
            .records
            .get(atom.index())
            .cloned()
            .ok_or(StorageError::AtomNotFound(atom))
    }

    fn get_type(&self, atom: NodeId) -> Result<TypeId, StorageError> {
        self.arena
            .read()
            .records
            .get(atom.index())
            .map(|r| r.atom_type)
            .ok_or(StorageError::AtomNotFound(atom))
    }

    fn outgoing_atom(&self, atom: NodeId, index: usize) -> Result<NodeId, StorageError> {
        let arena = self.arena.read();
        let record = arena
            .records
            .get(atom.index())
            .ok_or(StorageError::AtomNotFound(atom))?;
        record
            .outgoing
            .get(index)
            .copied()
            .ok_or(StorageError::OutgoingOutOfRange {
                atom,
                index,
                arity: record.outgoing.len(),
            })
    }
}
