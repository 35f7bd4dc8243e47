//! Atom Store
//!
//! The hypergraph the join evaluator reads from. The evaluator only needs an atom's type
//! and its ordered outgoing set, so the store is consumed through the narrow
//! [`AtomStore`] trait.

pub mod memory;
pub mod registry;

pub use memory::MemoryAtomStore;
pub use registry::{builtin, TypeRegistry};

use crate::error::StorageError;
use crate::types::{NodeId, TypeId};
use serde::{Deserialize, Serialize};

/// AtomRecord: type, optional name and ordered outgoing set of one atom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomRecord {
    pub atom_type: TypeId,
    /// Set for nodes, `None` for links
    pub name: Option<String>,
    /// Ordered children, empty for nodes
    pub outgoing: Vec<NodeId>,
}

/// AtomStore interface
pub trait AtomStore: Send + Sync {
    /// The registry resolving this store's type tags.
    fn types(&self) -> &TypeRegistry;

    fn get(&self, atom: NodeId) -> Result<AtomRecord, StorageError>;

    fn get_type(&self, atom: NodeId) -> Result<TypeId, StorageError> {
        Ok(self.get(atom)?.atom_type)
    }

    fn arity(&self, atom: NodeId) -> Result<usize, StorageError> {
        Ok(self.get(atom)?.outgoing.len())
    }

    /// The `index`-th child of `atom`.
    fn outgoing_atom(&self, atom: NodeId, index: usize) -> Result<NodeId, StorageError> {
        let record = self.get(atom)?;
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

    /// Whether `atom`'s type is `ancestor` or one of its subtypes.
    fn is_a(&self, atom: NodeId, ancestor: TypeId) -> Result<bool, StorageError> {
        Ok(self.types().is_a(self.get_type(atom)?, ancestor))
    }

    /// S-expression rendering, for diagnostics.
    fn render(&self, atom: NodeId) -> Result<String, StorageError> {
        let record = self.get(atom)?;
        let type_name = self.types().type_name(record.atom_type)?;
        match record.name {
            Some(name) => Ok(format!("({} \"{}\")", type_name, name)),
            None => {
                let mut out = format!("({}", type_name);
                for child in record.outgoing {
                    out.push(' ');
                    out.push_str(&self.render(child)?);
                }
                out.push(')');
                Ok(out)
            }
        }
    }
}
