//! Core identifier types shared across the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of an atom inside an [`AtomStore`](crate::store::AtomStore).
///
/// Identity is the index of the atom's record in the store's arena, so two handles are
/// the same atom exactly when they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Handle for arena slot `index`, or `None` past the id space.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(NodeId)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type tag of an atom, resolved through the [`TypeRegistry`](crate::store::TypeRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u16);

impl TypeId {
    /// Tag for registry slot `index`, or `None` past the id space.
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(TypeId)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type:{}", self.0)
    }
}
