//! Container Sets
//!
//! Sets of atoms proposed as enclosing contexts for a query's variable bindings.

use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of containers, unique by atom identity
///
/// Ordering carries no meaning; the backing set iterates by handle so that repeated
/// evaluations stream results in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSet {
    atoms: BTreeSet<NodeId>,
}

impl ContainerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `atom` was already present
    pub fn insert(&mut self, atom: NodeId) -> bool {
        self.atoms.insert(atom)
    }

    pub fn contains(&self, atom: NodeId) -> bool {
        self.atoms.contains(&atom)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.atoms.iter().copied()
    }

    pub fn is_subset(&self, other: &ContainerSet) -> bool {
        self.atoms.is_subset(&other.atoms)
    }

    /// Containers present in both sets
    pub fn meet(&self, other: &ContainerSet) -> ContainerSet {
        self.atoms.intersection(&other.atoms).copied().collect()
    }
}

impl FromIterator<NodeId> for ContainerSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl Extend<NodeId> for ContainerSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        self.atoms.extend(iter)
    }
}

impl IntoIterator for ContainerSet {
    type Item = NodeId;
    type IntoIter = std::collections::btree_set::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}
