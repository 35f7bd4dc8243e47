//! Variable Constraints
//!
//! The already-parsed variable declarations of a join query: an ordered variable
//! sequence plus, per variable, a set of simple types and a set of deep-type signatures.

use crate::error::JoinError;
use crate::types::{NodeId, TypeId};
use std::collections::{BTreeSet, HashMap};

/// Resolved type constraints for a query's variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableConstraintSet {
    varseq: Vec<NodeId>,
    simple_typemap: HashMap<NodeId, BTreeSet<TypeId>>,
    deep_typemap: HashMap<NodeId, BTreeSet<NodeId>>,
}

impl VariableConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare variables in order, without constraints.
    pub fn from_variables(vars: impl IntoIterator<Item = NodeId>) -> Self {
        let mut set = Self::new();
        for var in vars {
            set.declare(var);
        }
        set
    }

    /// Append a variable to the sequence. Returns false if it was already declared.
    pub fn declare(&mut self, var: NodeId) -> bool {
        if self.varseq.contains(&var) {
            return false;
        }
        self.varseq.push(var);
        true
    }

    /// Restrict `var` to atoms of type `t`.
    pub fn constrain_simple(&mut self, var: NodeId, t: TypeId) -> Result<(), JoinError> {
        self.ensure_declared(var)?;
        self.simple_typemap.entry(var).or_default().insert(t);
        Ok(())
    }

    /// Restrict `var` to the structural shape described by `signature`.
    pub fn constrain_deep(&mut self, var: NodeId, signature: NodeId) -> Result<(), JoinError> {
        self.ensure_declared(var)?;
        self.deep_typemap.entry(var).or_default().insert(signature);
        Ok(())
    }

    fn ensure_declared(&self, var: NodeId) -> Result<(), JoinError> {
        if self.varseq.contains(&var) {
            Ok(())
        } else {
            Err(JoinError::MalformedConstraint(format!(
                "constraint on undeclared variable {}",
                var
            )))
        }
    }

    pub fn variables(&self) -> &[NodeId] {
        &self.varseq
    }

    pub fn len(&self) -> usize {
        self.varseq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.varseq.is_empty()
    }

    pub fn simple_types(&self, var: NodeId) -> Option<&BTreeSet<TypeId>> {
        self.simple_typemap.get(&var).filter(|s| !s.is_empty())
    }

    pub fn deep_types(&self, var: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.deep_typemap.get(&var).filter(|s| !s.is_empty())
    }

    /// Whether any variable carries a simple-type constraint.
    pub fn has_simple_types(&self) -> bool {
        self.simple_typemap.values().any(|s| !s.is_empty())
    }
}
