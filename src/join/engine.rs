//! Container Join Engine
//!
//! Derives the minimal and maximal container sets for a [`VariableConstraintSet`].
//!
//! The minimal container is the meet, over all variables, of the containers each variable's
//! constraints admit. Only the single-variable case with exactly one signature-link deep
//! type has a defined per-variable rule: the signature's first outgoing atom names the
//! variable's enclosing container. Every other constraint shape is refused with
//! [`JoinError::UnsupportedConfiguration`] rather than approximated.

use crate::container::ContainerSet;
use crate::error::JoinError;
use crate::store::{builtin, AtomStore};
use crate::types::NodeId;
use crate::variables::VariableConstraintSet;
use tracing::trace;

/// Read-only join computation over an atom store
pub struct ContainerJoinEngine<'a> {
    store: &'a dyn AtomStore,
}

impl<'a> ContainerJoinEngine<'a> {
    pub fn new(store: &'a dyn AtomStore) -> Self {
        Self { store }
    }

    /// The tightest joint container set for `vars`.
    pub fn min_container(&self, vars: &VariableConstraintSet) -> Result<ContainerSet, JoinError> {
        self.check_shape(vars)?;

        let mut joint: Option<ContainerSet> = None;
        for var in vars.variables() {
            let admitted = self.enclosing_containers(vars, *var)?;
            joint = Some(match joint {
                None => admitted,
                Some(acc) => acc.meet(&admitted),
            });
        }
        Ok(joint.unwrap_or_default())
    }

    /// The loosest admissible container set for `vars`.
    ///
    /// Closure of [`min_container`](Self::min_container) under widening. No widening rule is
    /// defined for the supported shapes, so the closure adds nothing.
    pub fn max_container(&self, vars: &VariableConstraintSet) -> Result<ContainerSet, JoinError> {
        let min = self.min_container(vars)?;
        let mut max = ContainerSet::new();
        max.extend(min.iter());
        debug_assert!(min.is_subset(&max));
        Ok(max)
    }

    fn check_shape(&self, vars: &VariableConstraintSet) -> Result<(), JoinError> {
        if vars.is_empty() {
            return Err(JoinError::MalformedConstraint(
                "join query declares no variables".to_string(),
            ));
        }
        if vars.len() > 1 {
            return Err(JoinError::UnsupportedConfiguration(format!(
                "{} variables declared, only single-variable joins are supported",
                vars.len()
            )));
        }
        if vars.has_simple_types() {
            return Err(JoinError::UnsupportedConfiguration(
                "simple type constraints are not supported".to_string(),
            ));
        }
        Ok(())
    }

    /// Containers admitted by the constraints on a single variable.
    fn enclosing_containers(
        &self,
        vars: &VariableConstraintSet,
        var: NodeId,
    ) -> Result<ContainerSet, JoinError> {
        let signatures = vars.deep_types(var).map(|s| s.len()).unwrap_or(0);
        let signature = match vars.deep_types(var).and_then(|s| s.iter().next()) {
            Some(sig) if signatures == 1 => *sig,
            _ => {
                return Err(JoinError::UnsupportedConfiguration(format!(
                    "variable {} has {} deep type signatures, exactly one is supported",
                    var, signatures
                )))
            }
        };

        let sig_type = self.store.get_type(signature)?;
        if !self.store.types().is_a(sig_type, builtin::SIGNATURE_LINK) {
            return Err(JoinError::UnsupportedConfiguration(format!(
                "deep type of {} is a {}, only SignatureLink is supported",
                var,
                self.store.types().type_name(sig_type)?
            )));
        }
        if self.store.arity(signature)? == 0 {
            return Err(JoinError::UnsupportedConfiguration(format!(
                "signature {} of {} has no outgoing atoms, so it names no container",
                signature, var
            )));
        }

        let container = self.store.outgoing_atom(signature, 0)?;
        trace!(variable = %var, signature = %signature, container = %container, "Resolved enclosing container");
        Ok(std::iter::once(container).collect())
    }
}
