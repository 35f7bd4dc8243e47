//! Join Query Execution
//!
//! A [`JoinQuery`] is bound to a join-link atom and its parsed variable constraints. It runs
//! the container join and delivers the containers through a [`ResultStream`] that is
//! closed exactly once per execution. This is the only place where join errors are either
//! propagated or, under `silent_failures`, degraded into an empty result.

use crate::config::ExecutionConfig;
use crate::container::ContainerSet;
use crate::error::JoinError;
use crate::join::engine::ContainerJoinEngine;
use crate::store::{builtin, AtomStore};
use crate::stream::ResultStream;
use crate::types::NodeId;
use crate::value::{Evaluate, Value};
use crate::variables::VariableConstraintSet;
use tracing::{debug, trace, warn};

/// Which container set a join query streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `JoinLink` and `MaximalJoinLink`
    Maximal,
    /// `MinimalJoinLink`
    Minimal,
}

/// A join query bound to its atom
#[derive(Debug, Clone)]
pub struct JoinQuery {
    handle: NodeId,
    kind: JoinKind,
    variables: VariableConstraintSet,
    vardecl: Option<NodeId>,
    body: Option<NodeId>,
}

impl JoinQuery {
    /// Bind `handle` as a join query.
    ///
    /// Fails with [`JoinError::TypeMismatch`] unless the atom's type is a `JoinLink`.
    pub fn new(
        store: &dyn AtomStore,
        handle: NodeId,
        variables: VariableConstraintSet,
    ) -> Result<Self, JoinError> {
        let atom_type = store.get_type(handle)?;
        let types = store.types();
        if !types.is_a(atom_type, builtin::JOIN_LINK) {
            return Err(JoinError::TypeMismatch {
                actual: types.type_name(atom_type)?.to_string(),
            });
        }

        let kind = if types.is_a(atom_type, builtin::MINIMAL_JOIN_LINK) {
            JoinKind::Minimal
        } else {
            JoinKind::Maximal
        };

        // Prenex layout: [vardecl, body] or just [body]
        let arity = store.arity(handle)?;
        let (vardecl, body) = match arity {
            0 => (None, None),
            1 => (None, Some(store.outgoing_atom(handle, 0)?)),
            _ => (
                Some(store.outgoing_atom(handle, 0)?),
                Some(store.outgoing_atom(handle, 1)?),
            ),
        };

        Ok(Self {
            handle,
            kind,
            variables,
            vardecl,
            body,
        })
    }

    pub fn handle(&self) -> NodeId {
        self.handle
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn variables(&self) -> &VariableConstraintSet {
        &self.variables
    }

    pub fn vardecl(&self) -> Option<NodeId> {
        self.vardecl
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    pub fn min_container(&self, store: &dyn AtomStore) -> Result<ContainerSet, JoinError> {
        ContainerJoinEngine::new(store).min_container(&self.variables)
    }

    pub fn max_container(&self, store: &dyn AtomStore) -> Result<ContainerSet, JoinError> {
        ContainerJoinEngine::new(store).max_container(&self.variables)
    }

    /// Run the join and return the closed result stream.
    ///
    /// With `silent` set, recoverable join errors yield an empty closed stream.
    pub fn execute(&self, store: &dyn AtomStore, silent: bool) -> Result<ResultStream, JoinError> {
        self.trace_query(store);

        let stream = ResultStream::new();
        let containers = match self.resolve(store, self.kind, silent) {
            Ok(set) => set,
            Err(err) => {
                stream.close()?;
                return Err(err);
            }
        };

        for container in containers.iter() {
            stream.push(container)?;
        }
        stream.close()?;

        debug!(
            query = %self.handle,
            kind = ?self.kind,
            results = stream.len(),
            "Join executed"
        );
        Ok(stream)
    }

    /// Run the join under loaded execution settings.
    pub fn execute_with(
        &self,
        store: &dyn AtomStore,
        config: &ExecutionConfig,
    ) -> Result<ResultStream, JoinError> {
        self.execute(store, config.silent_failures)
    }

    /// A stage that evaluates one container set of this query without a stream.
    pub fn container_stage(&self, kind: JoinKind) -> ContainerStage<'_> {
        ContainerStage { query: self, kind }
    }

    /// The `kind` container set, or an empty one when `silent` swallows the error.
    fn resolve(
        &self,
        store: &dyn AtomStore,
        kind: JoinKind,
        silent: bool,
    ) -> Result<ContainerSet, JoinError> {
        let result = match kind {
            JoinKind::Maximal => self.max_container(store),
            JoinKind::Minimal => self.min_container(store),
        };
        match result {
            Err(err) if silent && err.is_recoverable() => {
                warn!(
                    query = %self.handle,
                    kind = ?kind,
                    error = %err,
                    "Join failed, returning empty result"
                );
                Ok(ContainerSet::new())
            }
            other => other,
        }
    }

    fn trace_query(&self, store: &dyn AtomStore) {
        if !tracing::enabled!(tracing::Level::TRACE) {
            return;
        }
        let render = |atom: Option<NodeId>| match atom {
            Some(atom) => store.render(atom).unwrap_or_else(|e| e.to_string()),
            None => "-".to_string(),
        };
        trace!(
            query = %self.handle,
            vardecl = %render(self.vardecl),
            body = %render(self.body),
            variables = self.variables.len(),
            "Executing join"
        );
    }
}

impl Evaluate for JoinQuery {
    fn evaluate(&self, store: &dyn AtomStore, silent: bool) -> Result<Value, JoinError> {
        self.execute(store, silent).map(Value::from)
    }
}

/// One container set of a [`JoinQuery`], evaluated eagerly.
///
/// Evaluates to [`Value::Containers`] for stages that consume the whole set at once, such
/// as a comparison of the minimal and maximal containers.
#[derive(Debug, Clone, Copy)]
pub struct ContainerStage<'q> {
    query: &'q JoinQuery,
    kind: JoinKind,
}

impl ContainerStage<'_> {
    pub fn kind(&self) -> JoinKind {
        self.kind
    }
}

impl Evaluate for ContainerStage<'_> {
    fn evaluate(&self, store: &dyn AtomStore, silent: bool) -> Result<Value, JoinError> {
        let set = self.query.resolve(store, self.kind, silent)?;
        debug!(
            query = %self.query.handle,
            kind = ?self.kind,
            results = set.len(),
            "Container stage evaluated"
        );
        Ok(Value::from(set))
    }
}
