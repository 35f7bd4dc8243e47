//! Error types for the container join evaluator.

use crate::types::{NodeId, TypeId};
use thiserror::Error;

/// Atom store and type registry errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Atom not found: {0}")]
    AtomNotFound(NodeId),

    #[error("Unknown type: {0}")]
    UnknownType(TypeId),

    #[error("Outgoing index {index} out of range for {atom} (arity {arity})")]
    OutgoingOutOfRange {
        atom: NodeId,
        index: usize,
        arity: usize,
    },

    #[error("Type already registered: {0}")]
    DuplicateType(String),

    #[error("Capacity exceeded: no free {0} ids")]
    CapacityExceeded(&'static str),

    #[error("Expecting a node type, got {0}")]
    NotANodeType(String),

    #[error("Expecting a link type, got {0}")]
    NotALinkType(String),
}

/// Result stream protocol violations.
///
/// These indicate a logic error in the producer and are never silenced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    #[error("Append of {0} to a closed result stream")]
    PushAfterClose(NodeId),

    #[error("Result stream closed more than once")]
    AlreadyClosed,
}

/// Join query errors
#[derive(Debug, Error)]
pub enum JoinError {
    #[error("Expecting a JoinLink, got {actual}")]
    TypeMismatch { actual: String },

    #[error("Unsupported join configuration: {0}")]
    UnsupportedConfiguration(String),

    #[error("Malformed variable constraint: {0}")]
    MalformedConstraint(String),

    #[error("Protocol violation: {0}")]
    ProtocolViolation(#[from] StreamError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JoinError {
    /// Whether `silent_failures` may degrade this error into an empty result.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            JoinError::UnsupportedConfiguration(_)
                | JoinError::MalformedConstraint(_)
                | JoinError::Storage(_)
        )
    }
}

impl From<config::ConfigError> for JoinError {
    fn from(err: config::ConfigError) -> Self {
        JoinError::Config(err.to_string())
    }
}
