//! Polymorphic query results, for composing a join with other query stages.

use crate::container::ContainerSet;
use crate::error::JoinError;
use crate::store::AtomStore;
use crate::stream::ResultStream;

/// Result value of an executable query stage
#[derive(Debug, Clone)]
pub enum Value {
    Stream(ResultStream),
    Containers(ContainerSet),
}

impl Value {
    pub fn as_stream(&self) -> Option<&ResultStream> {
        match self {
            Value::Stream(stream) => Some(stream),
            Value::Containers(_) => None,
        }
    }

    pub fn into_stream(self) -> Option<ResultStream> {
        match self {
            Value::Stream(stream) => Some(stream),
            Value::Containers(_) => None,
        }
    }

    pub fn as_containers(&self) -> Option<&ContainerSet> {
        match self {
            Value::Containers(set) => Some(set),
            Value::Stream(_) => None,
        }
    }

    pub fn into_containers(self) -> Option<ContainerSet> {
        match self {
            Value::Containers(set) => Some(set),
            Value::Stream(_) => None,
        }
    }
}

impl From<ResultStream> for Value {
    fn from(stream: ResultStream) -> Self {
        Value::Stream(stream)
    }
}

impl From<ContainerSet> for Value {
    fn from(set: ContainerSet) -> Self {
        Value::Containers(set)
    }
}

/// A query stage that can be evaluated against a store
pub trait Evaluate {
    fn evaluate(&self, store: &dyn AtomStore, silent: bool) -> Result<Value, JoinError>;
}
