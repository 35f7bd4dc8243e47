//! Atomjoin: Container Join Evaluation
//!
//! Evaluates join queries over a typed hypergraph store. A join query declares pattern
//! variables with type constraints; evaluation computes the atoms that act as the minimal
//! and maximal containers for those variables and streams them to the caller through a
//! closable [`ResultStream`](stream::ResultStream).

pub mod config;
pub mod container;
pub mod error;
pub mod join;
pub mod logging;
pub mod store;
pub mod stream;
pub mod types;
pub mod value;
pub mod variables;

pub use container::ContainerSet;
pub use error::{JoinError, StorageError, StreamError};
pub use join::{ContainerJoinEngine, ContainerStage, JoinKind, JoinQuery};
pub use store::{AtomStore, MemoryAtomStore, TypeRegistry};
pub use stream::{ResultStream, StreamReader};
pub use types::{NodeId, TypeId};
pub use value::{Evaluate, Value};
pub use variables::VariableConstraintSet;
