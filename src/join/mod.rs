//! Container joins: the join engine and the query that streams its results.

pub mod engine;
pub mod query;

pub use engine::ContainerJoinEngine;
pub use query::{ContainerStage, JoinKind, JoinQuery};
