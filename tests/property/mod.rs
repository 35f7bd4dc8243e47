//! Property-based tests for container join invariants

mod container_invariants;
