//! Property-based tests for container join invariants

use atomjoin::store::builtin::*;
use atomjoin::{
    ContainerJoinEngine, ContainerSet, JoinError, JoinQuery, MemoryAtomStore, NodeId,
    VariableConstraintSet,
};
use proptest::prelude::*;

/// A random constraint shape over a small store.
///
/// `vars` variables are declared; each gets `signatures_per_var` signature links whose first
/// child is picked from `containers` concept nodes; the first `simple_typed` variables also
/// get a simple-type constraint.
fn build(
    containers: usize,
    vars: usize,
    signatures_per_var: usize,
    simple_typed: usize,
    picks: &[usize],
) -> (MemoryAtomStore, VariableConstraintSet, Vec<NodeId>) {
    let store = MemoryAtomStore::new();
    let concepts: Vec<NodeId> = (0..containers)
        .map(|i| store.add_node(CONCEPT_NODE, &format!("C{}", i)).unwrap())
        .collect();

    let mut constraints = VariableConstraintSet::new();
    let mut pick = picks.iter().cycle();
    for v in 0..vars {
        let var = store.add_node(VARIABLE_NODE, &format!("$V{}", v)).unwrap();
        constraints.declare(var);
        for s in 0..signatures_per_var {
            let container = concepts[*pick.next().unwrap() % containers];
            let tag = store.add_node(TYPE_NODE, &format!("T{}", s)).unwrap();
            let sig = store
                .add_link(SIGNATURE_LINK, vec![container, var, tag])
                .unwrap();
            constraints.constrain_deep(var, sig).unwrap();
        }
        if v < simple_typed {
            constraints.constrain_simple(var, CONCEPT_NODE).unwrap();
        }
    }
    (store, constraints, concepts)
}

/// Test that min_container is always contained in max_container
#[test]
fn test_min_subset_of_max_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                1usize..6,
                0usize..4,
                0usize..3,
                0usize..2,
                proptest::collection::vec(0usize..100, 1..8),
            ),
            |(containers, vars, sigs, simple, picks)| {
                let (store, constraints, _) = build(containers, vars, sigs, simple, &picks);
                let engine = ContainerJoinEngine::new(&store);

                match (engine.min_container(&constraints), engine.max_container(&constraints)) {
                    (Ok(min), Ok(max)) => prop_assert!(min.is_subset(&max)),
                    (Err(min_err), Err(max_err)) => {
                        prop_assert!(min_err.is_recoverable());
                        prop_assert!(max_err.is_recoverable());
                    }
                    _ => prop_assert!(false, "min and max disagree on failure"),
                }

                Ok(())
            },
        )
        .unwrap();
}

/// Test that the supported shape always yields the signature's first child
#[test]
fn test_single_signature_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(1usize..8, 0usize..100), |(containers, pick)| {
            let (store, constraints, concepts) = build(containers, 1, 1, 0, &[pick]);
            let engine = ContainerJoinEngine::new(&store);

            let expected: ContainerSet = [concepts[pick % containers]].into_iter().collect();
            prop_assert_eq!(engine.min_container(&constraints).unwrap(), expected.clone());
            prop_assert_eq!(engine.max_container(&constraints).unwrap(), expected);

            Ok(())
        })
        .unwrap();
}

/// Test that every execution closes exactly once and is repeatable
#[test]
fn test_execute_closes_once_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1usize..4, 0usize..3, 0usize..3, 0usize..2, any::<bool>()),
            |(containers, vars, sigs, simple, silent)| {
                let (store, constraints, _) = build(containers, vars, sigs, simple, &[0, 1, 2]);
                let join = store.add_link(JOIN_LINK, vec![]).unwrap();
                let query = JoinQuery::new(&store, join, constraints).unwrap();

                match query.execute(&store, silent) {
                    Ok(stream) => {
                        prop_assert!(stream.is_closed());
                        prop_assert!(stream.close().is_err());
                        let again = query.execute(&store, silent).unwrap();
                        let first: ContainerSet = stream.reader().collect();
                        let second: ContainerSet = again.reader().collect();
                        prop_assert_eq!(first, second);
                    }
                    Err(err) => {
                        prop_assert!(!silent);
                        prop_assert!(matches!(
                            err,
                            JoinError::UnsupportedConfiguration(_)
                                | JoinError::MalformedConstraint(_)
                        ));
                    }
                }

                Ok(())
            },
        )
        .unwrap();
}
