//! Integration tests for the environment layer of configuration loading

use super::test_utils::{with_env, JoinFixture};
use atomjoin::config::ConfigLoader;
use atomjoin::store::builtin::*;
use atomjoin::{JoinError, JoinQuery, VariableConstraintSet};
use std::io::Write;

#[test]
fn test_env_enables_silent_failures() {
    let fixture = JoinFixture::new();
    let join = fixture.join_atom(JOIN_LINK);
    // Two variables: refused as unsupported
    let vars = VariableConstraintSet::from_variables([fixture.x, fixture.y]);
    let query = JoinQuery::new(&fixture.store, join, vars).unwrap();

    let loud = with_env(&[("ATOMJOIN__EXECUTION__SILENT_FAILURES", None)], || {
        ConfigLoader::load(None).unwrap()
    });
    assert!(!loud.execution.silent_failures);
    assert!(matches!(
        query.execute_with(&fixture.store, &loud.execution),
        Err(JoinError::UnsupportedConfiguration(_))
    ));

    let silent = with_env(&[("ATOMJOIN__EXECUTION__SILENT_FAILURES", Some("true"))], || {
        ConfigLoader::load(None).unwrap()
    });
    assert!(silent.execution.silent_failures);

    let stream = query.execute_with(&fixture.store, &silent.execution).unwrap();
    assert!(stream.is_closed());
    assert!(stream.is_empty());
}

#[test]
fn test_env_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(
        br#"
[execution]
silent_failures = true

[logging]
level = "warn"
"#,
    )
    .unwrap();

    let config = with_env(
        &[
            ("ATOMJOIN__EXECUTION__SILENT_FAILURES", Some("false")),
            ("ATOMJOIN__LOGGING__LEVEL", Some("trace")),
        ],
        || ConfigLoader::load(Some(file.path())).unwrap(),
    );
    assert!(!config.execution.silent_failures);
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_env_values_are_validated() {
    let result = with_env(&[("ATOMJOIN__LOGGING__FORMAT", Some("yaml"))], || {
        ConfigLoader::load(None)
    });
    assert!(matches!(result, Err(JoinError::Config(msg)) if msg.contains("yaml")));
}
