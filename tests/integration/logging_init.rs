//! Integration tests for subscriber installation
//!
//! The global subscriber can only be installed once per process, so everything that
//! depends on it lives in a single test.

use super::test_utils::{with_env, JoinFixture};
use atomjoin::logging::{init_logging, LoggingConfig};
use atomjoin::store::builtin::*;
use atomjoin::{JoinError, JoinQuery};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_env_overrides_drive_installed_subscriber() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("logs").join("atomjoin.log");

    // Config alone would log nothing to stdout; the environment redirects everything.
    let config = LoggingConfig {
        level: "off".to_string(),
        format: "text".to_string(),
        output: "stdout".to_string(),
        file: log_file.clone(),
        ..LoggingConfig::default()
    };

    with_env(
        &[
            ("ATOMJOIN_LOG", Some("atomjoin=debug")),
            ("ATOMJOIN_LOG_FORMAT", Some("json")),
            ("ATOMJOIN_LOG_OUTPUT", Some("file")),
            ("ATOMJOIN_LOG_MODULES", None),
        ],
        || {
            init_logging(Some(&config)).unwrap();

            let second = init_logging(Some(&config));
            assert!(matches!(second, Err(JoinError::Config(msg)) if msg.contains("subscriber")));
        },
    );

    let fixture = JoinFixture::new();
    let join = fixture.join_atom(JOIN_LINK);
    let query = JoinQuery::new(&fixture.store, join, fixture.single_variable()).unwrap();
    query.execute(&fixture.store, false).unwrap();

    let contents = fs::read_to_string(&log_file).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("Join executed"))
        .expect("join execution was not logged");
    assert!(line.starts_with('{'), "expected a JSON line, got {}", line);
    assert!(line.contains("\"level\":\"DEBUG\""));
    assert!(line.contains("atomjoin::join::query"));
}
