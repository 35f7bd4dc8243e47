//! Integration tests for join evaluation and result streaming

mod config_env;
mod logging_init;
mod result_stream;
