//! Integration test modules.

mod connection_test;
mod query_test;
