//! Connection acquisition integration tests.
//!
//! Exercises the connection provider through the pipeline: a single
//! attempt per invocation, typed errors, no partially-opened state.

use pgdesk::config::ConnectionConfig;
use pgdesk::db::{DatabaseClient, PostgresClient};
use pgdesk::error::DeskError;

/// Helper to get the test database config from the environment.
fn get_test_config() -> Option<ConnectionConfig> {
    let url = std::env::var("DATABASE_URL").ok()?;
    ConnectionConfig::from_connection_string(&url).ok()
}

#[tokio::test]
async fn test_connect_and_run() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let client = PostgresClient::new(config);
    let outcome = client.run_statement("SELECT 1").await.unwrap();
    assert!(outcome.as_rows().is_some());
}

#[tokio::test]
async fn test_unreachable_host_is_connection_error() {
    let config = ConnectionConfig {
        host: "nonexistent.invalid".to_string(),
        ..Default::default()
    };

    let client = PostgresClient::new(config);
    let error = client.run_statement("SELECT 1").await.unwrap_err();

    assert!(matches!(error, DeskError::Connection { .. }));
}

#[tokio::test]
async fn test_missing_database_is_connection_error() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let config = ConnectionConfig {
        database: "pgdesk_no_such_database".to_string(),
        ..config
    };

    let client = PostgresClient::new(config);
    let error = client.run_statement("SELECT 1").await.unwrap_err();

    assert!(matches!(error, DeskError::Connection { .. }));
    assert!(
        error.to_string().contains("pgdesk_no_such_database")
            || error.to_string().contains("does not exist")
    );
}

#[tokio::test]
async fn test_connection_failure_precedes_execution() {
    // With no reachable server, even an invalid statement reports a
    // connection error: the statement is never submitted.
    let config = ConnectionConfig {
        host: "nonexistent.invalid".to_string(),
        ..Default::default()
    };

    let client = PostgresClient::new(config);
    let error = client
        .run_statement("SELECT * FORM Shipments;")
        .await
        .unwrap_err();

    assert!(matches!(error, DeskError::Connection { .. }));
}
