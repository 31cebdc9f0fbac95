//! Statement execution integration tests.
//!
//! Covers outcome classification, commit durability, error containment,
//! idempotence, and concurrent invocations.

use pgdesk::config::ConnectionConfig;
use pgdesk::db::{DatabaseClient, PostgresClient, Value};
use pgdesk::error::DeskError;
use std::sync::Arc;

/// Helper to create a test client from the environment.
fn get_test_client() -> Option<PostgresClient> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let config = ConnectionConfig::from_connection_string(&url).ok()?;
    Some(PostgresClient::new(config))
}

/// A scratch table name unique to this test process.
fn scratch_table(suffix: &str) -> String {
    format!("pgdesk_test_{}_{suffix}", std::process::id())
}

#[tokio::test]
async fn test_select_columns_in_descriptor_order() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let outcome = client
        .run_statement("SELECT 1 as num, 'hello' as greeting, true as flag")
        .await
        .unwrap();

    let tabular = outcome.as_rows().unwrap();
    assert_eq!(tabular.columns.len(), 3);
    assert_eq!(tabular.columns[0].name, "num");
    assert_eq!(tabular.columns[1].name, "greeting");
    assert_eq!(tabular.columns[2].name, "flag");

    assert_eq!(tabular.rows.len(), 1);
    assert_eq!(tabular.rows[0].len(), 3);
    assert_eq!(tabular.rows[0][0], Value::Int(1));
    assert_eq!(tabular.rows[0][1], Value::String("hello".to_string()));
    assert_eq!(tabular.rows[0][2], Value::Bool(true));
}

#[tokio::test]
async fn test_null_values_survive_materialization() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let outcome = client
        .run_statement("SELECT NULL::text as missing")
        .await
        .unwrap();

    let tabular = outcome.as_rows().unwrap();
    assert!(tabular.rows[0][0].is_null());
}

#[tokio::test]
async fn test_zero_row_select_is_rows_not_empty() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let outcome = client
        .run_statement("SELECT rating FROM (VALUES (5), (3)) AS t(rating) WHERE rating > 10")
        .await
        .unwrap();

    // Zero rows but a result descriptor: still a Rows outcome.
    let tabular = outcome.as_rows().expect("expected a row set");
    assert!(tabular.is_empty());
    assert_eq!(tabular.columns[0].name, "rating");
}

#[tokio::test]
async fn test_filter_predicate_holds_on_every_row() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let outcome = client
        .run_statement(
            "SELECT rating FROM (VALUES (5), (3), (4), (5)) AS feedback(rating) WHERE rating > 4",
        )
        .await
        .unwrap();

    let tabular = outcome.as_rows().unwrap();
    assert_eq!(tabular.row_count, 2);
    for row in &tabular.rows {
        match &row[0] {
            Value::Int(rating) => assert!(*rating > 4),
            other => panic!("Expected Int rating, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_mutation_returns_empty_and_commits() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let table = scratch_table("commit");
    client
        .run_statement(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (id int primary key, label text)"
        ))
        .await
        .unwrap();

    let outcome = client
        .run_statement(&format!("INSERT INTO {table} VALUES (1, 'first')"))
        .await
        .unwrap();
    assert!(outcome.is_empty());

    // A subsequent invocation uses its own independent connection, so
    // visibility here proves the commit happened.
    let outcome = client
        .run_statement(&format!("SELECT label FROM {table} WHERE id = 1"))
        .await
        .unwrap();
    let tabular = outcome.as_rows().unwrap();
    assert_eq!(tabular.rows[0][0], Value::String("first".to_string()));

    client
        .run_statement(&format!("DROP TABLE {table}"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_faulting_statement_leaves_client_usable() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let error = client
        .run_statement("SELECT * FORM Shipments;")
        .await
        .unwrap_err();
    assert!(matches!(error, DeskError::Execution { .. }));
    assert_eq!(error.code(), Some("42601"));

    // The failed invocation's connection is gone; the next invocation
    // opens a fresh one and succeeds.
    let outcome = client.run_statement("SELECT 1").await.unwrap();
    assert!(outcome.as_rows().is_some());
}

#[tokio::test]
async fn test_idempotent_select() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let sql = "SELECT id, label FROM (VALUES (1, 'a'), (2, 'b')) AS t(id, label) ORDER BY id";

    let first = client.run_statement(sql).await.unwrap();
    let second = client.run_statement(sql).await.unwrap();

    let first = first.as_rows().unwrap();
    let second = second.as_rows().unwrap();

    assert_eq!(first.columns, second.columns);
    assert_eq!(first.rows, second.rows);
}

#[tokio::test]
async fn test_concurrent_mutations_both_apply() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let table = scratch_table("concurrent");
    client
        .run_statement(&format!("CREATE TABLE IF NOT EXISTS {table} (n int)"))
        .await
        .unwrap();

    let client = Arc::new(client);
    let insert = format!("INSERT INTO {table} VALUES (1)");

    let a = tokio::spawn({
        let client = Arc::clone(&client);
        let insert = insert.clone();
        async move { client.run_statement(&insert).await }
    });
    let b = tokio::spawn({
        let client = Arc::clone(&client);
        let insert = insert.clone();
        async move { client.run_statement(&insert).await }
    });

    assert!(a.await.unwrap().is_ok());
    assert!(b.await.unwrap().is_ok());

    let outcome = client
        .run_statement(&format!("SELECT count(*) FROM {table}"))
        .await
        .unwrap();
    let tabular = outcome.as_rows().unwrap();
    assert_eq!(tabular.rows[0][0], Value::Int(2));

    client
        .run_statement(&format!("DROP TABLE {table}"))
        .await
        .unwrap();
}
