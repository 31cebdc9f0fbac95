//! Mock database clients for testing.
//!
//! Provide in-memory `DatabaseClient` implementations so the shell and
//! rendering paths can be exercised without a running database.

use super::{ColumnInfo, DatabaseClient, StatementOutcome, Tabular, Value};
use crate::error::{DeskError, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// A mock client that classifies statements by their leading keyword
/// and records everything it is asked to run.
pub struct MockDatabaseClient {
    executed: Mutex<Vec<String>>,
}

impl MockDatabaseClient {
    /// Creates a new mock client.
    pub fn new() -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Returns the statements this client has executed, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().expect("mock lock poisoned").clone()
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn run_statement(&self, sql: &str) -> Result<StatementOutcome> {
        self.executed
            .lock()
            .expect("mock lock poisoned")
            .push(sql.to_string());

        let sql_upper = sql.trim_start().to_uppercase();

        if sql_upper.starts_with("SELECT") {
            let columns = vec![ColumnInfo::new("result", "text")];
            let rows = vec![vec![Value::String(format!("Mock result for: {sql}"))]];

            Ok(StatementOutcome::Rows(
                Tabular::with_data(columns, rows)
                    .with_execution_time(Duration::from_millis(1)),
            ))
        } else {
            Ok(StatementOutcome::Empty)
        }
    }
}

/// A mock client whose every statement fails with an execution error.
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn run_statement(&self, _sql: &str) -> Result<StatementOutcome> {
        Err(DeskError::execution(self.message.clone()))
    }
}
