//! Database layer for pgdesk.
//!
//! Provides a trait-based seam over the statement pipeline so the shell
//! can be exercised against a mock client in tests.

mod mock;
mod postgres;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use postgres::PostgresClient;
pub use types::{ColumnInfo, Row, StatementOutcome, Tabular, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for statement execution.
///
/// One call runs exactly one statement over its own short-lived
/// connection; implementations hold configuration, never an open
/// connection, so concurrent calls are independent by construction.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a single SQL statement and classifies its outcome.
    ///
    /// Returns `Rows` for row-returning statements (zero rows included),
    /// `Empty` for side-effecting statements, and an error for any
    /// driver fault. No fault escapes this boundary unclassified.
    async fn run_statement(&self, sql: &str) -> Result<StatementOutcome>;
}
