//! PostgreSQL statement pipeline.
//!
//! Implements the `DatabaseClient` trait over sqlx: acquire a single
//! short-lived connection, run one statement, classify its outcome, and
//! unconditionally close the connection before returning.

use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, DatabaseClient, Row, StatementOutcome, Tabular, Value};
use crate::error::{DeskError, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgConnection, PgRow};
use sqlx::{Column, Connection, Executor, Row as SqlxRow, Statement, TypeInfo};
use std::time::Instant;
use tracing::debug;

/// PostgreSQL statement pipeline.
///
/// Holds configuration only. Every `run_statement` call opens its own
/// connection, so a client value can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct PostgresClient {
    config: ConnectionConfig,
}

impl PostgresClient {
    /// Creates a client for the given connection configuration.
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this client connects with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    async fn run_statement(&self, sql: &str) -> Result<StatementOutcome> {
        let mut conn = acquire(&self.config).await?;

        let outcome = execute_on(&mut conn, sql).await;

        // Best-effort teardown on every path; a close failure never
        // shadows the statement outcome.
        if let Err(e) = conn.close().await {
            debug!("closing connection failed: {e}");
        }

        outcome
    }
}

/// Opens a single short-lived connection.
///
/// One attempt, no retry, no backoff. A failure carries the driver's
/// message and SQLSTATE code; nothing unwinds past this function.
async fn acquire(config: &ConnectionConfig) -> Result<PgConnection> {
    let conn_str = config.to_connection_string();
    debug!("connecting to {}", config.display_string());

    PgConnection::connect(&conn_str)
        .await
        .map_err(map_connection_error)
}

/// Runs one statement on an open connection and classifies the outcome.
///
/// The statement is prepared first so its result descriptor can be
/// inspected: a descriptor means a row-returning statement whose rows
/// are fetched eagerly; no descriptor means a side-effecting statement
/// that is executed and committed under autocommit.
async fn execute_on(conn: &mut PgConnection, sql: &str) -> Result<StatementOutcome> {
    let start = Instant::now();

    let stmt = conn.prepare(sql).await.map_err(map_execution_error)?;

    if stmt.columns().is_empty() {
        let done = conn.execute(sql).await.map_err(map_execution_error)?;
        debug!(
            rows_affected = done.rows_affected(),
            "statement executed, no row set"
        );
        return Ok(StatementOutcome::Empty);
    }

    // Column names verbatim from the descriptor, in descriptor order.
    // Duplicates are kept as the driver reports them.
    let columns: Vec<ColumnInfo> = stmt
        .columns()
        .iter()
        .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
        .collect();

    let pg_rows = stmt
        .query()
        .fetch_all(&mut *conn)
        .await
        .map_err(map_execution_error)?;

    let rows: Vec<Row> = pg_rows.iter().map(convert_row).collect();
    debug!(row_count = rows.len(), "row set materialized");

    let tabular = Tabular::with_data(columns, rows).with_execution_time(start.elapsed());
    Ok(StatementOutcome::Rows(tabular))
}

/// Converts a sqlx PgRow to our Row type.
fn convert_row(row: &PgRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a PgRow to our Value type.
fn convert_value(row: &PgRow, index: usize, type_name: &str) -> Value {
    match type_name.to_uppercase().as_str() {
        "BOOL" | "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "INT2" | "SMALLINT" => row
            .try_get::<Option<i16>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(v as i64))
            .unwrap_or(Value::Null),

        "INT4" | "INT" | "INTEGER" => row
            .try_get::<Option<i32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(v as i64))
            .unwrap_or(Value::Null),

        "INT8" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "FLOAT4" | "REAL" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Float(v as f64))
            .unwrap_or(Value::Null),

        "FLOAT8" | "DOUBLE PRECISION" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BYTEA" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        // Everything else is fetched as text.
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Maps a sqlx connection failure to a typed connection error.
fn map_connection_error(error: sqlx::Error) -> DeskError {
    DeskError::Connection {
        code: sqlstate(&error),
        message: error.to_string(),
    }
}

/// Maps a sqlx statement failure to a typed execution error.
fn map_execution_error(error: sqlx::Error) -> DeskError {
    DeskError::Execution {
        code: sqlstate(&error),
        message: format_execution_error(&error),
    }
}

/// Extracts the SQLSTATE code from a sqlx error, when present.
fn sqlstate(error: &sqlx::Error) -> Option<String> {
    error
        .as_database_error()
        .and_then(|db| db.code().map(|c| c.to_string()))
}

/// Formats an execution error, appending Postgres detail fields when
/// the driver reports them.
fn format_execution_error(error: &sqlx::Error) -> String {
    let Some(db_error) = error.as_database_error() else {
        return error.to_string();
    };

    let mut result = db_error.message().to_string();

    if let Some(pg_error) = db_error.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
        if let Some(detail) = pg_error.detail() {
            result.push_str("\n  DETAIL: ");
            result.push_str(detail);
        }

        if let Some(hint) = pg_error.hint() {
            result.push_str("\n  HINT: ");
            result.push_str(hint);
        }

        if let Some(table) = pg_error.table() {
            result.push_str("\n  TABLE: ");
            result.push_str(table);
        }

        if let Some(column) = pg_error.column() {
            result.push_str("\n  COLUMN: ");
            result.push_str(column);
        }

        if let Some(constraint) = pg_error.constraint() {
            result.push_str("\n  CONSTRAINT: ");
            result.push_str(constraint);
        }
    }

    result
}
