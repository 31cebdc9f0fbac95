//! Presentation shell.
//!
//! A thin layer over the pipeline: resolves what the operator asked for
//! (catalog listing, catalog entry, or ad-hoc SQL), runs the statement,
//! and renders the outcome. All recovery logic lives elsewhere; the
//! shell only displays what it is handed.

use crate::catalog;
use crate::db::DatabaseClient;
use crate::error::{DeskError, Result};
use crate::render::{render_outcome, OutputFormat};
use tracing::info;

/// What the operator asked the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Print the predefined statement catalog.
    List,

    /// Run a predefined statement by its catalog label.
    Catalog(String),

    /// Run an ad-hoc statement. The text is opaque and executed
    /// verbatim; this is an explicit trust boundary.
    AdHoc(String),
}

/// The shell itself. Borrows the client; owns no connection state.
pub struct Shell<'a> {
    db: &'a dyn DatabaseClient,
    format: OutputFormat,
}

impl<'a> Shell<'a> {
    /// Creates a shell over the given client.
    pub fn new(db: &'a dyn DatabaseClient, format: OutputFormat) -> Self {
        Self { db, format }
    }

    /// Performs one action and returns the rendered output.
    pub async fn run(&self, action: &ShellAction) -> Result<String> {
        match action {
            ShellAction::List => Ok(render_catalog()),
            ShellAction::Catalog(label) => {
                let sql = catalog::resolve(label).ok_or_else(|| {
                    DeskError::config(format!(
                        "unknown catalog label '{label}'. Use --list to see available entries"
                    ))
                })?;
                let body = self.execute(sql).await?;
                Ok(format!("Results for: {label}\n{body}"))
            }
            ShellAction::AdHoc(sql) => self.execute(sql).await,
        }
    }

    async fn execute(&self, sql: &str) -> Result<String> {
        info!(sql, "running statement");
        let outcome = self.db.run_statement(sql).await?;
        Ok(render_outcome(&outcome, self.format))
    }
}

fn render_catalog() -> String {
    let mut out = String::from("Available statements:\n");
    for label in catalog::labels() {
        out.push_str("  ");
        out.push_str(label);
        out.push('\n');
    }
    out
}
