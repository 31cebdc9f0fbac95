//! Result rendering for the shell.
//!
//! Turns a statement outcome into either a padded plain-text grid or a
//! JSON document. Rendering never fails; errors are handled upstream.

use crate::db::{StatementOutcome, Tabular};

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Padded plain-text grid.
    #[default]
    Text,
    /// JSON document of the full outcome.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Renders a statement outcome in the given format.
pub fn render_outcome(outcome: &StatementOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(outcome),
        OutputFormat::Json => render_json(outcome),
    }
}

fn render_text(outcome: &StatementOutcome) -> String {
    match outcome {
        StatementOutcome::Rows(tabular) => render_grid(tabular),
        StatementOutcome::Empty => "Statement executed; no rows to display.\n".to_string(),
    }
}

fn render_json(outcome: &StatementOutcome) -> String {
    // StatementOutcome serialization is infallible (no maps with
    // non-string keys), so a failure here would be a bug.
    let mut json = serde_json::to_string_pretty(outcome)
        .unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"));
    json.push('\n');
    json
}

/// Renders a tabular result as a padded grid with a header rule and a
/// row-count footer.
fn render_grid(tabular: &Tabular) -> String {
    let headers: Vec<&str> = tabular.columns.iter().map(|c| c.name.as_str()).collect();
    let cells: Vec<Vec<String>> = tabular
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_display_string()).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();

    render_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule_refs: Vec<&str> = rule.iter().map(String::as_str).collect();
    render_line(&mut out, &rule_refs, &widths);

    for row in &cells {
        let row_refs: Vec<&str> = row.iter().map(String::as_str).collect();
        render_line(&mut out, &row_refs, &widths);
    }

    let noun = if tabular.row_count == 1 { "row" } else { "rows" };
    out.push_str(&format!(
        "({} {}, {:.1} ms)\n",
        tabular.row_count,
        noun,
        tabular.execution_time.as_secs_f64() * 1000.0
    ));

    out
}

fn render_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
