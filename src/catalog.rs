//! Predefined statement catalog.
//!
//! A fixed mapping from human-readable label to literal SQL text. The
//! catalog is owned by the shell; the pipeline only ever sees the
//! resolved SQL string.

/// The predefined statements, in display order.
const ENTRIES: &[(&str, &str)] = &[
    ("Show all Shipments", "SELECT * FROM Shipments;"),
    (
        "Show Claims with Resolved Status",
        "SELECT * FROM Claims WHERE claim_status = 'Resolved';",
    ),
    (
        "Feedback with High Ratings",
        "SELECT * FROM CustomerFeedback WHERE rating > 4;",
    ),
];

/// Returns the catalog labels, in display order.
pub fn labels() -> Vec<&'static str> {
    ENTRIES.iter().map(|(label, _)| *label).collect()
}

/// Resolves a label to its SQL text.
///
/// Labels are matched exactly; there is no fuzzy lookup.
pub fn resolve(label: &str) -> Option<&'static str> {
    ENTRIES
        .iter()
        .find(|(entry_label, _)| *entry_label == label)
        .map(|(_, sql)| *sql)
}
