//! Statement-batch execution pipeline.
//!
//! Raw SQL text is split into statements, each statement is classified to
//! pick an execution path, the whole batch runs inside a foreign-key bracket,
//! and exactly one outcome (the last, or the first failure) becomes the
//! report handed back to the caller.

mod classifier;
mod executor;
mod splitter;

pub use classifier::{classify, StatementClass};
pub use executor::BatchRunner;
pub use splitter::split_statements;

use std::time::Duration;

/// Status text reported for schema-mutating statements, where an
/// affected-row count would be meaningless.
pub const SCHEMA_CHANGE_STATUS: &str = "Query executed successfully";

/// The typed result of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A row-returning statement's result set, already rendered to display
    /// strings.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A row-mutating statement's affected-row count.
    Affected(u64),
    /// A schema-mutating statement's fixed status text.
    Status(String),
    /// An execution failure; aborts the rest of the batch.
    Failed(String),
}

impl Outcome {
    /// Renders the outcome as the columns and rows of a report.
    fn into_table(self) -> (Vec<String>, Vec<Vec<String>>) {
        match self {
            Outcome::Rows { columns, rows } => (columns, rows),
            Outcome::Affected(n) => (
                vec!["Result".to_string()],
                vec![vec![format!("{n} row(s) affected")]],
            ),
            Outcome::Status(text) => (vec!["Result".to_string()], vec![vec![text]]),
            Outcome::Failed(message) => (
                vec!["Error".to_string()],
                vec![vec![format!("Error: {message}")]],
            ),
        }
    }
}

/// The single aggregated result for an entire batch.
///
/// Derived from exactly one outcome: the last successful one, or the first
/// failure. Side effects of earlier statements persist either way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Final column names.
    pub columns: Vec<String>,

    /// Final rows, rendered to display strings.
    pub rows: Vec<Vec<String>>,

    /// Wall-clock time for the whole batch.
    pub elapsed: Duration,

    /// The failure message, if the batch stopped on an error.
    pub error: Option<String>,
}

impl BatchReport {
    /// Builds a report from the outcome that was selected to represent the
    /// batch. `None` means the batch contained no executable statements.
    pub(crate) fn from_outcome(outcome: Option<Outcome>, elapsed: Duration) -> Self {
        match outcome {
            None => Self {
                elapsed,
                ..Self::default()
            },
            Some(outcome) => {
                let error = match &outcome {
                    Outcome::Failed(message) => Some(message.clone()),
                    _ => None,
                };
                let (columns, rows) = outcome.into_table();
                Self {
                    columns,
                    rows,
                    elapsed,
                    error,
                }
            }
        }
    }
}
