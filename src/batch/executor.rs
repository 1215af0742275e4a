//! Batch execution against the store.
//!
//! Drives the pipeline: split, classify, execute in order with
//! short-circuiting, and aggregate into one report. The whole batch runs
//! with foreign-key enforcement disabled because SQLite misbehaves when
//! constraints are checked across statement boundaries of a free-form batch;
//! the toggle is restored afterwards on every path.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::batch::{
    classify, split_statements, BatchReport, Outcome, StatementClass, SCHEMA_CHANGE_STATUS,
};
use crate::store::SqlStore;

/// Runs statement batches against a store.
pub struct BatchRunner {
    store: Arc<dyn SqlStore>,
    // The foreign-key pragma is connection-scoped, not batch-scoped.
    // Serializing batches here keeps one batch's toggle from bleeding into
    // another's statements.
    toggle_lock: Mutex<()>,
}

impl BatchRunner {
    /// Creates a runner over the given store.
    pub fn new(store: Arc<dyn SqlStore>) -> Self {
        Self {
            store,
            toggle_lock: Mutex::new(()),
        }
    }

    /// Executes a possibly multi-statement batch and returns its report.
    ///
    /// Statements run strictly in order; the first failure stops the batch.
    /// Side effects of statements that already ran persist. The report is
    /// derived from the last outcome produced (or the failure), never from
    /// earlier outcomes.
    pub async fn run_batch(&self, text: &str) -> BatchReport {
        let start = Instant::now();
        let _toggle_guard = self.toggle_lock.lock().await;

        if let Err(e) = self.store.set_foreign_keys(false).await {
            let message = format!("Failed to disable foreign key constraints: {e}");
            return BatchReport::from_outcome(Some(Outcome::Failed(message)), start.elapsed());
        }

        let outcome = self.execute_statements(text).await;

        // Best-effort restore. The batch result stands regardless.
        if let Err(e) = self.store.set_foreign_keys(true).await {
            warn!("Failed to re-enable foreign key constraints: {e}");
        }

        BatchReport::from_outcome(outcome, start.elapsed())
    }

    /// Runs each non-empty statement in order, returning the last outcome,
    /// or the first failure.
    async fn execute_statements(&self, text: &str) -> Option<Outcome> {
        let mut last_outcome = None;

        for statement in split_statements(text) {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }

            let class = classify(statement);
            debug!("Executing {class} statement");

            let outcome = match class {
                StatementClass::SchemaMutating => match self.store.exec(statement).await {
                    Ok(_) => Outcome::Status(SCHEMA_CHANGE_STATUS.to_string()),
                    Err(e) => return Some(Outcome::Failed(e.to_string())),
                },
                StatementClass::RowMutating => match self.store.exec(statement).await {
                    Ok(affected) => Outcome::Affected(affected),
                    Err(e) => return Some(Outcome::Failed(e.to_string())),
                },
                StatementClass::RowReturning => match self.store.query(statement).await {
                    Ok(output) => Outcome::Rows {
                        columns: output.columns,
                        rows: output
                            .rows
                            .iter()
                            .map(|row| row.iter().map(|v| v.to_display_string()).collect())
                            .collect(),
                    },
                    Err(e) => return Some(Outcome::Failed(e.to_string())),
                },
            };

            last_outcome = Some(outcome);
        }

        last_outcome
    }
}
