//! End-to-end batch execution tests against a real SQLite database.

use std::sync::Arc;

use db_loupe::batch::BatchRunner;
use db_loupe::store::{SqlStore, SqliteStore};
use pretty_assertions::assert_eq;

async fn runner() -> (Arc<SqliteStore>, BatchRunner) {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let runner = BatchRunner::new(store.clone());
    (store, runner)
}

#[tokio::test]
async fn test_report_comes_from_last_statement_only() {
    let (store, runner) = runner().await;

    let report = runner.run_batch("CREATE TABLE t (x INTEGER); SELECT * FROM t").await;

    // The report reflects only the SELECT's empty result set...
    assert!(report.error.is_none());
    assert_eq!(report.columns, vec!["x"]);
    assert!(report.rows.is_empty());

    // ...but the CREATE's side effect persists.
    assert!(store.table_exists("t").await.unwrap());
}

#[tokio::test]
async fn test_all_statements_apply_even_though_one_is_reported() {
    let (_store, runner) = runner().await;

    let report = runner
        .run_batch(
            "CREATE TABLE t (x INTEGER); \
             INSERT INTO t VALUES (1); \
             INSERT INTO t VALUES (2); \
             SELECT count(*) AS n FROM t",
        )
        .await;

    assert!(report.error.is_none());
    assert_eq!(report.columns, vec!["n"]);
    assert_eq!(report.rows, vec![vec!["2".to_string()]]);
}

#[tokio::test]
async fn test_error_short_circuits_later_statements() {
    let (store, runner) = runner().await;

    let report = runner
        .run_batch("INSERT INTO missing VALUES (1); CREATE TABLE second_marker (x)")
        .await;

    assert_eq!(report.columns, vec!["Error"]);
    let error = report.error.expect("batch should fail");
    assert!(error.contains("no such table"), "unexpected error: {error}");
    // The rendered row carries a prefixed copy of the same message.
    assert_eq!(report.rows, vec![vec![format!("Error: {error}")]]);

    // The statement after the failure never ran.
    assert!(!store.table_exists("second_marker").await.unwrap());
}

#[tokio::test]
async fn test_quoted_semicolon_survives_the_round_trip() {
    let (_store, runner) = runner().await;

    let report = runner
        .run_batch("CREATE TABLE t (v TEXT); INSERT INTO t VALUES (';'); SELECT v FROM t")
        .await;

    assert!(report.error.is_none());
    assert_eq!(report.rows, vec![vec![";".to_string()]]);
}

#[tokio::test]
async fn test_escaped_quote_survives_the_round_trip() {
    let (_store, runner) = runner().await;

    let report = runner
        .run_batch("CREATE TABLE t (v TEXT); INSERT INTO t VALUES ('a''b;c'); SELECT v FROM t")
        .await;

    assert!(report.error.is_none());
    assert_eq!(report.rows, vec![vec!["a'b;c".to_string()]]);
}

#[tokio::test]
async fn test_null_and_integer_cells_format_for_display() {
    let (_store, runner) = runner().await;

    let report = runner.run_batch("SELECT NULL AS a, 42 AS b, 'text' AS c").await;

    assert!(report.error.is_none());
    assert_eq!(report.columns, vec!["a", "b", "c"]);
    assert_eq!(
        report.rows,
        vec![vec!["NULL".to_string(), "42".to_string(), "text".to_string()]]
    );
}

#[tokio::test]
async fn test_mutation_reports_affected_row_count() {
    let (_store, runner) = runner().await;

    runner
        .run_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1); INSERT INTO t VALUES (2)")
        .await;
    let report = runner.run_batch("UPDATE t SET x = 0").await;

    assert_eq!(report.columns, vec!["Result"]);
    assert_eq!(report.rows, vec![vec!["2 row(s) affected".to_string()]]);
}

#[tokio::test]
async fn test_schema_change_reports_fixed_status() {
    let (_store, runner) = runner().await;

    let report = runner.run_batch("CREATE TABLE t (x INTEGER)").await;

    assert_eq!(report.columns, vec!["Result"]);
    assert_eq!(report.rows, vec![vec!["Query executed successfully".to_string()]]);
}

#[tokio::test]
async fn test_foreign_keys_are_relaxed_inside_a_batch_and_restored_after() {
    let (store, runner) = runner().await;

    runner
        .run_batch(
            "CREATE TABLE parent (id INTEGER PRIMARY KEY); \
             CREATE TABLE child (pid INTEGER REFERENCES parent(id))",
        )
        .await;

    // Inside a batch the orphan insert goes through.
    let report = runner.run_batch("INSERT INTO child (pid) VALUES (99)").await;
    assert!(report.error.is_none());

    // After the batch, enforcement is back on for direct statements.
    let direct = store.exec("INSERT INTO child (pid) VALUES (100)").await;
    assert!(direct.is_err());
}

#[tokio::test]
async fn test_malformed_statement_surfaces_engine_error() {
    let (_store, runner) = runner().await;

    let report = runner.run_batch("THIS IS NOT SQL").await;

    assert_eq!(report.columns, vec!["Error"]);
    assert!(report.error.is_some());
}

#[tokio::test]
async fn test_elapsed_time_is_recorded() {
    let (_store, runner) = runner().await;

    let report = runner.run_batch("SELECT 1").await;

    assert!(report.elapsed > std::time::Duration::ZERO);
}
