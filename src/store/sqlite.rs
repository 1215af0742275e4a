//! SQLite store implementation.
//!
//! Wraps a sqlx `SqlitePool` capped at a single connection so that
//! connection-scoped state (notably the foreign-key pragma) applies to the
//! same connection every statement runs on.

use crate::error::{LoupeError, Result};
use crate::store::{QueryOutput, Row, SqlStore, Value};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Executor, Row as SqlxRow, Statement, TypeInfo, ValueRef};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// SQLite-backed store.
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens an existing database file.
    ///
    /// The file is not created if missing: this is a viewer, and pointing it
    /// at a typo'd path should fail loudly rather than produce an empty
    /// database.
    pub async fn open(path: &Path) -> Result<Self> {
        let conn_str = format!("sqlite:{}", path.display());
        let options = SqliteConnectOptions::from_str(&conn_str)
            .map_err(|e| LoupeError::connection(format!("Invalid database path: {e}")))?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(false);

        let pool = Self::connect_with(options).await.map_err(|e| {
            LoupeError::connection(format!("Failed to open {}: {e}", path.display()))
        })?;

        debug!("Opened database at {}", path.display());
        Ok(Self { pool })
    }

    /// Opens a fresh in-memory database. Used by tests.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| LoupeError::connection(format!("Invalid connection string: {e}")))?;

        let pool = Self::connect_with(options)
            .await
            .map_err(|e| LoupeError::connection(format!("Failed to open in-memory db: {e}")))?;

        Ok(Self { pool })
    }

    async fn connect_with(options: SqliteConnectOptions) -> sqlx::Result<SqlitePool> {
        // One connection: pragmas are connection-scoped, and an in-memory
        // database exists only on the connection that created it.
        SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
    }

    /// Fetches column names for a statement that returned no rows, by
    /// preparing it without execution. Best-effort: some statements cannot
    /// be described and yield no columns.
    async fn fetch_column_names(&self, sql: &str) -> Result<Vec<String>> {
        let statement = self
            .pool
            .prepare(sql)
            .await
            .map_err(|e| LoupeError::query(format_query_error(e)))?;

        Ok(statement
            .columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect())
    }
}

#[async_trait]
impl SqlStore for SqliteStore {
    async fn exec(&self, sql: &str) -> Result<u64> {
        let result = sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| LoupeError::query(format_query_error(e)))?;

        Ok(result.rows_affected())
    }

    async fn query(&self, sql: &str) -> Result<QueryOutput> {
        let fetched = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| LoupeError::query(format_query_error(e)))?;

        let columns: Vec<String> = if let Some(first_row) = fetched.first() {
            first_row
                .columns()
                .iter()
                .map(|col| col.name().to_string())
                .collect()
        } else {
            // Empty result set carries no column metadata; recover it from
            // the prepared statement.
            self.fetch_column_names(sql).await.unwrap_or_default()
        };

        let rows: Vec<Row> = fetched.iter().map(convert_row).collect();

        Ok(QueryOutput::with_data(columns, rows))
    }

    async fn set_foreign_keys(&self, enabled: bool) -> Result<()> {
        let pragma = if enabled {
            "PRAGMA foreign_keys = ON"
        } else {
            "PRAGMA foreign_keys = OFF"
        };

        sqlx::query(pragma)
            .execute(&self.pool)
            .await
            .map_err(|e| LoupeError::query(format_query_error(e)))?;

        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| LoupeError::query(format!("Failed to list tables: {e}")))
    }

    async fn table_exists(&self, name: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT count(*) FROM sqlite_master WHERE type='table' AND name=?")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| LoupeError::query(format!("Failed to check table {name}: {e}")))?;

        Ok(count > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
///
/// SQLite columns are dynamically typed, so the storage class is read per
/// value rather than from the column declaration.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let type_name = match row.try_get_raw(index) {
        Ok(raw) => {
            if raw.is_null() {
                return Value::Null;
            }
            raw.type_info().name().to_uppercase()
        }
        Err(_) => return Value::Null,
    };

    match type_name.as_str() {
        "BOOLEAN" | "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "INTEGER" | "INT" | "INT4" | "INT8" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Blob)
            .unwrap_or(Value::Null),

        // TEXT, NUMERIC, dates, and anything else: take it as a string.
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::Text)
            .unwrap_or(Value::Null),
    }
}

/// Extracts the database engine's own message when available.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
